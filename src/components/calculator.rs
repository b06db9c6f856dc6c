//! Offset epoch calculator component
//!
//! Wires an [`EpochCalculator`] to its text cell, the tick source and the
//! clipboard.

use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, error, info, warn};

use crate::{
    services::{epoch_seconds, Clipboard, Clock, SubscriptionId, TickHandler, Ticker},
    state::{Bounds, CalculatorState, EpochCalculator, Point, TextCell, Transition},
};

/// Font size while a countdown is shown
pub const COUNTDOWN_FONT_SIZE: f32 = 40.0;
/// Font size once an epoch value is shown
pub const RESULT_FONT_SIZE: f32 = 20.0;

#[derive(Debug)]
struct Inner {
    calculator: EpochCalculator,
    cell: TextCell,
    subscription: Option<SubscriptionId>,
}

/// Snapshot of a calculator for rendering
#[derive(Debug, Clone, PartialEq)]
pub struct CalculatorSnapshot {
    pub offset_seconds: i64,
    pub state: CalculatorState,
    pub cell: TextCell,
    pub ticking: bool,
}

pub struct CalculatorWidget {
    inner: Mutex<Inner>,
    clock: Arc<dyn Clock>,
    clipboard: Arc<dyn Clipboard>,
    ticker: Arc<Ticker>,
}

impl CalculatorWidget {
    pub fn new(
        offset_seconds: i64,
        clock: Arc<dyn Clock>,
        clipboard: Arc<dyn Clipboard>,
        ticker: Arc<Ticker>,
    ) -> Arc<Self> {
        let mut cell = TextCell::new(0.0);
        cell.set_font_size(layout_font_size(&cell));

        Arc::new(Self {
            inner: Mutex::new(Inner {
                calculator: EpochCalculator::new(offset_seconds),
                cell,
                subscription: None,
            }),
            clock,
            clipboard,
            ticker,
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>, String> {
        self.inner
            .lock()
            .map_err(|e| format!("Failed to lock calculator: {}", e))
    }

    fn now_epoch(&self) -> i64 {
        epoch_seconds(&self.clock.now())
    }

    /// "set" action. Starts (or restarts) the countdown for positive
    /// offsets, snapshots immediately otherwise.
    pub fn set(self: &Arc<Self>) -> Result<CalculatorSnapshot, String> {
        let mut inner = self.lock()?;

        // subscribe before changing state so a failure leaves it untouched
        if inner.calculator.offset_seconds() > 0 && inner.subscription.is_none() {
            let handler: Arc<dyn TickHandler> = self.clone();
            inner.subscription = Some(self.ticker.subscribe(handler)?);
        }

        let transition = inner.calculator.set(self.now_epoch());
        let text = inner.calculator.display_text();
        inner.cell.set_text(text);

        match transition {
            Transition::CountdownStarted => {
                inner.cell.set_font_size(COUNTDOWN_FONT_SIZE);
                info!(
                    "Calculator {:+} counting down from {}",
                    inner.calculator.offset_seconds(),
                    inner.cell.text
                );
            }
            _ => {
                inner.cell.set_font_size(RESULT_FONT_SIZE);
                info!(
                    "Calculator {:+} snapshotted {}",
                    inner.calculator.offset_seconds(),
                    inner.cell.text
                );
            }
        }

        Ok(snapshot(&inner))
    }

    /// "clear" action. Also drops the tick subscription, so a cleared
    /// countdown never snapshots later.
    pub fn clear(&self) -> Result<CalculatorSnapshot, String> {
        let mut inner = self.lock()?;
        inner.calculator.clear();
        inner.cell.set_text("");

        if let Some(id) = inner.subscription.take() {
            self.ticker.unsubscribe(id)?;
            debug!(
                "Calculator {:+} countdown cancelled",
                inner.calculator.offset_seconds()
            );
        }

        info!("Calculator {:+} cleared", inner.calculator.offset_seconds());
        Ok(snapshot(&inner))
    }

    /// Copy the shown text when the pointer lands inside the cell.
    /// Returns the text only if the clipboard accepted it.
    pub async fn tap(&self, point: Point) -> Result<Option<String>, String> {
        let text = {
            let inner = self.lock()?;
            if !inner.cell.collide_point(point) || inner.cell.text.is_empty() {
                return Ok(None);
            }
            inner.cell.text.clone()
        };

        match self.clipboard.copy(&text).await {
            Ok(()) => {
                info!("Copied {} to clipboard", text);
                Ok(Some(text))
            }
            Err(e) => {
                warn!("Failed to copy {} to clipboard: {}", text, e);
                Ok(None)
            }
        }
    }

    /// Place the cell and size the font to fill it
    pub fn layout(&self, bounds: Bounds) -> Result<CalculatorSnapshot, String> {
        let mut inner = self.lock()?;
        inner.cell.place(bounds);
        let font_size = layout_font_size(&inner.cell);
        inner.cell.set_font_size(font_size);
        Ok(snapshot(&inner))
    }

    pub fn snapshot(&self) -> Result<CalculatorSnapshot, String> {
        self.lock().map(|inner| snapshot(&inner))
    }

    fn advance(&self) -> Result<(), String> {
        let mut inner = self.lock()?;
        let transition = inner.calculator.tick(self.now_epoch());
        let text = inner.calculator.display_text();

        match transition {
            Transition::CountdownContinued => {
                inner.cell.set_text(text);
            }
            Transition::Snapshotted => {
                inner.cell.set_text(text);
                inner.cell.set_font_size(RESULT_FONT_SIZE);
                if let Some(id) = inner.subscription.take() {
                    self.ticker.unsubscribe(id)?;
                }
                info!(
                    "Calculator {:+} countdown finished at {}",
                    inner.calculator.offset_seconds(),
                    inner.cell.text
                );
            }
            _ => {
                debug!(
                    "Calculator {:+} ignored tick in state {:?}",
                    inner.calculator.offset_seconds(),
                    inner.calculator.state()
                );
            }
        }
        Ok(())
    }
}

impl TickHandler for CalculatorWidget {
    fn on_tick(&self) {
        if let Err(e) = self.advance() {
            error!("Calculator tick failed: {}", e);
        }
    }
}

fn layout_font_size(cell: &TextCell) -> f32 {
    cell.min_dimension() / 3.0
}

fn snapshot(inner: &Inner) -> CalculatorSnapshot {
    CalculatorSnapshot {
        offset_seconds: inner.calculator.offset_seconds(),
        state: inner.calculator.state(),
        cell: inner.cell.clone(),
        ticking: inner.subscription.is_some(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use async_trait::async_trait;
    use crate::{
        services::{CommandClipboard, ManualClock, MemoryClipboard},
        tasks::tick_driver_task,
    };

    const START: i64 = 1_700_000_000;

    struct Fixture {
        clock: Arc<ManualClock>,
        clipboard: Arc<MemoryClipboard>,
        ticker: Arc<Ticker>,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                clock: Arc::new(ManualClock::at_seconds(START).unwrap()),
                clipboard: Arc::new(MemoryClipboard::new()),
                ticker: Arc::new(Ticker::new()),
            }
        }

        fn widget(&self, offset: i64) -> Arc<CalculatorWidget> {
            CalculatorWidget::new(
                offset,
                self.clock.clone(),
                self.clipboard.clone(),
                self.ticker.clone(),
            )
        }

        fn tick(&self) {
            self.clock.advance_seconds(1);
            self.ticker.tick().unwrap();
        }
    }

    fn center() -> Point {
        Point { x: 50.0, y: 50.0 }
    }

    #[test]
    fn ten_second_countdown_snapshots_and_unsubscribes() {
        let fx = Fixture::new();
        let widget = fx.widget(10);

        let snap = widget.set().unwrap();
        assert_eq!(snap.state, CalculatorState::CountingDown { remaining: 10 });
        assert_eq!(snap.cell.text, "10");
        assert_eq!(snap.cell.font_size, COUNTDOWN_FONT_SIZE);
        assert_eq!(fx.ticker.subscriber_count(), 1);

        for _ in 0..9 {
            fx.tick();
        }
        assert_eq!(widget.snapshot().unwrap().cell.text, "1");

        fx.tick();
        let snap = widget.snapshot().unwrap();
        assert_eq!(snap.state, CalculatorState::Snapshotted { epoch: START + 10 });
        assert_eq!(snap.cell.text, (START + 10).to_string());
        assert_eq!(snap.cell.font_size, RESULT_FONT_SIZE);
        assert!(!snap.ticking);
        assert_eq!(fx.ticker.subscriber_count(), 0);
    }

    #[test]
    fn non_positive_offsets_never_subscribe() {
        let fx = Fixture::new();
        for offset in [0, -5, -10] {
            let snap = fx.widget(offset).set().unwrap();
            assert_eq!(snap.cell.text, (START + offset).to_string());
            assert_eq!(snap.cell.font_size, RESULT_FONT_SIZE);
        }
        assert_eq!(fx.ticker.subscriber_count(), 0);
    }

    #[test]
    fn repeated_set_restarts_without_stacking() {
        let fx = Fixture::new();
        let widget = fx.widget(10);
        widget.set().unwrap();
        fx.tick();
        fx.tick();
        assert_eq!(widget.snapshot().unwrap().cell.text, "8");

        widget.set().unwrap();
        assert_eq!(fx.ticker.subscriber_count(), 1);
        fx.tick();
        assert_eq!(widget.snapshot().unwrap().cell.text, "9");
    }

    #[test]
    fn clear_mid_countdown_cancels_the_subscription() {
        let fx = Fixture::new();
        let widget = fx.widget(10);
        widget.set().unwrap();
        fx.tick();

        let snap = widget.clear().unwrap();
        assert_eq!(snap.state, CalculatorState::Idle);
        assert_eq!(snap.cell.text, "");
        assert_eq!(fx.ticker.subscriber_count(), 0);

        for _ in 0..12 {
            fx.tick();
        }
        assert_eq!(widget.snapshot().unwrap().cell.text, "");
    }

    #[test]
    fn clear_while_idle_is_a_no_op() {
        let fx = Fixture::new();
        let snap = fx.widget(-5).clear().unwrap();
        assert_eq!(snap.state, CalculatorState::Idle);
        assert_eq!(snap.cell.text, "");
    }

    #[tokio::test]
    async fn tap_copies_only_inside_bounds_with_text() {
        let fx = Fixture::new();
        let widget = fx.widget(-10);

        assert_eq!(widget.tap(center()).await.unwrap(), None);
        assert_eq!(fx.clipboard.copy_count(), 0);

        widget.set().unwrap();
        assert_eq!(widget.tap(Point { x: 150.0, y: 50.0 }).await.unwrap(), None);
        assert_eq!(fx.clipboard.copy_count(), 0);

        let expected = (START - 10).to_string();
        assert_eq!(widget.tap(center()).await.unwrap(), Some(expected.clone()));
        assert_eq!(fx.clipboard.contents(), Some(expected));
    }

    #[tokio::test]
    async fn tap_during_countdown_copies_the_countdown_text() {
        let fx = Fixture::new();
        let widget = fx.widget(10);
        widget.set().unwrap();
        assert_eq!(widget.tap(center()).await.unwrap().as_deref(), Some("10"));
    }

    #[tokio::test]
    async fn layout_moves_hit_area_and_resizes_font() {
        let fx = Fixture::new();
        let widget = fx.widget(0);
        widget.set().unwrap();

        let snap = widget.layout(Bounds::new(200.0, 0.0, 300.0, 90.0)).unwrap();
        assert_eq!(snap.cell.font_size, 30.0);
        assert_eq!(widget.tap(center()).await.unwrap(), None);
        assert!(widget.tap(Point { x: 250.0, y: 45.0 }).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn failed_copy_is_not_reported_as_copied() {
        struct Broken;

        #[async_trait]
        impl Clipboard for Broken {
            async fn copy(&self, _text: &str) -> Result<(), String> {
                Err("no clipboard".to_string())
            }
        }

        let fx = Fixture::new();
        let widget = CalculatorWidget::new(0, fx.clock.clone(), Arc::new(Broken), fx.ticker.clone());
        widget.set().unwrap();
        assert_eq!(widget.tap(center()).await.unwrap(), None);

        let missing = CommandClipboard::new("definitely-not-a-clipboard-tool", Vec::new());
        let widget = CalculatorWidget::new(0, fx.clock.clone(), Arc::new(missing), fx.ticker.clone());
        widget.set().unwrap();
        assert_eq!(widget.tap(center()).await.unwrap(), None);
    }

    #[test]
    fn failed_subscription_leaves_calculator_idle() {
        let fx = Fixture::new();
        let widget = fx.widget(10);
        fx.ticker.poison();

        assert!(widget.set().is_err());
        let snap = widget.snapshot().unwrap();
        assert_eq!(snap.state, CalculatorState::Idle);
        assert_eq!(snap.cell.text, "");
        assert!(!snap.ticking);
    }

    #[derive(Default)]
    struct TickCounter(AtomicUsize);

    impl TickHandler for TickCounter {
        fn on_tick(&self) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[cfg(unix)]
    #[tokio::test(flavor = "current_thread")]
    async fn slow_clipboard_does_not_hold_up_ticks() {
        let ticker = Arc::new(Ticker::new());
        let counter = Arc::new(TickCounter::default());
        ticker.subscribe(counter.clone()).unwrap();

        let slow = CommandClipboard::new("sh", vec!["-c".to_string(), "sleep 2".to_string()]);
        let widget = CalculatorWidget::new(
            0,
            Arc::new(ManualClock::at_seconds(START).unwrap()),
            Arc::new(slow),
            Arc::clone(&ticker),
        );
        widget.set().unwrap();

        let driver = tokio::spawn(tick_driver_task(Arc::clone(&ticker)));
        tokio::task::yield_now().await;

        let before = counter.0.load(Ordering::SeqCst);
        let copied = widget.tap(center()).await.unwrap();
        let during = counter.0.load(Ordering::SeqCst) - before;
        driver.abort();

        assert_eq!(copied, Some(START.to_string()));
        assert!(during >= 1, "only {} ticks arrived during a 2s copy", during);
    }
}
