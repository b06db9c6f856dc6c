//! Main application state management

use std::{sync::Arc, time::Instant};
use tracing::info;

use crate::{
    components::{CalculatorWidget, DisplayKind, PassiveDisplay},
    services::{Clipboard, Clock, Ticker},
};

/// Offsets of the calculator rows, top to bottom
pub const ROW_OFFSETS: [i64; 4] = [10, 0, -5, -10];
/// Independent calculators in each row
pub const CALCULATORS_PER_ROW: usize = 2;

/// Label of a calculator row, e.g. `"+10:"` or `"-5:"`
pub fn row_label(offset_seconds: i64) -> String {
    format!("{:+}:", offset_seconds)
}

/// Every component of the panel plus the shared tick source
pub struct AppState {
    pub ticker: Arc<Ticker>,
    pub clock_display: Arc<PassiveDisplay>,
    pub epoch_display: Arc<PassiveDisplay>,
    /// Row-major: calculator `id` lives in row `id / CALCULATORS_PER_ROW`
    pub calculators: Vec<Arc<CalculatorWidget>>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
}

impl AppState {
    /// Build the panel. Passive displays render immediately and stay
    /// subscribed to `ticker` for the life of the process.
    pub fn new(
        port: u16,
        host: String,
        clock: Arc<dyn Clock>,
        clipboard: Arc<dyn Clipboard>,
        ticker: Arc<Ticker>,
    ) -> Result<Self, String> {
        let clock_display = PassiveDisplay::start(DisplayKind::Clock, Arc::clone(&clock), &ticker)?;
        let epoch_display = PassiveDisplay::start(DisplayKind::Epoch, Arc::clone(&clock), &ticker)?;

        let calculators = ROW_OFFSETS
            .iter()
            .flat_map(|&offset| std::iter::repeat(offset).take(CALCULATORS_PER_ROW))
            .map(|offset| {
                CalculatorWidget::new(
                    offset,
                    Arc::clone(&clock),
                    Arc::clone(&clipboard),
                    Arc::clone(&ticker),
                )
            })
            .collect::<Vec<_>>();

        info!(
            "Panel ready: {} calculators across offsets {:?}",
            calculators.len(),
            ROW_OFFSETS
        );

        Ok(Self {
            ticker,
            clock_display,
            epoch_display,
            calculators,
            start_time: Instant::now(),
            port,
            host,
        })
    }

    pub fn calculator(&self, id: usize) -> Option<&Arc<CalculatorWidget>> {
        self.calculators.get(id)
    }

    pub fn display(&self, kind: DisplayKind) -> &Arc<PassiveDisplay> {
        match kind {
            DisplayKind::Clock => &self.clock_display,
            DisplayKind::Epoch => &self.epoch_display,
        }
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{ManualClock, MemoryClipboard};

    fn state() -> AppState {
        AppState::new(
            0,
            "127.0.0.1".to_string(),
            Arc::new(ManualClock::at_seconds(1_700_000_000).unwrap()),
            Arc::new(MemoryClipboard::new()),
            Arc::new(Ticker::new()),
        )
        .unwrap()
    }

    #[test]
    fn builds_two_calculators_per_offset() {
        let state = state();
        assert_eq!(state.calculators.len(), 8);
        let offsets: Vec<i64> = state
            .calculators
            .iter()
            .map(|c| c.snapshot().unwrap().offset_seconds)
            .collect();
        assert_eq!(offsets, vec![10, 10, 0, 0, -5, -5, -10, -10]);
        assert!(state.calculator(8).is_none());
    }

    #[test]
    fn only_passive_displays_tick_at_rest() {
        let state = state();
        assert_eq!(state.ticker.subscriber_count(), 2);
        assert_eq!(state.epoch_display.snapshot().unwrap().text, "1700000000");
    }

    #[test]
    fn calculators_in_a_row_are_independent() {
        let state = state();
        state.calculators[0].set().unwrap();
        assert_eq!(state.calculators[0].snapshot().unwrap().cell.text, "10");
        assert_eq!(state.calculators[1].snapshot().unwrap().cell.text, "");
    }

    #[test]
    fn row_labels_carry_sign() {
        let labels: Vec<String> = ROW_OFFSETS.iter().map(|&o| row_label(o)).collect();
        assert_eq!(labels, vec!["+10:", "+0:", "-5:", "-10:"]);
    }
}
