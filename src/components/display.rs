//! Always-on clock readouts

use std::sync::{Arc, Mutex};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::{
    services::{epoch_seconds, wall_clock_text, Clock, TickHandler, Ticker},
    state::{Bounds, TextCell},
};

/// Which reading a passive display shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayKind {
    /// Local wall-clock time, `HH:MM:SS`
    Clock,
    /// Unix epoch seconds
    Epoch,
}

impl DisplayKind {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "clock" => Some(Self::Clock),
            "epoch" => Some(Self::Epoch),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Clock => "Clock:",
            Self::Epoch => "Epoch Clock:",
        }
    }

    fn font_scale(&self) -> f32 {
        match self {
            Self::Clock => 0.45,
            Self::Epoch => 0.35,
        }
    }
}

/// Display refreshed from the clock on every tick, for the whole process
/// lifetime
pub struct PassiveDisplay {
    kind: DisplayKind,
    clock: Arc<dyn Clock>,
    cell: Mutex<TextCell>,
}

impl PassiveDisplay {
    /// Render once and subscribe to the ticker
    pub fn start(
        kind: DisplayKind,
        clock: Arc<dyn Clock>,
        ticker: &Ticker,
    ) -> Result<Arc<Self>, String> {
        let display = Arc::new(Self {
            kind,
            clock,
            cell: Mutex::new(TextCell::new(0.0)),
        });
        display.refresh()?;

        let handler: Arc<dyn TickHandler> = display.clone();
        ticker.subscribe(handler)?;
        Ok(display)
    }

    pub fn kind(&self) -> DisplayKind {
        self.kind
    }

    pub fn refresh(&self) -> Result<(), String> {
        let now = self.clock.now();
        let text = match self.kind {
            DisplayKind::Clock => wall_clock_text(&now),
            DisplayKind::Epoch => epoch_seconds(&now).to_string(),
        };

        let mut cell = self
            .cell
            .lock()
            .map_err(|e| format!("Failed to lock {:?} display: {}", self.kind, e))?;
        cell.set_text(text);
        let font_size = cell.min_dimension() * self.kind.font_scale();
        cell.set_font_size(font_size);
        Ok(())
    }

    /// Place the cell and re-render at the new size
    pub fn layout(&self, bounds: Bounds) -> Result<TextCell, String> {
        {
            let mut cell = self
                .cell
                .lock()
                .map_err(|e| format!("Failed to lock {:?} display: {}", self.kind, e))?;
            cell.place(bounds);
        }
        self.refresh()?;
        self.snapshot()
    }

    pub fn snapshot(&self) -> Result<TextCell, String> {
        self.cell
            .lock()
            .map(|cell| cell.clone())
            .map_err(|e| format!("Failed to lock {:?} display: {}", self.kind, e))
    }
}

impl TickHandler for PassiveDisplay {
    fn on_tick(&self) {
        if let Err(e) = self.refresh() {
            error!("Display refresh failed: {}", e);
        }
    }
}
