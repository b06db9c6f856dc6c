//! Countdown-to-epoch calculator state machine
//!
//! Pure state: no clock, ticker or rendering. Callers feed in the current
//! epoch seconds and react to the returned [`Transition`].

use serde::{Deserialize, Serialize};

/// Calculator state. The displayed text is derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum CalculatorState {
    Idle,
    /// `remaining >= 1`, only reachable with a positive offset
    CountingDown { remaining: u64 },
    Snapshotted { epoch: i64 },
}

/// What a single action did to the calculator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// A countdown started, or restarted from the full offset
    CountdownStarted,
    /// One second elapsed and the countdown is still running
    CountdownContinued,
    /// The calculator now holds a fixed epoch value
    Snapshotted,
    Cleared,
    /// A tick arrived while no countdown was running
    Ignored,
}

/// One countdown/snapshot calculator with a fixed offset
#[derive(Debug, Clone)]
pub struct EpochCalculator {
    offset_seconds: i64,
    state: CalculatorState,
}

impl EpochCalculator {
    /// Create an idle calculator
    pub fn new(offset_seconds: i64) -> Self {
        Self {
            offset_seconds,
            state: CalculatorState::Idle,
        }
    }

    pub fn offset_seconds(&self) -> i64 {
        self.offset_seconds
    }

    pub fn state(&self) -> CalculatorState {
        self.state
    }

    pub fn is_counting_down(&self) -> bool {
        matches!(self.state, CalculatorState::CountingDown { .. })
    }

    /// Handle the "set" action.
    ///
    /// A positive offset (re)starts a countdown of `offset` ticks. Any other
    /// offset snapshots `now + offset` immediately.
    pub fn set(&mut self, now_epoch: i64) -> Transition {
        if self.offset_seconds > 0 {
            self.state = CalculatorState::CountingDown {
                remaining: self.offset_seconds.unsigned_abs(),
            };
            Transition::CountdownStarted
        } else {
            self.state = CalculatorState::Snapshotted {
                epoch: now_epoch.saturating_add(self.offset_seconds),
            };
            Transition::Snapshotted
        }
    }

    /// Handle one elapsed second.
    ///
    /// On reaching zero the snapshot is `now` as-is: the delay already
    /// provided the offset.
    pub fn tick(&mut self, now_epoch: i64) -> Transition {
        match self.state {
            CalculatorState::CountingDown { remaining } => {
                let remaining = remaining.saturating_sub(1);
                if remaining == 0 {
                    self.state = CalculatorState::Snapshotted { epoch: now_epoch };
                    Transition::Snapshotted
                } else {
                    self.state = CalculatorState::CountingDown { remaining };
                    Transition::CountdownContinued
                }
            }
            CalculatorState::Idle | CalculatorState::Snapshotted { .. } => Transition::Ignored,
        }
    }

    /// Handle the "clear" action, valid from any state
    pub fn clear(&mut self) -> Transition {
        self.state = CalculatorState::Idle;
        Transition::Cleared
    }

    /// Text shown for the current state
    pub fn display_text(&self) -> String {
        match self.state {
            CalculatorState::Idle => String::new(),
            CalculatorState::CountingDown { remaining } => remaining.to_string(),
            CalculatorState::Snapshotted { epoch } => epoch.to_string(),
        }
    }
}
