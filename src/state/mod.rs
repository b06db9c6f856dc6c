//! State management module
//!
//! The calculator state machine and display cells carry no dependency on
//! the clock, the tick source or any renderer.

pub mod app_state;
pub mod calculator;
pub mod text_cell;

// Re-export main types
pub use app_state::{row_label, AppState, CALCULATORS_PER_ROW, ROW_OFFSETS};
pub use calculator::{CalculatorState, EpochCalculator, Transition};
pub use text_cell::{Bounds, Point, TextCell};
