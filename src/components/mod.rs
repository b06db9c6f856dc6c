//! Components composed from the core state and the injected services

pub mod calculator;
pub mod display;

// Re-export main types
pub use calculator::{CalculatorSnapshot, CalculatorWidget};
pub use display::{DisplayKind, PassiveDisplay};
