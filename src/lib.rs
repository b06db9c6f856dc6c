//! Epoch Desk - a wall clock, an epoch clock and offset epoch calculators
//!
//! Each calculator either snapshots `now + offset` right away (offsets of zero
//! or less) or counts down `offset` seconds and then snapshots `now`. The
//! shown value can be copied to the clipboard by tapping it.

pub mod config;
pub mod state;
pub mod components;
pub mod api;
pub mod services;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use state::AppState;
pub use api::create_router;
pub use utils::signals::shutdown_signal;
