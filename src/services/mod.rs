//! Collaborators injected into the components
//!
//! The clock, the clipboard and the tick source are all behind small
//! interfaces so tests can drive them deterministically.

pub mod clipboard;
pub mod clock;
pub mod ticker;

// Re-export main types
pub use clipboard::{Clipboard, CommandClipboard, MemoryClipboard};
pub use clock::{epoch_seconds, wall_clock_text, Clock, ManualClock, SystemClock};
pub use ticker::{SubscriptionId, TickHandler, Ticker};
