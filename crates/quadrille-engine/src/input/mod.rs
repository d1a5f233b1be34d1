//! Input state tracking.
//!
//! Platform events are translated into engine events by the window runtime
//! and folded into an [`InputState`] per window. Consumers query current
//! state ("is this key down right now"); there is no edge-triggered event
//! delivery here.

mod state;
mod types;

pub use state::InputState;
pub use types::{InputEvent, Key, KeyState};
