// Pad state machines and the session state they share.
mod controller;
mod mode;
mod registry;

pub use controller::{ContentState, PadController};
pub use mode::InteractionMode;
pub use registry::PadRegistry;
