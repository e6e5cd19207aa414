// Turning raw input into press edges.
mod recognizer;
mod router;
mod trigger;

pub use recognizer::{Press, PressRecognizer};
pub use router::{RegionId, TouchRouter};
pub use trigger::{DualEdgeTrigger, DEFAULT_HOLD_THRESHOLD};
