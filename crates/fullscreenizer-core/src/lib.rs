pub mod bridge;
pub mod chord;
pub mod config;
pub mod log;
pub mod rect;
pub mod registry;
pub mod scheduler;
pub mod transform;

#[cfg(test)]
mod test_bridge;

pub use bridge::{BridgeResult, IconHandle, OsBridge, Placement, StyleBits, WindowHandle};
pub use chord::{Chord, ChordDetector, KeyCode, KeyEvent, Modifiers, RawKey};
pub use rect::Rect;
pub use registry::{ClassSet, RefreshDelta, TrackedWindow, WindowRegistry};
pub use scheduler::{Scheduler, Tick};
pub use transform::{Outcome, Skip, TransformEngine, TransformOptions, Transition};
