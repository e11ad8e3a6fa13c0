/// Win32 implementation of the core's OS bridge.
pub mod bridge;

/// Ctrl+C handling for the foreground daemon.
pub mod ctrl_c;

/// The daemon message loop.
pub mod daemon;

/// Win32 window enumeration.
pub mod enumerate;

/// Low-level global keyboard hook.
pub mod keyboard;

/// Key name and virtual-key translation.
pub mod keys;

/// Monitor geometry queries.
pub mod monitor;

/// Window style, geometry, and icon primitives.
pub mod window;

pub use bridge::Win32Bridge;
pub use enumerate::enumerate_windows;
