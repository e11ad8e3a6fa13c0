use crate::Rect;

/// A boxed error type for OS bridge operations.
///
/// Any error type that implements the `Error` trait can be boxed into
/// this. Bridge failures are always recoverable-by-skip for the core:
/// the affected operation is abandoned for that invocation only.
pub type BridgeResult<T> = Result<T, Box<dyn std::error::Error>>;

/// An opaque native window identifier.
///
/// On Windows this wraps an `HWND` as a pointer-sized integer so the
/// core never depends on the `windows` crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WindowHandle(pub usize);

/// An opaque window style bitmask.
///
/// The core never interprets individual bits; it only saves a style
/// before fullscreenizing and hands the same value back on restore.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleBits(pub u32);

/// An opaque handle to a cached window icon.
///
/// Must be released through [`OsBridge::release_icon`] when the
/// owning registry record is destroyed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconHandle(pub usize);

/// Which parts of a window's geometry a `set_window_rect` call applies.
///
/// Every variant forces a frame-changed refresh so the window repaints
/// its non-client area after the style change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Reposition and resize.
    MoveAndResize,
    /// Resize to the target dimensions; keep the current position.
    ResizeOnly,
    /// Reposition to the target origin; keep the current size.
    MoveOnly,
}

/// The OS primitives the core consumes.
///
/// Implemented by the platform crate (`fullscreenizer-windows`) and by
/// an in-memory mock in tests. All calls are synchronous and
/// bounded-latency; none of them suspends.
pub trait OsBridge {
    /// Enumerates the handles of all currently visible top-level windows.
    fn visible_windows(&self) -> BridgeResult<Vec<WindowHandle>>;

    /// Returns the window's class name.
    ///
    /// Fails if the window vanished since enumeration.
    fn window_class(&self, handle: WindowHandle) -> BridgeResult<String>;

    /// Returns the window's title text.
    fn window_title(&self, handle: WindowHandle) -> BridgeResult<String>;

    /// Fetches the window's icon, if it has one.
    fn window_icon(&self, handle: WindowHandle) -> Option<IconHandle>;

    /// Releases an icon previously returned by [`Self::window_icon`].
    fn release_icon(&self, icon: IconHandle);

    /// Returns the window's current style bitmask.
    fn window_style(&self, handle: WindowHandle) -> BridgeResult<StyleBits>;

    /// Replaces the window's style bitmask.
    fn set_window_style(&self, handle: WindowHandle, style: StyleBits) -> BridgeResult<()>;

    /// Returns the window's current bounding rectangle.
    fn window_rect(&self, handle: WindowHandle) -> BridgeResult<Rect>;

    /// Applies the given rectangle according to `placement`, with a
    /// forced frame-changed refresh.
    fn set_window_rect(
        &self,
        handle: WindowHandle,
        rect: Rect,
        placement: Placement,
    ) -> BridgeResult<()>;

    /// Returns whether the window's geometry covers its whole monitor.
    fn is_fullscreen_style(&self, handle: WindowHandle) -> BridgeResult<bool>;

    /// Returns whether the window's style lacks a title bar and frame.
    fn is_borderless_style(&self, handle: WindowHandle) -> BridgeResult<bool>;

    /// Strips the window's border and title-bar style without
    /// repositioning it.
    fn make_borderless(&self, handle: WindowHandle) -> BridgeResult<()>;

    /// Returns the bounding rectangle of the monitor currently hosting
    /// the window.
    fn monitor_rect(&self, handle: WindowHandle) -> BridgeResult<Rect>;

    /// Returns the current foreground window, if any.
    fn foreground_window(&self) -> Option<WindowHandle>;
}
