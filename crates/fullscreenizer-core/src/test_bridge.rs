//! In-memory OS bridge for unit tests.
//!
//! Holds a handle-keyed map of fake windows and records every
//! mutating call so tests can assert that skipped operations produce
//! no OS side effects.

use std::cell::RefCell;
use std::collections::BTreeMap;

use crate::Rect;
use crate::bridge::{BridgeResult, IconHandle, OsBridge, Placement, StyleBits, WindowHandle};

/// Stand-in for the caption/frame style bits a normal window carries.
pub(crate) const STYLE_CAPTION: u32 = 0x00C0_0000;

#[derive(Debug, Clone)]
pub(crate) struct MockWindow {
    pub class: String,
    pub title: String,
    pub style: StyleBits,
    pub rect: Rect,
    pub monitor: Rect,
    pub icon: Option<IconHandle>,
    /// Simulates a window vanishing between enumeration and lookup.
    pub class_query_fails: bool,
}

impl MockWindow {
    pub fn new(class: &str, title: &str) -> Self {
        Self {
            class: class.into(),
            title: title.into(),
            style: StyleBits(STYLE_CAPTION),
            rect: Rect::new(100, 100, 800, 600),
            monitor: Rect::new(0, 0, 1920, 1080),
            icon: None,
            class_query_fails: false,
        }
    }

    pub fn is_borderless(&self) -> bool {
        self.style.0 & STYLE_CAPTION == 0
    }
}

/// A recorded window-mutating bridge call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(dead_code)]
pub(crate) enum Call {
    SetStyle(WindowHandle, StyleBits),
    SetRect(WindowHandle, Rect, Placement),
    MakeBorderless(WindowHandle),
}

#[derive(Debug, Default)]
pub(crate) struct MockBridge {
    pub windows: RefCell<BTreeMap<WindowHandle, MockWindow>>,
    pub calls: RefCell<Vec<Call>>,
    pub released: RefCell<Vec<IconHandle>>,
}

impl MockBridge {
    pub fn insert(&self, handle: usize, window: MockWindow) {
        self.windows
            .borrow_mut()
            .insert(WindowHandle(handle), window);
    }

    pub fn remove(&self, handle: usize) {
        self.windows.borrow_mut().remove(&WindowHandle(handle));
    }

    fn with<T>(
        &self,
        handle: WindowHandle,
        f: impl FnOnce(&mut MockWindow) -> T,
    ) -> BridgeResult<T> {
        let mut windows = self.windows.borrow_mut();
        let window = windows.get_mut(&handle).ok_or("no such window")?;
        Ok(f(window))
    }
}

impl OsBridge for MockBridge {
    fn visible_windows(&self) -> BridgeResult<Vec<WindowHandle>> {
        Ok(self.windows.borrow().keys().copied().collect())
    }

    fn window_class(&self, handle: WindowHandle) -> BridgeResult<String> {
        self.with(handle, |w| {
            if w.class_query_fails {
                Err("window vanished".into())
            } else {
                Ok(w.class.clone())
            }
        })?
    }

    fn window_title(&self, handle: WindowHandle) -> BridgeResult<String> {
        self.with(handle, |w| w.title.clone())
    }

    fn window_icon(&self, handle: WindowHandle) -> Option<IconHandle> {
        self.windows.borrow().get(&handle).and_then(|w| w.icon)
    }

    fn release_icon(&self, icon: IconHandle) {
        self.released.borrow_mut().push(icon);
    }

    fn window_style(&self, handle: WindowHandle) -> BridgeResult<StyleBits> {
        self.with(handle, |w| w.style)
    }

    fn set_window_style(&self, handle: WindowHandle, style: StyleBits) -> BridgeResult<()> {
        self.calls.borrow_mut().push(Call::SetStyle(handle, style));
        self.with(handle, |w| w.style = style)
    }

    fn window_rect(&self, handle: WindowHandle) -> BridgeResult<Rect> {
        self.with(handle, |w| w.rect)
    }

    fn set_window_rect(
        &self,
        handle: WindowHandle,
        rect: Rect,
        placement: Placement,
    ) -> BridgeResult<()> {
        self.calls
            .borrow_mut()
            .push(Call::SetRect(handle, rect, placement));
        self.with(handle, |w| match placement {
            Placement::MoveAndResize => w.rect = rect,
            Placement::ResizeOnly => {
                w.rect.width = rect.width;
                w.rect.height = rect.height;
            }
            Placement::MoveOnly => {
                w.rect.x = rect.x;
                w.rect.y = rect.y;
            }
        })
    }

    fn is_fullscreen_style(&self, handle: WindowHandle) -> BridgeResult<bool> {
        self.with(handle, |w| w.rect.covers(&w.monitor))
    }

    fn is_borderless_style(&self, handle: WindowHandle) -> BridgeResult<bool> {
        self.with(handle, |w| w.is_borderless())
    }

    fn make_borderless(&self, handle: WindowHandle) -> BridgeResult<()> {
        self.calls.borrow_mut().push(Call::MakeBorderless(handle));
        self.with(handle, |w| w.style = StyleBits(w.style.0 & !STYLE_CAPTION))
    }

    fn monitor_rect(&self, handle: WindowHandle) -> BridgeResult<Rect> {
        self.with(handle, |w| w.monitor)
    }

    fn foreground_window(&self) -> Option<WindowHandle> {
        // Foreground resolution happens in the daemon, which carries
        // its own bridge double for those paths.
        None
    }
}
