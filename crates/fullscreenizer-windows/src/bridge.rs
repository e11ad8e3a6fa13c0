use fullscreenizer_core::bridge::{
    BridgeResult, IconHandle, OsBridge, Placement, StyleBits, WindowHandle,
};
use fullscreenizer_core::Rect;

use windows::Win32::UI::WindowsAndMessaging::{GetForegroundWindow, HICON};

use crate::enumerate;
use crate::monitor;
use crate::window::{self, Window};

/// The Win32 implementation of the core's OS bridge.
///
/// Stateless; every call resolves the handle fresh, so a vanished
/// window surfaces as a query error rather than stale data.
#[derive(Debug, Clone, Copy, Default)]
pub struct Win32Bridge;

fn win(handle: WindowHandle) -> Window {
    Window::from_raw(handle.0)
}

impl OsBridge for Win32Bridge {
    fn visible_windows(&self) -> BridgeResult<Vec<WindowHandle>> {
        Ok(enumerate::enumerate_windows()?
            .iter()
            .map(|w| WindowHandle(w.raw()))
            .collect())
    }

    fn window_class(&self, handle: WindowHandle) -> BridgeResult<String> {
        win(handle).class()
    }

    fn window_title(&self, handle: WindowHandle) -> BridgeResult<String> {
        win(handle).title()
    }

    fn window_icon(&self, handle: WindowHandle) -> Option<IconHandle> {
        win(handle).icon().map(|icon| IconHandle(icon.0 as usize))
    }

    fn release_icon(&self, icon: IconHandle) {
        window::destroy_icon(HICON(icon.0 as *mut _));
    }

    fn window_style(&self, handle: WindowHandle) -> BridgeResult<StyleBits> {
        win(handle).style()
    }

    fn set_window_style(&self, handle: WindowHandle, style: StyleBits) -> BridgeResult<()> {
        win(handle).set_style(style)
    }

    fn window_rect(&self, handle: WindowHandle) -> BridgeResult<Rect> {
        win(handle).rect()
    }

    fn set_window_rect(
        &self,
        handle: WindowHandle,
        rect: Rect,
        placement: Placement,
    ) -> BridgeResult<()> {
        win(handle).set_rect(rect, placement)
    }

    fn is_fullscreen_style(&self, handle: WindowHandle) -> BridgeResult<bool> {
        // A window whose rect covers its whole monitor is treated as
        // fullscreen; combined with the borderless check this
        // identifies exclusive-fullscreen applications.
        let rect = win(handle).rect()?;
        let monitor = monitor::monitor_rect_for_window(win(handle).hwnd())?;
        Ok(rect.covers(&monitor))
    }

    fn is_borderless_style(&self, handle: WindowHandle) -> BridgeResult<bool> {
        win(handle).is_borderless()
    }

    fn make_borderless(&self, handle: WindowHandle) -> BridgeResult<()> {
        win(handle).make_borderless()
    }

    fn monitor_rect(&self, handle: WindowHandle) -> BridgeResult<Rect> {
        monitor::monitor_rect_for_window(win(handle).hwnd())
    }

    fn foreground_window(&self) -> Option<WindowHandle> {
        // SAFETY: GetForegroundWindow is a simple query; it returns a
        // null HWND when no window has focus.
        let hwnd = unsafe { GetForegroundWindow() };
        if hwnd.is_invalid() {
            return None;
        }
        Some(WindowHandle(hwnd.0 as usize))
    }
}
