use std::mem;

use fullscreenizer_core::{BridgeResult, Rect};
use windows::Win32::Foundation::HWND;
use windows::Win32::Graphics::Gdi::{
    GetMonitorInfoW, MONITOR_DEFAULTTONEAREST, MONITORINFO, MonitorFromWindow,
};

/// Returns the full bounding rectangle of the monitor hosting the
/// given window.
///
/// Deliberately `rcMonitor` rather than the work area: fullscreenized
/// windows are meant to cover the taskbar too.
pub fn monitor_rect_for_window(hwnd: HWND) -> BridgeResult<Rect> {
    // MONITOR_DEFAULTTONEAREST: a window straddling monitors (or
    // partly off-screen) resolves to the monitor it mostly occupies.
    let monitor = unsafe { MonitorFromWindow(hwnd, MONITOR_DEFAULTTONEAREST) };

    let mut info = MONITORINFO {
        cbSize: mem::size_of::<MONITORINFO>() as u32,
        ..Default::default()
    };

    // SAFETY: GetMonitorInfoW fills the MONITORINFO struct with
    // monitor dimensions. We set cbSize as required by the API.
    let success = unsafe { GetMonitorInfoW(monitor, &mut info) };

    if !success.as_bool() {
        return Err("Failed to get monitor info".into());
    }

    let rc = info.rcMonitor;
    Ok(Rect::new(
        rc.left,
        rc.top,
        rc.right - rc.left,
        rc.bottom - rc.top,
    ))
}
