use fullscreenizer_core::BridgeResult;

use windows::Win32::Foundation::{HWND, LPARAM};
use windows::Win32::UI::WindowsAndMessaging::{EnumWindows, IsWindowVisible};
use windows::core::BOOL;

use crate::window::Window;

/// Enumerates all visible top-level windows.
///
/// This calls the Win32 `EnumWindows` API, which iterates over every
/// top-level window and invokes a callback for each one. Filtering by
/// window class happens in the registry, so only visibility is
/// checked here.
pub fn enumerate_windows() -> BridgeResult<Vec<Window>> {
    let mut windows: Vec<Window> = Vec::new();

    // SAFETY: EnumWindows calls our callback for each top-level window.
    // We pass a pointer to our Vec as LPARAM (user data). The callback
    // casts it back to &mut Vec<Window> to collect results. This is safe
    // because EnumWindows runs synchronously — the Vec outlives the call.
    unsafe {
        EnumWindows(
            Some(enum_window_callback),
            LPARAM(&mut windows as *mut _ as isize),
        )?;
    }

    Ok(windows)
}

/// Callback invoked by `EnumWindows` for each top-level window.
///
/// Returns `TRUE` to continue enumeration. Win32 can't call Rust
/// closures directly, so the collection Vec travels through the
/// `LPARAM` user-data pointer.
unsafe extern "system" fn enum_window_callback(hwnd: HWND, lparam: LPARAM) -> BOOL {
    // SAFETY: lparam is a pointer to our Vec<Window>, cast from enumerate_windows().
    let windows = unsafe { &mut *(lparam.0 as *mut Vec<Window>) };

    // SAFETY: IsWindowVisible is a simple query returning a BOOL.
    if unsafe { IsWindowVisible(hwnd).as_bool() } {
        windows.push(Window::new(hwnd));
    }

    BOOL(1) // TRUE — continue enumerating
}
