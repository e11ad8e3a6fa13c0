use fullscreenizer_core::{BridgeResult, Rect, StyleBits};

use windows::Win32::Foundation::{HWND, LPARAM, RECT, WPARAM};
use windows::Win32::UI::WindowsAndMessaging::{
    CopyIcon, DestroyIcon, GCLP_HICON, GCLP_HICONSM, GWL_STYLE, GetClassLongPtrW, GetWindowLongPtrW,
    GetWindowRect, GetWindowTextLengthW, GetWindowTextW, HICON, ICON_BIG, ICON_SMALL,
    IsWindowVisible, RealGetWindowClassW, SWP_FRAMECHANGED, SWP_NOACTIVATE, SWP_NOMOVE,
    SWP_NOSIZE, SWP_NOZORDER, SendMessageW, SetWindowLongPtrW, SetWindowPos, WM_GETICON,
    WS_CAPTION, WS_MAXIMIZEBOX, WS_MINIMIZEBOX, WS_SYSMENU, WS_THICKFRAME,
};

use fullscreenizer_core::Placement;

/// The style bits that give a window its title bar and resizable
/// frame. A window carrying none of them is considered borderless.
const FRAME_STYLE: u32 =
    WS_CAPTION.0 | WS_THICKFRAME.0 | WS_MINIMIZEBOX.0 | WS_MAXIMIZEBOX.0 | WS_SYSMENU.0;

/// A window on the Windows platform, wrapping a Win32 `HWND`.
///
/// `HWND` is an opaque handle; this struct holds it and queries the
/// OS lazily for metadata.
#[derive(Debug, Clone, Copy)]
pub struct Window {
    hwnd: HWND,
}

impl Window {
    pub fn new(hwnd: HWND) -> Self {
        Self { hwnd }
    }

    /// Creates a `Window` from a raw handle value (pointer-sized
    /// integer), so callers need not depend on the `windows` crate.
    pub fn from_raw(handle: usize) -> Self {
        Self {
            hwnd: HWND(handle as *mut _),
        }
    }

    /// Returns the raw handle value.
    pub fn raw(&self) -> usize {
        self.hwnd.0 as usize
    }

    pub fn hwnd(&self) -> HWND {
        self.hwnd
    }

    pub fn is_visible(&self) -> bool {
        // SAFETY: IsWindowVisible is a simple query that returns a BOOL.
        unsafe { IsWindowVisible(self.hwnd).as_bool() }
    }

    pub fn title(&self) -> BridgeResult<String> {
        // SAFETY: GetWindowTextLengthW and GetWindowTextW are safe to
        // call with a valid HWND. They read window text without
        // modifying state.
        unsafe {
            let length = GetWindowTextLengthW(self.hwnd);
            if length == 0 {
                return Ok(String::new());
            }

            // +1 for the null terminator that Windows requires
            let mut buffer = vec![0u16; (length + 1) as usize];
            let copied = GetWindowTextW(self.hwnd, &mut buffer);
            Ok(String::from_utf16_lossy(&buffer[..copied as usize]))
        }
    }

    pub fn class(&self) -> BridgeResult<String> {
        // SAFETY: RealGetWindowClassW reads the window class name.
        // 256 is the maximum class name length in Win32.
        unsafe {
            let mut buffer = [0u16; 256];
            let length = RealGetWindowClassW(self.hwnd, &mut buffer);
            if length == 0 {
                return Err("window vanished before its class could be read".into());
            }
            Ok(String::from_utf16_lossy(&buffer[..length as usize]))
        }
    }

    pub fn style(&self) -> BridgeResult<StyleBits> {
        // SAFETY: GetWindowLongPtrW reads the window style.
        let style = unsafe { GetWindowLongPtrW(self.hwnd, GWL_STYLE) };
        if style == 0 {
            return Err("failed to read window style".into());
        }
        Ok(StyleBits(style as u32))
    }

    pub fn set_style(&self, style: StyleBits) -> BridgeResult<()> {
        // SAFETY: SetWindowLongPtrW replaces the style bitmask; the
        // new frame takes effect on the next SWP_FRAMECHANGED.
        unsafe {
            SetWindowLongPtrW(self.hwnd, GWL_STYLE, style.0 as isize);
        }
        Ok(())
    }

    pub fn rect(&self) -> BridgeResult<Rect> {
        let mut rc = RECT::default();
        // SAFETY: GetWindowRect fills the RECT for a valid HWND.
        unsafe { GetWindowRect(self.hwnd, &mut rc)? };
        Ok(Rect::new(
            rc.left,
            rc.top,
            rc.right - rc.left,
            rc.bottom - rc.top,
        ))
    }

    /// Applies the rectangle according to the placement, always with
    /// a forced frame-changed refresh so the non-client area repaints
    /// after style changes.
    pub fn set_rect(&self, rect: Rect, placement: Placement) -> BridgeResult<()> {
        let mut flags = SWP_NOZORDER | SWP_NOACTIVATE | SWP_FRAMECHANGED;
        match placement {
            Placement::MoveAndResize => {}
            Placement::ResizeOnly => flags |= SWP_NOMOVE,
            Placement::MoveOnly => flags |= SWP_NOSIZE,
        }

        // SAFETY: SetWindowPos with a valid HWND is safe.
        unsafe {
            SetWindowPos(
                self.hwnd,
                None,
                rect.x,
                rect.y,
                rect.width,
                rect.height,
                flags,
            )?;
        }
        Ok(())
    }

    /// Whether the style lacks every caption/frame bit.
    pub fn is_borderless(&self) -> BridgeResult<bool> {
        Ok(self.style()?.0 & FRAME_STYLE == 0)
    }

    /// Strips the caption and frame bits without repositioning.
    pub fn make_borderless(&self) -> BridgeResult<()> {
        let style = self.style()?;
        self.set_style(StyleBits(style.0 & !FRAME_STYLE))
    }

    /// Fetches a private copy of the window's icon.
    ///
    /// `WM_GETICON` and the class icon are owned by the window, so the
    /// handle is copied; the copy must be released with
    /// [`destroy_icon`] when the tracking record is dropped.
    pub fn icon(&self) -> Option<HICON> {
        // SAFETY: SendMessageW with WM_GETICON returns an HICON (or 0)
        // and GetClassLongPtrW reads the class icon. CopyIcon gives us
        // a handle we own.
        unsafe {
            let mut icon = SendMessageW(
                self.hwnd,
                WM_GETICON,
                Some(WPARAM(ICON_SMALL as usize)),
                Some(LPARAM(0)),
            )
            .0;
            if icon == 0 {
                icon = SendMessageW(
                    self.hwnd,
                    WM_GETICON,
                    Some(WPARAM(ICON_BIG as usize)),
                    Some(LPARAM(0)),
                )
                .0;
            }
            if icon == 0 {
                icon = GetClassLongPtrW(self.hwnd, GCLP_HICONSM) as isize;
            }
            if icon == 0 {
                icon = GetClassLongPtrW(self.hwnd, GCLP_HICON) as isize;
            }
            if icon == 0 {
                return None;
            }
            CopyIcon(HICON(icon as *mut _)).ok()
        }
    }
}

/// Releases an icon copy obtained from [`Window::icon`].
pub fn destroy_icon(icon: HICON) {
    // SAFETY: DestroyIcon frees an icon we own; failure is harmless.
    unsafe {
        let _ = DestroyIcon(icon);
    }
}
