//! Global low-level keyboard hook.
//!
//! Installs a `WH_KEYBOARD_LL` hook on a dedicated thread running its
//! own message pump (low-level hooks require one). Raw key events are
//! translated to the core's [`KeyEvent`] and sent over a channel, so
//! the daemon loop consumes them serialized with every other message —
//! chord state is never touched from the capture thread.

use std::sync::mpsc::Sender;
use std::thread;

use fullscreenizer_core::{BridgeResult, KeyEvent};

use windows::Win32::Foundation::{LPARAM, LRESULT, WPARAM};
use windows::Win32::UI::WindowsAndMessaging::{
    CallNextHookEx, DispatchMessageW, GetMessageW, KBDLLHOOKSTRUCT, MSG, PostThreadMessageW,
    SetWindowsHookExW, TranslateMessage, UnhookWindowsHookEx, WH_KEYBOARD_LL, WM_KEYDOWN,
    WM_KEYUP, WM_QUIT, WM_SYSKEYDOWN, WM_SYSKEYUP,
};

use crate::keys;

// Thread-local sender for the hook callback; the callback runs on the
// thread that installed the hook.
thread_local! {
    static KEY_SENDER: std::cell::RefCell<Option<Sender<KeyEvent>>> =
        const { std::cell::RefCell::new(None) };
}

/// Handle to an installed keyboard hook.
///
/// Uninstalling tears down the hook and its pump thread; the caller
/// keeps the configured chord, so re-installing restores identical
/// behavior.
pub struct KeyboardHook {
    thread_id: u32,
    handle: thread::JoinHandle<()>,
}

impl KeyboardHook {
    /// Uninstalls the hook and waits for the pump thread to finish.
    pub fn uninstall(self) {
        unsafe {
            let _ = PostThreadMessageW(self.thread_id, WM_QUIT, WPARAM(0), LPARAM(0));
        }
        let _ = self.handle.join();
    }
}

/// Installs the global keyboard hook on a new thread.
///
/// Key events are sent through `event_tx` until the hook is
/// uninstalled.
pub fn install(event_tx: Sender<KeyEvent>) -> BridgeResult<KeyboardHook> {
    let (ready_tx, ready_rx) = std::sync::mpsc::channel::<Result<u32, String>>();

    let handle = thread::spawn(move || {
        KEY_SENDER.with(|cell| {
            *cell.borrow_mut() = Some(event_tx);
        });

        let thread_id = unsafe { windows::Win32::System::Threading::GetCurrentThreadId() };

        // SAFETY: SetWindowsHookExW installs a system-wide low-level
        // keyboard hook. A null module handle is valid for LL hooks;
        // the callback runs on this thread via its message pump.
        let hook = match unsafe { SetWindowsHookExW(WH_KEYBOARD_LL, Some(keyboard_proc), None, 0) }
        {
            Ok(hook) => hook,
            Err(e) => {
                let _ = ready_tx.send(Err(format!("failed to install keyboard hook: {e}")));
                return;
            }
        };

        let _ = ready_tx.send(Ok(thread_id));

        run_message_pump();

        // SAFETY: UnhookWindowsHookEx removes the hook registration.
        unsafe {
            let _ = UnhookWindowsHookEx(hook);
        }
    });

    let thread_id: u32 = ready_rx
        .recv()
        .map_err(|_| -> Box<dyn std::error::Error> {
            "keyboard hook thread exited unexpectedly".into()
        })?
        .map_err(|e| -> Box<dyn std::error::Error> { e.into() })?;

    Ok(KeyboardHook { thread_id, handle })
}

/// The Win32 message pump. Blocks until WM_QUIT is received.
fn run_message_pump() {
    let mut msg = MSG::default();

    while unsafe { GetMessageW(&mut msg, None, 0, 0).as_bool() } {
        unsafe {
            let _ = TranslateMessage(&msg);
            DispatchMessageW(&msg);
        }
    }
}

/// The `WH_KEYBOARD_LL` callback.
///
/// Translates the raw virtual key into the core's folded
/// representation and forwards it; the event is never swallowed, so
/// other applications see every key.
unsafe extern "system" fn keyboard_proc(code: i32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    if code >= 0 {
        // SAFETY: for WH_KEYBOARD_LL, lparam points to a KBDLLHOOKSTRUCT.
        let info = unsafe { &*(lparam.0 as *const KBDLLHOOKSTRUCT) };
        let key = keys::raw_key_from_vk(info.vkCode);

        let event = match wparam.0 as u32 {
            WM_KEYDOWN | WM_SYSKEYDOWN => Some(KeyEvent::Down(key)),
            WM_KEYUP | WM_SYSKEYUP => Some(KeyEvent::Up(key)),
            _ => None,
        };

        if let Some(event) = event {
            KEY_SENDER.with(|cell| {
                if let Some(sender) = cell.borrow().as_ref() {
                    let _ = sender.send(event);
                }
            });
        }
    }

    unsafe { CallNextHookEx(None, code, wparam, lparam) }
}
