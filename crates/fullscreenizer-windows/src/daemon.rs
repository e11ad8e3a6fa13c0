//! The daemon message loop.
//!
//! All core state (registry, chord detector, transform engine) is
//! owned by this loop and mutated only here. Timer ticks, keyboard
//! events, and Ctrl+C all arrive as messages on one channel, so the
//! core never needs internal synchronization.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use fullscreenizer_core::chord::Chord;
use fullscreenizer_core::config::{self, Config, HotkeyConfig};
use fullscreenizer_core::{
    BridgeResult, ChordDetector, ClassSet, KeyEvent, OsBridge, Outcome, Scheduler, Skip, Tick,
    TransformEngine, WindowRegistry, log_debug, log_info, log_warn,
};

use crate::Win32Bridge;
use crate::ctrl_c;
use crate::keyboard::{self, KeyboardHook};
use crate::keys;

/// A message delivered into the daemon loop.
enum DaemonMsg {
    /// A raw key event from the global hook.
    Key(KeyEvent),
    /// A periodic timer event.
    Tick(Tick),
    /// Ctrl+C: persist config and exit.
    Shutdown,
}

/// Runs the daemon until Ctrl+C.
pub fn run() -> BridgeResult<()> {
    let config = config::load().map_err(|e| format!("config error: {e}"))?;
    fullscreenizer_core::log::init(&config.logging);

    log_info!("Daemon started (PID: {})", std::process::id());
    log_info!(
        "Config: hotkey(enabled={}, key={}), transform(scale={}, move={}), {} tracked classes",
        config.hotkey.enabled,
        config.hotkey.key,
        config.transform.scale_window,
        config.transform.move_window,
        config.classes.len()
    );

    let bridge = Win32Bridge;
    let scheduler = Scheduler::default();
    let classes = ClassSet::new(config.classes.clone());
    let mut registry = WindowRegistry::new();
    let mut engine = TransformEngine::new(config.transform.options());

    let hotkey_enabled = config.hotkey.enabled;
    let mut detector = ChordDetector::new(if hotkey_enabled {
        chord_from_config(&config.hotkey)
    } else {
        None
    });

    let (tx, rx) = mpsc::channel::<DaemonMsg>();
    let stop = Arc::new(AtomicBool::new(false));

    // Grab the initial windows before the first tick.
    let delta = registry.refresh(&bridge, &classes);
    log_info!(
        "Tracking {} windows ({} classes)",
        registry.len(),
        config.classes.len()
    );
    log_refresh(&delta);

    let poll_thread = spawn_tick(tx.clone(), stop.clone(), scheduler.poll_interval(), Tick::Poll);
    let cooldown_thread = spawn_tick(
        tx.clone(),
        stop.clone(),
        scheduler.cooldown_interval(),
        Tick::Cooldown,
    );

    // Forward key events into the unified channel. The hook is only
    // installed while the hotkey is enabled; disabling means no key
    // event is even delivered to the detector.
    let hook: Option<KeyboardHook> = if detector.chord().is_some() {
        let (key_tx, key_rx) = mpsc::channel::<KeyEvent>();
        let bridge_tx = tx.clone();
        thread::spawn(move || {
            for event in key_rx {
                if bridge_tx.send(DaemonMsg::Key(event)).is_err() {
                    break;
                }
            }
        });
        Some(keyboard::install(key_tx)?)
    } else {
        None
    };

    // Ctrl+C → clean shutdown.
    let (ctrl_tx, ctrl_rx) = mpsc::channel::<()>();
    ctrl_c::set_handler(ctrl_tx);
    let shutdown_tx = tx.clone();
    thread::spawn(move || {
        if ctrl_rx.recv().is_ok() {
            let _ = shutdown_tx.send(DaemonMsg::Shutdown);
        }
    });

    while let Ok(msg) = rx.recv() {
        match msg {
            DaemonMsg::Tick(Tick::Poll) => {
                let delta = registry.refresh(&bridge, &classes);
                log_refresh(&delta);
            }
            DaemonMsg::Tick(Tick::Cooldown) => {
                engine.reset_cooldown();
            }
            DaemonMsg::Key(event) => {
                if detector.on_event(event) {
                    let _ = trigger(&mut engine, &mut registry, &bridge);
                }
            }
            DaemonMsg::Shutdown => break,
        }
    }

    log_info!("Shutting down");
    stop.store(true, Ordering::Relaxed);
    if let Some(hook) = hook {
        hook.uninstall();
    }
    drop(tx);
    let _ = poll_thread.join();
    let _ = cooldown_thread.join();

    // Persist the same config shape back, as the original did on close.
    if let Err(e) = config::save(&config) {
        log_warn!("Failed to persist config: {e}");
    }

    Ok(())
}

/// Resolves the configured chord, or `None` when the key name is
/// unknown (which disables the hotkey rather than guessing).
pub fn chord_from_config(hotkey: &HotkeyConfig) -> Option<Chord> {
    let modifiers = hotkey.required_modifiers();
    if modifiers.is_empty() {
        return None;
    }
    let Some(vk) = keys::vk_from_name(&hotkey.key) else {
        log_warn!("Unknown hotkey key name: {:?}", hotkey.key);
        return None;
    };
    Some(Chord {
        modifiers,
        trigger: fullscreenizer_core::KeyCode(vk),
    })
}

/// Fullscreenizes the current foreground window.
///
/// The foreground window is resolved at trigger time, never cached;
/// with no foreground window the event is silently dropped and `None`
/// is returned.
fn trigger(
    engine: &mut TransformEngine,
    registry: &mut WindowRegistry,
    bridge: &impl OsBridge,
) -> Option<Outcome> {
    let Some(handle) = bridge.foreground_window() else {
        log_debug!("Hotkey fired with no foreground window");
        return None;
    };

    let outcome = engine.fullscreenize(handle, registry, bridge);
    match (outcome, engine.cooldown_age()) {
        (Outcome::Skipped(Skip::RateLimited), Some(age)) => {
            log_debug!(
                "0x{:X}: skipped (rate-limited, last re-arm {}ms ago)",
                handle.0,
                age.as_millis()
            );
        }
        _ => fullscreenizer_core::log::outcome(handle, &outcome),
    }
    Some(outcome)
}

/// Spawns a periodic thread delivering `tick` every `interval`.
fn spawn_tick(
    tx: mpsc::Sender<DaemonMsg>,
    stop: Arc<AtomicBool>,
    interval: Duration,
    tick: Tick,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        while !stop.load(Ordering::Relaxed) {
            thread::sleep(interval);
            if tx.send(DaemonMsg::Tick(tick)).is_err() {
                break;
            }
        }
    })
}

fn log_refresh(delta: &fullscreenizer_core::RefreshDelta) {
    for handle in &delta.added {
        log_debug!("0x{:X}: now tracked", handle.0);
    }
    for record in &delta.removed {
        log_debug!(
            "0x{:X}: no longer tracked ({})",
            record.handle.0,
            record.class
        );
    }
}

/// Applies a config edit used by the CLI `class` subcommands: loads,
/// mutates, validates, saves.
pub fn edit_config(mutate: impl FnOnce(&mut Config)) -> Result<Config, String> {
    let mut config = config::load()?;
    mutate(&mut config);
    config.validate();
    config::save(&config)?;
    Ok(config)
}
