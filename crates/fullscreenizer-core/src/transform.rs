//! The fullscreenize transform engine.
//!
//! Toggles a tracked window between its normal layout and a
//! borderless, repositioned/rescaled layout, and restores it from the
//! saved snapshot. One global cooldown gate applies across all
//! windows.

use std::fmt;
use std::time::{Duration, Instant};

use crate::Rect;
use crate::bridge::{BridgeResult, OsBridge, Placement, WindowHandle};
use crate::registry::WindowRegistry;

/// User-configured geometry overrides.
///
/// A value of `0` means "use the monitor's own value unscaled";
/// anything else is divided by `scale / 100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeometryOverrides {
    pub width: u32,
    pub height: u32,
    /// Percentage; `0` is treated as `100` to avoid division by zero.
    pub scale: u32,
    pub move_x: u32,
    pub move_y: u32,
}

impl Default for GeometryOverrides {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
            scale: 100,
            move_x: 0,
            move_y: 0,
        }
    }
}

/// The scale/move toggles plus geometry overrides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransformOptions {
    /// Resize the window to the target dimensions.
    pub scale_window: bool,
    /// Reposition the window to the target origin.
    pub move_window: bool,
    pub geometry: GeometryOverrides,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            scale_window: true,
            move_window: true,
            geometry: GeometryOverrides::default(),
        }
    }
}

/// Computes the target geometry for a window on the given monitor.
pub fn target_geometry(monitor: Rect, overrides: &GeometryOverrides) -> Rect {
    let scale = if overrides.scale == 0 {
        100
    } else {
        overrides.scale
    };
    let scalar = scale as f32 / 100.0;
    let pick = |configured: u32, monitor_value: i32| -> i32 {
        if configured == 0 {
            monitor_value
        } else {
            (configured as f32 / scalar) as i32
        }
    };

    Rect::new(
        pick(overrides.move_x, monitor.x),
        pick(overrides.move_y, monitor.y),
        pick(overrides.width, monitor.width),
        pick(overrides.height, monitor.height),
    )
}

/// One global cooldown gate across all windows.
///
/// Deliberately not per-window. The flag is cleared on every applied
/// transform and set again by the scheduler's cooldown tick.
#[derive(Debug)]
pub struct RateLimiter {
    ready: bool,
    last_reset: Option<Instant>,
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self {
            ready: true,
            last_reset: None,
        }
    }
}

impl RateLimiter {
    pub fn can_trigger(&self) -> bool {
        self.ready
    }

    pub fn consume(&mut self) {
        self.ready = false;
    }

    /// Re-arms the gate. Driven unconditionally by the cooldown tick.
    pub fn reset(&mut self) {
        self.ready = true;
        self.last_reset = Some(Instant::now());
    }

    pub fn last_reset(&self) -> Option<Instant> {
        self.last_reset
    }
}

/// Which direction an applied transform went.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Fullscreenized,
    Restored,
}

/// Why a transform invocation was abandoned.
///
/// All of these are recoverable-by-skip: no retry is scheduled and no
/// core state is corrupted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Skip {
    /// The global cooldown has not elapsed.
    RateLimited,
    /// The window is not in the registry.
    Untracked,
    /// Fullscreen-styled but not borderless: a true exclusive-
    /// fullscreen window we must not touch.
    NativeFullscreen,
    /// Borderless without a saved snapshot, e.g. the window became
    /// borderless through external means.
    InvalidSnapshot,
    /// The window vanished mid-query.
    QueryFailed,
}

impl fmt::Display for Skip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::RateLimited => "rate-limited",
            Self::Untracked => "untracked-window",
            Self::NativeFullscreen => "native-fullscreen-window",
            Self::InvalidSnapshot => "invalid-snapshot",
            Self::QueryFailed => "transient-query-failure",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied(Transition),
    Skipped(Skip),
}

/// Computes and applies the borderless/restore geometry.
#[derive(Debug, Default)]
pub struct TransformEngine {
    options: TransformOptions,
    limiter: RateLimiter,
}

impl TransformEngine {
    pub fn new(options: TransformOptions) -> Self {
        Self {
            options,
            limiter: RateLimiter::default(),
        }
    }

    pub fn options(&self) -> &TransformOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: TransformOptions) {
        self.options = options;
    }

    /// Re-arms the rate limiter. Called from the cooldown tick.
    pub fn reset_cooldown(&mut self) {
        self.limiter.reset();
    }

    /// Time since the limiter was last re-armed, or `None` before the
    /// first cooldown tick. Logged on rate-limited skips.
    pub fn cooldown_age(&self) -> Option<Duration> {
        self.limiter.last_reset().map(|t| t.elapsed())
    }

    /// Toggles the window between normal and fullscreenized layout.
    ///
    /// Preconditions are checked in order: cooldown, registry
    /// membership, native-fullscreen detection. The cooldown is only
    /// consumed when a transform was actually applied.
    pub fn fullscreenize(
        &mut self,
        handle: WindowHandle,
        registry: &mut WindowRegistry,
        bridge: &impl OsBridge,
    ) -> Outcome {
        if !self.limiter.can_trigger() {
            return Outcome::Skipped(Skip::RateLimited);
        }
        if !registry.contains(handle) {
            return Outcome::Skipped(Skip::Untracked);
        }

        let outcome = match self.toggle(handle, registry, bridge) {
            Ok(outcome) => outcome,
            Err(_) => Outcome::Skipped(Skip::QueryFailed),
        };

        if matches!(outcome, Outcome::Applied(_)) {
            self.limiter.consume();
        }
        outcome
    }

    fn toggle(
        &self,
        handle: WindowHandle,
        registry: &mut WindowRegistry,
        bridge: &impl OsBridge,
    ) -> BridgeResult<Outcome> {
        let fullscreen = bridge.is_fullscreen_style(handle)?;
        let borderless = bridge.is_borderless_style(handle)?;

        if fullscreen && !borderless {
            return Ok(Outcome::Skipped(Skip::NativeFullscreen));
        }

        let record = registry
            .get_mut(handle)
            .ok_or("window left the registry mid-transform")?;

        if borderless {
            // Restore path.
            let Some(snapshot) = record.snapshot() else {
                return Ok(Outcome::Skipped(Skip::InvalidSnapshot));
            };
            bridge.set_window_style(handle, snapshot.style)?;
            bridge.set_window_rect(handle, snapshot.rect, Placement::MoveAndResize)?;
            return Ok(Outcome::Applied(Transition::Restored));
        }

        // Fullscreenize path. Query everything before mutating the
        // window so a vanished window leaves it untouched.
        let style = bridge.window_style(handle)?;
        let rect = bridge.window_rect(handle)?;
        let monitor = bridge.monitor_rect(handle)?;

        bridge.make_borderless(handle)?;
        // The snapshot is written only once the window has actually
        // transitioned into borderless state. Always re-captured: the
        // monitor or resolution may have changed since last time.
        record.capture_snapshot(style, rect);

        let target = target_geometry(monitor, &self.options.geometry);
        match (self.options.scale_window, self.options.move_window) {
            (true, true) => bridge.set_window_rect(handle, target, Placement::MoveAndResize)?,
            (true, false) => bridge.set_window_rect(handle, target, Placement::ResizeOnly)?,
            (false, true) => bridge.set_window_rect(handle, target, Placement::MoveOnly)?,
            // Borderless but otherwise untouched.
            (false, false) => {}
        }

        Ok(Outcome::Applied(Transition::Fullscreenized))
    }
}
