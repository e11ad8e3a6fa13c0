use std::collections::{BTreeMap, HashSet};

use crate::Rect;
use crate::bridge::{IconHandle, OsBridge, StyleBits, WindowHandle};

/// The ordered set of window classes the user wants tracked.
///
/// Membership is the sole predicate the registry uses to accept or
/// reject discovered windows, and it is re-evaluated on every refresh
/// so removing a class prunes records whose windows are still visible.
#[derive(Debug, Clone, Default)]
pub struct ClassSet {
    classes: Vec<String>,
}

impl ClassSet {
    pub fn new(classes: Vec<String>) -> Self {
        let mut set = Self { classes: Vec::new() };
        for class in classes {
            set.add(class);
        }
        set
    }

    pub fn contains(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Adds a class. Returns `false` if it was already present.
    pub fn add(&mut self, class: impl Into<String>) -> bool {
        let class = class.into();
        if class.trim().is_empty() || self.contains(&class) {
            return false;
        }
        self.classes.push(class);
        true
    }

    /// Removes a class. Returns `false` if it was not present.
    pub fn remove(&mut self, class: &str) -> bool {
        let before = self.classes.len();
        self.classes.retain(|c| c != class);
        self.classes.len() != before
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

/// The saved pre-transform style and rectangle of a window.
///
/// Captured at the moment of transition into borderless state and
/// required to restore the window later.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot {
    pub style: StyleBits,
    pub rect: Rect,
}

/// One tracked native window.
///
/// Exists in the registry iff the handle is currently visible and its
/// class is in the tracked set.
#[derive(Debug)]
pub struct TrackedWindow {
    pub handle: WindowHandle,
    /// Display text, refreshed on every poll.
    pub title: String,
    /// Immutable for the record's lifetime.
    pub class: String,
    /// Cached icon, released when the record is destroyed.
    pub icon: Option<IconHandle>,
    snapshot: Option<Snapshot>,
}

impl TrackedWindow {
    /// The saved geometry, or `None` if the window has never been
    /// fullscreenized by us.
    pub fn snapshot(&self) -> Option<Snapshot> {
        self.snapshot
    }

    /// Overwrites the saved geometry. Called on every transition into
    /// borderless state — the monitor or resolution may have changed
    /// since the last capture.
    pub fn capture_snapshot(&mut self, style: StyleBits, rect: Rect) {
        self.snapshot = Some(Snapshot { style, rect });
    }
}

/// Records added and removed by one refresh pass, in discovery order.
#[derive(Debug, Default)]
pub struct RefreshDelta {
    pub added: Vec<WindowHandle>,
    pub removed: Vec<TrackedWindow>,
}

impl RefreshDelta {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// Tracks candidate windows against the user's class allow-list.
///
/// One owned map from handle to record; the handle-ordered iteration
/// an ordered view needs falls out of the `BTreeMap` for free.
#[derive(Debug, Default)]
pub struct WindowRegistry {
    windows: BTreeMap<WindowHandle, TrackedWindow>,
}

impl WindowRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reconciles the registry against the currently visible windows.
    ///
    /// New visible windows whose class is tracked are added. Records
    /// whose handle is gone or whose class is no longer tracked are
    /// removed and their icons released. Surviving records get their
    /// title refreshed; class and snapshot are not re-queried.
    ///
    /// A window that disappears mid-query (class lookup fails) is
    /// skipped for this cycle, not retried.
    pub fn refresh(&mut self, bridge: &impl OsBridge, classes: &ClassSet) -> RefreshDelta {
        let Ok(visible) = bridge.visible_windows() else {
            // Enumeration failed; prune nothing on a blind cycle.
            return RefreshDelta::default();
        };

        let mut delta = RefreshDelta::default();

        for &handle in &visible {
            if self.windows.contains_key(&handle) {
                continue;
            }
            let Ok(class) = bridge.window_class(handle) else {
                continue;
            };
            if !classes.contains(&class) {
                continue;
            }
            let title = bridge.window_title(handle).unwrap_or_default();
            let icon = bridge.window_icon(handle);
            self.windows.insert(
                handle,
                TrackedWindow {
                    handle,
                    title,
                    class,
                    icon,
                    snapshot: None,
                },
            );
            delta.added.push(handle);
        }

        let visible: HashSet<WindowHandle> = visible.into_iter().collect();
        let stale: Vec<WindowHandle> = self
            .windows
            .values()
            .filter(|w| !visible.contains(&w.handle) || !classes.contains(&w.class))
            .map(|w| w.handle)
            .collect();

        for handle in stale {
            if let Some(mut record) = self.windows.remove(&handle) {
                if let Some(icon) = record.icon.take() {
                    bridge.release_icon(icon);
                }
                delta.removed.push(record);
            }
        }

        for record in self.windows.values_mut() {
            // Keep the old title if the query transiently fails.
            if let Ok(title) = bridge.window_title(record.handle) {
                record.title = title;
            }
        }

        delta
    }

    pub fn contains(&self, handle: WindowHandle) -> bool {
        self.windows.contains_key(&handle)
    }

    pub fn get(&self, handle: WindowHandle) -> Option<&TrackedWindow> {
        self.windows.get(&handle)
    }

    pub fn get_mut(&mut self, handle: WindowHandle) -> Option<&mut TrackedWindow> {
        self.windows.get_mut(&handle)
    }

    /// Drops every record of the given class and releases its icon.
    ///
    /// Used when the user removes a class outside of a refresh cycle.
    /// Idempotent; does nothing if no record matches.
    pub fn remove_by_class(&mut self, bridge: &impl OsBridge, class: &str) -> Vec<WindowHandle> {
        let matching: Vec<WindowHandle> = self
            .windows
            .values()
            .filter(|w| w.class == class)
            .map(|w| w.handle)
            .collect();

        for &handle in &matching {
            if let Some(mut record) = self.windows.remove(&handle)
                && let Some(icon) = record.icon.take()
            {
                bridge.release_icon(icon);
            }
        }
        matching
    }

    /// Tracked records in handle order.
    pub fn windows(&self) -> impl Iterator<Item = &TrackedWindow> {
        self.windows.values()
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }
}
