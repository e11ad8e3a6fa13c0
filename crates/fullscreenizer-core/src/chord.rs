//! Global hotkey chord detection.
//!
//! A pure state machine over currently-held keys. The platform layer
//! translates raw virtual-key events into [`KeyEvent`]s and feeds them
//! in; the detector reports the exact moment the configured chord
//! becomes satisfied.

/// The modifier keys a chord requires.
///
/// Explicit booleans instead of a bitmask so the satisfaction test
/// reads as it is specified: a category is ok when it is not required
/// or when it is currently held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        ctrl: false,
        shift: false,
        alt: false,
    };

    pub fn is_empty(&self) -> bool {
        !self.ctrl && !self.shift && !self.alt
    }
}

/// An opaque platform key code for the trigger key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyCode(pub u32);

/// A key event after platform translation.
///
/// Left and right variants of each modifier are folded into one
/// category by the platform layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawKey {
    Ctrl,
    Shift,
    Alt,
    Other(KeyCode),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEvent {
    Down(RawKey),
    Up(RawKey),
}

/// A modifier set plus exactly one trigger key.
///
/// Immutable once configured; replaced wholesale on reconfiguration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chord {
    pub modifiers: Modifiers,
    pub trigger: KeyCode,
}

/// Currently-held key state, owned exclusively by the detector.
#[derive(Debug, Default)]
struct HeldKeys {
    modifiers: Modifiers,
    trigger_held: bool,
}

/// Decides whether the registered chord is currently satisfied.
///
/// `None` for the chord means the hotkey is disabled: events are
/// ignored and no held state is retained across a later re-enable.
#[derive(Debug, Default)]
pub struct ChordDetector {
    chord: Option<Chord>,
    held: HeldKeys,
}

impl ChordDetector {
    pub fn new(chord: Option<Chord>) -> Self {
        Self {
            chord,
            held: HeldKeys::default(),
        }
    }

    pub fn chord(&self) -> Option<Chord> {
        self.chord
    }

    /// Replaces the chord and resets all held state.
    ///
    /// A stale held-modifier surviving a reconfiguration could
    /// immediately mis-satisfy the new chord.
    pub fn configure(&mut self, chord: Option<Chord>) {
        self.chord = chord;
        self.held = HeldKeys::default();
    }

    /// Disables the detector; equivalent to `configure(None)`.
    pub fn disable(&mut self) {
        self.configure(None);
    }

    /// Consumes one key event.
    ///
    /// Returns `true` exactly when this event transitions the chord
    /// from unsatisfied to satisfied, so auto-repeated key-downs while
    /// the chord is held trigger only once.
    pub fn on_event(&mut self, event: KeyEvent) -> bool {
        let Some(chord) = self.chord else {
            return false;
        };

        match event {
            KeyEvent::Down(key) => {
                let was_satisfied = self.satisfied(&chord);
                match key {
                    RawKey::Ctrl => self.held.modifiers.ctrl = true,
                    RawKey::Shift => self.held.modifiers.shift = true,
                    RawKey::Alt => self.held.modifiers.alt = true,
                    RawKey::Other(code) => {
                        if code == chord.trigger {
                            self.held.trigger_held = true;
                        }
                        // Any other key is ignored for state purposes.
                    }
                }
                self.satisfied(&chord) && !was_satisfied
            }
            KeyEvent::Up(key) => {
                match key {
                    RawKey::Ctrl => self.held.modifiers.ctrl = false,
                    RawKey::Shift => self.held.modifiers.shift = false,
                    RawKey::Alt => self.held.modifiers.alt = false,
                    RawKey::Other(code) => {
                        if code == chord.trigger {
                            self.held.trigger_held = false;
                        }
                    }
                }
                false
            }
        }
    }

    /// Each modifier category is ok when the chord does not require it
    /// or it is currently held; extra unrequired modifiers never block.
    fn satisfied(&self, chord: &Chord) -> bool {
        let ctrl_ok = !chord.modifiers.ctrl || self.held.modifiers.ctrl;
        let shift_ok = !chord.modifiers.shift || self.held.modifiers.shift;
        let alt_ok = !chord.modifiers.alt || self.held.modifiers.alt;
        ctrl_ok && shift_ok && alt_ok && self.held.trigger_held
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOME: KeyCode = KeyCode(0x24);
    const END: KeyCode = KeyCode(0x23);

    fn ctrl_home() -> Chord {
        Chord {
            modifiers: Modifiers {
                ctrl: true,
                ..Modifiers::NONE
            },
            trigger: HOME,
        }
    }

    #[test]
    fn chord_fires_when_all_required_keys_held() {
        // Arrange
        let mut detector = ChordDetector::new(Some(ctrl_home()));

        // Act / Assert
        assert!(!detector.on_event(KeyEvent::Down(RawKey::Ctrl)));
        assert!(detector.on_event(KeyEvent::Down(RawKey::Other(HOME))));
    }

    #[test]
    fn extra_unrequired_modifiers_do_not_block() {
        // Arrange: chord = Ctrl+Home, user holds Ctrl+Shift+Home.
        let mut detector = ChordDetector::new(Some(ctrl_home()));

        // Act
        detector.on_event(KeyEvent::Down(RawKey::Ctrl));
        detector.on_event(KeyEvent::Down(RawKey::Shift));
        let fired = detector.on_event(KeyEvent::Down(RawKey::Other(HOME)));

        // Assert
        assert!(fired);
    }

    #[test]
    fn missing_required_modifier_blocks() {
        // Arrange: chord = Ctrl+Home, user holds Shift+Home only.
        let mut detector = ChordDetector::new(Some(ctrl_home()));

        // Act
        detector.on_event(KeyEvent::Down(RawKey::Shift));
        let fired = detector.on_event(KeyEvent::Down(RawKey::Other(HOME)));

        // Assert
        assert!(!fired);
    }

    #[test]
    fn trigger_alone_satisfies_modifier_free_chord() {
        // Arrange
        let mut detector = ChordDetector::new(Some(Chord {
            modifiers: Modifiers::NONE,
            trigger: HOME,
        }));

        // Act / Assert
        assert!(detector.on_event(KeyEvent::Down(RawKey::Other(HOME))));
    }

    #[test]
    fn non_trigger_key_is_ignored() {
        // Arrange
        let mut detector = ChordDetector::new(Some(ctrl_home()));

        // Act
        detector.on_event(KeyEvent::Down(RawKey::Ctrl));
        let fired = detector.on_event(KeyEvent::Down(RawKey::Other(END)));

        // Assert
        assert!(!fired);
    }

    #[test]
    fn repeated_key_down_fires_only_once() {
        // Arrange: holding the trigger auto-repeats key-down events.
        let mut detector = ChordDetector::new(Some(ctrl_home()));
        detector.on_event(KeyEvent::Down(RawKey::Ctrl));

        // Act / Assert
        assert!(detector.on_event(KeyEvent::Down(RawKey::Other(HOME))));
        assert!(!detector.on_event(KeyEvent::Down(RawKey::Other(HOME))));
    }

    #[test]
    fn releasing_trigger_rearms_the_chord() {
        // Arrange
        let mut detector = ChordDetector::new(Some(ctrl_home()));
        detector.on_event(KeyEvent::Down(RawKey::Ctrl));
        assert!(detector.on_event(KeyEvent::Down(RawKey::Other(HOME))));

        // Act
        detector.on_event(KeyEvent::Up(RawKey::Other(HOME)));

        // Assert
        assert!(detector.on_event(KeyEvent::Down(RawKey::Other(HOME))));
    }

    #[test]
    fn releasing_required_modifier_unsatisfies() {
        // Arrange
        let mut detector = ChordDetector::new(Some(ctrl_home()));
        detector.on_event(KeyEvent::Down(RawKey::Ctrl));
        detector.on_event(KeyEvent::Down(RawKey::Other(HOME)));

        // Act
        detector.on_event(KeyEvent::Up(RawKey::Ctrl));
        detector.on_event(KeyEvent::Up(RawKey::Other(HOME)));

        // Assert: only the trigger alone is not enough again.
        assert!(!detector.on_event(KeyEvent::Down(RawKey::Other(HOME))));
    }

    #[test]
    fn reconfigure_resets_held_state() {
        // Arrange: Ctrl held from before the reconfiguration.
        let mut detector = ChordDetector::new(Some(ctrl_home()));
        detector.on_event(KeyEvent::Down(RawKey::Ctrl));

        // Act: new chord also requires Ctrl.
        detector.configure(Some(ctrl_home()));

        // Assert: the stale Ctrl must not mis-satisfy the new chord.
        assert!(!detector.on_event(KeyEvent::Down(RawKey::Other(HOME))));
    }

    #[test]
    fn disabled_detector_ignores_events_and_forgets_state() {
        // Arrange
        let mut detector = ChordDetector::new(Some(ctrl_home()));
        detector.on_event(KeyEvent::Down(RawKey::Ctrl));

        // Act
        detector.disable();
        assert!(!detector.on_event(KeyEvent::Down(RawKey::Other(HOME))));
        detector.configure(Some(ctrl_home()));

        // Assert: held state did not survive the disabled period.
        assert!(!detector.on_event(KeyEvent::Down(RawKey::Other(HOME))));
    }
}
