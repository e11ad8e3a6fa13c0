use fullscreenizer_core::{KeyCode, RawKey};

/// Converts a trigger key name string to a Windows virtual key code.
///
/// Supports letters (A–Z), digits (0–9), function keys (F1–F12), and
/// the navigation cluster (Insert, Delete, Home, End, PageUp,
/// PageDown). Matching is case-insensitive.
pub fn vk_from_name(name: &str) -> Option<u32> {
    let upper = name.to_ascii_uppercase();

    // Single letter A–Z or digit 0–9
    if upper.len() == 1 {
        let ch = upper.as_bytes()[0];
        if ch.is_ascii_uppercase() || ch.is_ascii_digit() {
            return Some(u32::from(ch));
        }
    }

    // Function keys F1–F12
    if let Some(rest) = upper.strip_prefix('F')
        && let Ok(n) = rest.parse::<u32>()
        && (1..=12).contains(&n)
    {
        return Some(0x70 + n - 1); // VK_F1 = 0x70
    }

    match upper.as_str() {
        "INSERT" | "INS" => Some(0x2D),
        "DELETE" | "DEL" => Some(0x2E),
        "HOME" => Some(0x24),
        "END" => Some(0x23),
        "PAGEUP" | "PGUP" => Some(0x21),
        "PAGEDOWN" | "PGDN" => Some(0x22),
        _ => None,
    }
}

/// Classifies a raw virtual key code for the chord detector.
///
/// Left and right variants of each modifier fold into one category;
/// everything else passes through as an opaque trigger candidate.
pub fn raw_key_from_vk(vk: u32) -> RawKey {
    match vk {
        // VK_CONTROL, VK_LCONTROL, VK_RCONTROL
        0x11 | 0xA2 | 0xA3 => RawKey::Ctrl,
        // VK_SHIFT, VK_LSHIFT, VK_RSHIFT
        0x10 | 0xA0 | 0xA1 => RawKey::Shift,
        // VK_MENU, VK_LMENU, VK_RMENU
        0x12 | 0xA4 | 0xA5 => RawKey::Alt,
        other => RawKey::Other(KeyCode(other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_case_insensitive() {
        // Assert
        assert_eq!(vk_from_name("b"), Some(0x42));
        assert_eq!(vk_from_name("B"), Some(0x42));
        assert_eq!(vk_from_name("a"), Some(0x41));
        assert_eq!(vk_from_name("Z"), Some(0x5A));
    }

    #[test]
    fn digits_return_vk_codes() {
        // Assert
        assert_eq!(vk_from_name("0"), Some(0x30));
        assert_eq!(vk_from_name("9"), Some(0x39));
    }

    #[test]
    fn navigation_keys() {
        // Assert
        assert_eq!(vk_from_name("Home"), Some(0x24));
        assert_eq!(vk_from_name("END"), Some(0x23));
        assert_eq!(vk_from_name("pgdn"), Some(0x22));
        assert_eq!(vk_from_name("Insert"), Some(0x2D));
    }

    #[test]
    fn function_keys() {
        // Assert
        assert_eq!(vk_from_name("F1"), Some(0x70));
        assert_eq!(vk_from_name("f12"), Some(0x7B));
    }

    #[test]
    fn unknown_returns_none() {
        // Assert
        assert_eq!(vk_from_name("INVALID"), None);
        assert_eq!(vk_from_name(""), None);
    }

    #[test]
    fn left_and_right_modifiers_fold_together() {
        // Assert
        assert_eq!(raw_key_from_vk(0xA2), RawKey::Ctrl);
        assert_eq!(raw_key_from_vk(0xA3), RawKey::Ctrl);
        assert_eq!(raw_key_from_vk(0xA0), RawKey::Shift);
        assert_eq!(raw_key_from_vk(0xA5), RawKey::Alt);
    }

    #[test]
    fn other_keys_pass_through_as_trigger_candidates() {
        // Assert
        assert_eq!(raw_key_from_vk(0x24), RawKey::Other(KeyCode(0x24)));
    }
}
