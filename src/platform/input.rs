//! Keyboard mapping

/// A player action, independent of the device that produced it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Jump,
    TogglePause,
    OpenMenu,
}

/// Map a keydown (`KeyboardEvent.code`, `KeyboardEvent.key`) to an intent.
///
/// Letters match on either field so non-QWERTY layouts still work.
pub fn intent_for_key(code: &str, key: &str) -> Option<Intent> {
    match (code, key) {
        ("Space" | "ArrowUp", _) => Some(Intent::Jump),
        ("KeyP", _) | (_, "p" | "P") => Some(Intent::TogglePause),
        ("KeyM", _) | (_, "m" | "M") => Some(Intent::OpenMenu),
        _ => None,
    }
}
