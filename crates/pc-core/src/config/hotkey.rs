use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// A global hotkey chord such as `ctrl+v` or `ctrl+alt+c`.
///
/// Stored trimmed and lowercase. Whether the platform can register it is
/// decided by the hotkey adapter, not here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct HotkeyChord(String);

impl HotkeyChord {
    pub fn new(chord: impl AsRef<str>) -> Self {
        Self(chord.as_ref().trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Display for HotkeyChord {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for HotkeyChord {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for HotkeyChord {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<HotkeyChord> for String {
    fn from(chord: HotkeyChord) -> Self {
        chord.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chord_is_normalized() {
        assert_eq!(HotkeyChord::new("  Ctrl+Alt+C ").as_str(), "ctrl+alt+c");
        assert!(HotkeyChord::new("   ").is_empty());
    }
}
