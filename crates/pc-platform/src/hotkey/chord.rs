use global_hotkey::hotkey::HotKey;
use pc_core::ports::HotkeyError;
use pc_core::HotkeyChord;

/// Parse a chord such as `ctrl+v`, `ctrl+alt+c` or `f8`.
pub fn parse_chord(chord: &HotkeyChord) -> Result<HotKey, HotkeyError> {
    if chord.is_empty() {
        return Err(HotkeyError::InvalidChord {
            chord: String::new(),
            reason: "empty chord".to_string(),
        });
    }
    chord
        .as_str()
        .parse::<HotKey>()
        .map_err(|e| HotkeyError::InvalidChord {
            chord: chord.to_string(),
            reason: e.to_string(),
        })
}
