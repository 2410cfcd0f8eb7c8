//! Keyboard shortcut parsing and lookup
//!
//! Bindings are stored as chord strings such as `"ctrl+S"` or `"shift+Plus"`:
//! any number of `ctrl`/`shift`/`alt` modifiers followed by an egui key name.

use super::EditorAction;
use bevy_egui::egui;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// A key plus the modifiers held with it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyChord {
    pub key: egui::Key,
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
}

impl KeyChord {
    pub fn new(key: egui::Key) -> Self {
        Self {
            key,
            ctrl: false,
            shift: false,
            alt: false,
        }
    }

    pub fn ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn shift(mut self) -> Self {
        self.shift = true;
        self
    }

    pub fn alt(mut self) -> Self {
        self.alt = true;
        self
    }

    /// Build a chord from an egui key event
    pub fn from_egui(key: egui::Key, modifiers: egui::Modifiers) -> Self {
        Self {
            key,
            ctrl: modifiers.ctrl || modifiers.command,
            shift: modifiers.shift,
            alt: modifiers.alt,
        }
    }

    /// Parse `[mod+]*key`. Modifiers are case-insensitive and spaces are ignored.
    pub fn parse(text: &str) -> Option<Self> {
        let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
        if compact.is_empty() {
            return None;
        }
        // A trailing '+' is the key itself ("ctrl++")
        let (mods, key_name) = match compact.strip_suffix("++") {
            Some(rest) => (rest, "+"),
            None => match compact.rsplit_once('+') {
                Some((mods, key)) => (mods, key),
                None => ("", compact.as_str()),
            },
        };

        let mut chord = KeyChord::new(parse_key(key_name)?);
        for modifier in mods.split('+').filter(|m| !m.is_empty()) {
            match modifier.to_ascii_lowercase().as_str() {
                "ctrl" | "control" | "cmd" => chord.ctrl = true,
                "shift" => chord.shift = true,
                "alt" => chord.alt = true,
                _ => return None,
            }
        }
        Some(chord)
    }

    /// Whether a binding for `self` fires when `pressed` is pressed
    ///
    /// Ctrl and alt must match exactly. Shift is only checked when the binding
    /// asks for it, since many symbol keys need shift to type.
    pub fn matches(&self, pressed: &KeyChord) -> bool {
        self.key == pressed.key
            && self.ctrl == pressed.ctrl
            && self.alt == pressed.alt
            && (!self.shift || pressed.shift)
    }
}

fn parse_key(name: &str) -> Option<egui::Key> {
    if let Some(key) = egui::Key::from_name(name) {
        return Some(key);
    }
    // Accept lowercase spellings of named keys ("escape", "enter")
    let mut chars = name.chars();
    let first = chars.next()?;
    let capitalized: String = first.to_uppercase().chain(chars).collect();
    egui::Key::from_name(&capitalized)
}

impl std::fmt::Display for KeyChord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.ctrl {
            write!(f, "ctrl+")?;
        }
        if self.shift {
            write!(f, "shift+")?;
        }
        if self.alt {
            write!(f, "alt+")?;
        }
        write!(f, "{}", self.key.name())
    }
}

/// Action → chord table, as stored in preferences
///
/// Loading overlays the stored table on the defaults, so actions added since
/// the file was written still get a binding. An empty chord unbinds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Bindings {
    chords: BTreeMap<EditorAction, String>,
}

impl<'de> Deserialize<'de> for Bindings {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let stored = BTreeMap::<EditorAction, String>::deserialize(deserializer)?;
        let mut bindings = Bindings::default();
        bindings.chords.extend(stored);
        Ok(bindings)
    }
}

impl Default for Bindings {
    fn default() -> Self {
        let defaults = [
            (EditorAction::Exit, "ctrl+Q"),
            (EditorAction::ToggleFullscreen, "F11"),
            (EditorAction::ProjectSelectionLeft, "ctrl+ArrowLeft"),
            (EditorAction::ProjectSelectionRight, "ctrl+ArrowRight"),
            (EditorAction::Save, "ctrl+S"),
            (EditorAction::SaveAs, "ctrl+shift+S"),
            (EditorAction::Load, "ctrl+O"),
            (EditorAction::ScaleTileUp, "Plus"),
            (EditorAction::ScaleTileDown, "Minus"),
            (EditorAction::ToggleTileMode, "ctrl+T"),
            (EditorAction::Brush, "B"),
            (EditorAction::Rect, "R"),
            (EditorAction::AutotileRect, "A"),
            (EditorAction::ResetTile, "X"),
            (EditorAction::TileLookupRemoval, "Delete"),
            (EditorAction::SelectionAccept, "Enter"),
            (EditorAction::CancelSelection, "Escape"),
            (EditorAction::SwitchSheetField, "Tab"),
            (EditorAction::EditTile, "ctrl+E"),
            (EditorAction::ExportTile, "ctrl+Enter"),
            (EditorAction::NewLayer, "PageUp"),
            (EditorAction::PreviousLayer, "PageDown"),
            (EditorAction::DeleteLayer, "ctrl+Delete"),
            (EditorAction::RenameLayer, "F2"),
            (EditorAction::MatrixTopLeft, "7"),
            (EditorAction::MatrixTopMid, "8"),
            (EditorAction::MatrixTopRight, "9"),
            (EditorAction::MatrixMidLeft, "4"),
            (EditorAction::MatrixMidMid, "5"),
            (EditorAction::MatrixMidRight, "6"),
            (EditorAction::MatrixBotLeft, "1"),
            (EditorAction::MatrixBotMid, "2"),
            (EditorAction::MatrixBotRight, "3"),
        ];
        Self {
            chords: defaults
                .into_iter()
                .map(|(action, chord)| (action, chord.to_string()))
                .collect(),
        }
    }
}

impl Bindings {
    pub fn get(&self, action: EditorAction) -> Option<&str> {
        self.chords.get(&action).map(String::as_str)
    }

    pub fn set(&mut self, action: EditorAction, chord: impl Into<String>) {
        self.chords.insert(action, chord.into());
    }

    pub fn unbind(&mut self, action: EditorAction) {
        self.chords.remove(&action);
    }

    pub fn iter(&self) -> impl Iterator<Item = (EditorAction, &str)> {
        self.chords.iter().map(|(action, chord)| (*action, chord.as_str()))
    }
}

/// Parsed bindings, ready for lookup
#[derive(Debug, Clone, Default)]
pub struct Keymap {
    entries: Vec<(KeyChord, EditorAction)>,
}

impl Keymap {
    /// Parse every binding; chords that don't parse are logged and left unbound
    pub fn from_bindings(bindings: &Bindings) -> Self {
        let mut entries = Vec::new();
        for (action, text) in bindings.iter().filter(|(_, text)| !text.trim().is_empty()) {
            match KeyChord::parse(text) {
                Some(chord) => entries.push((chord, action)),
                None => {
                    bevy::log::warn!("Unknown key chord '{}' for {:?}, leaving unbound", text, action);
                }
            }
        }
        Self { entries }
    }

    /// Actions bound to `pressed`
    ///
    /// When several bindings match, only those whose shift state matches the
    /// press exactly are kept, so `ctrl+shift+S` doesn't also fire `ctrl+S`.
    pub fn actions(&self, pressed: &KeyChord) -> Vec<EditorAction> {
        let matching: Vec<&(KeyChord, EditorAction)> = self
            .entries
            .iter()
            .filter(|(chord, _)| chord.matches(pressed))
            .collect();
        let exact: Vec<EditorAction> = matching
            .iter()
            .filter(|(chord, _)| chord.shift == pressed.shift)
            .map(|(_, action)| *action)
            .collect();
        if exact.is_empty() {
            matching.into_iter().map(|(_, action)| *action).collect()
        } else {
            exact
        }
    }

    pub fn chord_for(&self, action: EditorAction) -> Option<KeyChord> {
        self.entries
            .iter()
            .find(|(_, a)| *a == action)
            .map(|(chord, _)| *chord)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_chords() {
        assert_eq!(
            KeyChord::parse("ctrl+S"),
            Some(KeyChord::new(egui::Key::S).ctrl())
        );
        assert_eq!(
            KeyChord::parse(" Ctrl + Shift + S "),
            Some(KeyChord::new(egui::Key::S).ctrl().shift())
        );
        assert_eq!(
            KeyChord::parse("escape"),
            Some(KeyChord::new(egui::Key::Escape))
        );
        assert_eq!(
            KeyChord::parse("alt+ArrowLeft"),
            Some(KeyChord::new(egui::Key::ArrowLeft).alt())
        );
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert_eq!(KeyChord::parse(""), None);
        assert_eq!(KeyChord::parse("hyper+S"), None);
        assert_eq!(KeyChord::parse("ctrl+NoSuchKey"), None);
    }

    #[test]
    fn test_display_parses_back() {
        let chord = KeyChord::new(egui::Key::Escape).ctrl().alt();
        assert_eq!(KeyChord::parse(&chord.to_string()), Some(chord));
    }

    #[test]
    fn test_default_bindings_all_parse() {
        let bindings = Bindings::default();
        for action in EditorAction::ALL {
            let chord = bindings.get(action).unwrap();
            assert!(KeyChord::parse(chord).is_some(), "{:?}: {}", action, chord);
        }
    }

    #[test]
    fn test_shift_prefers_exact_binding() {
        let keymap = Keymap::from_bindings(&Bindings::default());
        let save = KeyChord::new(egui::Key::S).ctrl();
        assert_eq!(keymap.actions(&save), vec![EditorAction::Save]);
        assert_eq!(keymap.actions(&save.shift()), vec![EditorAction::SaveAs]);
    }

    #[test]
    fn test_unshifted_binding_fires_with_shift() {
        let mut bindings = Bindings::default();
        bindings.set(EditorAction::ScaleTileUp, "Plus");
        let keymap = Keymap::from_bindings(&bindings);
        let pressed = KeyChord::new(egui::Key::Plus).shift();
        assert_eq!(keymap.actions(&pressed), vec![EditorAction::ScaleTileUp]);
    }

    #[test]
    fn test_ctrl_must_match() {
        let keymap = Keymap::from_bindings(&Bindings::default());
        let pressed = KeyChord::new(egui::Key::B).ctrl();
        assert!(keymap.actions(&pressed).is_empty());
        assert_eq!(
            keymap.actions(&KeyChord::new(egui::Key::B)),
            vec![EditorAction::Brush]
        );
    }

    #[test]
    fn test_stored_bindings_overlay_defaults() {
        let bindings: Bindings =
            serde_json::from_str(r#"{ "brush": "P", "rect": "" }"#).unwrap();
        assert_eq!(bindings.get(EditorAction::Brush), Some("P"));
        assert_eq!(bindings.get(EditorAction::Save), Some("ctrl+S"));

        let keymap = Keymap::from_bindings(&bindings);
        assert!(keymap.chord_for(EditorAction::Rect).is_none());
        assert_eq!(
            keymap.actions(&KeyChord::new(egui::Key::P)),
            vec![EditorAction::Brush]
        );
    }

    #[test]
    fn test_bad_chord_left_unbound() {
        let mut bindings = Bindings::default();
        bindings.set(EditorAction::Brush, "nonsense+B");
        let keymap = Keymap::from_bindings(&bindings);
        assert!(keymap.chord_for(EditorAction::Brush).is_none());
        assert!(keymap.chord_for(EditorAction::Rect).is_some());
    }
}
