//! Keyboard surface of the editor

use serde::{Deserialize, Serialize};

/// A key as reported by the host, stripped of modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Char(char),
    ArrowUp,
    ArrowDown,
    Enter,
    Escape,
    Other,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Modifiers {
    pub ctrl: bool,
    /// Cmd on macOS
    pub meta: bool,
    pub shift: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        ctrl: false,
        meta: false,
        shift: false,
        alt: false,
    };

    pub fn ctrl() -> Self {
        Self {
            ctrl: true,
            ..Self::NONE
        }
    }

    pub fn meta() -> Self {
        Self {
            meta: true,
            ..Self::NONE
        }
    }

    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }

    /// Ctrl on most platforms, Cmd on macOS.
    pub fn primary(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// A key plus the modifiers held with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyChord {
    pub key: Key,
    pub modifiers: Modifiers,
}

/// Formatting commands bound to chords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EditorCommand {
    /// Ctrl/Cmd+E
    Emphasize,
    /// Ctrl/Cmd+H, opens the color choice
    ChooseHighlight,
    /// Ctrl/Cmd+M
    MinimizeNonEmphasized,
    /// Ctrl/Cmd+Shift+C
    ClearFormatting,
}

impl KeyChord {
    pub fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    pub fn plain(key: Key) -> Self {
        Self::new(key, Modifiers::NONE)
    }

    /// The formatting command this chord triggers, if any.
    pub fn command(&self) -> Option<EditorCommand> {
        let Key::Char(ch) = self.key else {
            return None;
        };
        if !self.modifiers.primary() || self.modifiers.alt {
            return None;
        }
        match (ch.to_ascii_lowercase(), self.modifiers.shift) {
            ('e', false) => Some(EditorCommand::Emphasize),
            ('h', false) => Some(EditorCommand::ChooseHighlight),
            ('m', false) => Some(EditorCommand::MinimizeNonEmphasized),
            ('c', true) => Some(EditorCommand::ClearFormatting),
            _ => None,
        }
    }

    /// True for keys the insertion list consumes while it is open.
    pub fn is_navigation(&self) -> bool {
        self.modifiers == Modifiers::NONE
            && matches!(self.key, Key::ArrowUp | Key::ArrowDown | Key::Enter | Key::Escape)
    }
}
