//! Emoji palette and caret-aware insertion.
//!
//! Browsers report textarea selections as UTF-16 code unit offsets, so
//! [`insert_at`] works in those units and never splits a surrogate pair.

/// Tabs of the emoji picker.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EmojiCategory {
    #[default]
    Smileys,
    Nature,
    Objects,
    Symbols,
}

impl EmojiCategory {
    pub const ALL: [EmojiCategory; 4] = [
        EmojiCategory::Smileys,
        EmojiCategory::Nature,
        EmojiCategory::Objects,
        EmojiCategory::Symbols,
    ];

    pub fn label(self) -> &'static str {
        match self {
            EmojiCategory::Smileys => "Smileys",
            EmojiCategory::Nature => "Nature",
            EmojiCategory::Objects => "Objects",
            EmojiCategory::Symbols => "Symbols",
        }
    }

    /// Emoji shown on the category tab.
    pub fn icon(self) -> &'static str {
        self.emojis()[0]
    }

    pub fn emojis(self) -> &'static [&'static str] {
        match self {
            EmojiCategory::Smileys => SMILEYS,
            EmojiCategory::Nature => NATURE,
            EmojiCategory::Objects => OBJECTS,
            EmojiCategory::Symbols => SYMBOLS,
        }
    }
}

const SMILEYS: &[&str] = &[
    "😀", "😃", "😄", "😁", "😆", "😅", "🤣", "😂", "🙂", "🙃", "😉", "😊", "😇", "🥰", "😍",
    "🤩", "😘", "😗", "😚", "😙", "😋", "😛", "😜", "🤪", "😝", "🤑", "🤗", "🤭", "🤫", "🤔",
];

const NATURE: &[&str] = &[
    "🌱", "🌿", "🍀", "🌳", "🌲", "🌴", "🌵", "🌷", "🌸", "🌹", "🌺", "🌻", "🌼", "🌽", "🍄",
    "🌰", "🐶", "🐱", "🐭", "🐹", "🐰", "🦊", "🐻", "🐼", "🐨", "🐯", "🦁", "🐮", "🐷", "🐸",
];

const OBJECTS: &[&str] = &[
    "💡", "🔦", "💰", "💳", "💎", "🔧", "🔨", "🧱", "🧲", "🔫", "💣", "🔪", "🚬",
];

const SYMBOLS: &[&str] = &[
    "❤️", "🧡", "💛", "💚", "💙", "💜", "🖤", "🤍", "🤎", "💔", "❣️", "💕", "💞", "💓", "💗",
    "💖", "💘", "💝", "💟", "☮️", "✝️", "☪️", "☸️", "✡️", "🔯", "☯️", "☦️", "🛐", "⛎", "♈",
    "♉", "♊", "♋", "♌", "♍", "♎", "♏",
];

/// A textarea selection in UTF-16 code units, `start <= end`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

impl Selection {
    pub fn caret(at: usize) -> Self {
        Self { start: at, end: at }
    }
}

/// Length of `text` in UTF-16 code units.
pub fn utf16_len(text: &str) -> usize {
    text.encode_utf16().count()
}

/// Byte offset of the UTF-16 offset `units`, clamped to the end of `text` and
/// rounded down to a char boundary.
fn byte_offset(text: &str, units: usize) -> usize {
    let mut seen = 0;
    for (index, ch) in text.char_indices() {
        if seen + ch.len_utf16() > units {
            return index;
        }
        seen += ch.len_utf16();
    }
    text.len()
}

/// Replace `selection` in `text` with `emoji`.
///
/// Returns the new text and the caret (UTF-16 offset) right after the emoji.
/// Without a selection the emoji is appended.
pub fn insert_at(text: &str, selection: Option<Selection>, emoji: &str) -> (String, usize) {
    let selection = selection.unwrap_or_else(|| Selection::caret(utf16_len(text)));
    let start = byte_offset(text, selection.start.min(selection.end));
    let end = byte_offset(text, selection.start.max(selection.end));

    let mut out = String::with_capacity(text.len() + emoji.len());
    out.push_str(&text[..start]);
    out.push_str(emoji);
    out.push_str(&text[end..]);

    let caret = utf16_len(&text[..start]) + utf16_len(emoji);
    (out, caret)
}
