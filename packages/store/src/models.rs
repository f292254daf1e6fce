//! # Domain models for notes and users
//!
//! Client-safe data structures shared by the server, the REST client and the UI.
//! Every type is `Serialize + Deserialize` with camelCase field names so the JSON
//! matches what the browser client has always sent and received.
//!
//! ## Types
//!
//! | Type | Represents |
//! |------|-----------|
//! | [`Note`] | A sticky note as returned by the API: owner, text, color, size, optional canvas position and timestamps. |
//! | [`NewNote`] | The body of `POST /notes`. Every field is optional; missing ones take the defaults below. |
//! | [`NotePatch`] | The body of `PUT /notes/:id`. Only the fields present are overwritten. |
//! | [`Position`] | Canvas coordinates in pixels. |
//! | [`NoteColor`] / [`NoteSize`] / [`Theme`] | Closed tag sets, serialized lowercase. |
//! | [`UserInfo`] | The public projection of a user. It never carries the password hash. |
//!
//! ## Defaults
//!
//! A note created without fields is titled [`DEFAULT_TITLE`], has empty content,
//! is [`NoteColor::Yellow`], [`NoteSize::Medium`] and has no position.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Title given to notes created without one.
pub const DEFAULT_TITLE: &str = "New Note";

/// Canvas coordinates of a note's top-left corner, in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Clamp both coordinates to the visible (non-negative) canvas.
    pub fn clamped(self) -> Self {
        Self {
            x: self.x.max(0.0),
            y: self.y.max(0.0),
        }
    }

    /// Round to whole pixels, the precision positions are persisted with.
    pub fn rounded(self) -> Self {
        Self {
            x: self.x.round(),
            y: self.y.round(),
        }
    }
}

/// Returned when a tag string is not one of the known values.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownTag {
    pub kind: &'static str,
    pub value: String,
}

impl fmt::Display for UnknownTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {}: {}", self.kind, self.value)
    }
}

impl std::error::Error for UnknownTag {}

macro_rules! tag_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal, default = $default:ident, { $($variant:ident => $text:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "lowercase")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $name::$default
            }
        }

        impl FromStr for $name {
            type Err = UnknownTag;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($name::$variant),)+
                    other => Err(UnknownTag { kind: $kind, value: other.to_string() }),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

tag_enum! {
    /// Background color of a note. The names double as CSS classes.
    NoteColor, "color", default = Yellow, {
        Yellow => "yellow",
        Blue => "blue",
        Green => "green",
        Pink => "pink",
        Purple => "purple",
        Orange => "orange",
        Red => "red",
        Teal => "teal",
        Indigo => "indigo",
        Gray => "gray",
    }
}

tag_enum! {
    /// Rendered size of a note.
    NoteSize, "size", default = Medium, {
        Small => "small",
        Medium => "medium",
        Large => "large",
    }
}

tag_enum! {
    /// Color scheme preference of a user.
    Theme, "theme", default = Light, {
        Light => "light",
        Dark => "dark",
    }
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// A sticky note owned by a single user.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    pub owner_id: String,
    pub title: String,
    pub content: String,
    pub color: NoteColor,
    pub size: NoteSize,
    pub position: Option<Position>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Note {
    /// Overwrite the fields present in `patch`.
    pub fn apply(&mut self, patch: &NotePatch) {
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(content) = &patch.content {
            self.content = content.clone();
        }
        if let Some(color) = patch.color {
            self.color = color;
        }
        if let Some(size) = patch.size {
            self.size = size;
        }
        if let Some(position) = patch.position {
            self.position = Some(position);
        }
    }
}

/// Body of a note creation request.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewNote {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<NoteColor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<NoteSize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

impl NewNote {
    /// The title to store. Missing and blank titles get [`DEFAULT_TITLE`].
    pub fn title_or_default(&self) -> &str {
        self.title
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(DEFAULT_TITLE)
    }
}

/// Partial update of a note. Absent fields are left untouched.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NotePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<NoteColor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<NoteSize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

impl NotePatch {
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    pub fn content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }

    pub fn color(color: NoteColor) -> Self {
        Self {
            color: Some(color),
            ..Self::default()
        }
    }

    pub fn size(size: NoteSize) -> Self {
        Self {
            size: Some(size),
            ..Self::default()
        }
    }

    pub fn position(position: Position) -> Self {
        Self {
            position: Some(position),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.content.is_none()
            && self.color.is_none()
            && self.size.is_none()
            && self.position.is_none()
    }
}

/// User information safe to send to the client.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub id: String,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub theme: Theme,
    #[serde(default)]
    pub profile_image: Option<String>,
}

impl UserInfo {
    /// First letter of the username, shown when there is no profile image.
    pub fn initial(&self) -> String {
        self.username
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_default()
    }
}
