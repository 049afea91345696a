use serde::{Serialize, Serializer};

use super::{code_or_missing, int_or_missing};

/// The Mario Party title a board was made for, taken from the 3-character
/// prefix the forum puts in front of every board name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameId {
    Mp1 = 1,
    Mp2 = 2,
    Mp3 = 3,
}

impl GameId {
    pub const ALL: [GameId; 3] = [GameId::Mp1, GameId::Mp2, GameId::Mp3];

    pub fn prefix(self) -> &'static str {
        match self {
            Self::Mp1 => "MP1",
            Self::Mp2 => "MP2",
            Self::Mp3 => "MP3",
        }
    }

    pub fn number(self) -> u8 {
        self as u8
    }

    pub fn from_number(n: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|game| game.number() == n)
    }

    /// Splits `"MP3 Board Name"` into the game and `"Board Name"`.
    ///
    /// One separator character after the prefix is dropped, whatever it is.
    pub fn split_title(title: &str) -> Option<(Self, &str)> {
        Self::ALL.into_iter().find_map(|game| {
            let rest = title.strip_prefix(game.prefix())?;
            let mut chars = rest.chars();
            chars.next();
            Some((game, chars.as_str()))
        })
    }
}

impl Serialize for GameId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.number())
    }
}

/// A closed set of labels the forum uses for a custom board field.
/// Matching is exact on the trimmed text; the first entry wins.
pub trait Vocabulary: Sized + Copy + 'static {
    const TABLE: &'static [(&'static str, Self)];

    fn code(self) -> i64;

    fn lookup(text: &str) -> Option<Self> {
        let text = text.trim();
        Self::TABLE
            .iter()
            .find(|(label, _)| *label == text)
            .map(|(_, value)| *value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Beginner = 1,
    Average = 2,
    Challenging = 3,
    Complex = 4,
    Extreme = 5,
}

impl Vocabulary for Difficulty {
    const TABLE: &'static [(&'static str, Self)] = &[
        ("Beginner", Self::Beginner),
        ("Average", Self::Average),
        ("Challenging", Self::Challenging),
        ("Complex", Self::Complex),
        ("Extreme", Self::Extreme),
    ];

    fn code(self) -> i64 {
        self as i64
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomEvents {
    No = 0,
    Yes = 1,
    Unique = 2,
}

impl Vocabulary for CustomEvents {
    const TABLE: &'static [(&'static str, Self)] = &[
        ("No", Self::No),
        ("Yes (Unique)", Self::Unique),
        ("Yes", Self::Yes),
    ];

    fn code(self) -> i64 {
        self as i64
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomMusic {
    No = 0,
    Yes = 1,
}

impl Vocabulary for CustomMusic {
    const TABLE: &'static [(&'static str, Self)] = &[("No", Self::No), ("Yes", Self::Yes)];

    fn code(self) -> i64 {
        self as i64
    }
}

/// Whether the board runs on real N64 hardware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum N64Support {
    No = 0,
    Yes = 1,
    Untested = 2,
}

impl Vocabulary for N64Support {
    const TABLE: &'static [(&'static str, Self)] = &[
        ("No", Self::No),
        ("Yes", Self::Yes),
        ("Untested", Self::Untested),
    ];

    fn code(self) -> i64 {
        self as i64
    }
}

/// Everything the detail page tells us about one board.
///
/// Numeric and enumerated fields serialize as `-1` when missing, text fields
/// are left out of the JSON.
#[derive(Debug, Serialize, Clone, Default, PartialEq)]
pub struct ProjectDetail {
    pub id: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "gameId", skip_serializing_if = "Option::is_none")]
    pub game_id: Option<GameId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creation_date: Option<String>,
    #[serde(serialize_with = "code_or_missing")]
    pub difficulty: Option<Difficulty>,
    #[serde(serialize_with = "int_or_missing")]
    pub recommended_turns: Option<i64>,
    #[serde(serialize_with = "code_or_missing")]
    pub custom_events: Option<CustomEvents>,
    #[serde(serialize_with = "code_or_missing")]
    pub custom_music: Option<CustomMusic>,
    #[serde(serialize_with = "code_or_missing")]
    pub playable_on_n64: Option<N64Support>,
    #[serde(serialize_with = "int_or_missing")]
    pub space_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// A search hit.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct ProjectSummary {
    pub name: String,
    #[serde(rename = "gameId")]
    pub game_id: GameId,
    #[serde(rename = "projectId")]
    pub project_id: u32,
}
