pub mod board;
pub mod project;
pub mod version;

use serde::Serializer;

pub use board::BoardSummary;
pub use project::{
    CustomEvents, CustomMusic, Difficulty, GameId, N64Support, ProjectDetail, ProjectSummary,
    Vocabulary,
};
pub use version::{ProjectFiles, VersionRecord};

/// Wire value for a numeric or enumerated field the page didn't provide.
pub const MISSING: i64 = -1;

/// Serializes `None` as `-1`, the value clients of the board editor expect.
pub fn int_or_missing<S: Serializer>(value: &Option<i64>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_i64(value.unwrap_or(MISSING))
}

/// Serializes a vocabulary entry as its code, `None` as `-1`.
pub fn code_or_missing<S, T>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    T: Vocabulary,
{
    serializer.serialize_i64(value.map_or(MISSING, Vocabulary::code))
}
