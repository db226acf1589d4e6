use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier assigned by the store, starting at 1.
pub type BookId = u64;

/// Reading state of a book. Any status may move to any other.
///
/// Serialized by variant name so reordering variants never changes the wire format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BookStatus {
    #[default]
    ToRead,
    Reading,
    Read,
}

impl BookStatus {
    pub const ALL: [BookStatus; 3] = [BookStatus::ToRead, BookStatus::Reading, BookStatus::Read];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookStatus::ToRead => "ToRead",
            BookStatus::Reading => "Reading",
            BookStatus::Read => "Read",
        }
    }
}

impl fmt::Display for BookStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A tracked book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Unique identifier, never reused
    pub id: BookId,
    /// Title of the book
    pub title: String,
    /// Author of the book
    pub author: String,
    /// Current reading status
    pub status: BookStatus,
}

/// Request model for creating a new book.
///
/// Omitted fields fall back to an empty string and `ToRead`; an `id` sent by
/// the client is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBook {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub status: BookStatus,
}

impl NewBook {
    pub fn new(title: impl Into<String>, author: impl Into<String>, status: BookStatus) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            status,
        }
    }
}

/// Query string of the status update route.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct StatusQuery {
    pub status: BookStatus,
}
