use serde::{Deserialize, Serialize};
use std::fmt;

/// Newtype wrapper for story IDs.
///
/// Stored as a string; numeric IDs and string IDs compare equal when
/// their text matches.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoryId(pub String);

impl StoryId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric ordering key used by the "latest" and "oldest" views:
    /// the leading integer of the ID (`"12abc"` is 12). IDs without one
    /// sort as 0.
    pub fn sort_key(&self) -> i64 {
        let s = self.0.trim_start();
        let (sign, digits) = match s.as_bytes().first() {
            Some(b'-') => (-1, &s[1..]),
            Some(b'+') => (1, &s[1..]),
            _ => (1, s),
        };
        let end = digits
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(digits.len());
        digits[..end]
            .parse::<i64>()
            .map(|n| sign * n)
            .unwrap_or(0)
    }
}

impl fmt::Display for StoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StoryId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<u64> for StoryId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

/// One chapter of story text, possibly containing placeholder tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    pub content: String,
}

impl Chapter {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

/// A story as served by the story-data service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Story {
    pub id: StoryId,
    pub title: String,
    /// Optional short name shown in listings; also searched.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: String,
    /// Number of participants the story is written for. Stories
    /// without one predate multi-participant support.
    #[serde(default)]
    pub participant_count: Option<usize>,
    #[serde(default)]
    pub chapters: Vec<Chapter>,
}

impl Story {
    /// Declared participant count; a count of 0 counts as undeclared.
    fn declared_count(&self) -> Option<usize> {
        self.participant_count.filter(|&n| n > 0)
    }

    /// Participant count the text was authored against.
    pub fn cast_size(&self) -> usize {
        self.declared_count().unwrap_or(1)
    }

    /// Returns true if this story is offered to a cast of `count`.
    pub fn fits_cast(&self, count: usize) -> bool {
        match self.declared_count() {
            Some(n) => n == count,
            None => count == 1,
        }
    }

    /// Case-insensitive substring match against title, name and
    /// description. `needle` must already be lowercased.
    pub fn matches_search(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self
                .name
                .as_deref()
                .is_some_and(|n| n.to_lowercase().contains(needle))
            || self.description.to_lowercase().contains(needle)
    }
}
