//! Strongly-typed wrappers for game concepts
//!
//! Card names and player names are both plain text in the deck records and
//! on the command line; wrapping them keeps one from being used as the other.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Card name (distinct from other string types)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardName(String);

impl CardName {
    pub fn new(s: impl Into<String>) -> Self {
        CardName(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CardName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for CardName {
    fn from(s: String) -> Self {
        CardName(s)
    }
}

impl From<&str> for CardName {
    fn from(s: &str) -> Self {
        CardName(s.to_string())
    }
}

/// Player name (distinct from other string types)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerName(String);

impl PlayerName {
    pub fn new(s: impl Into<String>) -> Self {
        PlayerName(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for PlayerName {
    fn from(s: String) -> Self {
        PlayerName(s)
    }
}

impl From<&str> for PlayerName {
    fn from(s: &str) -> Self {
        PlayerName(s.to_string())
    }
}
