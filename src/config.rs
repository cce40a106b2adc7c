//! Match rules configuration
//!
//! The standard rules are the `Default`. A JSON file may override any subset
//! of the fields; missing fields keep their default value.

use crate::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Which seat takes the first turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FirstPlayer {
    #[default]
    A,
    B,
}

impl FirstPlayer {
    /// Seat index in `GameState::players`
    pub fn index(self) -> usize {
        match self {
            FirstPlayer::A => 0,
            FirstPlayer::B => 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Maximum number of cards in a deck
    pub deck_capacity: usize,
    /// Maximum number of cards in a hand
    pub hand_capacity: usize,
    /// Character slots on a field; also the number of skill slots
    pub field_size: usize,
    pub starting_health: i32,
    /// Cards each player draws before the first turn
    pub opening_hand: usize,
    pub first_player: FirstPlayer,
    /// Seed for the deck shuffle
    pub seed: u64,
}

impl Default for RulesConfig {
    fn default() -> Self {
        RulesConfig {
            deck_capacity: 60,
            hand_capacity: 10,
            field_size: 6,
            starting_health: 80,
            opening_hand: 7,
            first_player: FirstPlayer::A,
            seed: 0,
        }
    }
}

impl RulesConfig {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let rules: RulesConfig = serde_json::from_str(content)?;
        rules.check()?;
        Ok(rules)
    }

    /// Reject settings no match could be played with
    pub fn check(&self) -> Result<()> {
        if self.opening_hand > self.hand_capacity {
            return Err(crate::DuelError::InvalidConfig(format!(
                "opening hand of {} does not fit a hand of {}",
                self.opening_hand, self.hand_capacity
            )));
        }
        if self.field_size == 0 {
            return Err(crate::DuelError::InvalidConfig(
                "field size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let rules = RulesConfig::default();
        assert_eq!(rules.deck_capacity, 60);
        assert_eq!(rules.hand_capacity, 10);
        assert_eq!(rules.field_size, 6);
        assert_eq!(rules.starting_health, 80);
        assert_eq!(rules.opening_hand, 7);
        assert_eq!(rules.first_player, FirstPlayer::A);
    }

    #[test]
    fn test_partial_override() {
        let rules = RulesConfig::parse(r#"{ "starting_health": 40, "first_player": "b" }"#).unwrap();
        assert_eq!(rules.starting_health, 40);
        assert_eq!(rules.first_player.index(), 1);
        assert_eq!(rules.field_size, 6);
    }

    #[test]
    fn test_rejects_unplayable_rules() {
        assert!(RulesConfig::parse(r#"{ "opening_hand": 11 }"#).is_err());
        assert!(RulesConfig::parse(r#"{ "field_size": 0 }"#).is_err());
        assert!(RulesConfig::parse("not json").is_err());
    }
}
