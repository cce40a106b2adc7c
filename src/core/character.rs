//! Summoned characters and the skills attached to them

use crate::core::{Card, CardId};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

/// Battle position of a summoned character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Position {
    /// Can attack; defends with its attack value
    #[default]
    Attack,
    /// Cannot attack; defends with its defense value
    Defense,
}

impl Position {
    pub fn toggled(self) -> Position {
        match self {
            Position::Attack => Position::Defense,
            Position::Defense => Position::Attack,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::Attack => write!(f, "attack"),
            Position::Defense => write!(f, "defense"),
        }
    }
}

/// A Character card on the field, with its per-turn combat state
///
/// Attached skills are owned here, so discarding the character discards
/// its skills with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterInField {
    card: Card,
    pub position: Position,
    pub has_attacked: bool,
    pub created_at_turn: u32,
    skills: SmallVec<[Card; 2]>,
}

impl CharacterInField {
    /// Wrap a Character card; `card` must be of the Character kind
    pub(crate) fn new(card: Card, position: Position, turn: u32) -> Self {
        debug_assert!(card.is_character());
        CharacterInField {
            card,
            position,
            has_attacked: false,
            created_at_turn: turn,
            skills: SmallVec::new(),
        }
    }

    pub fn id(&self) -> CardId {
        self.card.id
    }

    pub fn card(&self) -> &Card {
        &self.card
    }

    pub fn skills(&self) -> &[Card] {
        &self.skills
    }

    pub fn has_skill(&self, skill_id: CardId) -> bool {
        self.skills.iter().any(|s| s.id == skill_id)
    }

    pub fn has_power_up(&self) -> bool {
        self.skills.iter().any(Card::is_power_up)
    }

    /// Base attack plus every attached skill's attack bonus (saturating)
    pub fn total_attack(&self) -> i32 {
        self.skills
            .iter()
            .fold(self.card.attack(), |sum, skill| sum.saturating_add(skill.attack()))
    }

    /// Base defense plus every attached skill's defense bonus (saturating)
    pub fn total_defense(&self) -> i32 {
        self.skills
            .iter()
            .fold(self.card.defense(), |sum, skill| sum.saturating_add(skill.defense()))
    }

    pub fn is_summoned_on(&self, turn: u32) -> bool {
        self.created_at_turn == turn
    }

    pub(crate) fn attach(&mut self, skill: Card) {
        self.skills.push(skill);
    }

    pub(crate) fn detach(&mut self, skill_id: CardId) -> Option<Card> {
        let pos = self.skills.iter().position(|s| s.id == skill_id)?;
        Some(self.skills.remove(pos))
    }

    /// Start-of-turn reset of per-turn flags
    pub(crate) fn refresh(&mut self) {
        self.has_attacked = false;
    }

    /// Give back the character card and its skills
    pub(crate) fn into_cards(self) -> (Card, SmallVec<[Card; 2]>) {
        (self.card, self.skills)
    }
}
