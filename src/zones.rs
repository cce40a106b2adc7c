//! Game zones (Deck, Hand, Field)
//!
//! Each zone owns the cards it holds. Moves check capacity before executing,
//! so a capacity failure from a zone is reported as an invariant violation.

use crate::core::{Card, CardId, CharacterInField};
use crate::{DuelError, Result};
use serde::{Deserialize, Serialize};

/// Ordered draw pile; the top of the deck is the end of the Vec
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    capacity: usize,
    cards: Vec<Card>,
}

impl Deck {
    pub fn new(capacity: usize) -> Self {
        Deck {
            capacity,
            cards: Vec::with_capacity(capacity),
        }
    }

    /// Put a card on the bottom of the deck (deck building order)
    pub fn add_to_bottom(&mut self, card: Card) -> Result<()> {
        if self.cards.len() >= self.capacity {
            return Err(DuelError::InvalidDeckFormat(format!(
                "deck holds at most {} cards",
                self.capacity
            )));
        }
        self.cards.insert(0, card);
        Ok(())
    }

    /// Remove the top card
    pub fn draw_top(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    pub fn peek_top(&self) -> Option<&Card> {
        self.cards.last()
    }

    pub fn shuffle(&mut self, rng: &mut impl rand::Rng) {
        use rand::seq::SliceRandom;
        self.cards.shuffle(rng);
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Cards from top to bottom
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter().rev()
    }
}

/// Unordered bag of cards with a maximum size
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    capacity: usize,
    cards: Vec<Card>,
}

impl Hand {
    pub fn new(capacity: usize) -> Self {
        Hand {
            capacity,
            cards: Vec::new(),
        }
    }

    /// Add a card, handing it back if the hand is full
    pub fn add(&mut self, card: Card) -> std::result::Result<(), Card> {
        if self.is_full() {
            return Err(card);
        }
        self.cards.push(card);
        Ok(())
    }

    pub fn get(&self, card_id: CardId) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == card_id)
    }

    pub fn contains(&self, card_id: CardId) -> bool {
        self.get(card_id).is_some()
    }

    pub fn remove(&mut self, card_id: CardId) -> Option<Card> {
        // remove() rather than swap_remove() keeps display order stable
        let pos = self.cards.iter().position(|c| c.id == card_id)?;
        Some(self.cards.remove(pos))
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.cards.len() >= self.capacity
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }
}

/// Character slots plus the skills attached to them
///
/// Both sub-zones share the same capacity (`size`). Skills live on the
/// character they are attached to; the skill count is the sum over all
/// characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    size: usize,
    characters: Vec<CharacterInField>,
}

impl Field {
    pub fn new(size: usize) -> Self {
        Field {
            size,
            characters: Vec::with_capacity(size),
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn character_count(&self) -> usize {
        self.characters.len()
    }

    pub fn skill_count(&self) -> usize {
        self.characters.iter().map(|c| c.skills().len()).sum()
    }

    pub fn has_character_slot(&self) -> bool {
        self.character_count() < self.size
    }

    pub fn has_skill_slot(&self) -> bool {
        self.skill_count() < self.size
    }

    pub fn characters(&self) -> impl Iterator<Item = &CharacterInField> {
        self.characters.iter()
    }

    pub fn character(&self, id: CardId) -> Option<&CharacterInField> {
        self.characters.iter().find(|c| c.id() == id)
    }

    pub(crate) fn character_mut(&mut self, id: CardId) -> Option<&mut CharacterInField> {
        self.characters.iter_mut().find(|c| c.id() == id)
    }

    /// Id of the character a skill is attached to
    pub fn skill_host(&self, skill_id: CardId) -> Option<CardId> {
        self.characters
            .iter()
            .find(|c| c.has_skill(skill_id))
            .map(CharacterInField::id)
    }

    pub(crate) fn summon(&mut self, character: CharacterInField) -> Result<()> {
        if !self.has_character_slot() {
            return Err(DuelError::InvariantViolation(format!(
                "summoning {} into a full field ({} slots)",
                character.id(),
                self.size
            )));
        }
        self.characters.push(character);
        Ok(())
    }

    pub(crate) fn remove_character(&mut self, id: CardId) -> Option<CharacterInField> {
        let pos = self.characters.iter().position(|c| c.id() == id)?;
        Some(self.characters.remove(pos))
    }

    pub(crate) fn attach_skill(&mut self, target: CardId, skill: Card) -> Result<()> {
        if !self.has_skill_slot() {
            return Err(DuelError::InvariantViolation(format!(
                "attaching skill {} with all {} skill slots used",
                skill.id, self.size
            )));
        }
        let host = self
            .character_mut(target)
            .ok_or(DuelError::EntityNotFound(target.as_u32()))?;
        host.attach(skill);
        Ok(())
    }

    pub(crate) fn remove_skill(&mut self, skill_id: CardId) -> Option<Card> {
        self.characters
            .iter_mut()
            .find(|c| c.has_skill(skill_id))
            .and_then(|c| c.detach(skill_id))
    }

    /// Clear per-turn flags of every character
    pub(crate) fn refresh(&mut self) {
        for character in &mut self.characters {
            character.refresh();
        }
    }
}
