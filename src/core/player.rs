//! Player representation

use crate::config::RulesConfig;
use crate::core::{Card, CardId, CharacterInField, Element, GameEntity, PlayerId, PlayerName, Position, PowerManager};
use crate::zones::{Deck, Field, Hand};
use crate::{DuelError, Result};
use serde::{Deserialize, Serialize};

/// Represents a player in the game
///
/// The zone-transition methods here do the bookkeeping only. Whether a move
/// is allowed (phase, turn, costs) is decided by `game::Move::validate`
/// before any of them is called.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Unique ID for this player
    pub id: PlayerId,

    /// Player name
    pub name: PlayerName,

    /// Health; may go negative
    pub health: i32,

    pub deck: Deck,
    pub hand: Hand,
    pub field: Field,

    /// Lands and skills that have left play, newest last
    pub discard: Vec<Card>,

    /// Elemental power ledger
    pub power: PowerManager,

    /// Has a land been played this turn?
    pub has_played_land: bool,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<PlayerName>, rules: &RulesConfig) -> Self {
        Player {
            id,
            name: name.into(),
            health: rules.starting_health,
            deck: Deck::new(rules.deck_capacity),
            hand: Hand::new(rules.hand_capacity),
            field: Field::new(rules.field_size),
            discard: Vec::new(),
            power: PowerManager::new(),
            has_played_land: false,
        }
    }

    /// Move the top card of the deck into the hand
    ///
    /// Fails without changing anything if the deck is empty (a loss for this
    /// player) or the hand is already full.
    pub fn draw(&mut self) -> Result<CardId> {
        if self.deck.is_empty() {
            return Err(DuelError::DeckExhausted(self.id));
        }
        if self.hand.is_full() {
            return Err(DuelError::HandFull(self.id));
        }
        let card = self
            .deck
            .draw_top()
            .ok_or(DuelError::DeckExhausted(self.id))?;
        let id = card.id;
        self.hand
            .add(card)
            .map_err(|c| DuelError::InvariantViolation(format!("hand overflow drawing {}", c.id)))?;
        Ok(id)
    }

    fn take_from_hand(&mut self, card_id: CardId) -> Result<Card> {
        self.hand
            .remove(card_id)
            .ok_or(DuelError::EntityNotFound(card_id.as_u32()))
    }

    /// Consume a land from hand into the power ledger; returns what it produced
    pub fn play_land(&mut self, card_id: CardId) -> Result<(Element, u32)> {
        if !self.hand.get(card_id).is_some_and(Card::is_land) {
            return Err(DuelError::InvariantViolation(format!("card {card_id} is not a land in hand")));
        }
        let card = self.take_from_hand(card_id)?;
        let produced = (card.element, card.power());
        self.power.add(produced.0, produced.1);
        self.has_played_land = true;
        self.discard.push(card);
        Ok(produced)
    }

    /// Pay for and summon a Character from hand
    pub fn play_character(&mut self, card_id: CardId, position: Position, turn: u32) -> Result<()> {
        let (element, cost) = match self.hand.get(card_id) {
            Some(card) if card.is_character() => (card.element, card.cost()),
            _ => {
                return Err(DuelError::InvariantViolation(format!(
                    "card {card_id} is not a character in hand"
                )))
            }
        };
        if !self.field.has_character_slot() {
            return Err(DuelError::InvariantViolation("no free character slot".to_string()));
        }
        self.power.spend(element, cost)?;
        let card = self.take_from_hand(card_id)?;
        self.field.summon(CharacterInField::new(card, position, turn))
    }

    /// Pay for and attach a Skill from hand to one of our characters
    pub fn play_skill(&mut self, card_id: CardId, target: CardId) -> Result<()> {
        let (element, cost) = match self.hand.get(card_id) {
            Some(card) if card.is_skill() => (card.element, card.cost()),
            _ => {
                return Err(DuelError::InvariantViolation(format!(
                    "card {card_id} is not a skill in hand"
                )))
            }
        };
        if self.field.character(target).is_none() || !self.field.has_skill_slot() {
            return Err(DuelError::InvariantViolation(format!(
                "cannot attach skill {card_id} to {target}"
            )));
        }
        self.power.spend(element, cost)?;
        let card = self.take_from_hand(card_id)?;
        self.field.attach_skill(target, card)
    }

    /// Remove a character and its skills from the field into the discard pile
    pub fn remove_character(&mut self, id: CardId) -> Result<Card> {
        let character = self
            .field
            .remove_character(id)
            .ok_or(DuelError::EntityNotFound(id.as_u32()))?;
        let (card, skills) = character.into_cards();
        self.discard.extend(skills);
        self.discard.push(card.clone());
        Ok(card)
    }

    /// Detach one skill from the field into the discard pile
    pub fn remove_skill(&mut self, skill_id: CardId) -> Result<Card> {
        let skill = self
            .field
            .remove_skill(skill_id)
            .ok_or(DuelError::EntityNotFound(skill_id.as_u32()))?;
        self.discard.push(skill.clone());
        Ok(skill)
    }

    /// Health may go negative; it saturates instead of wrapping
    pub fn lose_health(&mut self, amount: i32) {
        self.health = self.health.saturating_sub(amount);
    }

    pub fn check_lose(&self) -> bool {
        self.health <= 0
    }

    /// Clear the once-per-turn flags (land played, characters attacked)
    pub fn clear_turn_flags(&mut self) {
        self.has_played_land = false;
        self.field.refresh();
    }

    /// Reset per-turn state when this player's turn begins
    pub fn start_turn(&mut self) {
        self.clear_turn_flags();
        self.power.refresh();
    }

    /// Every card this player owns, across all zones
    pub fn card_count(&self) -> usize {
        self.deck.len()
            + self.hand.len()
            + self.field.character_count()
            + self.field.skill_count()
            + self.discard.len()
    }
}

impl GameEntity<Player> for Player {
    fn id(&self) -> PlayerId {
        self.id
    }

    fn name(&self) -> &str {
        self.name.as_str()
    }
}
