//! Card types and definitions

use crate::core::{CardId, CardName, Element, GameEntity};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind-specific part of a card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CardKind {
    /// Produces `power` of its element when played
    Land { power: u32 },

    /// Summonable fighter; `power` is its summoning cost
    Character { attack: i32, defense: i32, power: u32 },

    /// Attached to a character; adds `attack`/`defense` to it
    SkillAura { power: u32, attack: i32, defense: i32 },

    /// Attached to a character; lets excess attack pierce a defender
    SkillPowerUp { power: u32 },
}

impl CardKind {
    /// Name used in deck records and error messages
    pub fn tag(&self) -> &'static str {
        match self {
            CardKind::Land { .. } => "LAND",
            CardKind::Character { .. } => "CHARACTER",
            CardKind::SkillAura { .. } => "SKILL_AURA",
            CardKind::SkillPowerUp { .. } => "SKILL_POWER_UP",
        }
    }
}

/// An immutable card, created once when a deck is loaded
///
/// A card is moved between zones, never copied, so at any moment exactly one
/// zone owns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub name: CardName,
    pub element: Element,
    #[serde(default)]
    pub description: String,
    /// Reference to the card art; never loaded by the engine
    #[serde(default)]
    pub image: String,
    #[serde(flatten)]
    pub kind: CardKind,
}

impl Card {
    pub fn new(
        id: CardId,
        name: impl Into<CardName>,
        element: Element,
        kind: CardKind,
    ) -> Self {
        Card {
            id,
            name: name.into(),
            element,
            description: String::new(),
            image: String::new(),
            kind,
        }
    }

    pub fn land(id: CardId, name: impl Into<CardName>, element: Element) -> Self {
        Card::new(id, name, element, CardKind::Land { power: 1 })
    }

    pub fn character(
        id: CardId,
        name: impl Into<CardName>,
        element: Element,
        attack: i32,
        defense: i32,
        power: u32,
    ) -> Self {
        Card::new(id, name, element, CardKind::Character { attack, defense, power })
    }

    pub fn aura(
        id: CardId,
        name: impl Into<CardName>,
        element: Element,
        power: u32,
        attack: i32,
        defense: i32,
    ) -> Self {
        Card::new(id, name, element, CardKind::SkillAura { power, attack, defense })
    }

    pub fn power_up(id: CardId, name: impl Into<CardName>, element: Element, power: u32) -> Self {
        Card::new(id, name, element, CardKind::SkillPowerUp { power })
    }

    pub fn is_land(&self) -> bool {
        matches!(self.kind, CardKind::Land { .. })
    }

    pub fn is_character(&self) -> bool {
        matches!(self.kind, CardKind::Character { .. })
    }

    pub fn is_skill(&self) -> bool {
        matches!(self.kind, CardKind::SkillAura { .. } | CardKind::SkillPowerUp { .. })
    }

    pub fn is_power_up(&self) -> bool {
        matches!(self.kind, CardKind::SkillPowerUp { .. })
    }

    /// The card's power value: land yield, or summoning/casting cost
    pub fn power(&self) -> u32 {
        match self.kind {
            CardKind::Land { power }
            | CardKind::Character { power, .. }
            | CardKind::SkillAura { power, .. }
            | CardKind::SkillPowerUp { power } => power,
        }
    }

    /// Cost paid from the ledger to play this card (lands are free)
    pub fn cost(&self) -> u32 {
        if self.is_land() {
            0
        } else {
            self.power()
        }
    }

    /// Attack contributed by this card: base attack or aura bonus
    pub fn attack(&self) -> i32 {
        match self.kind {
            CardKind::Character { attack, .. } | CardKind::SkillAura { attack, .. } => attack,
            _ => 0,
        }
    }

    /// Defense contributed by this card: base defense or aura bonus
    pub fn defense(&self) -> i32 {
        match self.kind {
            CardKind::Character { defense, .. } | CardKind::SkillAura { defense, .. } => defense,
            _ => 0,
        }
    }
}

impl GameEntity<Card> for Card {
    fn id(&self) -> CardId {
        self.id
    }

    fn name(&self) -> &str {
        self.name.as_str()
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}
