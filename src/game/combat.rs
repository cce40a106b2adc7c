//! Combat resolution
//!
//! An attack is resolved in two steps. `plan_attack` looks at the attacker
//! and the defender and decides what happens without touching anything;
//! `GameState::resolve_attack` then applies that plan in one go, so no
//! caller can observe a half-resolved attack.

use crate::core::{CardId, CharacterInField, PlayerId, Position};
use crate::game::{GameEvent, GameState};
use crate::{DuelError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// What an attacking character is aimed at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttackTarget {
    /// The opposing player directly
    Player,
    /// A character on the opposing field
    Character(CardId),
}

impl fmt::Display for AttackTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttackTarget::Player => write!(f, "the opponent"),
            AttackTarget::Character(id) => write!(f, "character {id}"),
        }
    }
}

/// Result of comparing an attacker against its target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CombatOutcome {
    /// Attacker's total attack at the moment of the attack
    pub attack: i32,
    /// Defending character's total defense, if a character was targeted
    pub defense: Option<i32>,
    /// Health the defending player loses
    pub damage: i32,
    pub destroy_defender: bool,
}

/// Decide the outcome of an attack
///
/// Without a defender the whole attack goes through to the player. Against
/// a character, the attack has to beat the defender's total defense in either
/// position to destroy it; the excess only reaches the player when the
/// defender stood in Attack position or the attacker carries a Power-Up.
pub fn plan_attack(attacker: &CharacterInField, defender: Option<&CharacterInField>) -> CombatOutcome {
    let attack = attacker.total_attack();
    let Some(defender) = defender else {
        return CombatOutcome {
            attack,
            defense: None,
            damage: attack,
            destroy_defender: false,
        };
    };

    let defense = defender.total_defense();
    if attack <= defense {
        return CombatOutcome {
            attack,
            defense: Some(defense),
            damage: 0,
            destroy_defender: false,
        };
    }

    let pierces = defender.position == Position::Attack || attacker.has_power_up();
    CombatOutcome {
        attack,
        defense: Some(defense),
        damage: if pierces { attack.saturating_sub(defense) } else { 0 },
        destroy_defender: true,
    }
}

impl GameState {
    /// Apply an attack that has already been validated
    pub(crate) fn resolve_attack(
        &mut self,
        player: PlayerId,
        attacker: CardId,
        target: AttackTarget,
    ) -> Result<()> {
        let defender_id = self.opponent_of(player)?;

        let outcome = {
            let attacking = self
                .player(player)?
                .field
                .character(attacker)
                .ok_or(DuelError::EntityNotFound(attacker.as_u32()))?;
            let defending = match target {
                AttackTarget::Player => None,
                AttackTarget::Character(id) => Some(
                    self.player(defender_id)?
                        .field
                        .character(id)
                        .ok_or(DuelError::EntityNotFound(id.as_u32()))?,
                ),
            };
            plan_attack(attacking, defending)
        };

        self.player_mut(player)?
            .field
            .character_mut(attacker)
            .ok_or(DuelError::EntityNotFound(attacker.as_u32()))?
            .has_attacked = true;

        let defender = self.player_mut(defender_id)?;
        defender.lose_health(outcome.damage);
        let defender_health = defender.health;

        self.events.push(GameEvent::AttackResolved {
            player,
            attacker,
            target,
            attack: outcome.attack,
            damage: outcome.damage,
            defender_health,
        });

        if let (true, AttackTarget::Character(id)) = (outcome.destroy_defender, target) {
            let defender = self.player_mut(defender_id)?;
            defender.remove_character(id)?;
            let (field_characters, field_skills) =
                (defender.field.character_count(), defender.field.skill_count());
            self.events.push(GameEvent::CharacterDestroyed {
                player: defender_id,
                card: id,
                field_characters,
                field_skills,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Card, Element};

    fn summon(id: u32, attack: i32, defense: i32, position: Position) -> CharacterInField {
        let card = Card::character(CardId::new(id), format!("Bender {id}"), Element::Fire, attack, defense, 1);
        CharacterInField::new(card, position, 1)
    }

    #[test]
    fn test_direct_attack_uses_total_attack() {
        let mut zuko = summon(1, 1200, 500, Position::Attack);
        zuko.attach(Card::aura(CardId::new(2), "Blue Fire", Element::Fire, 1, 300, 0));

        let outcome = plan_attack(&zuko, None);
        assert_eq!(outcome.damage, 1500);
        assert!(!outcome.destroy_defender);
        assert_eq!(outcome.defense, None);
    }

    #[test]
    fn test_attack_position_defender_takes_excess() {
        let attacker = summon(1, 1000, 0, Position::Attack);
        let defender = summon(2, 3000, 700, Position::Attack);

        let outcome = plan_attack(&attacker, Some(&defender));
        assert!(outcome.destroy_defender);
        assert_eq!(outcome.defense, Some(700));
        assert_eq!(outcome.damage, 300);
    }

    #[test]
    fn test_high_defense_survives_in_attack_position() {
        let attacker = summon(1, 1000, 0, Position::Attack);
        let defender = summon(2, 500, 3000, Position::Attack);

        let outcome = plan_attack(&attacker, Some(&defender));
        assert!(!outcome.destroy_defender);
        assert_eq!(outcome.defense, Some(3000));
        assert_eq!(outcome.damage, 0);
    }

    #[test]
    fn test_excess_damage_saturates() {
        let attacker = summon(1, i32::MAX, 0, Position::Attack);
        let defender = summon(2, 0, i32::MIN, Position::Attack);

        let outcome = plan_attack(&attacker, Some(&defender));
        assert!(outcome.destroy_defender);
        assert_eq!(outcome.damage, i32::MAX);
    }

    #[test]
    fn test_defense_position_blocks_excess() {
        let attacker = summon(1, 1000, 0, Position::Attack);
        let defender = summon(2, 2000, 600, Position::Defense);

        let outcome = plan_attack(&attacker, Some(&defender));
        assert!(outcome.destroy_defender);
        assert_eq!(outcome.damage, 0);
    }

    #[test]
    fn test_power_up_pierces_defense_position() {
        let mut attacker = summon(1, 1000, 0, Position::Attack);
        attacker.attach(Card::power_up(CardId::new(3), "Lightning", Element::Fire, 2));
        let defender = summon(2, 2000, 600, Position::Defense);

        let outcome = plan_attack(&attacker, Some(&defender));
        assert!(outcome.destroy_defender);
        assert_eq!(outcome.damage, 400);
    }

    #[test]
    fn test_equal_values_destroy_nothing() {
        let attacker = summon(1, 800, 0, Position::Attack);
        let defender = summon(2, 100, 800, Position::Attack);

        let outcome = plan_attack(&attacker, Some(&defender));
        assert!(!outcome.destroy_defender);
        assert_eq!(outcome.damage, 0);
    }

    #[test]
    fn test_target_display() {
        assert_eq!(AttackTarget::Player.to_string(), "the opponent");
        assert_eq!(AttackTarget::Character(CardId::new(4)).to_string(), "character 4");
    }
}
