//! Moves and their legality checks
//!
//! Every player decision is a `Move`. `Move::validate` is a pure check
//! against the current state; `Move::execute` validates again and then
//! performs the state change, queueing one event per change. Callers go
//! through `GameState::apply` (or the command methods built on it), which
//! also runs the win check and drains the queued events.

use crate::core::{Card, CardId, PlayerId, Position};
use crate::error::IllegalMove;
use crate::game::{AttackTarget, GameEvent, GameState};
use crate::{DuelError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A player decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Move {
    /// Consume a land from hand into the power ledger
    PlayLand { player: PlayerId, card: CardId },

    /// Pay for and summon a character from hand
    PlayCharacter {
        player: PlayerId,
        card: CardId,
        position: Position,
    },

    /// Pay for and attach a skill to one of the player's characters
    PlaySkill {
        player: PlayerId,
        card: CardId,
        target: CardId,
    },

    /// Attack the opponent or one of the opponent's characters
    Attack {
        player: PlayerId,
        attacker: CardId,
        target: AttackTarget,
    },

    /// Toggle a character between Attack and Defense position
    ChangePosition { player: PlayerId, character: CardId },

    /// Discard one of the player's characters, with its skills
    RemoveCharacter { player: PlayerId, character: CardId },

    /// Discard one attached skill
    RemoveSkill { player: PlayerId, skill: CardId },

    /// Advance to the next phase (ends the turn after End)
    EndPhase,

    /// End the turn from any phase
    EndTurn,
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::PlayLand { player, card } => write!(f, "player {player} plays land {card}"),
            Move::PlayCharacter { player, card, position } => {
                write!(f, "player {player} summons {card} in {position} position")
            }
            Move::PlaySkill { player, card, target } => {
                write!(f, "player {player} attaches {card} to {target}")
            }
            Move::Attack { player, attacker, target } => {
                write!(f, "player {player} attacks {target} with {attacker}")
            }
            Move::ChangePosition { player, character } => {
                write!(f, "player {player} changes position of {character}")
            }
            Move::RemoveCharacter { player, character } => {
                write!(f, "player {player} removes character {character}")
            }
            Move::RemoveSkill { player, skill } => write!(f, "player {player} removes skill {skill}"),
            Move::EndPhase => write!(f, "end phase"),
            Move::EndTurn => write!(f, "end turn"),
        }
    }
}

fn require_main_phase(state: &GameState) -> std::result::Result<(), IllegalMove> {
    let phase = state.current_phase();
    if phase.is_main() {
        Ok(())
    } else {
        Err(IllegalMove::WrongPhase(phase))
    }
}

fn require_active(state: &GameState, player: PlayerId) -> std::result::Result<(), IllegalMove> {
    if state.active_player() == player {
        Ok(())
    } else {
        Err(IllegalMove::NotActivePlayer(player))
    }
}

/// Look up a card in the active player's hand and check its kind
fn card_in_hand<'a>(
    state: &'a GameState,
    card: CardId,
    expected: &'static str,
    is_kind: fn(&Card) -> bool,
) -> std::result::Result<&'a Card, IllegalMove> {
    let found = state
        .active()
        .hand
        .get(card)
        .ok_or(IllegalMove::CardNotInHand(card))?;
    if is_kind(found) {
        Ok(found)
    } else {
        Err(IllegalMove::WrongCardKind { card, expected })
    }
}

impl Move {
    /// Check whether this move may be executed right now
    ///
    /// Never mutates and never panics; an illegal move reports its first
    /// failing condition.
    pub fn validate(&self, state: &GameState) -> std::result::Result<(), IllegalMove> {
        if state.is_game_over() {
            return Err(IllegalMove::MatchOver);
        }

        match *self {
            Move::PlayLand { player, card } => {
                require_main_phase(state)?;
                require_active(state, player)?;
                card_in_hand(state, card, "land", Card::is_land)?;
                let me = state.active();
                if !me.field.has_skill_slot() {
                    return Err(IllegalMove::SkillZoneFull);
                }
                if me.has_played_land {
                    return Err(IllegalMove::LandAlreadyPlayed);
                }
                Ok(())
            }

            Move::PlayCharacter { player, card, .. } => {
                require_main_phase(state)?;
                require_active(state, player)?;
                let found = card_in_hand(state, card, "character", Card::is_character)?;
                let me = state.active();
                if !me.field.has_character_slot() {
                    return Err(IllegalMove::CharacterZoneFull);
                }
                me.power.check_spend(found.element, found.cost())
            }

            Move::PlaySkill { player, card, target } => {
                require_main_phase(state)?;
                require_active(state, player)?;
                let found = card_in_hand(state, card, "skill", Card::is_skill)?;
                let me = state.active();
                if me.field.character(target).is_none() {
                    return Err(IllegalMove::CharacterNotOnField(target));
                }
                if !me.field.has_skill_slot() {
                    return Err(IllegalMove::SkillZoneFull);
                }
                me.power.check_spend(found.element, found.cost())
            }

            Move::Attack { player, attacker, target } => {
                let phase = state.current_phase();
                if !phase.is_battle() {
                    return Err(IllegalMove::WrongPhase(phase));
                }
                require_active(state, player)?;
                if state.turn_number() == 1 {
                    return Err(IllegalMove::FirstTurn);
                }
                let character = state
                    .active()
                    .field
                    .character(attacker)
                    .ok_or(IllegalMove::CharacterNotOnField(attacker))?;
                if character.is_summoned_on(state.turn_number()) {
                    return Err(IllegalMove::SummoningSickness(attacker));
                }
                if character.has_attacked {
                    return Err(IllegalMove::AlreadyAttacked(attacker));
                }
                if character.position == Position::Defense {
                    return Err(IllegalMove::DefensePosition(attacker));
                }
                if let AttackTarget::Character(id) = target {
                    let on_opposing_field = state
                        .players
                        .iter()
                        .filter(|p| p.id != player)
                        .any(|p| p.field.character(id).is_some());
                    if !on_opposing_field {
                        return Err(IllegalMove::TargetNotOnField(id));
                    }
                }
                Ok(())
            }

            Move::ChangePosition { player, character } => {
                require_main_phase(state)?;
                require_active(state, player)?;
                let found = state
                    .active()
                    .field
                    .character(character)
                    .ok_or(IllegalMove::CharacterNotOnField(character))?;
                if found.has_attacked {
                    return Err(IllegalMove::AlreadyAttacked(character));
                }
                Ok(())
            }

            Move::RemoveCharacter { player, character } => {
                require_main_phase(state)?;
                require_active(state, player)?;
                if state.active().field.character(character).is_none() {
                    return Err(IllegalMove::CharacterNotOnField(character));
                }
                Ok(())
            }

            Move::RemoveSkill { player, skill } => {
                require_main_phase(state)?;
                require_active(state, player)?;
                if state.active().field.skill_host(skill).is_none() {
                    return Err(IllegalMove::SkillNotOnField(skill));
                }
                Ok(())
            }

            Move::EndPhase | Move::EndTurn => Ok(()),
        }
    }

    pub fn is_legal(&self, state: &GameState) -> bool {
        self.validate(state).is_ok()
    }

    /// Validate, then perform the move and queue its events
    ///
    /// Does not run the win check or drain the queue; use `GameState::apply`.
    pub fn execute(&self, state: &mut GameState) -> Result<()> {
        self.validate(state)?;

        match *self {
            Move::PlayLand { player, card } => {
                let me = state.player_mut(player)?;
                let (element, _) = me.play_land(card)?;
                let power = me.power;
                let (current_power, total_power) = (power.current(element), power.total(element));
                log_if_verbose!(state.logger, verbose, "power: {power}");
                state.events.push(GameEvent::LandPlayed {
                    player,
                    card,
                    element,
                    current_power,
                    total_power,
                });
            }

            Move::PlayCharacter { player, card, position } => {
                let turn = state.turn_number();
                let me = state.player_mut(player)?;
                me.play_character(card, position, turn)?;
                let (hand_size, field_characters) = (me.hand.len(), me.field.character_count());
                state.events.push(GameEvent::CharacterPlayed {
                    player,
                    card,
                    position,
                    hand_size,
                    field_characters,
                });
            }

            Move::PlaySkill { player, card, target } => {
                let me = state.player_mut(player)?;
                me.play_skill(card, target)?;
                let host = me
                    .field
                    .character(target)
                    .ok_or(DuelError::EntityNotFound(target.as_u32()))?;
                let event = GameEvent::SkillAttached {
                    player,
                    skill: card,
                    target,
                    total_attack: host.total_attack(),
                    total_defense: host.total_defense(),
                    field_skills: me.field.skill_count(),
                };
                state.events.push(event);
            }

            Move::Attack { player, attacker, target } => {
                state.resolve_attack(player, attacker, target)?;
            }

            Move::ChangePosition { player, character } => {
                let found = state
                    .player_mut(player)?
                    .field
                    .character_mut(character)
                    .ok_or(DuelError::EntityNotFound(character.as_u32()))?;
                found.position = found.position.toggled();
                let position = found.position;
                state.events.push(GameEvent::PositionChanged {
                    player,
                    character,
                    position,
                });
            }

            Move::RemoveCharacter { player, character } => {
                let me = state.player_mut(player)?;
                me.remove_character(character)?;
                let (field_characters, field_skills) = (me.field.character_count(), me.field.skill_count());
                state.events.push(GameEvent::CharacterDestroyed {
                    player,
                    card: character,
                    field_characters,
                    field_skills,
                });
            }

            Move::RemoveSkill { player, skill } => {
                let me = state.player_mut(player)?;
                let host = me
                    .field
                    .skill_host(skill)
                    .ok_or(DuelError::EntityNotFound(skill.as_u32()))?;
                me.remove_skill(skill)?;
                let field_skills = me.field.skill_count();
                state.events.push(GameEvent::SkillRemoved {
                    player,
                    skill,
                    host,
                    field_skills,
                });
            }

            Move::EndPhase => state.advance_phase()?,

            Move::EndTurn => state.finish_turn()?,
        }

        Ok(())
    }
}

impl GameState {
    /// Validate and execute a move, returning the events it produced
    ///
    /// An illegal move leaves the state untouched and comes back as
    /// `DuelError::IllegalMove`.
    pub fn apply(&mut self, mv: Move) -> Result<Vec<GameEvent>> {
        if let Err(reason) = mv.validate(self) {
            log_if_verbose!(self.logger, verbose, "rejected: {mv}: {reason}");
            return Err(reason.into());
        }

        log_if_verbose!(self.logger, normal, "{mv}");
        if let Err(e) = mv.execute(self).and_then(|()| self.check_win()) {
            self.events.drain();
            return Err(e);
        }
        Ok(self.events.drain())
    }

    pub fn play_land(&mut self, player: PlayerId, card: CardId) -> Result<Vec<GameEvent>> {
        self.apply(Move::PlayLand { player, card })
    }

    pub fn can_play_land(&self, player: PlayerId, card: CardId) -> bool {
        Move::PlayLand { player, card }.is_legal(self)
    }

    pub fn play_character(
        &mut self,
        player: PlayerId,
        card: CardId,
        position: Position,
    ) -> Result<Vec<GameEvent>> {
        self.apply(Move::PlayCharacter { player, card, position })
    }

    pub fn can_play_character(&self, player: PlayerId, card: CardId) -> bool {
        Move::PlayCharacter {
            player,
            card,
            position: Position::Attack,
        }
        .is_legal(self)
    }

    pub fn play_skill(&mut self, player: PlayerId, card: CardId, target: CardId) -> Result<Vec<GameEvent>> {
        self.apply(Move::PlaySkill { player, card, target })
    }

    pub fn can_play_skill(&self, player: PlayerId, card: CardId, target: CardId) -> bool {
        Move::PlaySkill { player, card, target }.is_legal(self)
    }

    pub fn attack(&mut self, player: PlayerId, attacker: CardId, target: AttackTarget) -> Result<Vec<GameEvent>> {
        self.apply(Move::Attack { player, attacker, target })
    }

    pub fn can_attack(&self, player: PlayerId, attacker: CardId, target: AttackTarget) -> bool {
        Move::Attack { player, attacker, target }.is_legal(self)
    }

    pub fn change_position(&mut self, player: PlayerId, character: CardId) -> Result<Vec<GameEvent>> {
        self.apply(Move::ChangePosition { player, character })
    }

    pub fn can_change_position(&self, player: PlayerId, character: CardId) -> bool {
        Move::ChangePosition { player, character }.is_legal(self)
    }

    pub fn remove_character(&mut self, player: PlayerId, character: CardId) -> Result<Vec<GameEvent>> {
        self.apply(Move::RemoveCharacter { player, character })
    }

    pub fn can_remove_character(&self, player: PlayerId, character: CardId) -> bool {
        Move::RemoveCharacter { player, character }.is_legal(self)
    }

    pub fn remove_skill(&mut self, player: PlayerId, skill: CardId) -> Result<Vec<GameEvent>> {
        self.apply(Move::RemoveSkill { player, skill })
    }

    pub fn can_remove_skill(&self, player: PlayerId, skill: CardId) -> bool {
        Move::RemoveSkill { player, skill }.is_legal(self)
    }

    pub fn end_phase(&mut self) -> Result<Vec<GameEvent>> {
        self.apply(Move::EndPhase)
    }

    pub fn end_turn(&mut self) -> Result<Vec<GameEvent>> {
        self.apply(Move::EndTurn)
    }

    pub fn can_end_turn(&self) -> bool {
        Move::EndTurn.is_legal(self)
    }
}
