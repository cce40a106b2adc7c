//! Notifications about completed state changes
//!
//! Moves push events onto the `EventQueue` owned by the game state while they
//! execute. The queue is drained once the move has finished and the drained
//! events are handed to subscribers in FIFO order. Subscribers only ever see
//! `&GameEvent`; they hold no reference to the game, so delivery can never
//! re-enter a move that is still executing.

use crate::core::{CardId, Element, PlayerId, Position};
use crate::game::{AttackTarget, Phase};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

/// Why a player lost the match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LossReason {
    /// Health dropped to zero or below
    HealthDepleted,
    /// Had to draw from an empty deck
    DeckExhausted,
}

/// Final result of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub winner: PlayerId,
    pub loser: PlayerId,
    pub reason: LossReason,
}

/// One completed state change, with what a display needs to re-render it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event")]
pub enum GameEvent {
    CardDrawn {
        player: PlayerId,
        card: CardId,
        hand_size: usize,
        deck_size: usize,
    },
    /// Turn draw skipped because the hand was at capacity
    DrawSkipped {
        player: PlayerId,
        hand_size: usize,
        deck_size: usize,
    },
    LandPlayed {
        player: PlayerId,
        card: CardId,
        element: Element,
        /// Spendable power of `element` after the land
        current_power: u32,
        total_power: u32,
    },
    CharacterPlayed {
        player: PlayerId,
        card: CardId,
        position: Position,
        hand_size: usize,
        field_characters: usize,
    },
    SkillAttached {
        player: PlayerId,
        skill: CardId,
        target: CardId,
        total_attack: i32,
        total_defense: i32,
        field_skills: usize,
    },
    AttackResolved {
        player: PlayerId,
        attacker: CardId,
        target: AttackTarget,
        attack: i32,
        /// Damage dealt to the defending player
        damage: i32,
        defender_health: i32,
    },
    CharacterDestroyed {
        player: PlayerId,
        card: CardId,
        field_characters: usize,
        field_skills: usize,
    },
    SkillRemoved {
        player: PlayerId,
        skill: CardId,
        host: CardId,
        field_skills: usize,
    },
    PositionChanged {
        player: PlayerId,
        character: CardId,
        position: Position,
    },
    PhaseAdvanced {
        turn: u32,
        phase: Phase,
    },
    TurnStarted {
        turn: u32,
        player: PlayerId,
    },
    MatchOver(MatchResult),
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameEvent::CardDrawn { player, card, hand_size, deck_size } => write!(
                f,
                "player {player} draws {card} (hand {hand_size}, deck {deck_size})"
            ),
            GameEvent::DrawSkipped { player, hand_size, .. } => {
                write!(f, "player {player} skips the draw (hand full at {hand_size})")
            }
            GameEvent::LandPlayed { player, card, element, current_power, total_power } => write!(
                f,
                "player {player} plays land {card}: {element} {current_power}/{total_power}"
            ),
            GameEvent::CharacterPlayed { player, card, position, field_characters, .. } => write!(
                f,
                "player {player} summons {card} in {position} position ({field_characters} on field)"
            ),
            GameEvent::SkillAttached { player, skill, target, total_attack, total_defense, .. } => write!(
                f,
                "player {player} attaches {skill} to {target} ({total_attack}/{total_defense})"
            ),
            GameEvent::AttackResolved { player, attacker, target, attack, damage, defender_health } => write!(
                f,
                "player {player} attacks {target} with {attacker} ({attack}): {damage} damage, defender at {defender_health}"
            ),
            GameEvent::CharacterDestroyed { player, card, .. } => {
                write!(f, "player {player} loses character {card}")
            }
            GameEvent::SkillRemoved { player, skill, host, .. } => {
                write!(f, "player {player} removes skill {skill} from {host}")
            }
            GameEvent::PositionChanged { player, character, position } => {
                write!(f, "player {player} turns {character} to {position} position")
            }
            GameEvent::PhaseAdvanced { turn, phase } => write!(f, "turn {turn}: {phase}"),
            GameEvent::TurnStarted { turn, player } => write!(f, "turn {turn} begins for player {player}"),
            GameEvent::MatchOver(result) => write!(
                f,
                "match over: player {} wins ({:?} for player {})",
                result.winner, result.reason, result.loser
            ),
        }
    }
}

/// FIFO of events produced by the move currently executing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventQueue {
    pending: VecDeque<GameEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: GameEvent) {
        self.pending.push_back(event);
    }

    /// Take every pending event, oldest first
    pub fn drain(&mut self) -> Vec<GameEvent> {
        self.pending.drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

/// Receiver of drained events (status panels, recorders, win banners)
pub trait EventSubscriber {
    fn on_event(&mut self, event: &GameEvent);
}

/// Subscriber that keeps every event it is given
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    pub events: Vec<GameEvent>,
}

impl EventSubscriber for EventLog {
    fn on_event(&mut self, event: &GameEvent) {
        self.events.push(event.clone());
    }
}

/// Fan-out of drained events to registered subscribers
#[derive(Default)]
pub struct EventBus {
    subscribers: Vec<Box<dyn EventSubscriber>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, subscriber: Box<dyn EventSubscriber>) {
        self.subscribers.push(subscriber);
    }

    /// Deliver events in order; each event reaches every subscriber before the next
    pub fn publish(&mut self, events: &[GameEvent]) {
        for event in events {
            for subscriber in &mut self.subscribers {
                subscriber.on_event(event);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
