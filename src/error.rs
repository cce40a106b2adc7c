//! Error types for the duel engine

use crate::core::{CardId, PlayerId};
use thiserror::Error;

/// Why a move was refused by its legality check
///
/// Illegal moves are always recoverable: the state is left untouched and the
/// reason can be shown to whoever issued the move.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IllegalMove {
    #[error("the match is already over")]
    MatchOver,

    #[error("not allowed during the {0} phase")]
    WrongPhase(crate::game::Phase),

    #[error("player {0} is not the active player")]
    NotActivePlayer(PlayerId),

    #[error("card {0} is not in the player's hand")]
    CardNotInHand(CardId),

    #[error("card {card} is not a {expected}")]
    WrongCardKind { card: CardId, expected: &'static str },

    #[error("character {0} is not on the player's field")]
    CharacterNotOnField(CardId),

    #[error("skill {0} is not attached on the player's field")]
    SkillNotOnField(CardId),

    #[error("no free character slot on the field")]
    CharacterZoneFull,

    #[error("no free skill slot on the field")]
    SkillZoneFull,

    #[error("a land has already been played this turn")]
    LandAlreadyPlayed,

    #[error("not enough {element} power: need {needed}, have {available}")]
    InsufficientPower {
        element: crate::core::Element,
        needed: u32,
        available: u32,
    },

    #[error("no attacks are allowed on the first turn")]
    FirstTurn,

    #[error("character {0} was summoned this turn")]
    SummoningSickness(CardId),

    #[error("character {0} has already attacked this turn")]
    AlreadyAttacked(CardId),

    #[error("character {0} is in defense position")]
    DefensePosition(CardId),

    #[error("attack target {0} is not on the opponent's field")]
    TargetNotOnField(CardId),
}

#[derive(Error, Debug)]
pub enum DuelError {
    #[error("Illegal move: {0}")]
    IllegalMove(#[from] IllegalMove),

    #[error("Player {0} cannot draw from an empty deck")]
    DeckExhausted(PlayerId),

    #[error("Player {0} cannot draw: hand is full")]
    HandFull(PlayerId),

    #[error("Invariant violated: {0}")]
    InvariantViolation(String),

    #[error("Entity not found: {0}")]
    EntityNotFound(u32),

    #[error("Invalid card format: {0}")]
    InvalidCardFormat(String),

    #[error("Invalid deck format: {0}")]
    InvalidDeckFormat(String),

    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    #[error("Invalid rules configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for DuelError {
    fn from(e: serde_json::Error) -> Self {
        DuelError::SerializationError(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DuelError>;
