//! Turn phases

use crate::core::PlayerId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Phases of a turn, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    Main1,
    Battle,
    Main2,
    End,
}

impl Phase {
    /// Get the next phase in turn order, or None after End
    pub fn next(&self) -> Option<Phase> {
        match self {
            Phase::Main1 => Some(Phase::Battle),
            Phase::Battle => Some(Phase::Main2),
            Phase::Main2 => Some(Phase::End),
            Phase::End => None,
        }
    }

    /// Can cards be played from hand in this phase?
    pub fn is_main(&self) -> bool {
        matches!(self, Phase::Main1 | Phase::Main2)
    }

    pub fn is_battle(&self) -> bool {
        matches!(self, Phase::Battle)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Main1 => write!(f, "MAIN1"),
            Phase::Battle => write!(f, "BATTLE"),
            Phase::Main2 => write!(f, "MAIN2"),
            Phase::End => write!(f, "END"),
        }
    }
}

/// Represents the current turn structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnStructure {
    /// Current turn number (starts at 1, counts both players' turns)
    pub turn_number: u32,

    pub current_phase: Phase,

    /// Active player (whose turn it is)
    pub active_player: PlayerId,

    /// Active player's index in GameState::players
    pub active_player_idx: usize,
}

impl TurnStructure {
    pub fn new(starting_player: PlayerId, starting_idx: usize) -> Self {
        TurnStructure {
            turn_number: 1,
            current_phase: Phase::Main1,
            active_player: starting_player,
            active_player_idx: starting_idx,
        }
    }

    /// Advance to the next phase; false when the turn is over
    pub fn advance_phase(&mut self) -> bool {
        if let Some(next) = self.current_phase.next() {
            self.current_phase = next;
            true
        } else {
            false
        }
    }

    /// Start a new turn for the given player
    pub fn next_turn(&mut self, next_player: PlayerId, next_idx: usize) {
        self.turn_number += 1;
        self.current_phase = Phase::Main1;
        self.active_player = next_player;
        self.active_player_idx = next_idx;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_progression() {
        let mut phase = Phase::Main1;
        phase = phase.next().unwrap();
        assert_eq!(phase, Phase::Battle);
        phase = phase.next().unwrap();
        assert_eq!(phase, Phase::Main2);
        phase = phase.next().unwrap();
        assert_eq!(phase, Phase::End);
        assert_eq!(phase.next(), None);
    }

    #[test]
    fn test_main_phases() {
        assert!(Phase::Main1.is_main());
        assert!(Phase::Main2.is_main());
        assert!(!Phase::Battle.is_main());
        assert!(!Phase::End.is_main());
        assert!(Phase::Battle.is_battle());
    }

    #[test]
    fn test_turn_structure() {
        let p1 = PlayerId::new(0);
        let mut turn = TurnStructure::new(p1, 0);

        assert_eq!(turn.turn_number, 1);
        assert_eq!(turn.current_phase, Phase::Main1);

        while turn.advance_phase() {}
        assert_eq!(turn.current_phase, Phase::End);

        let p2 = PlayerId::new(1);
        turn.next_turn(p2, 1);
        assert_eq!(turn.turn_number, 2);
        assert_eq!(turn.current_phase, Phase::Main1);
        assert_eq!(turn.active_player, p2);
        assert_eq!(turn.active_player_idx, 1);
    }
}
