//! Main game state structure

use crate::config::RulesConfig;
use crate::core::{CardId, Player, PlayerId, PlayerName};
use crate::game::{EventQueue, GameEvent, GameLogger, LossReason, MatchResult, Phase, TurnStructure};
use crate::{DuelError, Result};
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;
use serde::{Deserialize, Serialize};

/// Complete state of one match
///
/// Owned by whoever drives the match and passed explicitly to every move.
/// Moves mutate it only through `GameState::apply`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Both players, in seat order (A then B)
    pub players: Vec<Player>,

    pub turn: TurnStructure,

    pub rules: RulesConfig,

    /// Match RNG, seeded from the rules; only used to shuffle decks
    pub rng: ChaCha12Rng,

    /// Events of the move currently executing
    pub events: EventQueue,

    /// Set once, when the first player loses
    pub outcome: Option<MatchResult>,

    pub logger: GameLogger,
}

impl GameState {
    /// Create a match between two players with empty decks
    pub fn new_two_player(
        player1_name: impl Into<PlayerName>,
        player2_name: impl Into<PlayerName>,
        rules: RulesConfig,
    ) -> Self {
        let players = vec![
            Player::new(PlayerId::new(0), player1_name, &rules),
            Player::new(PlayerId::new(1), player2_name, &rules),
        ];
        let first = rules.first_player.index();

        GameState {
            turn: TurnStructure::new(players[first].id, first),
            players,
            rng: ChaCha12Rng::seed_from_u64(rules.seed),
            rules,
            events: EventQueue::new(),
            outcome: None,
            logger: GameLogger::new(),
        }
    }

    /// Get a player by ID
    pub fn player(&self, id: PlayerId) -> Result<&Player> {
        self.players
            .iter()
            .find(|p| p.id == id)
            .ok_or(DuelError::EntityNotFound(id.as_u32()))
    }

    /// Get a mutable player by ID
    pub fn player_mut(&mut self, id: PlayerId) -> Result<&mut Player> {
        self.players
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(DuelError::EntityNotFound(id.as_u32()))
    }

    pub fn player_idx(&self, id: PlayerId) -> Option<usize> {
        self.players.iter().position(|p| p.id == id)
    }

    /// The other player of a two-player match
    pub fn opponent_of(&self, id: PlayerId) -> Result<PlayerId> {
        self.players
            .iter()
            .find(|p| p.id != id)
            .map(|p| p.id)
            .ok_or(DuelError::EntityNotFound(id.as_u32()))
    }

    pub fn active_player(&self) -> PlayerId {
        self.turn.active_player
    }

    pub(crate) fn active(&self) -> &Player {
        &self.players[self.turn.active_player_idx]
    }

    pub fn current_phase(&self) -> Phase {
        self.turn.current_phase
    }

    pub fn turn_number(&self) -> u32 {
        self.turn.turn_number
    }

    pub fn is_game_over(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn outcome(&self) -> Option<MatchResult> {
        self.outcome
    }

    pub fn winner(&self) -> Option<PlayerId> {
        self.outcome.map(|o| o.winner)
    }

    /// Shuffle a player's deck with the match RNG
    pub fn shuffle_deck(&mut self, player_id: PlayerId) -> Result<()> {
        let idx = self
            .player_idx(player_id)
            .ok_or(DuelError::EntityNotFound(player_id.as_u32()))?;
        self.players[idx].deck.shuffle(&mut self.rng);
        Ok(())
    }

    /// Shuffle both decks and deal the opening hands
    ///
    /// The first player draws first. Nobody draws again until the first turn
    /// ends, so the first player skips the turn-1 draw.
    pub fn start_match(&mut self) -> Result<Vec<GameEvent>> {
        let first = self.turn.active_player_idx;
        let order = [self.players[first].id, self.players[1 - first].id];

        for id in order {
            self.shuffle_deck(id)?;
        }
        for id in order {
            for _ in 0..self.rules.opening_hand {
                if self.draw_for_turn(id)?.is_none() {
                    break;
                }
            }
        }

        let player = self.turn.active_player;
        log_if_verbose!(self.logger, normal, "turn {} begins for {}", self.turn.turn_number, self.player(player)?.name);
        self.events.push(GameEvent::TurnStarted {
            turn: self.turn.turn_number,
            player,
        });
        Ok(self.events.drain())
    }

    /// Draw the top card of a player's deck into their hand
    ///
    /// An empty deck ends the match with the drawer losing; the error is still
    /// returned so callers know no card was drawn. A full hand is reported
    /// as `HandFull` and changes nothing.
    pub fn draw_card(&mut self, player_id: PlayerId) -> Result<CardId> {
        let player = self.player_mut(player_id)?;
        match player.draw() {
            Ok(card) => {
                let (hand_size, deck_size) = (player.hand.len(), player.deck.len());
                log_if_verbose!(self.logger, verbose, "player {player_id} draws {card} (hand {hand_size})");
                self.events.push(GameEvent::CardDrawn {
                    player: player_id,
                    card,
                    hand_size,
                    deck_size,
                });
                Ok(card)
            }
            Err(DuelError::DeckExhausted(id)) => {
                self.declare_loss(id, LossReason::DeckExhausted)?;
                Err(DuelError::DeckExhausted(id))
            }
            Err(e) => Err(e),
        }
    }

    /// Draw that treats the recoverable draw failures as "no card"
    fn draw_for_turn(&mut self, player_id: PlayerId) -> Result<Option<CardId>> {
        match self.draw_card(player_id) {
            Ok(card) => Ok(Some(card)),
            Err(DuelError::DeckExhausted(_)) => Ok(None),
            Err(DuelError::HandFull(_)) => {
                log_if_verbose!(self.logger, normal, "player {player_id} has a full hand and skips the draw");
                let player = self.player(player_id)?;
                let (hand_size, deck_size) = (player.hand.len(), player.deck.len());
                self.events.push(GameEvent::DrawSkipped {
                    player: player_id,
                    hand_size,
                    deck_size,
                });
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Record that a player lost; only the first loss of a match counts
    pub(crate) fn declare_loss(&mut self, loser: PlayerId, reason: LossReason) -> Result<()> {
        if self.outcome.is_some() {
            return Ok(());
        }
        let winner = self.opponent_of(loser)?;
        let result = MatchResult { winner, loser, reason };
        self.logger.minimal(&format!(
            "{} wins: {} {}",
            self.player(winner)?.name,
            self.player(loser)?.name,
            match reason {
                LossReason::HealthDepleted => "ran out of health",
                LossReason::DeckExhausted => "could not draw",
            }
        ));
        self.outcome = Some(result);
        self.events.push(GameEvent::MatchOver(result));
        Ok(())
    }

    /// End the match if a player's health has dropped to zero or below
    pub(crate) fn check_win(&mut self) -> Result<()> {
        let loser = self.players.iter().find(|p| p.check_lose()).map(|p| p.id);
        match loser {
            Some(id) => self.declare_loss(id, LossReason::HealthDepleted),
            None => Ok(()),
        }
    }

    /// Move to the next phase, ending the turn after End
    pub(crate) fn advance_phase(&mut self) -> Result<()> {
        if self.turn.advance_phase() {
            log_if_verbose!(self.logger, normal, "phase: {}", self.turn.current_phase);
            self.events.push(GameEvent::PhaseAdvanced {
                turn: self.turn.turn_number,
                phase: self.turn.current_phase,
            });
            Ok(())
        } else {
            self.finish_turn()
        }
    }

    /// Hand the turn to the other player
    ///
    /// Clears both players' once-per-turn flags, refreshes the incoming
    /// player's power, and makes them draw.
    pub(crate) fn finish_turn(&mut self) -> Result<()> {
        let outgoing = self.turn.active_player_idx;
        let incoming = 1 - outgoing;

        self.players[outgoing].clear_turn_flags();
        self.players[incoming].start_turn();

        let next = self.players[incoming].id;
        self.turn.next_turn(next, incoming);
        log_if_verbose!(
            self.logger,
            normal,
            "turn {} begins for {} ({})",
            self.turn.turn_number,
            self.players[incoming].name,
            self.players[incoming].power
        );
        self.events.push(GameEvent::TurnStarted {
            turn: self.turn.turn_number,
            player: next,
        });

        self.draw_for_turn(next)?;
        Ok(())
    }
}
