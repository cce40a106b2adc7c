//! A match plus the subscribers watching it

use crate::game::{EventBus, EventSubscriber, GameEvent, GameState, Move};
use crate::Result;

/// Drives one match and publishes every completed move to subscribers
///
/// Events are delivered only after the move has fully executed, so a
/// subscriber always observes a settled state.
#[derive(Debug)]
pub struct Duel {
    state: GameState,
    bus: EventBus,
}

impl Duel {
    pub fn new(state: GameState) -> Self {
        Duel {
            state,
            bus: EventBus::new(),
        }
    }

    pub fn subscribe(&mut self, subscriber: Box<dyn EventSubscriber>) {
        self.bus.subscribe(subscriber);
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn into_state(self) -> GameState {
        self.state
    }

    /// Shuffle, deal opening hands and announce the first turn
    pub fn start(&mut self) -> Result<Vec<GameEvent>> {
        let events = self.state.start_match()?;
        self.bus.publish(&events);
        Ok(events)
    }

    /// Apply a move and publish what it produced
    pub fn submit(&mut self, mv: Move) -> Result<Vec<GameEvent>> {
        let events = self.state.apply(mv)?;
        self.bus.publish(&events);
        Ok(events)
    }

    pub fn is_over(&self) -> bool {
        self.state.is_game_over()
    }
}
