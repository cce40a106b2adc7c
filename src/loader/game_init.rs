//! Game initialization from decks

use crate::config::RulesConfig;
use crate::core::PlayerName;
use crate::game::GameState;
use crate::loader::DeckList;
use crate::Result;

/// Game builder for initializing matches from loaded decks
pub struct GameInitializer {
    rules: RulesConfig,
}

impl GameInitializer {
    pub fn new(rules: RulesConfig) -> Self {
        GameInitializer { rules }
    }

    pub fn rules(&self) -> &RulesConfig {
        &self.rules
    }

    /// Build a two-player match with each deck placed in its owner's deck zone
    ///
    /// Decks keep file order (first card on top) until `start_match`
    /// shuffles them.
    pub fn init_game(
        &self,
        player1_name: impl Into<PlayerName>,
        player1_deck: &DeckList,
        player2_name: impl Into<PlayerName>,
        player2_deck: &DeckList,
    ) -> Result<GameState> {
        self.rules.check()?;
        let mut game = GameState::new_two_player(player1_name, player2_name, self.rules.clone());

        for (player, deck) in game.players.iter_mut().zip([player1_deck, player2_deck]) {
            for card in &deck.cards {
                player.deck.add_to_bottom(card.clone())?;
            }
        }

        Ok(game)
    }
}
