//! Card and deck loaders
//!
//! Parsers for tab-separated card records and deck files

pub mod card;
pub mod deck;
pub mod game_init;

pub use card::CardLoader;
pub use deck::{DeckList, DeckLoader, RejectedRecord};
pub use game_init::GameInitializer;
