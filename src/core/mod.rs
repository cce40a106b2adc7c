//! Core game types and entities

pub mod card;
pub mod character;
pub mod entity;
pub mod player;
pub mod power;
pub mod types;

pub use card::{Card, CardKind};
pub use character::{CharacterInField, Position};
pub use entity::{EntityId, GameEntity};
pub use player::Player;
pub use power::{Element, PowerManager};
pub use types::{CardName, PlayerName};

pub type CardId = EntityId<Card>;
pub type PlayerId = EntityId<Player>;
