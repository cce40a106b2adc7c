//! Duel Forge - rules engine for a two-player elemental card duel
//!
//! The engine owns the authoritative match state (decks, hands, fields,
//! elemental power, health) and checks every move against the rules before
//! applying it. Completed changes are reported as `GameEvent`s.

pub mod config;
pub mod core;
pub mod error;
pub mod game;
pub mod loader;
pub mod zones;

pub use config::RulesConfig;
pub use error::{DuelError, IllegalMove, Result};
