//! Deck file loader
//!
//! A deck file is either a list of card records (see `loader::card`), one per
//! line with `#` comments and blank lines skipped, or a JSON array of cards.
//! A bad record only loses that record; the reasons are kept in
//! `DeckList::rejected`.

use crate::core::{Card, CardId};
use crate::loader::CardLoader;
use crate::{DuelError, Result};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Deck loader for record and JSON deck files
pub struct DeckLoader;

impl DeckLoader {
    /// Load a deck, picking the format from the file extension
    pub fn load_from_file(path: &Path) -> Result<DeckList> {
        let content = fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::parse_json(&content)
        } else {
            Self::parse(&content)
        }
    }

    /// Parse record lines
    pub fn parse(content: &str) -> Result<DeckList> {
        let mut deck = DeckList::default();
        let mut seen = FxHashSet::default();

        for (idx, line) in content.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            match CardLoader::parse_record(line) {
                Ok(card) => deck.accept(card, idx + 1, &mut seen),
                Err(e) => deck.reject(idx + 1, e.to_string()),
            }
        }

        deck.check_not_empty()?;
        Ok(deck)
    }

    /// Parse a JSON array of cards
    ///
    /// Each element is checked on its own, so one malformed card is rejected
    /// like a malformed record line. A document that is not an array fails
    /// the whole load.
    pub fn parse_json(content: &str) -> Result<DeckList> {
        let values: Vec<serde_json::Value> = serde_json::from_str(content)
            .map_err(|e| DuelError::InvalidDeckFormat(format!("expected a JSON array of cards: {e}")))?;

        let mut deck = DeckList::default();
        let mut seen = FxHashSet::default();
        for (idx, value) in values.into_iter().enumerate() {
            match serde_json::from_value::<Card>(value) {
                Ok(card) => deck.accept(card, idx + 1, &mut seen),
                Err(e) => deck.reject(idx + 1, e.to_string()),
            }
        }

        deck.check_not_empty()?;
        Ok(deck)
    }

    /// Write a deck as record lines
    pub fn to_records(cards: &[Card]) -> String {
        let mut out = String::new();
        for card in cards {
            out.push_str(&CardLoader::to_record(card));
            out.push('\n');
        }
        out
    }
}

/// A record that could not be loaded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectedRecord {
    /// 1-based line number (or array position for JSON decks)
    pub line: usize,
    pub reason: String,
}

/// Cards loaded from one deck file, in file order (first card is the top)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckList {
    pub cards: Vec<Card>,
    pub rejected: Vec<RejectedRecord>,
}

impl DeckList {
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn has_rejections(&self) -> bool {
        !self.rejected.is_empty()
    }

    fn accept(&mut self, card: Card, line: usize, seen: &mut FxHashSet<CardId>) {
        if seen.insert(card.id) {
            self.cards.push(card);
        } else {
            self.reject(line, format!("duplicate card id {}", card.id));
        }
    }

    fn reject(&mut self, line: usize, reason: String) {
        self.rejected.push(RejectedRecord { line, reason });
    }

    fn check_not_empty(&self) -> Result<()> {
        if self.cards.is_empty() {
            return Err(DuelError::InvalidDeckFormat(format!(
                "no valid cards ({} records rejected)",
                self.rejected.len()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CardKind, Element};

    const DECK: &str = "# Team Avatar
LAND\t1\tAir Temple\tAIR\tHome\ttemple.png
CHARACTER\t2\tAang\tAIR\tAvatar\taang.png\t1500\t1000\t2

SKILL_AURA\t3\tGlider\tAIR\t\t\t1\t200\t0
SKILL_POWER_UP\t4\tAvatar State\tAIR\t\t\t3
";

    #[test]
    fn test_parse_record_deck() {
        let deck = DeckLoader::parse(DECK).unwrap();
        assert_eq!(deck.len(), 4);
        assert!(!deck.has_rejections());

        assert_eq!(deck.cards[1].name.as_str(), "Aang");
        assert_eq!(deck.cards[1].element, Element::Air);
        assert_eq!(
            deck.cards[1].kind,
            CardKind::Character {
                attack: 1500,
                defense: 1000,
                power: 2
            }
        );
        assert!(deck.cards[3].is_power_up());
    }

    #[test]
    fn test_bad_records_are_rejected_individually() {
        let content = format!("{DECK}CHARACTER\t5\tMomo\tAIR\t\t\tten\t10\t0\nLAND\t1\tCopy\tAIR\t\t\n");
        let deck = DeckLoader::parse(&content).unwrap();

        assert_eq!(deck.len(), 4);
        assert_eq!(deck.rejected.len(), 2);
        assert_eq!(deck.rejected[0].line, 7);
        assert!(deck.rejected[1].reason.contains("duplicate card id 1"));
    }

    #[test]
    fn test_empty_deck_fails() {
        assert!(matches!(
            DeckLoader::parse("# nothing here\n\n"),
            Err(DuelError::InvalidDeckFormat(_))
        ));
    }

    #[test]
    fn test_parse_json_deck() {
        let json = r#"[
            {"id": 1, "name": "Fire Nation", "element": "FIRE", "kind": "LAND", "power": 1},
            {"id": 2, "name": "Azula", "element": "FIRE", "kind": "CHARACTER",
             "attack": 1800, "defense": 900, "power": 4},
            {"id": 3, "name": "Broken", "element": "PLASMA", "kind": "LAND", "power": 1}
        ]"#;
        let deck = DeckLoader::parse_json(json).unwrap();
        assert_eq!(deck.len(), 2);
        assert_eq!(deck.rejected.len(), 1);
        assert_eq!(deck.rejected[0].line, 3);
        assert_eq!(deck.cards[1].attack(), 1800);

        assert!(DeckLoader::parse_json(r#"{"id": 1}"#).is_err());
    }

    #[test]
    fn test_records_reparse_to_same_cards() {
        let deck = DeckLoader::parse(DECK).unwrap();
        let again = DeckLoader::parse(&DeckLoader::to_records(&deck.cards)).unwrap();
        assert_eq!(again.cards, deck.cards);
    }
}
