//! Card record loader
//!
//! One card per line, tab-separated, starting with the kind tag:
//!
//! ```text
//! LAND            id  name  element  description  image  [power]
//! CHARACTER       id  name  element  description  image  attack  defense  power
//! SKILL_AURA      id  name  element  description  image  power   attack   defense
//! SKILL_POWER_UP  id  name  element  description  image  power
//! ```

use crate::core::{Card, CardId, CardKind, Element};
use crate::{DuelError, Result};
use std::str::FromStr;

/// Columns shared by every kind: tag, id, name, element, description, image
const COMMON_COLUMNS: usize = 6;

/// Parser for single card records
pub struct CardLoader;

impl CardLoader {
    /// Parse one tab-separated card record
    pub fn parse_record(line: &str) -> Result<Card> {
        let fields: Vec<&str> = line.split('\t').map(str::trim).collect();
        if fields.len() < COMMON_COLUMNS {
            return Err(invalid(format!(
                "expected at least {COMMON_COLUMNS} columns, found {}",
                fields.len()
            )));
        }

        let id = CardId::new(number(fields[1], "id")?);
        let name = fields[2];
        if name.is_empty() {
            return Err(invalid("empty card name".to_string()));
        }
        let element = Element::from_str(fields[3]).map_err(invalid)?;
        let stats = &fields[COMMON_COLUMNS..];

        let kind = match fields[0] {
            "LAND" => match stats {
                [] => CardKind::Land { power: 1 },
                [power] => CardKind::Land {
                    power: number(power, "power")?,
                },
                _ => return Err(column_count("LAND", "0 or 1", stats.len())),
            },
            "CHARACTER" => match stats {
                [attack, defense, power] => CardKind::Character {
                    attack: number(attack, "attack")?,
                    defense: number(defense, "defense")?,
                    power: number(power, "power")?,
                },
                _ => return Err(column_count("CHARACTER", "3", stats.len())),
            },
            "SKILL_AURA" => match stats {
                [power, attack, defense] => CardKind::SkillAura {
                    power: number(power, "power")?,
                    attack: number(attack, "attack")?,
                    defense: number(defense, "defense")?,
                },
                _ => return Err(column_count("SKILL_AURA", "3", stats.len())),
            },
            "SKILL_POWER_UP" => match stats {
                [power] => CardKind::SkillPowerUp {
                    power: number(power, "power")?,
                },
                _ => return Err(column_count("SKILL_POWER_UP", "1", stats.len())),
            },
            other => return Err(invalid(format!("unknown card kind '{other}'"))),
        };

        let mut card = Card::new(id, name, element, kind);
        card.description = fields[4].to_string();
        card.image = fields[5].to_string();
        Ok(card)
    }

    /// Render a card back into its record line
    pub fn to_record(card: &Card) -> String {
        let stats = match card.kind {
            CardKind::Land { power } => vec![power.to_string()],
            CardKind::Character { attack, defense, power } => {
                vec![attack.to_string(), defense.to_string(), power.to_string()]
            }
            CardKind::SkillAura { power, attack, defense } => {
                vec![power.to_string(), attack.to_string(), defense.to_string()]
            }
            CardKind::SkillPowerUp { power } => vec![power.to_string()],
        };
        let mut columns = vec![
            card.kind.tag().to_string(),
            card.id.to_string(),
            card.name.to_string(),
            card.element.to_string(),
            card.description.clone(),
            card.image.clone(),
        ];
        columns.extend(stats);
        columns.join("\t")
    }
}

fn invalid(reason: String) -> DuelError {
    DuelError::InvalidCardFormat(reason)
}

fn column_count(kind: &str, expected: &str, found: usize) -> DuelError {
    invalid(format!("{kind} takes {expected} stat columns, found {found}"))
}

fn number<T: FromStr>(value: &str, column: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| invalid(format!("{column} '{value}' is not a valid number")))
}
