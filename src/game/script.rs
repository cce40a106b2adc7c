//! Text commands for scripted play
//!
//! One command per line; `#` starts a comment. Players are named by seat
//! (`a`/`b` or `0`/`1`) and cards by id.
//!
//! ```text
//! land      a 12
//! character a 3 defense      # position defaults to attack
//! skill     a 7 3            # skill 7 onto character 3
//! attack    a 3              # direct attack
//! attack    a 3 21           # attack character 21
//! position  a 3
//! remove    a 7              # character or skill, whichever is on the field
//! phase
//! turn
//! ```

use crate::core::{CardId, PlayerId, Position};
use crate::game::{AttackTarget, GameState, Move};
use crate::{DuelError, Result};

/// A command line kept with its position in the script
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptLine {
    /// 1-based line number
    pub line: usize,
    pub text: String,
}

/// Sequence of commands read from a script file
#[derive(Debug, Clone, Default)]
pub struct MoveScript {
    commands: Vec<ScriptLine>,
}

impl MoveScript {
    /// Split a script into commands, dropping comments and blank lines
    pub fn parse(content: &str) -> Self {
        let commands = content
            .lines()
            .enumerate()
            .filter_map(|(idx, raw)| {
                let text = raw.split('#').next().unwrap_or("").trim();
                (!text.is_empty()).then(|| ScriptLine {
                    line: idx + 1,
                    text: text.to_string(),
                })
            })
            .collect();
        MoveScript { commands }
    }

    pub fn commands(&self) -> &[ScriptLine] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// Turn one command into a move against the current state
///
/// The state is only read to resolve seats to player ids and to tell
/// whether `remove` names a character or a skill.
pub fn parse_command(text: &str, state: &GameState) -> Result<Move> {
    let words: Vec<&str> = text.split_whitespace().collect();
    let (verb, args) = words
        .split_first()
        .ok_or_else(|| bad(text, "empty command"))?;

    let mv = match (*verb, args) {
        ("phase", []) => Move::EndPhase,
        ("turn", []) => Move::EndTurn,
        ("land", [seat, card]) => Move::PlayLand {
            player: player(state, seat, text)?,
            card: card_id(card, text)?,
        },
        ("character", [seat, card, rest @ ..]) if rest.len() <= 1 => Move::PlayCharacter {
            player: player(state, seat, text)?,
            card: card_id(card, text)?,
            position: match rest {
                [] | ["attack"] => Position::Attack,
                ["defense"] => Position::Defense,
                _ => return Err(bad(text, "position must be 'attack' or 'defense'")),
            },
        },
        ("skill", [seat, card, target]) => Move::PlaySkill {
            player: player(state, seat, text)?,
            card: card_id(card, text)?,
            target: card_id(target, text)?,
        },
        ("attack", [seat, attacker, rest @ ..]) if rest.len() <= 1 => Move::Attack {
            player: player(state, seat, text)?,
            attacker: card_id(attacker, text)?,
            target: match rest {
                [] | ["player"] => AttackTarget::Player,
                [target] => AttackTarget::Character(card_id(target, text)?),
                _ => return Err(bad(text, "too many attack targets")),
            },
        },
        ("position", [seat, card]) => Move::ChangePosition {
            player: player(state, seat, text)?,
            character: card_id(card, text)?,
        },
        ("remove", [seat, card]) => {
            let player = player(state, seat, text)?;
            let card = card_id(card, text)?;
            let is_skill = state
                .player(player)?
                .field
                .skill_host(card)
                .is_some();
            if is_skill {
                Move::RemoveSkill { player, skill: card }
            } else {
                Move::RemoveCharacter {
                    player,
                    character: card,
                }
            }
        }
        _ => return Err(bad(text, "unknown command or wrong number of arguments")),
    };
    Ok(mv)
}

fn bad(text: &str, reason: &str) -> DuelError {
    DuelError::InvalidCommand(format!("'{text}': {reason}"))
}

fn player(state: &GameState, seat: &str, text: &str) -> Result<PlayerId> {
    let idx = match seat.to_ascii_lowercase().as_str() {
        "a" | "0" => 0,
        "b" | "1" => 1,
        _ => return Err(bad(text, "player must be a or b")),
    };
    state
        .players
        .get(idx)
        .map(|p| p.id)
        .ok_or_else(|| bad(text, "no such player"))
}

fn card_id(token: &str, text: &str) -> Result<CardId> {
    token
        .parse()
        .map(CardId::new)
        .map_err(|_| bad(text, "card ids are numbers"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RulesConfig;

    fn state() -> GameState {
        GameState::new_two_player("Aang", "Zuko", RulesConfig::default())
    }

    #[test]
    fn test_script_skips_comments() {
        let script = MoveScript::parse("# setup\nland a 1\n\n  phase # to battle\n");
        assert_eq!(script.len(), 2);
        assert_eq!(
            script.commands()[1],
            ScriptLine {
                line: 4,
                text: "phase".to_string()
            }
        );
    }

    #[test]
    fn test_parse_commands() {
        let state = state();
        let a = PlayerId::new(0);
        let b = PlayerId::new(1);

        assert_eq!(
            parse_command("land a 12", &state).unwrap(),
            Move::PlayLand { player: a, card: CardId::new(12) }
        );
        assert_eq!(
            parse_command("character B 3 defense", &state).unwrap(),
            Move::PlayCharacter {
                player: b,
                card: CardId::new(3),
                position: Position::Defense
            }
        );
        assert_eq!(
            parse_command("attack a 3", &state).unwrap(),
            Move::Attack {
                player: a,
                attacker: CardId::new(3),
                target: AttackTarget::Player
            }
        );
        assert_eq!(
            parse_command("attack a 3 21", &state).unwrap(),
            Move::Attack {
                player: a,
                attacker: CardId::new(3),
                target: AttackTarget::Character(CardId::new(21))
            }
        );
        assert_eq!(parse_command("turn", &state).unwrap(), Move::EndTurn);
        assert_eq!(
            parse_command("remove a 4", &state).unwrap(),
            Move::RemoveCharacter {
                player: a,
                character: CardId::new(4)
            }
        );
    }

    #[test]
    fn test_bad_commands() {
        let state = state();
        for text in ["fly a 1", "land c 1", "land a one", "character a 1 sideways", "phase now"] {
            assert!(
                matches!(parse_command(text, &state), Err(DuelError::InvalidCommand(_))),
                "accepted {text:?}"
            );
        }
    }
}
