//! Duel Forge - Main Binary
//!
//! Runs scripted matches between two decks and checks deck files

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use duel_forge_rs::{
    game::{
        parse_command, Duel, EventLog, EventSubscriber, GameEvent, MoveScript, OutputMode, VerbosityLevel,
    },
    loader::{DeckList, DeckLoader, GameInitializer},
    DuelError, RulesConfig,
};
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Verbosity level for game output (custom parser supporting both names and numbers)
#[derive(Debug, Clone, Copy)]
struct VerbosityArg(VerbosityLevel);

impl std::str::FromStr for VerbosityArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "silent" | "0" => Ok(VerbosityArg(VerbosityLevel::Silent)),
            "minimal" | "1" => Ok(VerbosityArg(VerbosityLevel::Minimal)),
            "normal" | "2" => Ok(VerbosityArg(VerbosityLevel::Normal)),
            "verbose" | "3" => Ok(VerbosityArg(VerbosityLevel::Verbose)),
            _ => Err(format!(
                "invalid verbosity level '{s}' (expected: silent/0, minimal/1, normal/2, verbose/3)"
            )),
        }
    }
}

#[derive(Parser)]
#[command(name = "duel")]
#[command(about = "Duel Forge - Elemental card duel rules engine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a match from a script of commands
    Run {
        /// Deck file for player A (records, or .json)
        #[arg(value_name = "PLAYER_A_DECK")]
        deck1: PathBuf,

        /// Deck file for player B (records, or .json)
        #[arg(value_name = "PLAYER_B_DECK")]
        deck2: PathBuf,

        /// Command script; without one the match is only set up
        #[arg(long, short = 's', value_name = "SCRIPT")]
        script: Option<PathBuf>,

        /// Rules file (JSON) overriding the standard rules
        #[arg(long, value_name = "RULES")]
        rules: Option<PathBuf>,

        /// Seed for the deck shuffle (overrides the rules file)
        #[arg(long)]
        seed: Option<u64>,

        #[arg(long, default_value = "Player A")]
        name_a: String,

        #[arg(long, default_value = "Player B")]
        name_b: String,

        /// Verbosity level (silent/0, minimal/1, normal/2, verbose/3)
        #[arg(long, default_value = "normal", short = 'v')]
        verbosity: VerbosityArg,

        /// Keep going after an illegal move instead of stopping
        #[arg(long)]
        keep_going: bool,

        /// Write the final match state as JSON
        #[arg(long, value_name = "FILE")]
        dump: Option<PathBuf>,
    },

    /// Load a deck file and report rejected records
    ValidateDeck {
        #[arg(value_name = "DECK")]
        deck: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            deck1,
            deck2,
            script,
            rules,
            seed,
            name_a,
            name_b,
            verbosity,
            keep_going,
            dump,
        } => run_match(RunOptions {
            deck1,
            deck2,
            script,
            rules,
            seed,
            name_a,
            name_b,
            verbosity: verbosity.0,
            keep_going,
            dump,
        }),
        Commands::ValidateDeck { deck } => validate_deck(&deck),
    }
}

struct RunOptions {
    deck1: PathBuf,
    deck2: PathBuf,
    script: Option<PathBuf>,
    rules: Option<PathBuf>,
    seed: Option<u64>,
    name_a: String,
    name_b: String,
    verbosity: VerbosityLevel,
    keep_going: bool,
    dump: Option<PathBuf>,
}

fn load_deck(path: &Path) -> anyhow::Result<DeckList> {
    let deck = DeckLoader::load_from_file(path).with_context(|| format!("loading deck {}", path.display()))?;
    for rejected in &deck.rejected {
        eprintln!("{}:{}: skipped: {}", path.display(), rejected.line, rejected.reason);
    }
    Ok(deck)
}

/// Prints each event as it is published
struct EventPrinter;

impl EventSubscriber for EventPrinter {
    fn on_event(&mut self, event: &GameEvent) {
        println!("  > {event}");
    }
}

/// Keeps its own handle on an `EventLog` so the events can be read after the match
struct SharedLog(Rc<RefCell<EventLog>>);

impl EventSubscriber for SharedLog {
    fn on_event(&mut self, event: &GameEvent) {
        self.0.borrow_mut().on_event(event);
    }
}

fn run_match(opts: RunOptions) -> anyhow::Result<()> {
    let mut rules = match &opts.rules {
        Some(path) => {
            RulesConfig::load_from_file(path).with_context(|| format!("loading rules {}", path.display()))?
        }
        None => RulesConfig::default(),
    };
    if let Some(seed) = opts.seed {
        rules = rules.with_seed(seed);
    }

    let deck1 = load_deck(&opts.deck1)?;
    let deck2 = load_deck(&opts.deck2)?;

    let mut state = GameInitializer::new(rules).init_game(opts.name_a, &deck1, opts.name_b, &deck2)?;
    state.logger.set_verbosity(opts.verbosity);
    state.logger.set_output_mode(OutputMode::Stdout);

    let mut duel = Duel::new(state);
    let log = Rc::new(RefCell::new(EventLog::default()));
    duel.subscribe(Box::new(SharedLog(log.clone())));
    if opts.verbosity >= VerbosityLevel::Verbose {
        duel.subscribe(Box::new(EventPrinter));
    }
    duel.start()?;

    if let Some(path) = &opts.script {
        let content = fs::read_to_string(path).with_context(|| format!("reading script {}", path.display()))?;
        for command in MoveScript::parse(&content).commands() {
            if duel.is_over() {
                println!("match is over; ignoring the rest of the script");
                break;
            }
            let result = parse_command(&command.text, duel.state()).and_then(|mv| duel.submit(mv));
            match result {
                Ok(_) => {}
                Err(DuelError::IllegalMove(reason)) if opts.keep_going => {
                    println!("line {}: illegal: {reason}", command.line);
                }
                Err(e) => {
                    bail!("{}:{}: {}: {e}", path.display(), command.line, command.text);
                }
            }
        }
    }

    let state = duel.state();
    println!("Turn {}, {} phase", state.turn_number(), state.current_phase());
    for player in &state.players {
        println!(
            "  {}: health {}, hand {}, deck {}, field {}/{}, power {}",
            player.name,
            player.health,
            player.hand.len(),
            player.deck.len(),
            player.field.character_count(),
            player.field.skill_count(),
            player.power
        );
    }
    println!("{} events", log.borrow().events.len());
    if let Some(result) = state.outcome() {
        println!("Winner: {} ({:?})", state.player(result.winner)?.name, result.reason);
    }

    if let Some(path) = &opts.dump {
        let json = serde_json::to_string_pretty(state)?;
        fs::write(path, json).with_context(|| format!("writing state dump {}", path.display()))?;
    }

    Ok(())
}

fn validate_deck(path: &Path) -> anyhow::Result<()> {
    let deck = DeckLoader::load_from_file(path).with_context(|| format!("loading deck {}", path.display()))?;
    println!("{}: {} cards", path.display(), deck.len());
    for rejected in &deck.rejected {
        println!("  line {}: {}", rejected.line, rejected.reason);
    }
    if deck.has_rejections() {
        bail!("{} records rejected", deck.rejected.len());
    }
    Ok(())
}
