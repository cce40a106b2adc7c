//! Match state, turn structure and move execution

/// Format and emit a log line only when the `verbose-logging` feature is on
///
/// `log_if_verbose!(logger, level, "fmt", args...)` calls `logger.level(..)`.
/// With the feature off the formatting work is compiled out entirely.
macro_rules! log_if_verbose {
    ($logger:expr, $level:ident, $($arg:tt)*) => {
        #[cfg(feature = "verbose-logging")]
        {
            $logger.$level(&format!($($arg)*));
        }
        #[cfg(not(feature = "verbose-logging"))]
        {
            let _ = &$logger;
        }
    };
}

pub mod actions;
pub mod combat;
pub mod events;
pub mod logger;
pub mod phase;
pub mod script;
pub mod session;
pub mod state;

pub use actions::Move;
pub use combat::{plan_attack, AttackTarget, CombatOutcome};
pub use events::{EventBus, EventLog, EventQueue, EventSubscriber, GameEvent, LossReason, MatchResult};
pub use logger::{GameLogger, LogEntry, OutputMode, VerbosityLevel};
pub use phase::{Phase, TurnStructure};
pub use script::{parse_command, MoveScript, ScriptLine};
pub use session::Duel;
pub use state::GameState;
