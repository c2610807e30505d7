//! Shell core: recall history, the command protocol, and the dispatcher that
//! routes each input line to the command that owns it.

pub mod command;
pub mod dispatcher;
pub mod history;
pub mod shell;
pub mod telemetry;

pub use command::{Claim, Command, CommandContext};
pub use dispatcher::{CommandDispatcher, ExecutionOutcome};
pub use history::{CommandHistory, DEFAULT_HISTORY_LIMIT, HistorySuspension};
pub use httpsh_util::{ParseResult, parse_input, parse_line};
pub use shell::{OutputKind, OutputLine, ShellOutput, ShellState};
pub use telemetry::{NoopTelemetry, ShellEvent, TelemetrySink};
pub use tokio_util::sync::CancellationToken;
