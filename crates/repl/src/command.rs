use async_trait::async_trait;
use httpsh_util::ParseResult;
use tokio_util::sync::CancellationToken;

use crate::dispatcher::CommandDispatcher;
use crate::shell::ShellState;

/// A command's answer to "is this line yours?".
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Claim {
    /// The line belongs to this command and is well formed.
    Accept,
    /// The line belongs to some other command.
    Decline,
    /// The line starts like this command but cannot run as typed. Resolution
    /// stops here so the line is not picked up by a later command.
    Incomplete,
}

/// Everything a command may touch while it runs.
pub struct CommandContext<'a, S: Send> {
    /// The dispatcher running this command, for commands that execute
    /// further lines (such as script replay).
    pub dispatcher: &'a CommandDispatcher<S>,
    pub shell: &'a mut ShellState,
    pub state: &'a mut S,
    /// Cancelled when the user interrupts the current line. Commands that
    /// await I/O must race it and return promptly.
    pub cancellation: &'a CancellationToken,
}

/// One shell command, generic over the program state `S` it operates on.
#[async_trait]
pub trait Command<S: Send>: Send + Sync {
    /// Name shown by `help`.
    fn name(&self) -> &'static str;

    /// One-line description for the `help` listing.
    fn help_summary(&self) -> String;

    /// Detailed usage when `parse_result` refers to this command, for
    /// `help <command>` and incomplete-command errors.
    fn help_details(&self, state: &S, parse_result: &ParseResult) -> Option<String>;

    /// Completions for the section under the caret, or `None` when this
    /// command has nothing to offer for the line.
    fn suggest(&self, state: &S, parse_result: &ParseResult) -> Option<Vec<String>>;

    fn can_handle(&self, state: &S, parse_result: &ParseResult) -> Claim;

    async fn execute(&self, context: &mut CommandContext<'_, S>, parse_result: &ParseResult) -> anyhow::Result<()>;
}
