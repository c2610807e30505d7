use httpsh_util::{ParseResult, parse_input, parse_line};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::command::{Claim, Command, CommandContext};
use crate::shell::ShellState;

/// How one line of input ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExecutionOutcome {
    /// Blank line; nothing ran.
    Empty,
    Completed,
    /// The command returned an error, already written to the error channel.
    Failed,
    /// The cancellation token fired while the command ran.
    Cancelled,
    /// A command recognised the line but it was not complete.
    Incomplete,
    /// No command recognised the line.
    Unrecognized,
}

enum Resolution<'d, S: Send> {
    Found(&'d dyn Command<S>),
    Incomplete(&'d dyn Command<S>),
    Unrecognized,
}

/// Ordered registry of commands for program state `S`.
///
/// Registration order is resolution order: the first command to accept a
/// line runs it.
pub struct CommandDispatcher<S: Send> {
    commands: Vec<Box<dyn Command<S>>>,
}

impl<S: Send> Default for CommandDispatcher<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Send> CommandDispatcher<S> {
    pub fn new() -> Self {
        Self { commands: Vec::new() }
    }

    pub fn register(&mut self, command: impl Command<S> + 'static) {
        self.commands.push(Box::new(command));
    }

    /// Builder-style [`register`](Self::register).
    pub fn with_command(mut self, command: impl Command<S> + 'static) -> Self {
        self.register(command);
        self
    }

    pub fn commands(&self) -> impl Iterator<Item = &dyn Command<S>> {
        self.commands.iter().map(|command| command.as_ref())
    }

    fn resolve(&self, state: &S, parse_result: &ParseResult) -> Resolution<'_, S> {
        for command in &self.commands {
            match command.can_handle(state, parse_result) {
                Claim::Accept => return Resolution::Found(command.as_ref()),
                Claim::Incomplete => return Resolution::Incomplete(command.as_ref()),
                Claim::Decline => {}
            }
        }
        Resolution::Unrecognized
    }

    /// Parses, records and executes one input line.
    ///
    /// Non-blank lines are added to history before they run, so a failing
    /// command can still be recalled and fixed.
    pub async fn execute_line(
        &self,
        line: &str,
        shell: &mut ShellState,
        state: &mut S,
        cancellation: &CancellationToken,
    ) -> ExecutionOutcome {
        let parse_result = parse_line(line);
        if parse_result.is_empty() {
            return ExecutionOutcome::Empty;
        }

        shell.history.add_command(line.trim());
        self.execute(&parse_result, shell, state, cancellation).await
    }

    /// Executes an already parsed line without touching history.
    pub async fn execute(
        &self,
        parse_result: &ParseResult,
        shell: &mut ShellState,
        state: &mut S,
        cancellation: &CancellationToken,
    ) -> ExecutionOutcome {
        let command = match self.resolve(state, parse_result) {
            Resolution::Found(command) => command,
            Resolution::Incomplete(command) => {
                debug!(command = command.name(), input = parse_result.original_input(), "incomplete command");
                shell.output.error(format!("Incomplete '{}' command.", command.name()));
                if let Some(details) = command.help_details(state, parse_result) {
                    shell.output.info(details);
                }
                return ExecutionOutcome::Incomplete;
            }
            Resolution::Unrecognized => {
                debug!(input = parse_result.original_input(), "no command recognised input");
                shell.output.error("No matching command found");
                shell.output.error("Execute 'help' to see available commands.");
                return ExecutionOutcome::Unrecognized;
            }
        };

        debug!(command = command.name(), "executing command");
        let mut context = CommandContext {
            dispatcher: self,
            shell,
            state,
            cancellation,
        };
        let result = command.execute(&mut context, parse_result).await;

        if cancellation.is_cancelled() {
            context.shell.output.warning("Operation cancelled.");
            return ExecutionOutcome::Cancelled;
        }

        match result {
            Ok(()) => ExecutionOutcome::Completed,
            Err(error) => {
                warn!(command = command.name(), error = %error, "command failed");
                context.shell.output.error(format!("{error:#}"));
                ExecutionOutcome::Failed
            }
        }
    }

    /// Completions for `line` with the caret at `caret_position`.
    ///
    /// Every command is asked; results are concatenated in registration
    /// order without de-duplication.
    pub fn suggest(&self, state: &S, line: &str, caret_position: usize) -> Vec<String> {
        let parse_result = parse_input(line, caret_position);
        self.commands
            .iter()
            .filter_map(|command| command.suggest(state, &parse_result))
            .flatten()
            .collect()
    }

    /// `(name, summary)` for every command in registration order.
    pub fn help_summaries(&self) -> Vec<(&'static str, String)> {
        self.commands
            .iter()
            .map(|command| (command.name(), command.help_summary()))
            .collect()
    }

    /// Details from the first command that describes `parse_result`.
    pub fn help_details(&self, state: &S, parse_result: &ParseResult) -> Option<String> {
        self.commands
            .iter()
            .find_map(|command| command.help_details(state, parse_result))
    }
}
