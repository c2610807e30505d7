use anyhow::Context;
use async_trait::async_trait;
use httpsh_repl::{Claim, Command, CommandContext, ExecutionOutcome, ParseResult, ShellEvent};
use httpsh_util::expand_tilde;
use tracing::debug;

use super::complete_keyword;
use crate::state::HttpState;

const NAME: &str = "run";

/// `run {path}`: replays a script file line by line.
///
/// History recording is suspended for the duration so the script shows up as
/// the single `run` line that started it. A failing line is reported and the
/// script continues; cancellation stops it.
#[derive(Debug, Default, Clone, Copy)]
pub struct RunCommand;

#[async_trait]
impl Command<HttpState> for RunCommand {
    fn name(&self) -> &'static str {
        NAME
    }

    fn help_summary(&self) -> String {
        "Runs the commands in a script file".to_string()
    }

    fn help_details(&self, _state: &HttpState, parse_result: &ParseResult) -> Option<String> {
        parse_result.contains_at_least(1, &[NAME]).then(|| {
            "Usage: run {path to script}\n\nExecutes each line of the file as if it had been typed.".to_string()
        })
    }

    fn suggest(&self, _state: &HttpState, parse_result: &ParseResult) -> Option<Vec<String>> {
        complete_keyword(parse_result, &[], &[NAME])
    }

    fn can_handle(&self, _state: &HttpState, parse_result: &ParseResult) -> Claim {
        if parse_result.contains_at_least(2, &[NAME]) {
            Claim::Accept
        } else if parse_result.contains_exactly(&[NAME]) {
            Claim::Incomplete
        } else {
            Claim::Decline
        }
    }

    async fn execute(&self, context: &mut CommandContext<'_, HttpState>, parse_result: &ParseResult) -> anyhow::Result<()> {
        // Everything after `run`, so paths containing spaces survive.
        let start = parse_result.section_start(1).unwrap_or_default();
        let path = expand_tilde(parse_result.original_input()[start..].trim());

        let script = tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("could not read script {}", path.display()))?;

        let _suspension = context.shell.history.suspend();
        let mut line_count = 0;
        for line in script.lines() {
            if line.trim().is_empty() {
                continue;
            }
            line_count += 1;

            let prompt = context.state.prompt();
            context.shell.output.info(format!("{prompt}{line}"));
            let outcome = context
                .dispatcher
                .execute_line(line, &mut *context.shell, &mut *context.state, context.cancellation)
                .await;
            if outcome == ExecutionOutcome::Cancelled {
                debug!(script = %path.display(), line_count, "script cancelled");
                break;
            }
        }

        context.state.telemetry().track_event(ShellEvent::Run { line_count });
        Ok(())
    }
}
