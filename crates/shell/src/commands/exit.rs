use async_trait::async_trait;
use httpsh_repl::{Claim, Command, CommandContext, ParseResult};

use super::complete_keyword;
use crate::state::HttpState;

const NAME: &str = "exit";

/// `exit`: ends the session once the current line finishes.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExitCommand;

#[async_trait]
impl Command<HttpState> for ExitCommand {
    fn name(&self) -> &'static str {
        NAME
    }

    fn help_summary(&self) -> String {
        "Exits the shell".to_string()
    }

    fn help_details(&self, _state: &HttpState, parse_result: &ParseResult) -> Option<String> {
        parse_result
            .contains_at_least(1, &[NAME])
            .then(|| "Usage: exit\n\nExits the shell.".to_string())
    }

    fn suggest(&self, _state: &HttpState, parse_result: &ParseResult) -> Option<Vec<String>> {
        complete_keyword(parse_result, &[], &[NAME])
    }

    fn can_handle(&self, _state: &HttpState, parse_result: &ParseResult) -> Claim {
        if parse_result.contains_exactly(&[NAME]) {
            Claim::Accept
        } else {
            Claim::Decline
        }
    }

    async fn execute(&self, context: &mut CommandContext<'_, HttpState>, _parse_result: &ParseResult) -> anyhow::Result<()> {
        context.shell.request_exit();
        Ok(())
    }
}
