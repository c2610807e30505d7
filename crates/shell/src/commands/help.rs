use anyhow::bail;
use async_trait::async_trait;
use httpsh_repl::{Claim, Command, CommandContext, ParseResult, parse_line};

use super::complete_keyword;
use crate::state::HttpState;

const NAME: &str = "help";

/// `help [command...]`: lists every command, or describes one.
#[derive(Debug, Default, Clone, Copy)]
pub struct HelpCommand;

#[async_trait]
impl Command<HttpState> for HelpCommand {
    fn name(&self) -> &'static str {
        NAME
    }

    fn help_summary(&self) -> String {
        "Lists the available commands or shows detailed help for one".to_string()
    }

    fn help_details(&self, _state: &HttpState, parse_result: &ParseResult) -> Option<String> {
        parse_result
            .contains_exactly(&[NAME])
            .then(|| "Usage: help [command]\n\nShows detailed help for the given command.".to_string())
    }

    fn suggest(&self, _state: &HttpState, parse_result: &ParseResult) -> Option<Vec<String>> {
        complete_keyword(parse_result, &[], &[NAME])
    }

    fn can_handle(&self, _state: &HttpState, parse_result: &ParseResult) -> Claim {
        if parse_result.contains_at_least(1, &[NAME]) {
            Claim::Accept
        } else {
            Claim::Decline
        }
    }

    async fn execute(&self, context: &mut CommandContext<'_, HttpState>, parse_result: &ParseResult) -> anyhow::Result<()> {
        let Some(start) = parse_result.section_start(1) else {
            let summaries = context.dispatcher.help_summaries();
            let width = summaries.iter().map(|(name, _)| name.len()).max().unwrap_or_default();
            for (name, summary) in summaries {
                context.shell.output.info(format!("{name:<width$}    {summary}"));
            }
            return Ok(());
        };

        let topic = parse_line(&parse_result.original_input()[start..]);
        match context.dispatcher.help_details(context.state, &topic) {
            Some(details) => {
                context.shell.output.info(details);
                Ok(())
            }
            None => bail!("Unable to locate any help information for '{}'", topic.original_input().trim()),
        }
    }
}
