use async_trait::async_trait;
use httpsh_directory::{format_listing, listing_rows};
use httpsh_repl::{Claim, Command, CommandContext, ParseResult};

use super::{complete_keyword, complete_path, unknown_endpoint_warning};
use crate::state::{HttpState, format_path};

const NAMES: &[&str] = &["ls", "dir"];

/// `ls [path]` / `dir [path]`: lists a directory and its children.
#[derive(Debug, Default, Clone, Copy)]
pub struct ListCommand;

impl ListCommand {
    fn is_invoked(parse_result: &ParseResult) -> bool {
        NAMES.iter().any(|name| parse_result.contains_at_least(1, &[*name]))
    }
}

#[async_trait]
impl Command<HttpState> for ListCommand {
    fn name(&self) -> &'static str {
        "ls"
    }

    fn help_summary(&self) -> String {
        "Lists the endpoints below the current (or given) path".to_string()
    }

    fn help_details(&self, _state: &HttpState, parse_result: &ParseResult) -> Option<String> {
        Self::is_invoked(parse_result).then(|| {
            "Usage: ls [path]\n\nLists the directory and the methods each child supports. `dir` is an alias.".to_string()
        })
    }

    fn suggest(&self, state: &HttpState, parse_result: &ParseResult) -> Option<Vec<String>> {
        if parse_result.is_selecting(0) {
            return complete_keyword(parse_result, &[], NAMES);
        }
        if parse_result.is_selecting(1) && Self::is_invoked(parse_result) {
            return complete_path(state, parse_result.selected_prefix());
        }
        None
    }

    fn can_handle(&self, _state: &HttpState, parse_result: &ParseResult) -> Claim {
        if !Self::is_invoked(parse_result) {
            Claim::Decline
        } else if parse_result.len() <= 2 {
            Claim::Accept
        } else {
            Claim::Incomplete
        }
    }

    async fn execute(&self, context: &mut CommandContext<'_, HttpState>, parse_result: &ParseResult) -> anyhow::Result<()> {
        let state = &*context.state;
        if state.structure().is_none() {
            context
                .shell
                .output
                .warning("No API description is loaded. Use 'set swagger <uri>' or 'set base <uri>' first.");
            return Ok(());
        }

        let sections = state.resolve_path_sections(parse_result.section(1).unwrap_or_default());
        let Some(directory) = state.directory_at(&sections) else {
            context.shell.output.warning(unknown_endpoint_warning(&format_path(&sections)));
            return Ok(());
        };

        for line in format_listing(&listing_rows(directory)) {
            context.shell.output.info(line);
        }
        Ok(())
    }
}
