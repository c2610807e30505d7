use async_trait::async_trait;
use httpsh_directory::format_row;
use httpsh_repl::{Claim, Command, CommandContext, ParseResult};

use super::{complete_keyword, complete_path, unknown_endpoint_warning};
use crate::state::HttpState;

const NAME: &str = "cd";

/// `cd [path]`: moves through the endpoint tree.
///
/// The move always happens, even to paths the description does not know, so
/// requests can still be sent to undocumented endpoints.
#[derive(Debug, Default, Clone, Copy)]
pub struct ChangeDirectoryCommand;

#[async_trait]
impl Command<HttpState> for ChangeDirectoryCommand {
    fn name(&self) -> &'static str {
        NAME
    }

    fn help_summary(&self) -> String {
        "Shows the current path, or moves to a different path relative to it".to_string()
    }

    fn help_details(&self, _state: &HttpState, parse_result: &ParseResult) -> Option<String> {
        parse_result.contains_at_least(1, &[NAME]).then(|| {
            "Usage: cd [path]\n\nPrints the current directory when no path is given. Otherwise moves to the given path; \
             `..` goes up one level and a leading `/` starts from the base address."
                .to_string()
        })
    }

    fn suggest(&self, state: &HttpState, parse_result: &ParseResult) -> Option<Vec<String>> {
        if parse_result.is_selecting(0) {
            return complete_keyword(parse_result, &[], &[NAME]);
        }
        if parse_result.is_selecting(1) && parse_result.contains_at_least(1, &[NAME]) {
            return complete_path(state, parse_result.selected_prefix());
        }
        None
    }

    fn can_handle(&self, _state: &HttpState, parse_result: &ParseResult) -> Claim {
        if !parse_result.contains_at_least(1, &[NAME]) {
            Claim::Decline
        } else if parse_result.len() <= 2 {
            Claim::Accept
        } else {
            Claim::Incomplete
        }
    }

    async fn execute(&self, context: &mut CommandContext<'_, HttpState>, parse_result: &ParseResult) -> anyhow::Result<()> {
        let target = parse_result.section(1).unwrap_or_default();
        let has_structure = context.state.structure().is_some();

        let methods: Option<Vec<String>> = context
            .state
            .change_directory(target)
            .map(|directory| directory.methods().into_iter().map(str::to_string).collect());
        let path = context.state.current_path();

        match methods {
            Some(methods) => context.shell.output.info(format_row(&path, &methods, 0)),
            None => {
                if has_structure {
                    context.shell.output.warning(unknown_endpoint_warning(&path));
                }
                context.shell.output.info(format_row(&path, &[], 0));
            }
        }
        Ok(())
    }
}
