use anyhow::bail;
use async_trait::async_trait;
use httpsh_repl::{Claim, Command, CommandContext, ParseResult, ShellEvent};
use tracing::info;

use super::complete_keyword;
use crate::state::HttpState;

const COMMAND: &str = "set";
const SUB_COMMAND: &str = "swagger";

/// `set swagger [uri]`: loads the endpoint tree from an API description.
///
/// The new tree replaces the old one only once it is fully built; a failed
/// or cancelled load leaves the session as it was.
#[derive(Debug, Default, Clone, Copy)]
pub struct SetSwaggerCommand;

#[async_trait]
impl Command<HttpState> for SetSwaggerCommand {
    fn name(&self) -> &'static str {
        "set swagger"
    }

    fn help_summary(&self) -> String {
        "Sets the OpenAPI description used to navigate the API".to_string()
    }

    fn help_details(&self, _state: &HttpState, parse_result: &ParseResult) -> Option<String> {
        parse_result.contains_at_least(2, &[COMMAND, SUB_COMMAND]).then(|| {
            "Usage: set swagger [uri]\n\nReads the OpenAPI (v3) or Swagger (v2) description at the uri. \
             Relative uris are resolved against the base address. Without a uri the description is cleared."
                .to_string()
        })
    }

    fn suggest(&self, _state: &HttpState, parse_result: &ParseResult) -> Option<Vec<String>> {
        complete_keyword(parse_result, &[], &[COMMAND]).or_else(|| complete_keyword(parse_result, &[COMMAND], &[SUB_COMMAND]))
    }

    fn can_handle(&self, _state: &HttpState, parse_result: &ParseResult) -> Claim {
        if !parse_result.contains_at_least(2, &[COMMAND, SUB_COMMAND]) {
            Claim::Decline
        } else if parse_result.len() <= 3 {
            Claim::Accept
        } else {
            Claim::Incomplete
        }
    }

    async fn execute(&self, context: &mut CommandContext<'_, HttpState>, parse_result: &ParseResult) -> anyhow::Result<()> {
        let Some(address) = parse_result.section(2) else {
            context.state.clear_structure();
            return Ok(());
        };

        let url = context.state.resolve_address(address)?;
        let loaded = context.state.load_structure(&url, context.cancellation).await;
        if context.cancellation.is_cancelled() {
            return loaded.map(|_| ());
        }

        let succeeded = matches!(loaded, Ok(Some(_)));
        context.state.telemetry().track_event(ShellEvent::SetSwagger { succeeded });

        match loaded? {
            Some(structure) => {
                info!(%url, nodes = structure.node_count(), "loaded API description");
                context.state.install_structure(structure, url);
                Ok(())
            }
            None => bail!("The document at {url} is not a supported OpenAPI/Swagger document"),
        }
    }
}
