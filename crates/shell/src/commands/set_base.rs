use anyhow::anyhow;
use async_trait::async_trait;
use httpsh_directory::DirectoryStructure;
use httpsh_repl::{CancellationToken, Claim, Command, CommandContext, ParseResult, ShellEvent};
use httpsh_util::{ensure_trailing_slash, join_relative, parse_absolute_url};
use tracing::{debug, warn};
use url::Url;

use super::complete_keyword;
use crate::state::HttpState;

const COMMAND: &str = "set";
const SUB_COMMAND: &str = "base";

/// `set base [uri]`: selects the server requests go to.
///
/// The API description is looked for at each configured search path below
/// the new base; the first readable one becomes the endpoint tree.
#[derive(Debug, Default, Clone, Copy)]
pub struct SetBaseCommand;

#[async_trait]
impl Command<HttpState> for SetBaseCommand {
    fn name(&self) -> &'static str {
        "set base"
    }

    fn help_summary(&self) -> String {
        "Sets the base address that requests are made relative to".to_string()
    }

    fn help_details(&self, _state: &HttpState, parse_result: &ParseResult) -> Option<String> {
        parse_result.contains_at_least(2, &[COMMAND, SUB_COMMAND]).then(|| {
            "Usage: set base [uri]\n\nSets the base address, e.g. `set base http://localhost:5000`. \
             Without a uri the shell disconnects."
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
            context.state.set_base_address(None);
            return Ok(());
        };

        let base = parse_absolute_url(address).map_err(|error| anyhow!("'{address}' is not a valid absolute URI: {error}"))?;
        let base = ensure_trailing_slash(&base);
        let discovered = discover_metadata(&*context.state, &base, context.cancellation).await?;

        context.state.set_base_address(Some(base));
        let metadata_found = discovered.is_some();
        if let Some((structure, url)) = discovered {
            context.shell.output.info(format!("Using swagger metadata from {url}"));
            context.state.install_structure(structure, url);
        }
        context.state.telemetry().track_event(ShellEvent::SetBase { metadata_found });
        Ok(())
    }
}

/// Probes each configured search path below `base`, returning the first tree
/// that could be read along with where it came from.
///
/// Only cancellation aborts the search; any other failure moves on to the
/// next candidate.
async fn discover_metadata(
    state: &HttpState,
    base: &Url,
    cancellation: &CancellationToken,
) -> anyhow::Result<Option<(DirectoryStructure, Url)>> {
    let mut probed: Vec<Url> = Vec::new();
    for search_path in &state.config().metadata_search_paths {
        let url = match join_relative(base, search_path) {
            Ok(url) => url,
            Err(error) => {
                warn!(path = %search_path, error = %error, "skipping invalid metadata search path");
                continue;
            }
        };
        if probed.contains(&url) {
            continue;
        }

        match state.load_structure(&url, cancellation).await {
            Ok(Some(structure)) => return Ok(Some((structure, url))),
            Ok(None) => debug!(%url, "no supported API description"),
            Err(error) if cancellation.is_cancelled() => return Err(error),
            Err(error) => debug!(%url, error = %format!("{error:#}"), "no API description"),
        }
        probed.push(url);
    }
    Ok(None)
}
