//! Commands understood by the httpsh shell.

mod change_directory;
mod exit;
mod help;
mod list;
mod run;
mod set_base;
mod set_header;
mod set_swagger;

pub use change_directory::ChangeDirectoryCommand;
pub use exit::ExitCommand;
pub use help::HelpCommand;
pub use list::ListCommand;
pub use run::RunCommand;
pub use set_base::SetBaseCommand;
pub use set_header::SetHeaderCommand;
pub use set_swagger::SetSwaggerCommand;

use httpsh_repl::{CommandDispatcher, ParseResult};
use httpsh_util::starts_with_ignore_case;

use crate::state::HttpState;

/// Dispatcher with every httpsh command registered in resolution order.
pub fn default_dispatcher() -> CommandDispatcher<HttpState> {
    CommandDispatcher::new()
        .with_command(SetBaseCommand)
        .with_command(SetSwaggerCommand)
        .with_command(SetHeaderCommand)
        .with_command(ChangeDirectoryCommand)
        .with_command(ListCommand)
        .with_command(RunCommand)
        .with_command(HelpCommand)
        .with_command(ExitCommand)
}

/// Completes the section after `preceding` from `candidates`.
///
/// Yields nothing unless the line starts with `preceding` and the caret is on
/// the next section.
pub(crate) fn complete_keyword(parse_result: &ParseResult, preceding: &[&str], candidates: &[&str]) -> Option<Vec<String>> {
    let index = preceding.len();
    if !parse_result.is_selecting(index) || !parse_result.contains_at_least(index, preceding) {
        return None;
    }

    let prefix = parse_result.selected_prefix();
    let matches: Vec<String> = candidates
        .iter()
        .filter(|candidate| starts_with_ignore_case(candidate, prefix))
        .map(|candidate| candidate.to_string())
        .collect();
    (!matches.is_empty()).then_some(matches)
}

/// Child directory names completing `prefix`, relative to the current path.
///
/// The part of `prefix` up to its last `/` is kept verbatim so the completion
/// replaces the whole section.
pub(crate) fn complete_path(state: &HttpState, prefix: &str) -> Option<Vec<String>> {
    let (parent, leaf) = match prefix.rfind('/') {
        Some(index) => prefix.split_at(index + 1),
        None => ("", prefix),
    };
    let directory = state.directory_at(&state.resolve_path_sections(parent))?;

    let matches: Vec<String> = directory
        .directory_names()
        .filter(|name| starts_with_ignore_case(name, leaf))
        .map(|name| format!("{parent}{name}"))
        .collect();
    (!matches.is_empty()).then_some(matches)
}

/// Warning written when a path is not part of the loaded description.
pub(crate) fn unknown_endpoint_warning(path: &str) -> String {
    format!("Warning: The '{path}' endpoint is not present in the OpenAPI description")
}
