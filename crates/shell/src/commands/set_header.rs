use async_trait::async_trait;
use httpsh_repl::{Claim, Command, CommandContext, ParseResult, ShellEvent};
use httpsh_util::{redact_header_value, starts_with_ignore_case};
use tracing::debug;

use super::complete_keyword;
use crate::headers::{header_name_completions, sanitized_header_name};
use crate::state::HttpState;

const COMMAND: &str = "set";
const SUB_COMMAND: &str = "header";

/// `set header {name} [value...]`: adds, replaces or removes a request
/// header. Giving no value removes the header.
#[derive(Debug, Default, Clone, Copy)]
pub struct SetHeaderCommand;

#[async_trait]
impl Command<HttpState> for SetHeaderCommand {
    fn name(&self) -> &'static str {
        "set header"
    }

    fn help_summary(&self) -> String {
        "Sets or clears a header sent with every request".to_string()
    }

    fn help_details(&self, _state: &HttpState, parse_result: &ParseResult) -> Option<String> {
        parse_result.contains_at_least(2, &[COMMAND, SUB_COMMAND]).then(|| {
            "Usage: set header {name} [value]\n\nSets the header to the given value, replacing any previous value. \
             Omitting the value removes the header."
                .to_string()
        })
    }

    fn suggest(&self, state: &HttpState, parse_result: &ParseResult) -> Option<Vec<String>> {
        if parse_result.is_selecting(0) {
            return complete_keyword(parse_result, &[], &[COMMAND]);
        }
        if parse_result.is_selecting(1) {
            return complete_keyword(parse_result, &[COMMAND], &[SUB_COMMAND]);
        }
        if !parse_result.contains_at_least(3, &[COMMAND, SUB_COMMAND]) {
            return None;
        }

        let completions = if parse_result.is_selecting(2) {
            header_name_completions(parse_result.selected_prefix())
        } else if parse_result.is_selecting(3) {
            let header_name = parse_result.section(2).unwrap_or_default();
            value_completions(state, header_name, parse_result.selected_prefix())
        } else {
            Vec::new()
        };
        (!completions.is_empty()).then_some(completions)
    }

    fn can_handle(&self, _state: &HttpState, parse_result: &ParseResult) -> Claim {
        if parse_result.contains_at_least(3, &[COMMAND, SUB_COMMAND]) {
            Claim::Accept
        } else if parse_result.contains_exactly(&[COMMAND, SUB_COMMAND]) {
            Claim::Incomplete
        } else {
            Claim::Decline
        }
    }

    async fn execute(&self, context: &mut CommandContext<'_, HttpState>, parse_result: &ParseResult) -> anyhow::Result<()> {
        let sections = parse_result.sections();
        let name = sections[2].as_str();
        let values = &sections[3..];
        let is_value_empty = values.is_empty();

        if is_value_empty {
            let removed = context.state.headers.remove(name);
            debug!(header = name, removed, "header removed");
        } else {
            debug!(header = name, value = %redact_header_value(name, &values.join(" ")), "header set");
            context.state.headers.set(name, values.to_vec());
        }

        context.state.telemetry().track_event(ShellEvent::SetHeader {
            header_name: sanitized_header_name(name),
            is_value_empty,
        });
        Ok(())
    }
}

/// Value completions for `header_name`.
///
/// Only `Content-Type` has known values: the content types the current
/// endpoint accepts.
fn value_completions(state: &HttpState, header_name: &str, prefix: &str) -> Vec<String> {
    if !header_name.eq_ignore_ascii_case("content-type") {
        return Vec::new();
    }
    let Some(request_info) = state.current_directory().and_then(|directory| directory.request_info()) else {
        return Vec::new();
    };

    let mut content_types: Vec<String> = Vec::new();
    for method in request_info.methods() {
        let Some(by_content_type) = request_info.content_types(method) else {
            continue;
        };
        for content_type in by_content_type.keys() {
            if !content_type.is_empty()
                && starts_with_ignore_case(content_type, prefix)
                && !content_types.contains(content_type)
            {
                content_types.push(content_type.clone());
            }
        }
    }
    content_types
}
