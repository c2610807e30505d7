//! # Section Lexing
//!
//! Splits a raw input line into whitespace-delimited sections while keeping
//! the byte range of every section, so callers can relate a caret position
//! back to the section it falls in.

/// Split `input` into its whitespace-delimited sections.
///
/// Runs of whitespace of any length separate sections; leading and trailing
/// whitespace never produce an empty section.
///
/// # Example
/// ```rust
/// use httpsh_util::shell_lexing::lex_sections;
///
/// assert_eq!(lex_sections("  set   header Accept "), vec!["set", "header", "Accept"]);
/// assert!(lex_sections(" \t ").is_empty());
/// ```
pub fn lex_sections(input: &str) -> Vec<String> {
    lex_sections_ranged(input)
        .into_iter()
        .map(|token| token.text.to_string())
        .collect()
}

/// Section with its original byte positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexToken<'a> {
    /// The text content of the section
    pub text: &'a str,
    /// Byte offset of the first character
    pub start: usize,
    /// Byte offset one past the last character
    pub end: usize,
}

/// Split `input` into sections, returning borrowed slices and byte ranges.
///
/// # Example
/// ```rust
/// use httpsh_util::shell_lexing::lex_sections_ranged;
///
/// let tokens = lex_sections_ranged("cd  api");
/// assert_eq!(tokens.len(), 2);
/// assert_eq!((tokens[1].text, tokens[1].start, tokens[1].end), ("api", 4, 7));
/// ```
pub fn lex_sections_ranged(input: &str) -> Vec<LexToken<'_>> {
    let mut tokens = Vec::new();
    let mut current_index = 0usize;

    while current_index < input.len() {
        current_index = skip_whitespace(input, current_index);
        if current_index >= input.len() {
            break;
        }

        let start = current_index;
        current_index = scan_section(input, current_index);
        tokens.push(LexToken {
            text: &input[start..current_index],
            start,
            end: current_index,
        });
    }

    tokens
}

fn skip_whitespace(input: &str, start_index: usize) -> usize {
    input[start_index..]
        .char_indices()
        .find(|(_, character)| !character.is_whitespace())
        .map(|(offset, _)| start_index + offset)
        .unwrap_or(input.len())
}

fn scan_section(input: &str, start_index: usize) -> usize {
    input[start_index..]
        .char_indices()
        .find(|(_, character)| character.is_whitespace())
        .map(|(offset, _)| start_index + offset)
        .unwrap_or(input.len())
}
