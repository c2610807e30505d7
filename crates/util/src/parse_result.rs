//! # Input Parsing
//!
//! Turns a raw input line plus caret position into a [`ParseResult`]: the
//! ordered sections of the line, the section the caret sits in, and the
//! caret's offset inside that section. Every command's `can_handle` and
//! `suggest` works from this structure.
//!
//! Caret positions are byte offsets into the line. Offsets past the end of
//! the line are clamped to its length, and offsets inside a multi-byte
//! character are moved back to the start of that character.

use crate::shell_lexing::lex_sections_ranged;

/// Immutable, parsed view of one input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseResult {
    original_input: String,
    caret_position: usize,
    sections: Vec<String>,
    section_starts: Vec<usize>,
    selected_section: Option<usize>,
    caret_position_within_selected_section: usize,
}

/// Parse `line` with the caret at `caret_position`.
///
/// The caret selects the section whose range contains it (the position just
/// after a section's last character still belongs to that section). A caret
/// in leading or inter-section whitespace selects the following section at
/// offset 0. A caret in the whitespace after the last section, or on a blank
/// line, selects nothing: a new section would start there.
///
/// # Example
/// ```rust
/// use httpsh_util::parse_input;
///
/// let parsed = parse_input("set swa", 7);
/// assert_eq!(parsed.selected_section(), Some(1));
/// assert_eq!(parsed.selected_prefix(), "swa");
///
/// let trailing = parse_input("cd ", 3);
/// assert_eq!(trailing.selected_section(), None);
/// ```
pub fn parse_input(line: &str, caret_position: usize) -> ParseResult {
    let caret_position = clamp_to_char_boundary(line, caret_position);
    let tokens = lex_sections_ranged(line);

    let mut selected_section = None;
    let mut caret_position_within_selected_section = 0;
    for (index, token) in tokens.iter().enumerate() {
        if caret_position < token.start {
            selected_section = Some(index);
            break;
        }
        if caret_position <= token.end {
            selected_section = Some(index);
            caret_position_within_selected_section = caret_position - token.start;
            break;
        }
    }

    ParseResult {
        original_input: line.to_string(),
        caret_position,
        sections: tokens.iter().map(|token| token.text.to_string()).collect(),
        section_starts: tokens.iter().map(|token| token.start).collect(),
        selected_section,
        caret_position_within_selected_section,
    }
}

/// Parse `line` with the caret at its end, the common case for executing a
/// completed line.
pub fn parse_line(line: &str) -> ParseResult {
    parse_input(line, line.len())
}

fn clamp_to_char_boundary(line: &str, caret_position: usize) -> usize {
    let mut position = caret_position.min(line.len());
    while !line.is_char_boundary(position) {
        position -= 1;
    }
    position
}

impl ParseResult {
    pub fn original_input(&self) -> &str {
        &self.original_input
    }

    pub fn caret_position(&self) -> usize {
        self.caret_position
    }

    pub fn sections(&self) -> &[String] {
        &self.sections
    }

    pub fn section(&self, index: usize) -> Option<&str> {
        self.sections.get(index).map(String::as_str)
    }

    /// Byte offset of section `index` within the original input.
    pub fn section_start(&self, index: usize) -> Option<usize> {
        self.section_starts.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Index of the section holding the caret; `None` when the caret is past
    /// every section.
    pub fn selected_section(&self) -> Option<usize> {
        self.selected_section
    }

    pub fn caret_position_within_selected_section(&self) -> usize {
        self.caret_position_within_selected_section
    }

    /// Text of the selected section up to the caret, or `""` when no section
    /// is selected.
    pub fn selected_prefix(&self) -> &str {
        match self.selected_section {
            Some(index) => &self.sections[index][..self.caret_position_within_selected_section],
            None => "",
        }
    }

    /// Returns `true` when the line has at least `minimum_length` sections
    /// and starts with `literals`, compared case-insensitively.
    ///
    /// ```rust
    /// use httpsh_util::parse_line;
    ///
    /// let parsed = parse_line("SET header Accept");
    /// assert!(parsed.contains_at_least(3, &["set", "header"]));
    /// assert!(!parsed.contains_at_least(4, &["set", "header"]));
    /// assert!(!parsed.contains_at_least(0, &["set", "base"]));
    /// ```
    pub fn contains_at_least(&self, minimum_length: usize, literals: &[&str]) -> bool {
        if self.sections.len() < minimum_length.max(literals.len()) {
            return false;
        }
        self.sections
            .iter()
            .zip(literals)
            .all(|(section, literal)| section.eq_ignore_ascii_case(literal))
    }

    /// Like [`Self::contains_at_least`] with exactly `literals.len()` sections.
    pub fn contains_exactly(&self, literals: &[&str]) -> bool {
        self.sections.len() == literals.len() && self.contains_at_least(literals.len(), literals)
    }

    /// Returns `true` when the caret sits in section `index`, or `index` is
    /// the next section to be typed.
    pub fn is_selecting(&self, index: usize) -> bool {
        match self.selected_section {
            Some(selected) => selected == index,
            None => self.sections.len() == index,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_line_selects_nothing() {
        let parsed = parse_line("");
        assert!(parsed.is_empty());
        assert_eq!(parsed.selected_section(), None);
        assert_eq!(parsed.caret_position_within_selected_section(), 0);
        assert_eq!(parsed.selected_prefix(), "");
    }

    #[test]
    fn caret_at_end_of_section_selects_it() {
        let parsed = parse_line("set swagger");
        assert_eq!(parsed.sections(), ["set", "swagger"]);
        assert_eq!(parsed.selected_section(), Some(1));
        assert_eq!(parsed.caret_position_within_selected_section(), 7);
    }

    #[test]
    fn caret_inside_section_tracks_offset() {
        let parsed = parse_input("set header Accept", 6);
        assert_eq!(parsed.selected_section(), Some(1));
        assert_eq!(parsed.caret_position_within_selected_section(), 2);
        assert_eq!(parsed.selected_prefix(), "he");
    }

    #[test]
    fn trailing_whitespace_after_last_section_is_the_sentinel() {
        let parsed = parse_line("cd api   ");
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed.selected_section(), None);
        assert!(parsed.is_selecting(2));
    }

    #[test]
    fn caret_in_inner_whitespace_selects_following_section() {
        let parsed = parse_input("set   header", 4);
        assert_eq!(parsed.selected_section(), Some(1));
        assert_eq!(parsed.caret_position_within_selected_section(), 0);
    }

    #[test]
    fn caret_in_leading_whitespace_selects_first_section() {
        let parsed = parse_input("   ls", 1);
        assert_eq!(parsed.selected_section(), Some(0));
        assert_eq!(parsed.selected_prefix(), "");
    }

    #[test]
    fn caret_beyond_line_is_clamped() {
        let parsed = parse_input("ls", 50);
        assert_eq!(parsed.caret_position(), 2);
        assert_eq!(parsed.selected_section(), Some(0));
        assert_eq!(parsed.caret_position_within_selected_section(), 2);
    }

    #[test]
    fn caret_inside_multibyte_character_moves_back() {
        let parsed = parse_input("cd é", 4);
        assert_eq!(parsed.caret_position(), 3);
        assert_eq!(parsed.selected_prefix(), "");
    }

    #[test]
    fn parsing_is_idempotent() {
        let first = parse_input(" set  base http://localhost ", 9);
        let second = parse_input(first.original_input(), first.caret_position());
        assert_eq!(first, second);
    }

    #[test]
    fn offsets_never_exceed_section_length() {
        let line = "  run   script.txt  now ";
        for caret in 0..=line.len() + 2 {
            let parsed = parse_input(line, caret);
            if let Some(index) = parsed.selected_section() {
                assert!(index < parsed.len());
                assert!(parsed.caret_position_within_selected_section() <= parsed.sections()[index].len());
            } else {
                assert_eq!(parsed.caret_position_within_selected_section(), 0);
            }
        }
    }

    #[test]
    fn contains_exactly_requires_matching_length() {
        let parsed = parse_line("set swagger");
        assert!(parsed.contains_exactly(&["set", "swagger"]));
        assert!(!parse_line("set swagger x").contains_exactly(&["set", "swagger"]));
    }

    #[test]
    fn section_starts_follow_the_original_line() {
        let parsed = parse_line("  cd   api");
        assert_eq!(parsed.section_start(0), Some(2));
        assert_eq!(parsed.section_start(1), Some(7));
        assert_eq!(parsed.section_start(2), None);
    }
}
