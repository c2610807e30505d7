//! Text rendering of directory contents for `ls` and `cd`.

use unicode_width::UnicodeWidthStr;

use crate::Directory;

/// Spaces between the name column and the method list.
pub const LISTING_COLUMN_GAP: usize = 4;

/// One entry of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingRow {
    pub name: String,
    /// Upper-cased methods of the entry.
    pub methods: Vec<String>,
}

impl ListingRow {
    pub fn new(name: impl Into<String>, methods: Vec<String>) -> Self {
        Self {
            name: name.into(),
            methods,
        }
    }

    fn from_directory(name: &str, directory: Directory<'_>) -> Self {
        Self::new(name, directory.methods().into_iter().map(str::to_string).collect())
    }
}

/// Rows for listing `directory`: `.` first, `..` unless at the root, then each
/// child in declaration order.
pub fn listing_rows(directory: Directory<'_>) -> Vec<ListingRow> {
    let mut rows = vec![ListingRow::from_directory(".", directory)];
    if let Some(parent) = directory.parent() {
        rows.push(ListingRow::from_directory("..", parent));
    }
    rows.extend(
        directory
            .children()
            .map(|child| ListingRow::from_directory(child.name(), child)),
    );
    rows
}

/// Formats rows as `name    [GET|POST]` with names padded to a shared
/// display width.
pub fn format_listing(rows: &[ListingRow]) -> Vec<String> {
    let width = rows.iter().map(|row| row.name.width()).max().unwrap_or(0);
    rows.iter().map(|row| format_row(&row.name, &row.methods, width)).collect()
}

/// Formats a single row, padding `name` to `width` display columns.
///
/// ```rust
/// use httpsh_directory::format_row;
///
/// assert_eq!(format_row("/AnEndpoint", &["GET".to_string()], 0), "/AnEndpoint    [GET]");
/// assert_eq!(format_row("..", &[], 4), "..      []");
/// ```
pub fn format_row(name: &str, methods: &[String], width: usize) -> String {
    let padding = width.saturating_sub(name.width()) + LISTING_COLUMN_GAP;
    format!("{name}{}[{}]", " ".repeat(padding), methods.join("|"))
}
