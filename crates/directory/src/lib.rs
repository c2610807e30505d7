//! The endpoint tree: a virtual directory per path segment of the remote API,
//! with the HTTP methods each endpoint supports.

mod builder;
mod listing;
mod structure;

pub use builder::build_directory_structure;
pub use listing::{LISTING_COLUMN_GAP, ListingRow, format_listing, format_row, listing_rows};
pub use structure::{Directory, DirectoryStructure, NodeId};
