pub mod parse_result;
pub mod path_processing;
pub mod shell_lexing;
pub mod text_processing;
pub mod url_processing;

pub use parse_result::*;
pub use path_processing::*;
pub use shell_lexing::*;
pub use text_processing::*;
pub use url_processing::*;
