//! The httpsh program: session state, configuration and the commands that
//! operate on them.
//!
//! Front ends build an [`HttpState`], register the commands with
//! [`default_dispatcher`] and feed it lines; output is collected in the
//! shell's [`httpsh_repl::ShellOutput`] buffer.

pub mod commands;
pub mod config;
pub mod headers;
pub mod state;

pub use commands::default_dispatcher;
pub use config::{CONFIG_PATH_ENV, ConfigError, ShellConfig, default_config_path};
pub use headers::{RequestHeaders, WELL_KNOWN_HEADERS, sanitized_header_name};
pub use state::HttpState;

#[cfg(test)]
mod tests;
