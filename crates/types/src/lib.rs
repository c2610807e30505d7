//! Shared data model for httpsh.
//!
//! These types describe what an API description document says about a remote
//! API: the parameters each operation accepts ([`Parameter`], [`Schema`]), the
//! per-path extraction result produced by the metadata readers
//! ([`EndpointMetadata`]), and the per-directory record kept in the endpoint
//! tree ([`RequestInfo`]).

mod endpoint;
mod parameter;

pub use endpoint::{EndpointMetadata, ParametersByContentType, RequestInfo};
pub use parameter::{Parameter, ParameterLocation, ParseParameterLocationError, Schema};

/// HTTP method tokens recognised as operations inside an OpenAPI path item.
pub const HTTP_METHOD_NAMES: [&str; 8] = ["get", "put", "post", "delete", "options", "head", "patch", "trace"];

/// Returns `true` when `name` is one of [`HTTP_METHOD_NAMES`], ignoring case.
pub fn is_http_method_name(name: &str) -> bool {
    HTTP_METHOD_NAMES
        .iter()
        .any(|method| method.eq_ignore_ascii_case(name))
}
