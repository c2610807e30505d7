//! Readers that turn API description documents into [`EndpointMetadata`].
//!
//! Documents are handled as generic `serde_json::Value` trees. Each dialect
//! has its own [`EndpointMetadataReader`]; [`MetadataReaders`] tries them in
//! order and uses the first one that recognises the document.

pub mod document;
pub mod openapi_v3;
pub mod reader;
pub mod swagger_v2;

mod parameters;

pub use document::{DocumentParseError, parse_document};
pub use httpsh_types::EndpointMetadata;
pub use openapi_v3::OpenApiV3EndpointMetadataReader;
pub use reader::{EndpointMetadataReader, MetadataReaders};
pub use swagger_v2::SwaggerV2EndpointMetadataReader;

#[cfg(test)]
mod tests;
