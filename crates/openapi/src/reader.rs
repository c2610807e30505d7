use httpsh_types::EndpointMetadata;
use serde_json::Value;
use tracing::debug;

use crate::{OpenApiV3EndpointMetadataReader, SwaggerV2EndpointMetadataReader};

/// Extracts per-path endpoint metadata from one API description dialect.
pub trait EndpointMetadataReader: Send + Sync {
    /// Short identifier used in log output.
    fn name(&self) -> &'static str;

    /// Returns `true` when this reader understands `document`.
    ///
    /// Implementations sniff the version field and never fail: documents
    /// without the field, or with another major version, are simply declined.
    fn can_handle(&self, document: &Value) -> bool;

    /// Reads one [`EndpointMetadata`] per path, in document order.
    ///
    /// A missing or malformed `paths` container yields an empty list.
    fn read_metadata(&self, document: &Value) -> Vec<EndpointMetadata>;
}

/// Ordered list of readers consulted for each document.
pub struct MetadataReaders {
    readers: Vec<Box<dyn EndpointMetadataReader>>,
}

impl MetadataReaders {
    pub fn new(readers: Vec<Box<dyn EndpointMetadataReader>>) -> Self {
        Self { readers }
    }

    /// Appends a reader after the existing ones.
    pub fn register(&mut self, reader: Box<dyn EndpointMetadataReader>) {
        self.readers.push(reader);
    }

    pub fn len(&self) -> usize {
        self.readers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readers.is_empty()
    }

    /// Reads `document` with the first reader that can handle it.
    ///
    /// Returns `None` when no reader recognises the document, which callers
    /// report as "not a usable API description". A recognised document with
    /// no usable paths returns `Some` of an empty list.
    pub fn read(&self, document: &Value) -> Option<Vec<EndpointMetadata>> {
        let Some(reader) = self.readers.iter().find(|reader| reader.can_handle(document)) else {
            debug!(readers = self.readers.len(), "no reader recognised the API description");
            return None;
        };

        let metadata = reader.read_metadata(document);
        debug!(reader = reader.name(), endpoints = metadata.len(), "read API description");
        Some(metadata)
    }
}

impl Default for MetadataReaders {
    /// OpenAPI v3 first, then Swagger v2.
    fn default() -> Self {
        Self::new(vec![
            Box::new(OpenApiV3EndpointMetadataReader),
            Box::new(SwaggerV2EndpointMetadataReader),
        ])
    }
}

impl std::fmt::Debug for MetadataReaders {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.readers.iter().map(|reader| reader.name())).finish()
    }
}
