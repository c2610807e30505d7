use httpsh_types::{EndpointMetadata, ParametersByContentType, is_http_method_name};
use indexmap::IndexMap;
use serde_json::Value;

use crate::parameters::{body_parameter, collect_parameters, resolve_local_ref, version_field};
use crate::reader::EndpointMetadataReader;

/// Reader for OpenAPI 3.x documents (`"openapi": "3.0.x"`).
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenApiV3EndpointMetadataReader;

impl EndpointMetadataReader for OpenApiV3EndpointMetadataReader {
    fn name(&self) -> &'static str {
        "openapi-v3"
    }

    fn can_handle(&self, document: &Value) -> bool {
        version_field(document, "openapi").is_some_and(|version| version.starts_with("3."))
    }

    fn read_metadata(&self, document: &Value) -> Vec<EndpointMetadata> {
        let Some(paths) = document.get("paths").and_then(Value::as_object) else {
            return Vec::new();
        };

        paths
            .iter()
            .filter(|(_, path_item)| path_item.is_object())
            .map(|(path, path_item)| EndpointMetadata::new(path.as_str(), read_path_item(document, path_item)))
            .collect()
    }
}

fn read_path_item(document: &Value, path_item: &Value) -> IndexMap<String, ParametersByContentType> {
    let mut requests: IndexMap<String, ParametersByContentType> = IndexMap::new();
    let Some(fields) = path_item.as_object() else {
        return requests;
    };

    for (method, operation) in fields {
        if !is_http_method_name(method) {
            continue;
        }

        // Declared methods are listed even when the operation body is unusable.
        let content_types = requests.entry(method.to_ascii_lowercase()).or_default();
        if !operation.is_object() {
            continue;
        }

        // Without a request body there is nothing keyed by content type; path
        // and query parameters are not recorded for such methods.
        let Some(request_body) = operation
            .get("requestBody")
            .map(|body| resolve_local_ref(document, body))
            .filter(|body| body.is_object())
        else {
            continue;
        };
        let parameters = collect_parameters(document, path_item, operation);

        // A body without a content map has nothing to send; the method stays
        // registered with no content types.
        let Some(media_types) = request_body.get("content").and_then(Value::as_object) else {
            continue;
        };

        for (content_type, media_type) in media_types {
            let mut with_body = parameters.clone();
            with_body.push(body_parameter(request_body, media_type));
            content_types.insert(content_type.clone(), with_body);
        }
    }

    requests
}
