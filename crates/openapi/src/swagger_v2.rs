use httpsh_types::{EndpointMetadata, ParametersByContentType, is_http_method_name};
use indexmap::IndexMap;
use serde_json::Value;

use crate::parameters::{collect_parameters, version_field};
use crate::reader::EndpointMetadataReader;

/// Reader for Swagger 2.0 documents (`"swagger": "2.0"`).
///
/// Swagger v2 has no per-content-type request bodies: every content type the
/// operation `consumes` accepts the same parameter list, including any
/// `in: body` or `in: formData` parameters. An operation that consumes
/// nothing is registered with an empty content-type map.
#[derive(Debug, Clone, Copy, Default)]
pub struct SwaggerV2EndpointMetadataReader;

impl EndpointMetadataReader for SwaggerV2EndpointMetadataReader {
    fn name(&self) -> &'static str {
        "swagger-v2"
    }

    fn can_handle(&self, document: &Value) -> bool {
        version_field(document, "swagger").is_some_and(|version| version.starts_with("2."))
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

        let content_types = requests.entry(method.to_ascii_lowercase()).or_default();
        if !operation.is_object() {
            continue;
        }

        let consumes = consumes(operation).or_else(|| consumes(document)).unwrap_or_default();
        if consumes.is_empty() {
            continue;
        }

        let parameters = collect_parameters(document, path_item, operation);
        for content_type in consumes {
            content_types.insert(content_type, parameters.clone());
        }
    }

    requests
}

/// The `consumes` list of an operation or document; an explicit empty list
/// still overrides the document default.
fn consumes(owner: &Value) -> Option<Vec<String>> {
    owner.get("consumes").and_then(Value::as_array).map(|entries| {
        entries
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect()
    })
}
