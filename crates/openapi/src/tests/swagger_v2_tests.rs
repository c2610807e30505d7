use httpsh_types::ParameterLocation;
use serde_json::{Value, json};

use crate::{EndpointMetadataReader, SwaggerV2EndpointMetadataReader};

fn read(document: Value) -> Vec<httpsh_types::EndpointMetadata> {
    SwaggerV2EndpointMetadataReader.read_metadata(&document)
}

#[test]
fn can_handle_sniffs_major_version() {
    let reader = SwaggerV2EndpointMetadataReader;
    assert!(reader.can_handle(&json!({ "swagger": "2.0" })));
    assert!(reader.can_handle(&json!({ "swagger": 2.0 })));
    assert!(!reader.can_handle(&json!({ "swagger": "1.2" })));
    assert!(!reader.can_handle(&json!({ "openapi": "3.0.0" })));
    assert!(!reader.can_handle(&json!({})));
}

#[test]
fn missing_paths_yields_nothing() {
    assert!(read(json!({ "swagger": "2.0" })).is_empty());
    assert!(read(json!({ "swagger": "2.0", "paths": [] })).is_empty());
}

#[test]
fn operation_consumes_overrides_document_consumes() {
    let metadata = read(json!({
        "swagger": "2.0",
        "consumes": ["application/json"],
        "paths": {
            "/api/Values": {
                "post": {
                    "consumes": ["application/json", "text/json"],
                    "parameters": [{ "name": "value", "in": "body", "required": true, "schema": { "type": "string" } }]
                },
                "put": {
                    "parameters": [{ "name": "value", "in": "body", "schema": { "type": "string" } }]
                }
            }
        }
    }));

    let post = metadata[0].method("post").expect("post registered");
    assert_eq!(post.keys().collect::<Vec<_>>(), vec!["application/json", "text/json"]);
    assert!(post["text/json"][0].is_body());
    assert!(post["text/json"][0].required);

    let put = metadata[0].method("put").expect("put registered");
    assert_eq!(put.keys().collect::<Vec<_>>(), vec!["application/json"]);
}

#[test]
fn simple_parameters_keep_inline_type() {
    let metadata = read(json!({
        "swagger": "2.0",
        "paths": {
            "/api/Employees": {
                "get": {
                    "consumes": ["application/json"],
                    "parameters": [{ "name": "top", "in": "query", "type": "integer", "format": "int32" }]
                },
                "delete": {}
            }
        }
    }));

    let get = metadata[0].method("get").expect("get registered");
    let top = &get["application/json"][0];
    assert_eq!(top.location, Some(ParameterLocation::Query));
    assert_eq!(top.schema.as_ref().and_then(|schema| schema.format.as_deref()), Some("int32"));

    let delete = metadata[0].method("delete").expect("delete registered");
    assert!(delete.is_empty());
}

#[test]
fn parameter_references_resolve_against_definitions() {
    let metadata = read(json!({
        "swagger": "2.0",
        "parameters": { "Id": { "name": "id", "in": "path", "required": true, "type": "integer" } },
        "paths": {
            "/api/Employees/{id}": {
                "put": { "consumes": ["text/json"], "parameters": [{ "$ref": "#/parameters/Id" }] }
            }
        }
    }));

    let put = metadata[0].method("put").expect("put registered");
    assert_eq!(put["text/json"][0].name, "id");
    assert_eq!(put["text/json"][0].location, Some(ParameterLocation::Path));
}

#[test]
fn operations_consuming_nothing_have_no_content_types() {
    let metadata = read(json!({
        "swagger": "2.0",
        "consumes": ["application/json"],
        "paths": {
            "/api/Employees/{id}": {
                "parameters": [{ "name": "id", "in": "path", "required": true, "type": "integer" }],
                "get": { "consumes": [] }
            },
            "/api/Values": {
                "get": { "parameters": [{ "name": "top", "in": "query", "type": "integer" }] }
            }
        }
    }));

    let get = metadata[0].method("get").expect("get registered");
    assert!(get.is_empty());

    let without_document_default = read(json!({
        "swagger": "2.0",
        "paths": {
            "/api/Values": {
                "get": { "parameters": [{ "name": "top", "in": "query", "type": "integer" }] }
            }
        }
    }));
    let get = without_document_default[0].method("get").expect("get registered");
    assert!(get.is_empty());

    let inherited = metadata[1].method("get").expect("get registered");
    assert_eq!(inherited.keys().collect::<Vec<_>>(), vec!["application/json"]);
}

#[test]
fn form_data_parameters_are_kept() {
    let metadata = read(json!({
        "swagger": "2.0",
        "paths": {
            "/upload": {
                "post": {
                    "consumes": ["multipart/form-data"],
                    "parameters": [{ "name": "file", "in": "formData", "type": "file" }]
                }
            }
        }
    }));

    let post = metadata[0].method("post").expect("post registered");
    assert_eq!(post["multipart/form-data"][0].location, Some(ParameterLocation::FormData));
}

#[test]
fn non_method_keys_are_ignored() {
    let metadata = read(json!({
        "swagger": "2.0",
        "paths": { "/api": { "parameters": [], "x-extension": {}, "Get": {} } }
    }));

    assert_eq!(metadata[0].available_requests.keys().collect::<Vec<_>>(), vec!["get"]);
}
