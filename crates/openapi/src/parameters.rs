//! Parameter extraction shared by both readers.

use httpsh_types::{Parameter, ParameterLocation, Schema};
use serde_json::Value;

/// Upper bound on chained `$ref` hops, so a reference cycle terminates.
const MAX_REFERENCE_DEPTH: usize = 16;

/// Follows local `$ref` pointers (`#/components/parameters/Limit`) within the
/// same document.
///
/// Returns `value` itself when it is not a reference or the target cannot be
/// found.
pub(crate) fn resolve_local_ref<'a>(root: &'a Value, value: &'a Value) -> &'a Value {
    let mut current = value;
    for _ in 0..MAX_REFERENCE_DEPTH {
        let Some(reference) = current.get("$ref").and_then(Value::as_str) else {
            break;
        };
        let Some(target) = reference.strip_prefix('#').and_then(|pointer| root.pointer(pointer)) else {
            break;
        };
        current = target;
    }
    current
}

/// Reads a version marker such as `"swagger": "2.0"`.
///
/// YAML documents often leave the version unquoted, which parses as a number.
pub(crate) fn version_field(document: &Value, field: &str) -> Option<String> {
    match document.get(field)? {
        Value::String(version) => Some(version.clone()),
        Value::Number(version) => Some(version.to_string()),
        _ => None,
    }
}

/// Collects the parameters of one operation.
///
/// Path-item level parameters come first; an operation-level parameter with
/// the same name and location replaces the path-level one in place. Entries
/// that are not objects after `$ref` resolution are ignored.
pub(crate) fn collect_parameters(root: &Value, path_item: &Value, operation: &Value) -> Vec<Parameter> {
    let mut collected: Vec<Parameter> = Vec::new();

    for source in [path_item, operation] {
        let Some(entries) = source.get("parameters").and_then(Value::as_array) else {
            continue;
        };
        for entry in entries {
            let resolved = resolve_local_ref(root, entry);
            if !resolved.is_object() {
                continue;
            }
            let parameter = read_parameter(resolved);
            if let Some(existing) = collected
                .iter_mut()
                .find(|existing| !parameter.name.is_empty() && existing.name == parameter.name && existing.location == parameter.location)
            {
                *existing = parameter;
            } else {
                collected.push(parameter);
            }
        }
    }

    collected
}

/// Builds a [`Parameter`] from a parameter object.
///
/// The schema comes from the nested `schema` object when present (v3 and v2
/// body parameters), otherwise from the parameter object itself (v2 simple
/// parameters carry `type`/`format` inline).
pub(crate) fn read_parameter(object: &Value) -> Parameter {
    let name = object.get("name").and_then(Value::as_str).unwrap_or_default();
    let location = object
        .get("in")
        .and_then(Value::as_str)
        .and_then(|location| location.parse::<ParameterLocation>().ok());
    let required = object.get("required").and_then(Value::as_bool).unwrap_or(false);

    Parameter::new(name, location, required, schema_of(object, None))
}

/// Synthesizes the body parameter for an OpenAPI v3 `requestBody` entry.
pub(crate) fn body_parameter(request_body: &Value, media_type: &Value) -> Parameter {
    let name = request_body.get("name").and_then(Value::as_str).unwrap_or_default();
    let required = request_body.get("required").and_then(Value::as_bool).unwrap_or(false);

    Parameter::new(
        name,
        Some(ParameterLocation::Body),
        required,
        schema_of(request_body, Some(media_type)),
    )
}

fn schema_of(owner: &Value, media_type: Option<&Value>) -> Option<Schema> {
    owner
        .get("schema")
        .filter(|schema| schema.is_object())
        .or_else(|| media_type.and_then(|media| media.get("schema")).filter(|schema| schema.is_object()))
        .and_then(Schema::from_value)
        .or_else(|| Schema::from_value(owner))
}
