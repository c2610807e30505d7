use std::{error::Error, fmt, str::FromStr};

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Where an operation parameter is carried in the request.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ParameterLocation {
    /// Query string (`?limit=10`).
    Query,
    /// Templated path segment (`/pets/{id}`).
    Path,
    /// Request header.
    Header,
    /// Cookie value (OpenAPI v3 only).
    Cookie,
    /// Request body, either a Swagger v2 `in: body` parameter or a
    /// parameter synthesized from an OpenAPI v3 `requestBody`.
    Body,
    /// Swagger v2 form field.
    FormData,
}

impl ParameterLocation {
    /// Returns the token used for this location in API description documents.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Query => "query",
            Self::Path => "path",
            Self::Header => "header",
            Self::Cookie => "cookie",
            Self::Body => "body",
            Self::FormData => "formData",
        }
    }
}

impl fmt::Display for ParameterLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParameterLocation {
    type Err = ParseParameterLocationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "query" => Ok(Self::Query),
            "path" => Ok(Self::Path),
            "header" => Ok(Self::Header),
            "cookie" => Ok(Self::Cookie),
            "body" => Ok(Self::Body),
            "formdata" => Ok(Self::FormData),
            _ => Err(ParseParameterLocationError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseParameterLocationError(String);

impl fmt::Display for ParseParameterLocationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid parameter location '{}'; expected query, path, header, cookie, body or formData",
            self.0
        )
    }
}

impl Error for ParseParameterLocationError {}

/// A single parameter accepted by an operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    /// Parameter name as declared in the document (empty for synthesized bodies without a name).
    #[serde(default)]
    pub name: String,
    /// Where the parameter is carried; `None` when the document omits or misspells `in`.
    #[serde(rename = "in", default)]
    pub location: Option<ParameterLocation>,
    /// Whether the operation requires this parameter.
    #[serde(default)]
    pub required: bool,
    /// Shape of the parameter value, used later for request body scaffolding.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Schema>,
}

impl Parameter {
    pub fn new(name: impl Into<String>, location: Option<ParameterLocation>, required: bool, schema: Option<Schema>) -> Self {
        Self {
            name: name.into(),
            location,
            required,
            schema,
        }
    }

    pub fn is_body(&self) -> bool {
        self.location == Some(ParameterLocation::Body)
    }
}

/// JSON schema subset retained for each parameter.
///
/// Deserialization is lenient: a field whose JSON shape does not match (for
/// example a Swagger v2 parameter's boolean `required` read as a schema's
/// `required` list) falls back to its default instead of failing the whole
/// schema.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Schema {
    /// Unresolved `$ref` pointer, kept verbatim.
    #[serde(rename = "$ref", skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub r#type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub description: Option<String>,
    /// Element schema for arrays.
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub items: Option<Box<Schema>>,
    /// Object members in declaration order.
    #[serde(skip_serializing_if = "IndexMap::is_empty", deserialize_with = "lenient")]
    pub properties: IndexMap<String, Schema>,
    /// Names of required object members.
    #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "lenient")]
    pub required: Vec<String>,
    #[serde(rename = "enum", skip_serializing_if = "Vec::is_empty", deserialize_with = "lenient")]
    pub enum_values: Vec<Value>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub default: Option<Value>,
    #[serde(
        rename = "additionalProperties",
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient"
    )]
    pub additional_properties: Option<Value>,
}

impl Schema {
    /// Reads a schema from a JSON object. Returns `None` for any other JSON value.
    pub fn from_value(value: &Value) -> Option<Self> {
        if !value.is_object() {
            return None;
        }
        serde_json::from_value(value.clone()).ok()
    }

    pub fn is_object(&self) -> bool {
        self.r#type.as_deref() == Some("object") || !self.properties.is_empty()
    }

    pub fn is_array(&self) -> bool {
        self.r#type.as_deref() == Some("array")
    }
}

fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}
