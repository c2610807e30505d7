use serde_json::Value;
use thiserror::Error;

/// Failure to turn raw text into an API description tree.
#[derive(Debug, Error)]
pub enum DocumentParseError {
    #[error("document is neither valid JSON nor YAML: {0}")]
    Syntax(#[from] serde_yaml::Error),
    #[error("could not convert YAML document to JSON: {0}")]
    Conversion(#[from] serde_json::Error),
    #[error("API description must be an object at the top level")]
    NotAnObject,
}

/// Parses an API description served as JSON or YAML.
///
/// JSON is tried first; anything that is not JSON is read as YAML and
/// converted to the same `serde_json::Value` representation.
pub fn parse_document(text: &str) -> Result<Value, DocumentParseError> {
    let document = match serde_json::from_str::<Value>(text) {
        Ok(document) => document,
        Err(_) => {
            let yaml = serde_yaml::from_str::<serde_yaml::Value>(text)?;
            serde_json::to_value(yaml)?
        }
    };

    if !document.is_object() {
        return Err(DocumentParseError::NotAnObject);
    }
    Ok(document)
}
