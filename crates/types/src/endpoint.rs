use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::Parameter;

/// Parameter lists keyed by request content type. The empty string stands for
/// "no request body".
pub type ParametersByContentType = IndexMap<String, Vec<Parameter>>;

/// Everything an API description declares about one path.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EndpointMetadata {
    /// Path exactly as written in the document (for example `/api/Employees/{id}`).
    pub path: String,
    /// Lower-cased HTTP method name to the parameters accepted per content type.
    pub available_requests: IndexMap<String, ParametersByContentType>,
}

impl EndpointMetadata {
    pub fn new(path: impl Into<String>, available_requests: IndexMap<String, ParametersByContentType>) -> Self {
        Self {
            path: path.into(),
            available_requests,
        }
    }

    /// Looks up a method ignoring case.
    pub fn method(&self, method: &str) -> Option<&ParametersByContentType> {
        self.available_requests.get(&method.to_ascii_lowercase())
    }

    /// Path segments with empty segments removed, so `/api/Employees` and
    /// `api//Employees/` yield the same sequence.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.path.split('/').filter(|segment| !segment.is_empty())
    }
}

/// Supported methods of one endpoint tree node.
///
/// Method names are stored upper-cased, which is also how listings display
/// them; lookups ignore case.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestInfo {
    methods: IndexMap<String, ParametersByContentType>,
}

impl RequestInfo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares `method` with no content types unless it is already present.
    pub fn add_method(&mut self, method: &str) {
        self.methods.entry(method.to_ascii_uppercase()).or_default();
    }

    /// Replaces the content types recorded for `method`, declaring it if needed.
    pub fn set_content_types(&mut self, method: &str, content_types: ParametersByContentType) {
        self.methods.insert(method.to_ascii_uppercase(), content_types);
    }

    pub fn has_method(&self, method: &str) -> bool {
        self.methods.contains_key(&method.to_ascii_uppercase())
    }

    /// Upper-cased method names in declaration order.
    pub fn methods(&self) -> impl Iterator<Item = &str> {
        self.methods.keys().map(String::as_str)
    }

    pub fn content_types(&self, method: &str) -> Option<&ParametersByContentType> {
        self.methods.get(&method.to_ascii_uppercase())
    }

    pub fn parameters(&self, method: &str, content_type: &str) -> Option<&[Parameter]> {
        self.content_types(method)?
            .iter()
            .find(|(candidate, _)| candidate.eq_ignore_ascii_case(content_type))
            .map(|(_, parameters)| parameters.as_slice())
    }

    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ParameterLocation;

    #[test]
    fn request_info_ignores_method_case() {
        let mut info = RequestInfo::new();
        info.add_method("get");
        info.add_method("GET");
        info.add_method("Post");

        assert_eq!(info.methods().collect::<Vec<_>>(), vec!["GET", "POST"]);
        assert!(info.has_method("get"));
        assert!(info.has_method("post"));
        assert!(!info.has_method("delete"));
    }

    #[test]
    fn set_content_types_replaces_previous_entry() {
        let body = Parameter::new("", Some(ParameterLocation::Body), true, None);
        let mut info = RequestInfo::new();
        info.set_content_types("post", IndexMap::from([("text/plain".to_string(), vec![])]));
        info.set_content_types("POST", IndexMap::from([("application/json".to_string(), vec![body.clone()])]));

        let content_types = info.content_types("post").expect("post declared");
        assert_eq!(content_types.len(), 1);
        assert_eq!(info.parameters("post", "Application/JSON"), Some(&[body][..]));
        assert!(info.parameters("post", "text/plain").is_none());
    }

    #[test]
    fn add_method_keeps_existing_content_types() {
        let mut info = RequestInfo::new();
        info.set_content_types("put", IndexMap::from([("application/json".to_string(), vec![])]));
        info.add_method("put");
        assert_eq!(info.content_types("put").map(IndexMap::len), Some(1));
    }

    #[test]
    fn endpoint_segments_skip_empty_parts() {
        let metadata = EndpointMetadata::new("/api//Employees/", IndexMap::new());
        assert_eq!(metadata.segments().collect::<Vec<_>>(), vec!["api", "Employees"]);
    }
}
