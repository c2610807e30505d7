//! Request headers configured with `set header`.

use std::hash::{DefaultHasher, Hash, Hasher};

use httpsh_util::starts_with_ignore_case;

/// Header names offered as completions.
pub const WELL_KNOWN_HEADERS: &[&str] = &[
    "A-IM",
    "Accept",
    "Accept-Charset",
    "Accept-Encoding",
    "Accept-Language",
    "Accept-Datetime",
    "Access-Control-Request-Method",
    "Access-Control-Request-Headers",
    "Authorization",
    "Cache-Control",
    "Connection",
    "Content-Length",
    "Content-MD5",
    "Content-Type",
    "Cookie",
    "Date",
    "Expect",
    "Forwarded",
    "From",
    "Host",
    "If-Match",
    "If-Modified-Since",
    "If-None-Match",
    "If-Range",
    "If-Unmodified-Since",
    "Max-Forwards",
    "Origin",
    "Pragma",
    "Proxy-Authorization",
    "Range",
    "Referer",
    "TE",
    "User-Agent",
    "Upgrade",
    "Via",
    "Warning",
];

/// Header name safe to report to telemetry.
///
/// Well-known names pass through unchanged. Any other name may carry private
/// information and is replaced by a hash of its lower-cased form.
pub fn sanitized_header_name(name: &str) -> String {
    if WELL_KNOWN_HEADERS.iter().any(|known| known.eq_ignore_ascii_case(name)) {
        return name.to_string();
    }

    let mut hasher = DefaultHasher::new();
    name.to_ascii_lowercase().hash(&mut hasher);
    format!("{:016x}", hasher.finish())
}

/// Headers sent with every request, keyed case-insensitively.
///
/// Names keep the spelling of their most recent `set`; order is the order in
/// which headers were first set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestHeaders {
    entries: Vec<(String, Vec<String>)>,
}

impl RequestHeaders {
    /// Sets `name` to `values`, replacing any previous values.
    pub fn set(&mut self, name: &str, values: Vec<String>) {
        match self.position(name) {
            Some(index) => self.entries[index] = (name.to_string(), values),
            None => self.entries.push((name.to_string(), values)),
        }
    }

    /// Removes `name`; returns whether it was present.
    pub fn remove(&mut self, name: &str) -> bool {
        match self.position(name) {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.position(name).map(|index| self.entries[index].1.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|(existing, _)| existing.eq_ignore_ascii_case(name))
    }
}

/// Well-known header names starting with `prefix`, ignoring case.
pub fn header_name_completions(prefix: &str) -> Vec<String> {
    WELL_KNOWN_HEADERS
        .iter()
        .filter(|name| starts_with_ignore_case(name, prefix))
        .map(|name| name.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_replaces_case_insensitively() {
        let mut headers = RequestHeaders::default();
        headers.set("accept", vec!["text/plain".into()]);
        headers.set("X-Id", vec!["1".into()]);
        headers.set("Accept", vec!["application/json".into(), "text/json".into()]);

        assert_eq!(headers.len(), 2);
        let entries: Vec<_> = headers.iter().map(|(name, values)| (name, values.len())).collect();
        assert_eq!(entries, vec![("Accept", 2), ("X-Id", 1)]);
    }

    #[test]
    fn remove_reports_presence() {
        let mut headers = RequestHeaders::default();
        headers.set("X-Id", vec!["1".into()]);
        assert!(headers.remove("x-id"));
        assert!(!headers.remove("x-id"));
        assert!(headers.get("X-Id").is_none());
    }

    #[test]
    fn completions_filter_by_prefix() {
        assert_eq!(header_name_completions("content-t"), vec!["Content-Type"]);
        assert!(header_name_completions("Acc").contains(&"Accept-Language".to_string()));
        assert_eq!(header_name_completions("").len(), WELL_KNOWN_HEADERS.len());
        assert!(header_name_completions("zz").is_empty());
    }

    #[test]
    fn custom_header_names_are_hashed_for_telemetry() {
        assert_eq!(sanitized_header_name("content-type"), "content-type");
        assert_eq!(sanitized_header_name("Authorization"), "Authorization");

        let hashed = sanitized_header_name("X-Acme-Tenant");
        assert_ne!(hashed, "X-Acme-Tenant");
        assert_eq!(hashed.len(), 16);
        assert!(hashed.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(hashed, sanitized_header_name("x-acme-tenant"));
    }
}
