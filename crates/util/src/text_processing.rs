//! # Text Processing Utilities
//!
//! Redaction of credentials before they reach log output, and the
//! case-insensitive prefix matching used by command suggestions.

use once_cell::sync::Lazy;
use regex::Regex;

const REDACTED: &str = "[REDACTED]";

/// Header names whose values are never logged verbatim.
const SENSITIVE_HEADER_NAMES: &[&str] = &[
    "authorization",
    "proxy-authorization",
    "cookie",
    "set-cookie",
    "x-api-key",
    "api-key",
    "x-auth-token",
];

/// Redacts values that look like credentials in a string.
///
/// # Example
/// ```rust
/// use httpsh_util::text_processing::redact_sensitive;
///
/// assert_eq!(redact_sensitive("Authorization: Bearer secret123"), "Authorization: [REDACTED]");
/// assert_eq!(redact_sensitive("token=abc&page=2"), "token=[REDACTED]&page=2");
/// ```
pub fn redact_sensitive(input: &str) -> String {
    let mut redacted = input.to_string();
    for pattern in redact_patterns().iter() {
        redacted = pattern
            .replace_all(&redacted, |captures: &regex::Captures| {
                let prefix = captures.get(1).map(|m| m.as_str()).unwrap_or("");
                format!("{prefix}{REDACTED}")
            })
            .to_string();
    }
    redacted
}

/// Returns `true` for header names that carry credentials.
pub fn is_sensitive_header(name: &str) -> bool {
    SENSITIVE_HEADER_NAMES
        .iter()
        .any(|candidate| candidate.eq_ignore_ascii_case(name))
        || name.to_ascii_lowercase().contains("token")
        || name.to_ascii_lowercase().contains("secret")
}

/// Value of header `name` safe for log output.
pub fn redact_header_value(name: &str, value: &str) -> String {
    if is_sensitive_header(name) && !value.is_empty() {
        REDACTED.to_string()
    } else {
        redact_sensitive(value)
    }
}

/// Case-insensitive prefix test used when offering completions.
pub fn starts_with_ignore_case(candidate: &str, prefix: &str) -> bool {
    candidate
        .get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

fn redact_patterns() -> &'static Vec<Regex> {
    static REDACT_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
        vec![
            Regex::new(r"(?i)(authorization:\s*)(\S+(?:\s+\S+)*)").unwrap(),
            Regex::new(r"(?i)(\bBearer\s+)([A-Za-z0-9\-._~+/]+=*)").unwrap(),
            Regex::new(r"(?i)(\bBasic\s+)([A-Za-z0-9+/]+=*)").unwrap(),
            Regex::new(r"(?i)(\b(?:api[_-]?key|token|secret|password)=)([^&\s]+)").unwrap(),
        ]
    });
    &REDACT_PATTERNS
}
