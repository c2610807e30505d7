//! URL helpers shared by the commands that take an address argument.

use url::{ParseError, Url};

/// Parses an absolute URL as typed by the user.
///
/// Only absolute addresses are accepted; `localhost:5000` without a scheme is
/// rejected rather than guessed at.
pub fn parse_absolute_url(input: &str) -> Result<Url, ParseError> {
    let url = Url::parse(input.trim())?;
    if url.cannot_be_a_base() {
        return Err(ParseError::RelativeUrlWithCannotBeABaseBase);
    }
    Ok(url)
}

/// Returns `url` with a trailing `/` on its path so relative joins append
/// instead of replacing the last segment.
pub fn ensure_trailing_slash(url: &Url) -> Url {
    let mut url = url.clone();
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

/// Joins `relative` onto `base`, treating `base` as a directory.
///
/// A leading `/` on `relative` resolves against the host root, matching how
/// browsers resolve the same reference.
///
/// ```rust
/// use httpsh_util::url_processing::join_relative;
/// use url::Url;
///
/// let base = Url::parse("http://localhost:5000/v1").unwrap();
/// assert_eq!(join_relative(&base, "swagger.json").unwrap().as_str(), "http://localhost:5000/v1/swagger.json");
/// assert_eq!(join_relative(&base, "/openapi.json").unwrap().as_str(), "http://localhost:5000/openapi.json");
/// ```
pub fn join_relative(base: &Url, relative: &str) -> Result<Url, ParseError> {
    ensure_trailing_slash(base).join(relative)
}

/// Display form of a base address without the trailing `/` the URL parser
/// adds to bare hosts.
pub fn display_base(url: &Url) -> String {
    url.as_str().trim_end_matches('/').to_string()
}
