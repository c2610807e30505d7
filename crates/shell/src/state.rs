use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use httpsh_api::DocumentFetcher;
use httpsh_directory::{Directory, DirectoryStructure, build_directory_structure};
use httpsh_openapi::{MetadataReaders, parse_document};
use httpsh_repl::{CancellationToken, TelemetrySink};
use httpsh_util::display_base;
use tracing::debug;
use url::Url;

use crate::config::ShellConfig;
use crate::headers::RequestHeaders;

/// Program state shared by every httpsh command.
pub struct HttpState {
    base_address: Option<Url>,
    swagger_address: Option<Url>,
    /// `None` until an API description has been loaded.
    structure: Option<DirectoryStructure>,
    /// Current location, relative to the base address.
    path_sections: Vec<String>,
    pub headers: RequestHeaders,
    fetcher: Arc<dyn DocumentFetcher>,
    telemetry: Arc<dyn TelemetrySink>,
    readers: MetadataReaders,
    config: ShellConfig,
}

impl HttpState {
    pub fn new(config: ShellConfig, fetcher: Arc<dyn DocumentFetcher>, telemetry: Arc<dyn TelemetrySink>) -> Self {
        Self {
            base_address: None,
            swagger_address: None,
            structure: None,
            path_sections: Vec::new(),
            headers: RequestHeaders::default(),
            fetcher,
            telemetry,
            readers: MetadataReaders::default(),
            config,
        }
    }

    pub fn config(&self) -> &ShellConfig {
        &self.config
    }

    pub fn telemetry(&self) -> &dyn TelemetrySink {
        self.telemetry.as_ref()
    }

    pub fn base_address(&self) -> Option<&Url> {
        self.base_address.as_ref()
    }

    /// Points the session at `base_address`, returning to its root and
    /// forgetting any loaded API description.
    pub fn set_base_address(&mut self, base_address: Option<Url>) {
        self.base_address = base_address;
        self.path_sections.clear();
        self.clear_structure();
    }

    pub fn swagger_address(&self) -> Option<&Url> {
        self.swagger_address.as_ref()
    }

    pub fn structure(&self) -> Option<&DirectoryStructure> {
        self.structure.as_ref()
    }

    /// Installs a fully built tree read from `swagger_address`.
    pub fn install_structure(&mut self, structure: DirectoryStructure, swagger_address: Url) {
        self.structure = Some(structure);
        self.swagger_address = Some(swagger_address);
    }

    pub fn clear_structure(&mut self) {
        self.structure = None;
        self.swagger_address = None;
    }

    pub fn path_sections(&self) -> &[String] {
        &self.path_sections
    }

    /// Current location as an absolute path (`/` at the root).
    pub fn current_path(&self) -> String {
        format_path(&self.path_sections)
    }

    /// Sections reached by applying `path` to the current location.
    ///
    /// A leading `/` starts from the root, `..` pops (and stops at the root),
    /// `.` and empty segments are skipped.
    pub fn resolve_path_sections(&self, path: &str) -> Vec<String> {
        let mut sections = if path.starts_with('/') {
            Vec::new()
        } else {
            self.path_sections.clone()
        };
        for segment in path.split('/') {
            match segment {
                "" | "." => {}
                ".." => {
                    sections.pop();
                }
                name => sections.push(name.to_string()),
            }
        }
        sections
    }

    /// Moves to `path` whether or not the tree knows it; known segments take
    /// the tree's spelling. Returns the directory when it exists.
    pub fn change_directory(&mut self, path: &str) -> Option<Directory<'_>> {
        let sections = self.resolve_path_sections(path);
        let canonical = self
            .directory_at(&sections)
            .map(|directory| directory_sections(&directory));
        self.path_sections = canonical.unwrap_or(sections);
        self.current_directory()
    }

    pub fn directory_at(&self, sections: &[String]) -> Option<Directory<'_>> {
        self.structure
            .as_ref()?
            .root()
            .traverse(sections.iter().map(String::as_str))
    }

    pub fn current_directory(&self) -> Option<Directory<'_>> {
        self.directory_at(&self.path_sections)
    }

    /// Prompt text: `<base><path>~ `, or `(Disconnected)~ ` without a base.
    pub fn prompt(&self) -> String {
        match &self.base_address {
            Some(base) => format!("{}{}~ ", display_base(base), self.current_path()),
            None => "(Disconnected)~ ".to_string(),
        }
    }

    pub async fn fetch_document(&self, url: &Url, cancellation: &CancellationToken) -> Result<String> {
        Ok(self.fetcher.fetch(url, cancellation).await?)
    }

    /// Fetches and reads the API description at `url` into a new tree.
    ///
    /// Nothing is installed; the caller decides whether to replace the
    /// current tree. `Ok(None)` means the document was fetched and parsed but
    /// no reader recognised it.
    pub async fn load_structure(&self, url: &Url, cancellation: &CancellationToken) -> Result<Option<DirectoryStructure>> {
        let text = self.fetch_document(url, cancellation).await?;
        let document = parse_document(&text).with_context(|| format!("could not read the API description at {url}"))?;

        let Some(metadata) = self.readers.read(&document) else {
            debug!(%url, "document is not a supported API description");
            return Ok(None);
        };
        Ok(Some(build_directory_structure(&metadata)))
    }

    /// Resolves a user-supplied address against the base address when it is
    /// not absolute.
    pub fn resolve_address(&self, address: &str) -> Result<Url> {
        if let Ok(url) = httpsh_util::parse_absolute_url(address) {
            return Ok(url);
        }
        let base = self
            .base_address
            .as_ref()
            .ok_or_else(|| anyhow!("'{address}' is not an absolute URL and no base address is set"))?;
        httpsh_util::join_relative(base, address).with_context(|| format!("'{address}' is not a valid address"))
    }
}

fn directory_sections(directory: &Directory<'_>) -> Vec<String> {
    let mut sections = Vec::new();
    let mut current = Some(*directory);
    while let Some(node) = current {
        if !node.is_root() {
            sections.push(node.name().to_string());
        }
        current = node.parent();
    }
    sections.reverse();
    sections
}

/// `/`-joined absolute path for `sections`.
pub fn format_path(sections: &[String]) -> String {
    format!("/{}", sections.join("/"))
}

impl std::fmt::Debug for HttpState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpState")
            .field("base_address", &self.base_address)
            .field("swagger_address", &self.swagger_address)
            .field("path_sections", &self.path_sections)
            .field("headers", &self.headers)
            .field("has_structure", &self.structure.is_some())
            .finish()
    }
}
