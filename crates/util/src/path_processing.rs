use std::path::PathBuf;

use dirs_next::home_dir;

/// Expands a leading `~` to the user's home directory.
pub fn expand_tilde(path: &str) -> PathBuf {
    let p = path.trim();
    if p == "~" {
        return home_dir().unwrap_or_else(|| PathBuf::from("~"));
    }
    if let Some(rest) = p.strip_prefix("~/") {
        return home_dir().unwrap_or_else(|| PathBuf::from("~")).join(rest);
    }
    if let Some(rest) = p.strip_prefix("~\\") {
        // Windows-style
        return home_dir().unwrap_or_else(|| PathBuf::from("~")).join(rest);
    }
    PathBuf::from(p)
}

/// Resolves the location of an httpsh configuration file.
///
/// A non-empty `env_var` wins (tilde-expanded); otherwise the file lives under
/// the platform config directory in `httpsh/`.
pub fn config_file_path(env_var: &str, file_name: &str) -> PathBuf {
    if let Ok(path) = std::env::var(env_var)
        && !path.trim().is_empty()
    {
        return expand_tilde(&path);
    }
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("httpsh")
        .join(file_name)
}
