//! Path helpers for user-supplied database locations.

use std::path::PathBuf;

/// `~/x` → `$HOME/x`; anything else is returned unchanged.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    PathBuf::from(path)
}

/// Database path as given on the command line or in the config file.
pub fn resolve_db_path(path: &str) -> String {
    expand_tilde(path.trim()).to_string_lossy().to_string()
}
