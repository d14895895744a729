//! Resolving the launchers directory on the local machine.

use std::path::{Path, PathBuf};

use crate::error::{BuildError, Result};

/// Where generated launchers are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LocationMode {
    /// `<local app data>/zaparoo/launchers`.
    #[default]
    Default,
    /// Under a user-chosen Zaparoo root folder.
    Custom,
}

/// Resolve the launchers directory. `app_data_dir` is the platform's local
/// app-data directory, passed in by the caller so this stays free of
/// environment lookups.
///
/// For a custom root the rule follows the Zaparoo data layout: if the chosen
/// folder is already the `user` folder, launchers go directly beneath it,
/// otherwise a `user/launchers` subtree is appended. There is no validation
/// that the folder actually is a Zaparoo root; a wrong pick yields a wrong
/// (but well-formed) path.
pub fn resolve_launchers_dir(
    mode: LocationMode,
    app_data_dir: &Path,
    custom_root: &str,
) -> Result<PathBuf> {
    match mode {
        LocationMode::Default => Ok(app_data_dir.join("zaparoo").join("launchers")),
        LocationMode::Custom => {
            let root = custom_root.trim();
            if root.is_empty() {
                return Err(BuildError::InvalidLocation);
            }
            let root = Path::new(root.trim_end_matches(['/', '\\']));
            let last = root
                .file_name()
                .and_then(|s| s.to_str())
                .unwrap_or_default();
            if last.eq_ignore_ascii_case("user") {
                Ok(root.join("launchers"))
            } else {
                Ok(root.join("user").join("launchers"))
            }
        }
    }
}
