//! Writing launcher files and opening the output folder.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::Result;
use crate::launcher::LAUNCHER_FILE_EXT;

/// Result of a write attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    /// File written at the given path.
    Written(PathBuf),
    /// A launcher with this id already exists and `overwrite` was false.
    /// The file was left untouched; callers confirm with the user and retry
    /// with `overwrite` set.
    AlreadyExists(PathBuf),
}

/// Write a rendered launcher into `dir` as `<id>.toml`, creating the
/// directory tree as needed. Never overwrites silently.
pub fn write_launcher_file(
    dir: &Path,
    id: &str,
    contents: &str,
    overwrite: bool,
) -> Result<WriteOutcome> {
    fs::create_dir_all(dir)?;

    let path = dir.join(format!("{id}.{LAUNCHER_FILE_EXT}"));
    if path.exists() && !overwrite {
        return Ok(WriteOutcome::AlreadyExists(path));
    }

    fs::write(&path, contents)?;
    log::info!("wrote launcher to {}", path.display());
    Ok(WriteOutcome::Written(path))
}

/// Open `dir` in the platform file manager.
pub fn open_folder(dir: &Path) -> Result<()> {
    #[cfg(target_os = "windows")]
    let program = "explorer";
    #[cfg(target_os = "macos")]
    let program = "open";
    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    let program = "xdg-open";

    Command::new(program).arg(dir).spawn()?;
    Ok(())
}
