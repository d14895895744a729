use thiserror::Error;

/// Errors surfaced to the user while building or saving a launcher.
#[derive(Error, Debug)]
pub enum BuildError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    #[error("an emulator executable is required for emulator launchers")]
    MissingEmulator,
    #[error("a RetroArch core is required when the emulator is RetroArch")]
    MissingCore,
    #[error("no custom Zaparoo folder selected")]
    InvalidLocation,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BuildError>;
