//! zaplauncher - custom launcher builder for the Zaparoo frontend
//!
//! Turns a handful of user inputs (launcher type, system name, ROM
//! directory, file extensions, emulator and core paths) into a
//! `[[launchers.custom]]` TOML definition and writes it into the Zaparoo
//! launchers folder. The core is pure; the binary in `main.rs` is a thin
//! CLI shell around it.

pub mod error;
pub mod launcher;
pub mod location;
pub mod output;
pub mod settings;
pub mod winpath;

pub use error::{BuildError, Result};
pub use launcher::{LauncherKind, LauncherSpec, RenderedLauncher};
pub use location::LocationMode;
pub use output::WriteOutcome;
pub use settings::Settings;
