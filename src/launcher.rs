//! Launcher building - the mapping from user inputs to a Zaparoo launcher
//!
//! A [`LauncherSpec`] holds the raw form/CLI fields for one generation
//! request. From it we derive a stable identifier, a PowerShell execute
//! command with the `[[media_path]]` placeholder, and the final
//! `[[launchers.custom]]` TOML block the frontend consumes. Everything here
//! is pure; writing the file lives in [`crate::output`].

use crate::error::{BuildError, Result};
use crate::winpath;

/// Placeholder the frontend substitutes with the launched media file.
pub const MEDIA_PLACEHOLDER: &str = "[[media_path]]";

/// RetroArch's flag for loading a core library.
pub const RETROARCH_CORE_FLAG: &str = "-L";

/// File extension of generated launcher definitions.
pub const LAUNCHER_FILE_EXT: &str = "toml";

const POWERSHELL_PREAMBLE: &str =
    "powershell -WindowStyle Hidden -NoProfile -ExecutionPolicy Bypass -Command ";

/// How the generated launcher starts its media.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LauncherKind {
    /// Start an emulator executable with the media file as argument.
    #[default]
    Emulator,
    /// Open the media file itself (shortcuts, installed games, videos).
    Direct,
}

/// One generation request, constructed fresh from form/CLI state.
#[derive(Debug, Clone, Default)]
pub struct LauncherSpec {
    pub kind: LauncherKind,
    /// System name shown by the frontend, e.g. "SNES".
    pub system: String,
    /// Directory the frontend scans for media files.
    pub rom_dir: String,
    /// Comma-separated extension tokens, e.g. "sfc, zip".
    pub extensions: String,
    /// Emulator executable; only meaningful for [`LauncherKind::Emulator`].
    pub emulator_path: String,
    /// Core library; only meaningful for RetroArch-like emulators.
    pub core_path: String,
}

/// A rendered launcher ready to be written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedLauncher {
    pub id: String,
    pub toml: String,
}

/// Strip everything outside `[A-Za-z0-9]` and uppercase the rest.
pub fn sanitize_id(name: &str) -> String {
    name.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Lowercase an emulator name and drop a trailing `-qt`/`_qt` variant
/// suffix, then sanitize. `bsnes-qt` and `bsnes` yield the same id.
pub fn clean_emulator_name(name: &str) -> String {
    let lower = name.to_ascii_lowercase();
    let stripped = lower
        .strip_suffix("-qt")
        .or_else(|| lower.strip_suffix("_qt"))
        .unwrap_or(&lower);
    sanitize_id(stripped)
}

/// Whether the emulator path field applies to this launcher kind.
pub fn emulator_field_relevant(kind: LauncherKind) -> bool {
    kind == LauncherKind::Emulator
}

/// Whether the core path field applies. Shells re-evaluate this whenever
/// the kind or emulator path changes.
pub fn core_field_relevant(kind: LauncherKind, emulator_path: &str) -> bool {
    kind == LauncherKind::Emulator && is_retroarch_path(emulator_path)
}

fn is_retroarch_path(path: &str) -> bool {
    path.to_ascii_lowercase().contains("retroarch")
}

/// Escape free-form text for a TOML basic string. Paths and the execute
/// command are already escaped by [`winpath`]; this only guards the
/// user-entered system name.
fn escape_basic_string(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

impl LauncherSpec {
    /// Check the spec is complete for its kind. Must pass before any of the
    /// derivation methods are called.
    pub fn validate(&self) -> Result<()> {
        if self.system.trim().is_empty() {
            return Err(BuildError::MissingField("system"));
        }
        if self.rom_dir.trim().is_empty() {
            return Err(BuildError::MissingField("ROM directory"));
        }
        if self.extensions.trim().is_empty() {
            return Err(BuildError::MissingField("file extensions"));
        }
        if self.kind == LauncherKind::Emulator {
            if self.emulator_path.trim().is_empty() {
                return Err(BuildError::MissingEmulator);
            }
            if self.is_retroarch() && self.core_path.trim().is_empty() {
                return Err(BuildError::MissingCore);
            }
        }
        Ok(())
    }

    /// True when the chosen emulator is RetroArch (or a build of it).
    pub fn is_retroarch(&self) -> bool {
        is_retroarch_path(&self.emulator_path)
    }

    /// Stable uppercase alphanumeric identifier, also the output file stem.
    pub fn identifier(&self) -> String {
        match self.kind {
            LauncherKind::Direct => sanitize_id(self.system.trim()) + "DIRECT",
            LauncherKind::Emulator => {
                let emu = clean_emulator_name(winpath::file_stem(self.emulator_path.trim()));
                emu + &sanitize_id(self.system.trim())
            }
        }
    }

    /// PowerShell command the frontend runs, with [`MEDIA_PLACEHOLDER`]
    /// standing in for the media file. The string is later embedded in a
    /// TOML basic string, so paths carry doubled backslashes and the quotes
    /// around the placeholder are written as `\"`.
    pub fn execute_command(&self) -> String {
        match self.kind {
            LauncherKind::Direct => {
                format!("{POWERSHELL_PREAMBLE}Start-Process -FilePath '{MEDIA_PLACEHOLDER}'")
            }
            LauncherKind::Emulator => {
                let emu = winpath::escape(self.emulator_path.trim());
                if self.is_retroarch() {
                    let core = winpath::escape(self.core_path.trim());
                    format!(
                        "{POWERSHELL_PREAMBLE}Start-Process -FilePath '{emu}' \
                         -ArgumentList '{RETROARCH_CORE_FLAG}', '{core}', '\\\"{MEDIA_PLACEHOLDER}\\\"'"
                    )
                } else {
                    format!(
                        "{POWERSHELL_PREAMBLE}Start-Process -FilePath '{emu}' \
                         -ArgumentList '\\\"{MEDIA_PLACEHOLDER}\\\"'"
                    )
                }
            }
        }
    }

    /// Extension tokens normalized to leading-dot form. Empty tokens from
    /// stray commas are dropped; a token that already starts with a dot is
    /// left unchanged.
    pub fn normalized_extensions(&self) -> Vec<String> {
        self.extensions
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(|t| {
                if t.starts_with('.') {
                    t.to_string()
                } else {
                    format!(".{t}")
                }
            })
            .collect()
    }

    /// Validate and render the full launcher definition. Byte-stable:
    /// identical specs always produce identical output.
    pub fn render(&self) -> Result<RenderedLauncher> {
        self.validate()?;

        let id = self.identifier();
        let system = escape_basic_string(self.system.trim());
        let rom = winpath::escape(self.rom_dir.trim());
        let exts = self
            .normalized_extensions()
            .iter()
            .map(|e| format!("\"{e}\""))
            .collect::<Vec<_>>()
            .join(",");
        let execute = self.execute_command();

        let toml = format!(
            "[[launchers.custom]]\n\
             id = \"{id}\"\n\
             system = \"{system}\"\n\
             media_dirs = [\"{rom}\"]\n\
             file_exts = [{exts}]\n\
             execute = \"{execute}\"\n"
        );

        log::debug!("rendered launcher {id} ({} bytes)", toml.len());
        Ok(RenderedLauncher { id, toml })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn direct_snes() -> LauncherSpec {
        LauncherSpec {
            kind: LauncherKind::Direct,
            system: "SNES".into(),
            rom_dir: "C:\\Roms\\SNES".into(),
            extensions: "sfc, zip".into(),
            ..Default::default()
        }
    }

    fn retroarch_snes() -> LauncherSpec {
        LauncherSpec {
            kind: LauncherKind::Emulator,
            system: "SNES".into(),
            rom_dir: "C:\\Roms\\SNES".into(),
            extensions: "sfc,zip".into(),
            emulator_path: "C:\\RetroArch\\retroarch.exe".into(),
            core_path: "C:\\RetroArch\\cores\\snes9x_libretro.dll".into(),
        }
    }

    #[test]
    fn sanitize_strips_and_uppercases() {
        assert_eq!(sanitize_id("Sega Mega-Drive!"), "SEGAMEGADRIVE");
    }

    #[test]
    fn sanitize_is_idempotent_and_alnum_only() {
        for input in ["SNES", "pc engine", "N64 (PAL)", "", "日本 64"] {
            let once = sanitize_id(input);
            assert_eq!(sanitize_id(&once), once);
            assert!(once.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
        }
    }

    #[test]
    fn clean_emulator_name_strips_qt_suffix() {
        assert_eq!(clean_emulator_name("bsnes-qt"), "BSNES");
        assert_eq!(clean_emulator_name("mesen_qt"), "MESEN");
        assert_eq!(clean_emulator_name("snes9x"), "SNES9X");
    }

    #[test]
    fn direct_identifier_ends_with_direct() {
        assert_eq!(direct_snes().identifier(), "SNESDIRECT");
        let mut spec = direct_snes();
        spec.system = "PC Engine".into();
        assert!(spec.identifier().ends_with("DIRECT"));
    }

    #[test]
    fn emulator_identifier_combines_emulator_and_system() {
        assert_eq!(retroarch_snes().identifier(), "RETROARCHSNES");
    }

    #[test]
    fn direct_ignores_emulator_fields() {
        let mut spec = direct_snes();
        spec.emulator_path = "C:\\Emus\\retroarch.exe".into();
        spec.core_path = "C:\\cores\\snes9x.dll".into();
        let rendered = spec.render().unwrap();
        assert_eq!(rendered.id, "SNESDIRECT");
        assert!(!rendered.toml.contains("retroarch"));
        assert!(spec
            .execute_command()
            .contains("-FilePath '[[media_path]]'"));
    }

    #[test]
    fn extension_normalization_adds_exactly_one_dot() {
        let mut spec = direct_snes();
        spec.extensions = "sfc, .zip,smc".into();
        assert_eq!(spec.normalized_extensions(), vec![".sfc", ".zip", ".smc"]);
    }

    #[test]
    fn extension_normalization_drops_empty_tokens() {
        let mut spec = direct_snes();
        spec.extensions = "sfc,,zip,".into();
        assert_eq!(spec.normalized_extensions(), vec![".sfc", ".zip"]);
    }

    #[test]
    fn direct_snes_block_contents() {
        let rendered = direct_snes().render().unwrap();
        assert_eq!(rendered.id, "SNESDIRECT");
        assert!(rendered.toml.contains("media_dirs = [\"C:\\\\Roms\\\\SNES\"]"));
        assert!(rendered.toml.contains("file_exts = [\".sfc\",\".zip\"]"));
        assert!(rendered.toml.starts_with("[[launchers.custom]]\n"));
        assert!(rendered.toml.ends_with("\n"));
    }

    #[test]
    fn retroarch_execute_orders_core_before_placeholder() {
        let execute = retroarch_snes().execute_command();
        let flag = execute.find("'-L'").expect("core flag present");
        let core = execute.find("snes9x_libretro").expect("core path present");
        let media = execute.find(MEDIA_PLACEHOLDER).expect("placeholder present");
        assert!(flag < core && core < media);
    }

    #[test]
    fn non_retroarch_execute_has_no_core_flag() {
        let mut spec = retroarch_snes();
        spec.emulator_path = "C:\\Emus\\bsnes.exe".into();
        spec.core_path = String::new();
        let execute = spec.execute_command();
        assert!(!execute.contains("'-L'"));
        assert!(execute.contains("bsnes.exe"));
        assert!(execute.contains(MEDIA_PLACEHOLDER));
    }

    #[test]
    fn rendered_block_parses_as_toml_and_round_trips_paths() {
        let rendered = retroarch_snes().render().unwrap();
        let value: toml::Value = rendered.toml.parse().unwrap();
        let entry = &value["launchers"]["custom"][0];

        assert_eq!(entry["id"].as_str(), Some("RETROARCHSNES"));
        assert_eq!(entry["system"].as_str(), Some("SNES"));
        assert_eq!(
            entry["media_dirs"][0].as_str(),
            Some("C:\\Roms\\SNES"),
            "TOML decoding must recover the single-backslash path"
        );

        // The -FilePath argument decodes back to the original emulator path.
        let execute = entry["execute"].as_str().unwrap();
        let start = execute.find("-FilePath '").unwrap() + "-FilePath '".len();
        let end = execute[start..].find('\'').unwrap() + start;
        assert_eq!(&execute[start..end], "C:\\RetroArch\\retroarch.exe");
    }

    #[test]
    fn quoted_system_name_renders_valid_toml() {
        let mut spec = direct_snes();
        spec.system = "Sega \"32X\"".into();
        let rendered = spec.render().unwrap();
        let value: toml::Value = rendered.toml.parse().unwrap();
        let entry = &value["launchers"]["custom"][0];
        assert_eq!(entry["system"].as_str(), Some("Sega \"32X\""));
        assert_eq!(entry["id"].as_str(), Some("SEGA32XDIRECT"));
    }

    #[test]
    fn render_is_byte_stable() {
        let spec = retroarch_snes();
        assert_eq!(spec.render().unwrap(), spec.render().unwrap());
    }

    #[test]
    fn validate_rejects_blank_required_fields() {
        let mut spec = direct_snes();
        spec.rom_dir = "  ".into();
        assert!(matches!(
            spec.validate(),
            Err(BuildError::MissingField("ROM directory"))
        ));

        let mut spec = direct_snes();
        spec.system = String::new();
        assert!(matches!(spec.validate(), Err(BuildError::MissingField("system"))));

        let mut spec = direct_snes();
        spec.extensions = String::new();
        assert!(matches!(
            spec.validate(),
            Err(BuildError::MissingField("file extensions"))
        ));
    }

    #[test]
    fn validate_requires_emulator_and_core() {
        let mut spec = retroarch_snes();
        spec.emulator_path = String::new();
        assert!(matches!(spec.validate(), Err(BuildError::MissingEmulator)));

        let mut spec = retroarch_snes();
        spec.core_path = String::new();
        assert!(matches!(spec.validate(), Err(BuildError::MissingCore)));

        // A non-RetroArch emulator does not need a core.
        let mut spec = retroarch_snes();
        spec.emulator_path = "C:\\Emus\\bsnes.exe".into();
        spec.core_path = String::new();
        assert!(spec.validate().is_ok());
    }

    #[test]
    fn field_relevance_follows_kind_and_emulator() {
        assert!(!emulator_field_relevant(LauncherKind::Direct));
        assert!(emulator_field_relevant(LauncherKind::Emulator));
        assert!(!core_field_relevant(LauncherKind::Direct, "retroarch.exe"));
        assert!(!core_field_relevant(LauncherKind::Emulator, "bsnes.exe"));
        assert!(core_field_relevant(
            LauncherKind::Emulator,
            "C:\\RetroArch\\RetroArch.exe"
        ));
    }
}
