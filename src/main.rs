use clap::{Parser, ValueEnum};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use zaplauncher::launcher::{core_field_relevant, emulator_field_relevant};
use zaplauncher::{
    location, output, BuildError, LauncherKind, LauncherSpec, LocationMode, Result, Settings,
    WriteOutcome,
};

#[derive(Parser)]
#[command(name = "zaplauncher")]
#[command(about = "Generate custom launcher definitions for the Zaparoo frontend")]
struct Args {
    /// Launcher type
    #[arg(long, value_enum, default_value_t = KindArg::Emulator)]
    kind: KindArg,

    /// System name, e.g. "SNES"
    #[arg(long, default_value = "")]
    system: String,

    /// Directory containing the media files
    #[arg(long, default_value = "")]
    rom_dir: String,

    /// Comma-separated file extensions, e.g. "sfc,zip"
    #[arg(long, default_value = "")]
    extensions: String,

    /// Emulator executable (emulator launchers only)
    #[arg(long, default_value = "")]
    emulator: String,

    /// Core library to load (RetroArch launchers only)
    #[arg(long, default_value = "")]
    core: String,

    /// Write under this Zaparoo root instead of the default location,
    /// and remember it for next time
    #[arg(long)]
    zaparoo_root: Option<String>,

    /// Ignore any remembered Zaparoo root and use the default location
    #[arg(long)]
    default_location: bool,

    /// Overwrite an existing launcher without asking
    #[arg(short, long)]
    force: bool,

    /// Open the launchers folder instead of generating
    #[arg(long)]
    open_folder: bool,

    /// Print the generated launcher to stdout instead of writing it
    #[arg(long)]
    print: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum KindArg {
    Emulator,
    Direct,
}

impl From<KindArg> for LauncherKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Emulator => LauncherKind::Emulator,
            KindArg::Direct => LauncherKind::Direct,
        }
    }
}

fn main() {
    let args = Args::parse();

    let log_level = if args.debug {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    if let Err(e) = run(&args) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let mut settings = Settings::load();

    let (mode, custom_root) = if args.default_location {
        (LocationMode::Default, String::new())
    } else if let Some(root) = &args.zaparoo_root {
        settings.remember_custom_root(root);
        (LocationMode::Custom, root.clone())
    } else if let Some(root) = settings
        .custom_root
        .clone()
        .filter(|r| Path::new(r).exists())
    {
        log::debug!("using remembered Zaparoo root: {root}");
        (LocationMode::Custom, root)
    } else {
        (LocationMode::Default, String::new())
    };

    let app_data = app_data_dir()?;
    let launchers_dir = location::resolve_launchers_dir(mode, &app_data, &custom_root)?;

    if args.open_folder {
        if !launchers_dir.exists() {
            return Err(BuildError::Io(io::Error::new(
                io::ErrorKind::NotFound,
                format!(
                    "launchers folder does not exist: {}",
                    launchers_dir.display()
                ),
            )));
        }
        return output::open_folder(&launchers_dir);
    }

    let kind = LauncherKind::from(args.kind);
    if !emulator_field_relevant(kind) && !args.emulator.trim().is_empty() {
        log::warn!("--emulator is ignored for direct launchers");
    }
    if !core_field_relevant(kind, &args.emulator) && !args.core.trim().is_empty() {
        log::warn!("--core is ignored unless the emulator is RetroArch");
    }

    let spec = LauncherSpec {
        kind,
        system: args.system.clone(),
        rom_dir: args.rom_dir.clone(),
        extensions: args.extensions.clone(),
        emulator_path: args.emulator.clone(),
        core_path: args.core.clone(),
    };

    let rendered = spec.render()?;

    if args.print {
        print!("{}", rendered.toml);
        return Ok(());
    }

    match output::write_launcher_file(&launchers_dir, &rendered.id, &rendered.toml, args.force)? {
        WriteOutcome::Written(path) => {
            println!("Launcher saved to: {}", path.display());
        }
        WriteOutcome::AlreadyExists(path) => {
            if confirm_overwrite(&path) {
                match output::write_launcher_file(&launchers_dir, &rendered.id, &rendered.toml, true)?
                {
                    WriteOutcome::Written(path) => {
                        println!("Launcher saved to: {}", path.display())
                    }
                    WriteOutcome::AlreadyExists(_) => unreachable!("overwrite was confirmed"),
                }
            } else {
                println!("Left existing launcher untouched.");
            }
        }
    }

    Ok(())
}

fn app_data_dir() -> Result<PathBuf> {
    dirs::data_local_dir().ok_or_else(|| {
        BuildError::Io(io::Error::new(
            io::ErrorKind::NotFound,
            "no local app-data directory on this system",
        ))
    })
}

fn confirm_overwrite(path: &Path) -> bool {
    print!("{} already exists. Overwrite? [y/N] ", path.display());
    io::stdout().flush().ok();

    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line).is_err() {
        return false;
    }
    matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
