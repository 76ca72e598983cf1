// SPDX-License-Identifier: MIT
//
// tint: dynamic brand-color theming from the command line.
//
// Wires the two library crates together:
//
//   tint-color → hex / sRGB / HSL conversions, WCAG contrast
//   tint-theme → seed resolution, scheme providers, token publication,
//                seed and mode persistence
//
// Every subcommand builds one ThemeController from the config file plus
// command-line overrides, runs a single operation, and writes its result:
//
//   apply     resolve + publish → style sheet (stdout or --output)
//   set-seed  persist seed + publish → style sheet
//   get-seed  persisted seed, if any
//   mode      show / set / toggle the persisted theme mode
//   show      resolve only → role table with contrast ratios, or JSON
//
// Logs go to stderr so the style sheet on stdout stays clean.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use tint_color::{Rgb, contrast_ratio};
use tint_theme::store::{FileStore, MemoryStore, ThemeStore};
use tint_theme::{
    EngineSelection, ProviderChain, Resolution, Role, ThemeConfig, ThemeController, ThemeMode,
};

// ─── Command line ───────────────────────────────────────────────────────────

#[derive(Debug, Parser)]
#[command(name = "tint", version, about = "Dynamic brand-color theming", long_about = None)]
struct Cli {
    /// Config file (default: <config dir>/tint/config.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Scheme engine: `auto` tries compiled-in engines first
    #[arg(long, global = true)]
    engine: Option<EngineSelection>,

    /// State file holding the seed and mode
    #[arg(long, global = true, conflicts_with = "ephemeral")]
    store: Option<PathBuf>,

    /// Keep state in memory only; nothing is read or written on disk
    #[arg(long, global = true)]
    ephemeral: bool,

    /// Write the style sheet here instead of stdout
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// Debug logging on stderr (RUST_LOG is honoured otherwise)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Resolve a scheme and publish its style sheet
    Apply {
        /// Seed color for this run only
        #[arg(long)]
        seed: Option<String>,
    },
    /// Persist a new seed color and publish its style sheet
    SetSeed {
        /// Hex color, e.g. `#3FBCA5`
        seed: String,
    },
    /// Print the persisted seed color
    GetSeed,
    /// Show or change the theme mode
    Mode {
        action: Option<ModeAction>,
    },
    /// Print the resolved scheme without publishing it
    Show {
        #[arg(long)]
        seed: Option<String>,
        /// Machine-readable output
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ModeAction {
    Light,
    Dark,
    Toggle,
}

// ─── Setup ──────────────────────────────────────────────────────────────────

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    // A subscriber may already be installed (tests); keep it.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

/// Config file merged with command-line overrides.
fn load_config(cli: &Cli) -> Result<ThemeConfig> {
    let mut config = match &cli.config {
        Some(path) => ThemeConfig::load(path)?,
        None => ThemeConfig::load_default()?,
    };
    if let Some(engine) = cli.engine {
        config.engine = engine;
    }
    if let Some(store) = &cli.store {
        config.store_path = Some(store.clone());
    }
    if let Some(output) = &cli.output {
        config.output = Some(output.clone());
    }
    Ok(config)
}

fn build_controller(cli: &Cli, config: ThemeConfig) -> ThemeController {
    let store: Box<dyn ThemeStore> = if cli.ephemeral {
        Box::new(MemoryStore::new())
    } else {
        Box::new(FileStore::new(config.store_path()))
    };
    let providers = ProviderChain::detect(config.engine);
    ThemeController::new(config, store, providers)
}

// ─── Commands ───────────────────────────────────────────────────────────────

fn run(cli: &Cli, out: &mut impl Write) -> Result<()> {
    let config = load_config(cli)?;
    let mut ctl = build_controller(cli, config);

    match &cli.command {
        Command::Apply { seed } => {
            ctl.init_mode();
            ctl.apply_dynamic_color(seed.as_deref());
            emit_css(&ctl, out)?;
        }
        Command::SetSeed { seed } => {
            ctl.init_mode();
            ctl.set_theme_seed(seed);
            emit_css(&ctl, out)?;
        }
        Command::GetSeed => {
            if let Some(seed) = ctl.get_seed() {
                writeln!(out, "{seed}")?;
            }
        }
        Command::Mode { action } => {
            let mode = match action {
                None => ctl.init_mode(),
                Some(ModeAction::Toggle) => {
                    ctl.init_mode();
                    ctl.toggle_mode()
                }
                Some(ModeAction::Light) => set_mode(&mut ctl, ThemeMode::Light),
                Some(ModeAction::Dark) => set_mode(&mut ctl, ThemeMode::Dark),
            };
            writeln!(out, "{mode}")?;
        }
        Command::Show { seed, json } => {
            let resolution = ctl.resolve_scheme(seed.as_deref());
            if *json {
                let value = serde_json::json!({
                    "seed": resolution.seed.as_str(),
                    "provider": resolution.provider,
                    "scheme": resolution.scheme,
                });
                serde_json::to_writer_pretty(&mut *out, &value)?;
                writeln!(out)?;
            } else {
                write_table(&resolution, out)?;
            }
        }
    }
    Ok(())
}

fn set_mode(ctl: &mut ThemeController, mode: ThemeMode) -> ThemeMode {
    ctl.set_mode(mode);
    mode
}

/// Write the published style sheet to the configured output, or `out`.
fn emit_css(ctl: &ThemeController, out: &mut impl Write) -> Result<()> {
    let css = ctl.document().to_css();
    match &ctl.config().output {
        Some(path) => write_file(path, &css),
        None => Ok(out.write_all(css.as_bytes())?),
    }
}

fn write_file(path: &Path, css: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(path, css).with_context(|| format!("failed to write {}", path.display()))?;
    info!(path = %path.display(), "wrote style sheet");
    Ok(())
}

/// One row per role and mode: color, on-color and their contrast ratio.
fn write_table(resolution: &Resolution, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "seed      {}", resolution.seed)?;
    writeln!(out, "provider  {}", resolution.provider)?;
    for mode in [ThemeMode::Light, ThemeMode::Dark] {
        writeln!(out)?;
        writeln!(out, "{mode}")?;
        for role in Role::ALL {
            let pair = resolution.scheme.roles(mode).get(role);
            let ratio = contrast_ratio(Rgb::from_hex(&pair.color), Rgb::from_hex(&pair.on_color));
            writeln!(
                out,
                "  {:<10}{:<8} on {:<8} {ratio:.2}:1",
                role.key(),
                pair.color,
                pair.on_color
            )?;
        }
    }
    Ok(())
}

// ─── Entry point ────────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let stdout = io::stdout();
    if let Err(e) = run(&cli, &mut stdout.lock()) {
        eprintln!("tint: {e:#}");
        process::exit(1);
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
