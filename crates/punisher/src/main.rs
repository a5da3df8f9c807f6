// SPDX-FileCopyrightText: 2026 Punisher Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Punisher - offline checker for the Punisher trader mod.
//!
//! Runs the same catalog build and validation as the server hooks against an
//! unpacked mod directory, without a running game server.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use punisher_assort::PresetTable;
use punisher_config::{render_errors, PunisherConfig};
use punisher_core::TraderRecord;
use punisher_plugin::{prepare_trader, PreparedTrader};

/// Punisher - offline checker for the Punisher trader mod.
#[derive(Parser, Debug)]
#[command(name = "punisher", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Build and validate the trader catalog, then print a summary.
    Check(ModArgs),
    /// Print the trader record the server would receive, as JSON.
    Dump(ModArgs),
    /// Print the effective configuration, defaults and overrides applied.
    Config(ModDir),
}

#[derive(Args, Debug)]
struct ModDir {
    /// Unpacked mod directory (holds `config.toml`, `db/` and `res/`).
    #[arg(long, default_value = ".")]
    mod_dir: PathBuf,
}

#[derive(Args, Debug)]
struct ModArgs {
    #[command(flatten)]
    dir: ModDir,
    /// The server's `globals.json`, for offers built from built-in presets.
    #[arg(long)]
    host_presets: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    let mod_dir = match &cli.command {
        Commands::Check(args) | Commands::Dump(args) => &args.dir.mod_dir,
        Commands::Config(dir) => &dir.mod_dir,
    };
    let config = match punisher_config::load_and_validate(mod_dir) {
        Ok(config) => config,
        Err(errors) => {
            render_errors(&errors);
            std::process::exit(1);
        }
    };
    init_tracing(&config.logging.level);

    match &cli.command {
        Commands::Check(args) => {
            let prepared = prepare_or_exit(args, &config);
            print_summary(&prepared);
        }
        Commands::Dump(args) => {
            let prepared = prepare_or_exit(args, &config);
            let record = TraderRecord::new(prepared.profile, prepared.catalog);
            match serde_json::to_string_pretty(&record) {
                Ok(json) => println!("{json}"),
                Err(err) => {
                    eprintln!("punisher: cannot serialize trader record: {err}");
                    std::process::exit(1);
                }
            }
        }
        Commands::Config(_) => match config.to_toml() {
            Ok(toml) => print!("{toml}"),
            Err(err) => {
                eprintln!("punisher: cannot serialize configuration: {err}");
                std::process::exit(1);
            }
        },
    }
}

/// Build the trader or print every problem and exit 1.
fn prepare_or_exit(args: &ModArgs, config: &PunisherConfig) -> PreparedTrader {
    let host_presets = match args.host_presets.as_deref() {
        Some(path) => load_host_presets(path),
        None => PresetTable::new(),
    };

    match prepare_trader(&args.dir.mod_dir, config, &host_presets) {
        Ok(prepared) => prepared,
        Err(err) => {
            if err.catalog_errors().is_empty() {
                render_errors(std::slice::from_ref(&err));
            } else {
                render_errors(err.catalog_errors());
            }
            std::process::exit(1);
        }
    }
}

fn load_host_presets(path: &Path) -> PresetTable {
    match PresetTable::load_file(path) {
        Ok(table) => {
            tracing::debug!(file = %path.display(), presets = table.len(), "loaded host presets");
            table
        }
        Err(err) => {
            eprintln!("punisher: {err}");
            std::process::exit(1);
        }
    }
}

fn print_summary(prepared: &PreparedTrader) {
    let report = &prepared.report;
    render_errors(&report.warnings);
    println!(
        "trader {} ({}): {} offers, {} items, {} warnings",
        prepared.profile.id,
        prepared.profile.nickname,
        report.top_level_items,
        report.total_items,
        report.warnings.len()
    );
    if !report.non_currency_payments.is_empty() {
        let payments: Vec<&str> = report
            .non_currency_payments
            .iter()
            .map(String::as_str)
            .collect();
        println!("non-currency payments: {}", payments.join(", "));
    }
    if !prepared.item_locales.is_empty() {
        println!("item locale entries: {}", prepared.item_locales.len());
    }
}

/// Initializes the tracing subscriber with the given log level.
///
/// Logs go to stderr so `dump` output stays machine-readable.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("punisher={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
