//! KedQR: PIN-protected QR codes for ed25519 extended secret keys
//!
//! Takes the bech32 output of `jcli key to-bytes` style tooling, seals the
//! raw key under a numeric PIN and renders the envelope as a QR code that
//! Catalyst Voting can import.
//!
//! # Usage
//!
//! ```bash
//! kedqr encode --input sk.txt --pin 1234              # QR code to the terminal
//! kedqr encode --input sk.txt --pin 1234 --output qr.svg
//! kedqr decode --hex 01a3...  --pin 1234              # back to ed25519e_sk1...
//! kedqr config --config kedqr.toml                    # validate and show config
//! ```

mod commands;
mod config;
mod pin;
mod pipeline;
mod render;

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;
use zeroize::Zeroizing;

use crate::config::KedqrConfig;
use crate::pin::Pin;

#[derive(Debug, Parser)]
#[command(name = "kedqr", version, about = "PIN-protected QR codes for ed25519 extended secret keys")]
struct Cli {
    /// Config file path (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Seal a bech32 secret key under a PIN and render it as a QR code
    Encode(EncodeArgs),
    /// Recover the bech32 secret key from a QR payload
    Decode(DecodeArgs),
    /// Validate the configuration and print it
    Config,
}

#[derive(Debug, Args)]
struct EncodeArgs {
    /// Path to file containing ed25519extended bech32 value
    #[arg(long)]
    input: PathBuf,

    /// Path to file to save qr code output (.svg for SVG), console output if not provided
    #[arg(long)]
    output: Option<PathBuf>,

    /// Pin code. 4-digit number is used on Catalyst
    #[arg(long)]
    pin: String,
}

#[derive(Debug, Args)]
struct DecodeArgs {
    /// Hex payload read from the QR code
    #[arg(long, conflicts_with = "input", required_unless_present = "input")]
    hex: Option<String>,

    /// Path to file containing the hex payload
    #[arg(long)]
    input: Option<PathBuf>,

    /// Pin code used when encoding
    #[arg(long)]
    pin: String,
}

fn main() {
    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = KedqrConfig::load(cli.config.as_deref()).with_context(|| match &cli.config {
        Some(path) => format!("Failed to load config from {}", path.display()),
        None => "Failed to load default config".to_string(),
    })?;

    init_logger(&config, cli.verbose);

    // Disable before any secret material is read
    kedqr_core::memory::disable_core_dumps();

    let mut stdout = std::io::stdout().lock();

    match cli.command {
        Command::Encode(args) => {
            let pin = parse_pin(args.pin, &config)?;
            commands::encode(
                &config,
                &args.input,
                &pin,
                args.output.as_deref(),
                &mut stdout,
            )
        }
        Command::Decode(args) => {
            let pin = parse_pin(args.pin, &config)?;
            let payload = match (args.hex, args.input) {
                (Some(hex), _) => hex,
                (None, Some(path)) => std::fs::read_to_string(&path)
                    .with_context(|| format!("Error reading file {}", path.display()))?,
                (None, None) => anyhow::bail!("either --hex or --input is required"),
            };
            commands::decode(&config, &payload, &pin, &mut stdout)
        }
        Command::Config => commands::show_config(&config, &mut stdout),
    }
}

fn parse_pin(raw: String, config: &KedqrConfig) -> Result<Pin> {
    let raw = Zeroizing::new(raw);
    Pin::parse(&raw, config.pin.length).context("pin")
}

fn init_logger(config: &KedqrConfig, verbose: u8) {
    let level = match verbose {
        0 => config.log.level.as_str(),
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}
