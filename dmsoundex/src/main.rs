//! Command-line Daitch-Mokotoff Soundex encoder
//!
//! Usage:
//!   dmsoundex Schwarzenegger Moskowitz
//!   dmsoundex --json --primary < names.txt
//!   dmsoundex --rules my_rules.txt --config dmsoundex.toml -v Peters
//!
//! With no names on the command line, names are read from stdin, one per
//! line. Output is `name<TAB>codes`, or one JSON object per line.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use dmsoundex::{DmSoundex, SoundexCodes, SoundexConfig};
use tracing::Level;

#[derive(Parser, Debug)]
#[command(name = "dmsoundex", version)]
#[command(about = "Encode personal names with the Daitch-Mokotoff Soundex")]
struct Args {
    /// Names to encode (reads stdin when omitted)
    names: Vec<String>,

    /// Rule file to use instead of the embedded rules
    #[arg(short, long)]
    rules: Option<PathBuf>,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print only the primary code
    #[arg(short, long)]
    primary: bool,

    /// Emit one JSON object per name
    #[arg(long)]
    json: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut config = match &args.config {
        Some(path) => SoundexConfig::load_toml(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => SoundexConfig::default(),
    };
    if let Some(rules) = args.rules {
        config.rules_file = Some(rules);
    }
    config.primary_only |= args.primary;

    let encoder = DmSoundex::builder()
        .from_config(&config)
        .build()
        .context("failed to load soundex rules")?;
    tracing::info!(
        source = encoder.rules().source_name(),
        rules = encoder.rules().len(),
        "rules loaded"
    );

    let output = Output {
        primary_only: config.primary_only,
        json: args.json,
    };
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if args.names.is_empty() {
        for line in io::stdin().lock().lines() {
            let line = line.context("failed to read stdin")?;
            let name = line.trim();
            if name.is_empty() {
                continue;
            }
            output.write(&mut out, name, &encoder)?;
        }
    } else {
        for name in &args.names {
            if name.trim().is_empty() {
                continue;
            }
            output.write(&mut out, name, &encoder)?;
        }
    }

    out.flush()?;
    Ok(())
}

struct Output {
    primary_only: bool,
    json: bool,
}

impl Output {
    fn write<W: Write>(&self, out: &mut W, name: &str, encoder: &DmSoundex) -> Result<()> {
        let mut codes = encoder.codes(name);
        if self.primary_only {
            codes = SoundexCodes::from_codes(codes.primary());
        }
        if self.json {
            let line = serde_json::json!({ "name": name, "codes": codes });
            writeln!(out, "{line}")?;
        } else {
            writeln!(out, "{name}\t{codes}")?;
        }
        Ok(())
    }
}
