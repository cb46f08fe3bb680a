//! Small command-line front end for exercising `rxscan` against a file or
//! stdin. Not part of the library's public API — styled after the
//! teacher's own `main.rs` (clap-derive `Cli`, `anyhow` for top-level
//! error plumbing, `eprintln!` diagnostics gated on `--verbose`).

use anyhow::{Context, Result};
use clap::Parser;
use rxscan::config::ScanConfig;
use rxscan::{scan_str_with_callouts, ScanOutcome, SourceAdapter};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

/// Scan a file or stdin line by line with a regex pattern, printing each
/// captured group (or the whole match, if the pattern has none).
#[derive(Parser, Debug)]
#[command(name = "rxscan", version, about)]
struct Cli {
    /// The pattern to scan with, applied repeatedly until the input is
    /// exhausted.
    pattern: String,

    /// File to read from; omit to read from stdin.
    #[arg(long)]
    input: Option<PathBuf>,

    /// Path to a YAML config file overriding the default scan settings.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print one diagnostic line per match to stderr.
    #[arg(short, long)]
    verbose: bool,

    /// Compile the pattern ad hoc (JIT preference disabled, not reused
    /// across invocations) instead of through the config-aware path.
    #[arg(long)]
    ad_hoc: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let matched = match &cli.input {
        Some(path) => {
            let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
            dispatch(BufReader::new(file), &cli)?
        }
        None => dispatch(BufReader::new(io::stdin()), &cli)?,
    };

    if cli.verbose {
        eprintln!("rxscan: {} match(es)", matched);
    }

    std::process::exit(if matched > 0 { 0 } else { 1 });
}

fn dispatch<R: io::BufRead>(reader: R, cli: &Cli) -> Result<usize> {
    if cli.ad_hoc {
        return run_ad_hoc(reader, &cli.pattern, cli.verbose);
    }
    let config = match &cli.config {
        Some(path) => ScanConfig::load(path).map_err(|e| anyhow::anyhow!("{}", e))?,
        None => ScanConfig::default(),
    };
    run(reader, &cli.pattern, &config, cli.verbose)
}

fn run<R: io::BufRead>(reader: R, pattern: &str, config: &ScanConfig, verbose: bool) -> Result<usize> {
    let mut adapter = SourceAdapter::new(reader);
    let mut count = 0usize;
    let outcome = rxscan::scan_with_callouts_config(
        &mut adapter,
        &rxscan::Pattern::<rxscan::RegexEngine>::compile_with(
            pattern,
            rxscan::pattern::PatternOptions::default(),
        )
        .map_err(|e| anyhow::anyhow!("{}", e))?,
        &mut |record| {
            count += 1;
            let text = String::from_utf8_lossy(&record.bytes);
            println!("{}", text);
            if verbose {
                eprintln!("rxscan: match #{}: {} byte(s)", count, record.bytes.len());
            }
            true
        },
        config,
    );

    match outcome {
        ScanOutcome::Matched(_) | ScanOutcome::NoMatch => Ok(count),
        ScanOutcome::MatchedWithConversionError { .. } => Ok(count),
        ScanOutcome::Aborted => Ok(count),
        ScanOutcome::Error(e) => Err(anyhow::anyhow!("{}", e)),
    }
}

/// `--ad-hoc` path: compiles `pattern` once per invocation through
/// `scan_str_with_callouts` instead of the config-aware `Pattern::compile_with`
/// in `run` — no reuse across invocations, JIT preference always disabled.
fn run_ad_hoc<R: io::BufRead>(reader: R, pattern: &str, verbose: bool) -> Result<usize> {
    let mut adapter = SourceAdapter::new(reader);
    let mut count = 0usize;
    let outcome = scan_str_with_callouts(&mut adapter, pattern, |record| {
        count += 1;
        let text = String::from_utf8_lossy(&record.bytes);
        println!("{}", text);
        if verbose {
            eprintln!("rxscan: match #{}: {} byte(s)", count, record.bytes.len());
        }
        true
    });
    match outcome {
        ScanOutcome::Error(e) => Err(anyhow::anyhow!("{}", e)),
        _ => Ok(count),
    }
}
