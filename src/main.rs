//! Build Summary - Main entry point
//!
//! Reads the build configuration and prints the summary report to stdout.
//! Logs go to stderr so the report stays clean.

use std::io::{self, Write};

use anyhow::{Context, Result};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use build_summary::cli::Cli;
use build_summary::config_file::{self, GeneralConfig, MachineConfig};
use build_summary::report;

/// Initialize the logger with appropriate settings
fn init_logger(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };

    // RUST_LOG overrides the default level
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse_args();
    init_logger(cli.verbose);
    debug!("CLI arguments parsed: {:?}", cli);

    if let Err(e) = run(&cli) {
        eprintln!("✗ {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let path = match &cli.config {
        Some(path) => path.clone(),
        None => config_file::default_config_path()
            .context("Failed to locate the default build configuration")?,
    };
    info!("Reading build configuration from {}", path.display());

    let doc = config_file::load_config(&path)?;
    let general = config_file::extract_general(&doc);
    let machines = config_file::extract_machines(&doc);
    debug!(
        "Found general record: {}, machines: {}",
        general.is_some(),
        machines.len()
    );

    if cli.warn_missing {
        warn_missing_fields(general.as_ref(), &machines);
    }

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    report::render(general.as_ref(), &machines, &mut out).context("Failed to write report")?;
    out.flush().context("Failed to write report")?;

    Ok(())
}

fn warn_missing_fields(general: Option<&GeneralConfig>, machines: &[MachineConfig]) {
    match general {
        Some(general) => {
            for key in general.missing_fields() {
                warn!("general record is missing '{}'", key);
            }
        }
        None => warn!("no general record found"),
    }

    for (index, machine) in machines.iter().enumerate() {
        let label = machine
            .name
            .as_ref()
            .map(|name| name.to_string())
            .unwrap_or_else(|| format!("#{}", index + 1));
        for key in machine.missing_fields() {
            warn!("machine {} is missing '{}'", label, key);
        }
    }
}
