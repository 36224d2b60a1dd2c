//! Default CLI flow: merge parameters, run one simulation, report.

use std::path::Path;

use anyhow::{bail, Context, Result};
use colored::Colorize;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::{json, Value};

use crate::cli::PulselinkCli;
use crate::config::{self, FileParams};
use crate::core::simulator::{self, SimulationResult};
use crate::io;

/// Built-in presentation defaults, applied only after explicit flags and the
/// parameter file. Physical parameters reaching the validator are therefore
/// always deliberate.
mod defaults {
    pub const MU1: f64 = 0.1;
    pub const MU2: f64 = 0.05;
    pub const P1: f64 = 0.8;
    pub const DARK_COUNT: f64 = 100.0;
    pub const TIME_BIN_PS: f64 = 100.0;
    pub const LOSS_DB_PER_KM: f64 = 0.2;
    pub const LENGTH_KM: f64 = 10.0;
    pub const SYNC_ERROR: f64 = 0.1;
    pub const BLOCK_SIZE: u64 = 1000;
    pub const MAX_OFFSET: u64 = 50;
}

/// Assemble the request tree from flag > file > default, in that order.
/// The CLI's per-km loss and length collapse into the schema's single total
/// `channel.loss`.
fn build_request(args: &PulselinkCli, file: &FileParams) -> Value {
    let loss_per_km = args
        .loss
        .or(file.channel.loss)
        .unwrap_or(defaults::LOSS_DB_PER_KM);
    let length_km = args
        .length
        .or(file.channel.length)
        .unwrap_or(defaults::LENGTH_KM);

    json!({
        "alice": {
            "mu1": args.mu1.or(file.alice.mu1).unwrap_or(defaults::MU1),
            "mu2": args.mu2.or(file.alice.mu2).unwrap_or(defaults::MU2),
            "p1": args.p1.or(file.alice.p1).unwrap_or(defaults::P1),
        },
        "bob": {
            "darkCount": args.dark_count.or(file.bob.dark_count).unwrap_or(defaults::DARK_COUNT),
            "timeBin": args.time_bin.or(file.bob.time_bin).unwrap_or(defaults::TIME_BIN_PS),
        },
        "channel": {
            "loss": loss_per_km * length_km,
            "syncError": args.sync_error.or(file.channel.sync_error).unwrap_or(defaults::SYNC_ERROR),
        },
        "processing": {
            "blockSize": args.block_size.or(file.processing.block_size).unwrap_or(defaults::BLOCK_SIZE),
            "maxOffset": args.max_offset.or(file.processing.max_offset).unwrap_or(defaults::MAX_OFFSET),
        },
    })
}

pub fn main_with_opts(args: &PulselinkCli) -> Result<()> {
    let file_params = match config::resolve_config_path(&args.config) {
        Some(path) => {
            if args.config.is_some() && !path.exists() {
                bail!("parameter file not found: {}", path.display());
            }
            config::load_params(&path)?
        }
        None => FileParams::default(),
    };

    let request = build_request(args, &file_params);

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let result = simulator::run(&request, &mut rng)
        .context("invalid simulation parameters")?;

    if args.json {
        let envelope = json!({ "status": "success", "results": result });
        println!("{}", serde_json::to_string_pretty(&envelope)?);
        return Ok(());
    }

    print_summary(&result);

    if args.show_plots {
        print_trace_chart(&result);
    } else {
        let time_bin_ps = request["bob"]["timeBin"].as_f64().unwrap_or(defaults::TIME_BIN_PS);
        io::export_correlation_csv(
            Path::new("correlation.csv"),
            &result.time_points,
            &result.cross_correlation,
        )
        .context("write correlation.csv")?;
        io::export_counts_csv(Path::new("counts.csv"), &result.counts, time_bin_ps)
            .context("write counts.csv")?;
        println!("Plot data saved as correlation.csv and counts.csv");
    }

    Ok(())
}

fn print_summary(result: &SimulationResult) {
    let stats = &result.statistics;
    println!("\n{}", "Simulation results".bold());
    println!("  total counts:    {}", stats.total_counts);
    println!("  mean count rate: {:.3e} counts/s", stats.mean_count_rate);
    match stats.qber {
        Some(qber) => println!("  QBER estimate:   {:.4}", qber),
        None => println!("  QBER estimate:   {} (no detections)", "undefined".yellow()),
    }
    println!("  recovered delay: {} bins", result.peak_position);
    if stats.sync_success {
        println!("  synchronization: {}", "ok".green().bold());
    } else {
        println!("  synchronization: {}", "failed".red().bold());
    }
}

/// Terminal rendition of the correlation trace around its peak.
fn print_trace_chart(result: &SimulationResult) {
    const HALF_WINDOW: usize = 12;
    const BAR_WIDTH: f64 = 48.0;

    let trace = &result.cross_correlation;
    if trace.is_empty() {
        return;
    }
    let peak = result.peak_position;
    let lo = peak.saturating_sub(HALF_WINDOW);
    let hi = (peak + HALF_WINDOW + 1).min(trace.len());
    let max = trace[lo..hi].iter().cloned().fold(f64::MIN, f64::max);

    println!("\n{} (lag in bins)", "Cross-correlation".bold());
    for k in lo..hi {
        let scaled = if max > 0.0 {
            ((trace[k] / max).max(0.0) * BAR_WIDTH).round() as usize
        } else {
            0
        };
        let marker = if k == peak { "  <- peak" } else { "" };
        println!("  {:>6} | {}{}", k, "#".repeat(scaled), marker);
    }
}
