use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "pulselink",
    about = "Optical pulse link simulator — Alice/Bob channel, delay recovery, link statistics",
    version,
    propagate_version = true,
    disable_help_subcommand = true
)]
pub struct PulselinkCli {
    /// Signal state power, photons/pulse [default: 0.1]
    #[arg(long = "mu1", value_name = "PHOTONS")]
    pub mu1: Option<f64>,

    /// Decoy state power, photons/pulse [default: 0.05]
    #[arg(long = "mu2", value_name = "PHOTONS")]
    pub mu2: Option<f64>,

    /// Probability of sending the signal state [default: 0.8]
    #[arg(long = "p1", value_name = "PROB")]
    pub p1: Option<f64>,

    /// Detector dark count rate, counts/second [default: 100]
    #[arg(long = "dark-count", value_name = "CPS")]
    pub dark_count: Option<f64>,

    /// Time bin width, picoseconds [default: 100]
    #[arg(long = "time-bin", value_name = "PS")]
    pub time_bin: Option<f64>,

    /// Channel loss, dB/km [default: 0.2]
    #[arg(long = "loss", value_name = "DB_PER_KM")]
    pub loss: Option<f64>,

    /// Channel length, km [default: 10]
    #[arg(long = "length", value_name = "KM")]
    pub length: Option<f64>,

    /// Clock synchronization tolerance scale [default: 0.1]
    #[arg(long = "sync-error", value_name = "SCALE")]
    pub sync_error: Option<f64>,

    /// Pulses per accumulated block [default: 1000]
    #[arg(long = "block-size", value_name = "N")]
    pub block_size: Option<u64>,

    /// Maximum expected clock offset, bins [default: 50]
    #[arg(long = "max-offset", value_name = "BINS")]
    pub max_offset: Option<u64>,

    /// Seed the random source for a bit-identical rerun
    #[arg(long = "seed", value_name = "N")]
    pub seed: Option<u64>,

    /// Draw the correlation trace in the terminal instead of writing plot data
    #[arg(long = "show-plots", action = ArgAction::SetTrue)]
    pub show_plots: bool,

    /// Print the full response envelope as JSON
    #[arg(long = "json", action = ArgAction::SetTrue)]
    pub json: bool,

    /// Path to parameter file (TOML); default: ~/.pulselink/config.toml
    #[arg(long = "config", value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub cmd: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve the simulation over HTTP (requires `--features server`)
    Serve {
        #[arg(long = "port", value_name = "PORT", default_value_t = 5000)]
        port: u16,
    },
}
