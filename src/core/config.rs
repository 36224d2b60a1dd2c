//! Typed simulation parameters and the request-schema validator.

use serde_json::Value;

use crate::core::error::ConfigError;

/// Immutable, range-checked parameter set for one simulation run.
///
/// Groups mirror the request schema: `alice` (transmitter), `bob` (receiver),
/// `channel`, `processing`.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    /// mu1: mean photon number per signal pulse.
    pub signal_power: f64,
    /// mu2: mean photon number per decoy pulse.
    pub decoy_power: f64,
    /// Probability of sending the signal state.
    pub signal_prob: f64,
    /// Detector dark count rate in counts/s.
    pub dark_count_rate: f64,
    /// Time bin width in picoseconds.
    pub time_bin: f64,
    /// Total channel loss in dB.
    pub channel_loss_db: f64,
    /// Clock synchronization tolerance scale (ppm-style).
    pub sync_error: f64,
    /// Number of time bins per accumulated block.
    pub block_size: usize,
    /// Maximum expected clock offset in bins.
    pub max_offset: usize,
}

impl SimulationConfig {
    /// Validate a raw request tree against the fixed grouped schema.
    ///
    /// Fails with a `ConfigError` naming the exact dotted field path when a
    /// field is missing, has the wrong type, or is out of range. No physical
    /// parameter is ever defaulted here.
    pub fn from_request(raw: &Value) -> Result<Self, ConfigError> {
        let config = SimulationConfig {
            signal_power: require_f64(raw, "alice", "mu1", "alice.mu1")?,
            decoy_power: require_f64(raw, "alice", "mu2", "alice.mu2")?,
            signal_prob: require_f64(raw, "alice", "p1", "alice.p1")?,
            dark_count_rate: require_f64(raw, "bob", "darkCount", "bob.darkCount")?,
            time_bin: require_f64(raw, "bob", "timeBin", "bob.timeBin")?,
            channel_loss_db: require_f64(raw, "channel", "loss", "channel.loss")?,
            sync_error: require_f64(raw, "channel", "syncError", "channel.syncError")?,
            block_size: require_usize(raw, "processing", "blockSize", "processing.blockSize")?,
            max_offset: require_usize(raw, "processing", "maxOffset", "processing.maxOffset")?,
        };
        config.check_ranges()?;
        Ok(config)
    }

    fn check_ranges(&self) -> Result<(), ConfigError> {
        if !self.signal_power.is_finite() || self.signal_power < 0.0 {
            return Err(ConfigError::out_of_range("alice.mu1", "must be >= 0"));
        }
        if !self.decoy_power.is_finite() || self.decoy_power < 0.0 {
            return Err(ConfigError::out_of_range("alice.mu2", "must be >= 0"));
        }
        if !(0.0..=1.0).contains(&self.signal_prob) {
            return Err(ConfigError::out_of_range("alice.p1", "probability in [0, 1]"));
        }
        if !self.dark_count_rate.is_finite() || self.dark_count_rate < 0.0 {
            return Err(ConfigError::out_of_range("bob.darkCount", "must be >= 0"));
        }
        if !self.time_bin.is_finite() || self.time_bin <= 0.0 {
            return Err(ConfigError::out_of_range("bob.timeBin", "must be > 0"));
        }
        if !self.channel_loss_db.is_finite() || self.channel_loss_db < 0.0 {
            return Err(ConfigError::out_of_range("channel.loss", "must be >= 0"));
        }
        if !self.sync_error.is_finite() || self.sync_error < 0.0 {
            return Err(ConfigError::out_of_range("channel.syncError", "must be >= 0"));
        }
        if self.block_size == 0 {
            return Err(ConfigError::out_of_range(
                "processing.blockSize",
                "must be a positive integer",
            ));
        }
        Ok(())
    }

    /// Time bin width converted to seconds.
    pub fn time_bin_seconds(&self) -> f64 {
        self.time_bin * 1e-12
    }

    /// Channel loss converted from dB to the linear scale factor applied in
    /// the detection-probability exponent.
    pub fn attenuation(&self) -> f64 {
        10f64.powf(self.channel_loss_db / 10.0)
    }
}

fn lookup<'v>(raw: &'v Value, group: &str, key: &str) -> Option<&'v Value> {
    raw.get(group).and_then(|g| g.get(key))
}

fn require_f64(raw: &Value, group: &str, key: &str, path: &'static str) -> Result<f64, ConfigError> {
    match lookup(raw, group, key) {
        None | Some(Value::Null) => Err(ConfigError::missing(path)),
        Some(v) => v
            .as_f64()
            .ok_or_else(|| ConfigError::bad_type(path, "a number")),
    }
}

fn require_usize(
    raw: &Value,
    group: &str,
    key: &str,
    path: &'static str,
) -> Result<usize, ConfigError> {
    match lookup(raw, group, key) {
        None | Some(Value::Null) => Err(ConfigError::missing(path)),
        Some(v) => match v.as_u64() {
            Some(n) => Ok(n as usize),
            // Reject floats with a fractional part and negative integers alike.
            None => Err(ConfigError::bad_type(path, "a non-negative integer")),
        },
    }
}
