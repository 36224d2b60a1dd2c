//! Delay recovery: correlate Alice's indicator against Bob's detections.

use crate::core::config::SimulationConfig;
use crate::core::dsp;
use crate::debug_log;

/// Outcome of one synchronization attempt. Failure to synchronize is data,
/// not an error.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncOutcome {
    /// Offsets centered at zero for presentation.
    pub time_points: Vec<i64>,
    /// Correlation value per candidate offset.
    pub trace: Vec<f64>,
    /// Arg-max of the trace (first occurrence on ties).
    pub found_delay: usize,
    /// Whether the recovered delay matches ground truth within tolerance.
    pub success: bool,
}

/// Recover the channel delay from the transmitted intensity pattern.
///
/// The trace covers every offset with full overlap between indicator and
/// detections, so its length is `detections.len() - indicator.len() + 1` and
/// the peak position is directly the delay estimate in bins.
pub fn find_delay(
    indicator: &[u8],
    detections: &[bool],
    config: &SimulationConfig,
    actual_delay: usize,
) -> SyncOutcome {
    let template: Vec<f64> = indicator.iter().map(|&i| f64::from(i)).collect();
    let signal: Vec<f64> = detections.iter().map(|&d| f64::from(u8::from(d))).collect();

    let trace = dsp::cross_correlate(&template, &signal);

    let found_delay = arg_max(&trace);

    let half = (trace.len() / 2) as i64;
    let time_points = (0..trace.len() as i64).map(|i| i - half).collect();

    let tolerance = (config.sync_error * 1e-6 * config.block_size as f64).abs();
    let error = (found_delay as f64 - actual_delay as f64).abs();
    let success = !trace.is_empty() && error <= tolerance;
    debug_log!("sync: found={found_delay}, actual={actual_delay}, tolerance={tolerance:.3}");

    SyncOutcome { time_points, trace, found_delay, success }
}

/// First index of the maximum trace value; 0 for an empty trace.
fn arg_max(trace: &[f64]) -> usize {
    let mut found = 0usize;
    let mut best = f64::NEG_INFINITY;
    for (k, &value) in trace.iter().enumerate() {
        if value > best {
            best = value;
            found = k;
        }
    }
    found
}
