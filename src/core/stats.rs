//! Aggregate link-quality statistics over a detection window.

use crate::core::config::SimulationConfig;

/// Counts and derived rates for one detection sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectionStats {
    pub total_counts: u64,
    /// Mean detection rate in counts/s over the observed window.
    pub mean_count_rate: f64,
    /// Expected dark-count contribution relative to the observed mean count
    /// fraction. `None` when no bin fired: the estimate is undefined, never
    /// NaN.
    pub qber: Option<f64>,
}

pub fn summarize(detections: &[bool], config: &SimulationConfig) -> DetectionStats {
    let total_counts = detections.iter().filter(|&&d| d).count() as u64;
    let duration = detections.len() as f64 * config.time_bin_seconds();
    let mean_count_rate = if duration > 0.0 {
        total_counts as f64 / duration
    } else {
        0.0
    };

    let qber = if total_counts == 0 {
        None
    } else {
        let dark_contribution = config.dark_count_rate * config.time_bin_seconds();
        let count_fraction = total_counts as f64 / detections.len() as f64;
        Some(dark_contribution / count_fraction)
    };

    DetectionStats { total_counts, mean_count_rate, qber }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn config(dark_count: f64, time_bin_ps: f64) -> SimulationConfig {
        SimulationConfig::from_request(&json!({
            "alice": { "mu1": 0.1, "mu2": 0.05, "p1": 0.8 },
            "bob": { "darkCount": dark_count, "timeBin": time_bin_ps },
            "channel": { "loss": 2.0, "syncError": 0.1 },
            "processing": { "blockSize": 1000, "maxOffset": 50 }
        }))
        .unwrap()
    }

    #[test]
    fn counts_and_rate() {
        let config = config(100.0, 100.0);
        let detections = [true, false, true, true, false];
        let stats = summarize(&detections, &config);
        assert_eq!(stats.total_counts, 3);
        // 3 counts over 5 bins of 100 ps.
        let expected = 3.0 / (5.0 * 100e-12);
        assert!((stats.mean_count_rate - expected).abs() / expected < 1e-12);
    }

    #[test]
    fn zero_detections_leave_qber_undefined() {
        let config = config(100.0, 100.0);
        let stats = summarize(&[false; 64], &config);
        assert_eq!(stats.total_counts, 0);
        assert_eq!(stats.qber, None);
        assert_eq!(stats.mean_count_rate, 0.0);
    }

    #[test]
    fn zero_dark_rate_gives_zero_qber() {
        let config = config(0.0, 100.0);
        let stats = summarize(&[true, true, false, true], &config);
        assert_eq!(stats.qber, Some(0.0));
    }

    #[test]
    fn qber_scales_with_dark_contribution() {
        let config = config(1e9, 100.0);
        // Half the bins fire: count fraction 0.5.
        let detections: Vec<bool> = (0..100).map(|i| i % 2 == 0).collect();
        let stats = summarize(&detections, &config);
        let expected = (1e9 * 100e-12) / 0.5;
        let qber = stats.qber.unwrap();
        assert!((qber - expected).abs() / expected < 1e-12);
    }
}
