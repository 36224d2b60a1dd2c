//! Channel effects: attenuation, dark counts, and an unknown transit delay.

use rand::Rng;

use crate::core::config::SimulationConfig;
use crate::core::states;
use crate::debug_log;

/// Upper bound on the random slack added above `max_offset` when no delay is
/// injected, so recovery tests can exercise the full offset search range.
const DELAY_SLACK_BINS: usize = 1000;

/// Bob's observed events plus the ground-truth delay that produced them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelOutput {
    /// Detector clicks over the extended window `block_size + 2 * delay`.
    pub detections: Vec<bool>,
    /// Delay actually applied, in bins.
    pub delay: usize,
}

/// Propagate a pulse block through the lossy, noisy, delayed channel.
///
/// `injected_delay` pins the transit delay for reproducible recovery checks;
/// otherwise the delay is drawn as `max_offset + U{0..=1000}` from the same
/// rng that drives the noise.
pub fn transmit<R: Rng>(
    pulses: &[f64],
    config: &SimulationConfig,
    rng: &mut R,
    injected_delay: Option<usize>,
) -> ChannelOutput {
    let attenuation = config.attenuation();
    let dark_prob = 1.0 - (-config.dark_count_rate * config.time_bin_seconds()).exp();

    let delay = injected_delay
        .unwrap_or_else(|| config.max_offset + rng.gen_range(0..=DELAY_SLACK_BINS));
    debug_log!("channel: delay={delay} bins, dark_prob={dark_prob:.3e}");

    // Pulses keep arriving outside Alice's nominal block; pad both ends with
    // fresh draws from the same intensity distribution.
    let front_pad = states::draw_pulses(delay, config, rng);
    let end_pad = states::draw_pulses(delay, config, rng);

    let extended = front_pad
        .iter()
        .chain(pulses.iter())
        .chain(end_pad.iter());

    // Detection probability per bin. Deliberately not clamped to [0, 1]: the
    // raw uniform comparison below tolerates p > 1 (the bin always fires),
    // matching the reference statistics.
    let detections = extended
        .map(|&pulse| {
            let p = 1.0 - (-pulse * attenuation).exp() + dark_prob;
            rng.gen::<f64>() < p
        })
        .collect();

    ChannelOutput { detections, delay }
}
