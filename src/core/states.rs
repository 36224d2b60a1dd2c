//! Alice's pulse block: random signal/decoy intensity choices.

use rand::Rng;

use crate::core::config::SimulationConfig;

/// Draw `n` pulse intensities, signal with probability `signal_prob`.
pub(crate) fn draw_pulses<R: Rng>(n: usize, config: &SimulationConfig, rng: &mut R) -> Vec<f64> {
    (0..n)
        .map(|_| {
            if rng.gen_bool(config.signal_prob) {
                config.signal_power
            } else {
                config.decoy_power
            }
        })
        .collect()
}

/// Generate Alice's pulse-intensity block and the parallel binary indicator.
///
/// The indicator records the Bernoulli outcome itself (1 = signal, 0 = decoy)
/// rather than comparing sampled values, so it stays unambiguous even when
/// signal and decoy power coincide.
pub fn generate<R: Rng>(config: &SimulationConfig, rng: &mut R) -> (Vec<f64>, Vec<u8>) {
    let mut pulses = Vec::with_capacity(config.block_size);
    let mut indicator = Vec::with_capacity(config.block_size);
    for _ in 0..config.block_size {
        let signal = rng.gen_bool(config.signal_prob);
        pulses.push(if signal { config.signal_power } else { config.decoy_power });
        indicator.push(u8::from(signal));
    }
    (pulses, indicator)
}
