//! Correlation primitives for delay recovery.
//!
//! The production path is an iterative radix-2 FFT over `Complex64`; the
//! direct O(n^2) form is kept as a numerical oracle for tests.

use num_complex::Complex64;
use std::f64::consts::PI;

/// In-place iterative radix-2 transform. `buf.len()` must be a power of two;
/// callers in this module always pad to one.
fn fft_in_place(buf: &mut [Complex64], inverse: bool) {
    let n = buf.len();
    if n <= 1 {
        return;
    }
    debug_assert!(n.is_power_of_two());

    // Bit-reversal permutation.
    let mut j = 0usize;
    for i in 1..n {
        let mut bit = n >> 1;
        while j & bit != 0 {
            j ^= bit;
            bit >>= 1;
        }
        j |= bit;
        if i < j {
            buf.swap(i, j);
        }
    }

    // Butterfly passes.
    let sign = if inverse { 1.0 } else { -1.0 };
    let mut len = 2;
    while len <= n {
        let angle = sign * 2.0 * PI / len as f64;
        let w_len = Complex64::new(angle.cos(), angle.sin());
        for chunk in buf.chunks_mut(len) {
            let mut w = Complex64::new(1.0, 0.0);
            for k in 0..len / 2 {
                let a = chunk[k];
                let b = chunk[k + len / 2] * w;
                chunk[k] = a + b;
                chunk[k + len / 2] = a - b;
                w *= w_len;
            }
        }
        len <<= 1;
    }

    if inverse {
        let scale = 1.0 / n as f64;
        for v in buf.iter_mut() {
            *v *= scale;
        }
    }
}

/// Valid-mode cross-correlation of `template` against `signal` via FFT.
///
/// Returns `corr[k] = sum_i template[i] * signal[i + k]` for
/// `k in 0..=signal.len() - template.len()`; empty when the template does not
/// fit inside the signal. Zero-padding to the next power of two keeps the
/// circular transform linear over the retained lags.
pub fn cross_correlate(template: &[f64], signal: &[f64]) -> Vec<f64> {
    let n = template.len();
    let m = signal.len();
    if n == 0 || m == 0 || n > m {
        return Vec::new();
    }

    let size = m.next_power_of_two();
    let mut freq_signal: Vec<Complex64> = signal
        .iter()
        .map(|&x| Complex64::new(x, 0.0))
        .chain(std::iter::repeat(Complex64::new(0.0, 0.0)))
        .take(size)
        .collect();
    let mut freq_template: Vec<Complex64> = template
        .iter()
        .map(|&x| Complex64::new(x, 0.0))
        .chain(std::iter::repeat(Complex64::new(0.0, 0.0)))
        .take(size)
        .collect();

    fft_in_place(&mut freq_signal, false);
    fft_in_place(&mut freq_template, false);

    // Correlation theorem: corr = IFFT(FFT(signal) * conj(FFT(template))).
    for (s, t) in freq_signal.iter_mut().zip(&freq_template) {
        *s *= t.conj();
    }
    fft_in_place(&mut freq_signal, true);

    freq_signal[..=m - n].iter().map(|c| c.re).collect()
}

/// Direct-sum reference used to cross-check the FFT path in tests.
pub fn cross_correlate_direct(template: &[f64], signal: &[f64]) -> Vec<f64> {
    let n = template.len();
    let m = signal.len();
    if n == 0 || m == 0 || n > m {
        return Vec::new();
    }
    (0..=m - n)
        .map(|k| template.iter().zip(&signal[k..k + n]).map(|(a, b)| a * b).sum())
        .collect()
}
