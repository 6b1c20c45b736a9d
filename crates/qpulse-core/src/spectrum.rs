//! Spectral Analysis Engine
//!
//! Converts a time-domain envelope into a centered, dB-normalized power
//! spectral density curve for leakage inspection.
//!
//! ## Signal Flow
//!
//! ```text
//! samples → [FFT] → [center shift] → 20·log10(|X| + ε) → subtract max
//!                        │
//! bin index → fftfreq → [center shift] → ÷1e9 → frequency axis (GHz)
//! ```
//!
//! Both outputs are index-aligned and the frequency axis ascends from
//! the most-negative to the most-positive bin, zero frequency centered.
//! After max-subtraction the peak power is exactly 0.0 dB — consumers
//! (thresholding, bandwidth search) rely on that invariant.
//!
//! ## Example
//!
//! ```rust
//! use qpulse_core::envelope::gaussian_pulse;
//! use qpulse_core::spectrum::spectral_energy;
//!
//! let samples = gaussian_pulse(160, 5.0).unwrap();
//! let curve = spectral_energy(&samples, 1e-9).unwrap();
//! assert_eq!(curve.len(), 160);
//! assert_eq!(curve.peak_db(), 0.0);
//! ```

use crate::types::{Complex, PulseError, PulseResult, Sample};
use rustfft::FftPlanner;
use serde::{Deserialize, Serialize};

/// Additive epsilon inside the log to avoid log10(0) on empty bins.
pub const PSD_EPSILON: f64 = 1e-15;

/// A centered power-spectral-density curve.
///
/// `freq_ghz[i]` and `power_db[i]` describe the same bin; both vectors
/// have the length of the originating envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpectralCurve {
    /// Signed frequency axis in GHz, monotonically non-decreasing.
    pub freq_ghz: Vec<f64>,
    /// Power per bin in dB, normalized so the maximum is 0.0.
    pub power_db: Vec<f64>,
}

impl SpectralCurve {
    /// Number of bins.
    pub fn len(&self) -> usize {
        self.freq_ghz.len()
    }

    /// True when the curve holds no bins.
    pub fn is_empty(&self) -> bool {
        self.freq_ghz.is_empty()
    }

    /// Peak power in dB (0.0 by construction for any non-empty curve).
    pub fn peak_db(&self) -> f64 {
        self.power_db.iter().fold(f64::NEG_INFINITY, |m, &p| m.max(p))
    }
}

/// DFT bin frequencies in Hz for `n` samples at period `dt_sec`,
/// in natural FFT order: non-negative bins first, then the negative
/// half ascending toward zero.
pub fn fft_frequencies(n: usize, dt_sec: f64) -> Vec<f64> {
    let span = n as f64 * dt_sec;
    let positive_bins = (n - 1) / 2 + 1;
    (0..n)
        .map(|i| {
            if i < positive_bins {
                i as f64 / span
            } else {
                (i as f64 - n as f64) / span
            }
        })
        .collect()
}

/// Move the zero-frequency bin to the center of the spectrum.
///
/// Rotates the second half of the buffer to the front. The midpoint is
/// `n - n/2` so odd lengths stay correctly centered and a frequency
/// axis passed through this shift stays monotone.
pub fn fft_shift<T: Clone>(x: &[T]) -> Vec<T> {
    let n = x.len();
    let mid = n - n / 2;
    let mut shifted = Vec::with_capacity(n);
    shifted.extend_from_slice(&x[mid..]);
    shifted.extend_from_slice(&x[..mid]);
    shifted
}

/// Compute the centered power spectral density of an envelope.
///
/// Returns the (frequency in GHz, power in dB) curve described in the
/// module docs. The peak power bin is exactly 0.0 dB.
pub fn spectral_energy(samples: &[Sample], dt_sec: f64) -> PulseResult<SpectralCurve> {
    let n = samples.len();
    if n == 0 {
        return Err(PulseError::EmptySignal);
    }

    let mut buffer: Vec<Complex> = samples.iter().map(|&s| Complex::new(s, 0.0)).collect();
    let mut planner = FftPlanner::new();
    planner.plan_fft_forward(n).process(&mut buffer);

    let spectrum = fft_shift(&buffer);
    let freq_ghz: Vec<f64> = fft_shift(&fft_frequencies(n, dt_sec))
        .into_iter()
        .map(|f| f / 1e9)
        .collect();

    let mut power_db: Vec<f64> = spectrum
        .iter()
        .map(|c| 20.0 * (c.norm() + PSD_EPSILON).log10())
        .collect();
    let peak = power_db.iter().fold(f64::NEG_INFINITY, |m, &p| m.max(p));
    for p in power_db.iter_mut() {
        *p -= peak;
    }

    Ok(SpectralCurve { freq_ghz, power_db })
}
