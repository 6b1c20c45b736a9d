//! Control-Pulse Envelope Generators
//!
//! Closed-form envelope shapes used to drive single-qubit gates on
//! microwave control hardware. Each generator maps `(duration,
//! shape parameters)` to a real-valued sample sequence of exactly
//! `duration` samples, peak-normalized so `max(|envelope|) == 1.0`.
//!
//! ## Shape Catalog
//!
//! ```text
//! Shape            A(t)                                Time axis
//! ─────────────────────────────────────────────────────────────────
//! Phi              φ^(−t(t+1)/2), φ=(1+√5)/2           t_min..t_max
//! Gaussian         exp(−t²/2σ²), σ=d/divisor           −d/2..d/2
//! DRAG             gauss + β·(−t/σ²)·gauss             −d/2..d/2
//! Square           1                                   —
//! Sinc             sin(πt)/(πt)                        −4..4
//! Raised Cosine    max(0, ½(1+cos πt))                 −1..1
//! Gaussian Square  gauss rise | flat | gauss fall      −d/2..d/2
//! ```
//!
//! The phi (golden-ratio decay) pulse trades a slightly asymmetric
//! profile for a lower integrated power budget than a Gaussian of the
//! same duration; the comparison tooling in [`crate::comparison`]
//! quantifies that trade.
//!
//! ## Contract
//!
//! - `duration == 0` is rejected with [`PulseError::EmptyDuration`].
//! - Output length is exactly `duration`.
//! - Output is divided by the maximum absolute raw value, so the peak
//!   magnitude is exactly 1.0. An identically-zero raw signal surfaces
//!   as [`PulseError::DegenerateEnvelope`] instead of propagating NaN;
//!   no shipped shape can reach that branch.
//! - Generators are pure: identical inputs give bit-identical output.
//!
//! ## Example
//!
//! ```rust
//! use qpulse_core::envelope::{gaussian_pulse, PulseShape, DEFAULT_DURATION};
//!
//! let samples = gaussian_pulse(DEFAULT_DURATION, 5.0).unwrap();
//! assert_eq!(samples.len(), 160);
//! let peak = samples.iter().fold(0.0_f64, |m, &s| m.max(s.abs()));
//! assert!((peak - 1.0).abs() < 1e-12);
//!
//! // Same thing through the shape catalog
//! let same = PulseShape::gaussian().generate(DEFAULT_DURATION).unwrap();
//! assert_eq!(samples, same);
//! ```

use crate::types::{PulseError, PulseResult, Sample};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;

/// Default pulse length in samples (160 ns at 1 GS/s).
pub const DEFAULT_DURATION: usize = 160;

/// Default phi-pulse time window `[t_min, t_max]`.
pub const DEFAULT_PHI_WINDOW: (f64, f64) = (-6.0, 5.0);

/// Default Gaussian/DRAG sigma divisor (σ = duration / 5).
pub const DEFAULT_SIGMA_DIVISOR: f64 = 5.0;

/// Default DRAG derivative-scaling coefficient β.
pub const DEFAULT_DRAG_BETA: f64 = 0.1;

/// Default Gaussian-square flat-top fraction of the total duration.
pub const DEFAULT_FLAT_FRACTION: f64 = 0.5;

/// The golden ratio φ = (1 + √5) / 2.
pub fn golden_ratio() -> f64 {
    (1.0 + 5.0_f64.sqrt()) / 2.0
}

/// Linearly spaced time axis with both endpoints included.
///
/// `n == 1` yields `[start]`; otherwise the step is
/// `(stop − start) / (n − 1)`.
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    if n == 0 {
        return Vec::new();
    }
    if n == 1 {
        return vec![start];
    }
    let step = (stop - start) / (n - 1) as f64;
    (0..n).map(|i| start + i as f64 * step).collect()
}

/// Divide by the maximum absolute value so the peak magnitude is 1.0.
fn normalize(raw: Vec<f64>) -> PulseResult<Vec<Sample>> {
    let peak = raw.iter().fold(0.0_f64, |m, &s| m.max(s.abs()));
    if peak == 0.0 {
        return Err(PulseError::DegenerateEnvelope);
    }
    Ok(raw.into_iter().map(|s| s / peak).collect())
}

fn check_duration(duration: usize) -> PulseResult<()> {
    if duration == 0 {
        return Err(PulseError::EmptyDuration);
    }
    Ok(())
}

/// Phi pulse: `A(t) = φ^(−t(t+1)/2)` over a linear time window.
///
/// The exponent peaks at t = −1/2, so the peak location within the
/// envelope depends on where `[t_min, t_max]` places that point.
pub fn phi_pulse(duration: usize, t_min: f64, t_max: f64) -> PulseResult<Vec<Sample>> {
    check_duration(duration)?;
    let phi = golden_ratio();
    let raw = linspace(t_min, t_max, duration)
        .into_iter()
        .map(|t| phi.powf(-(t * (t + 1.0)) / 2.0))
        .collect();
    normalize(raw)
}

/// Standard Gaussian envelope with σ = duration / `sigma_divisor`.
pub fn gaussian_pulse(duration: usize, sigma_divisor: f64) -> PulseResult<Vec<Sample>> {
    check_duration(duration)?;
    let sigma = duration as f64 / sigma_divisor;
    let half = duration as f64 / 2.0;
    let raw = linspace(-half, half, duration)
        .into_iter()
        .map(|t| (-(t * t) / (2.0 * sigma * sigma)).exp())
        .collect();
    normalize(raw)
}

/// DRAG envelope: Gaussian plus a scaled derivative term.
///
/// `A(t) = g(t) + β · (−t/σ²) · g(t)` with `g` the Gaussian base.
/// The sum is normalized, not the components separately.
pub fn drag_pulse(duration: usize, sigma_divisor: f64, beta: f64) -> PulseResult<Vec<Sample>> {
    check_duration(duration)?;
    let sigma = duration as f64 / sigma_divisor;
    let half = duration as f64 / 2.0;
    let raw = linspace(-half, half, duration)
        .into_iter()
        .map(|t| {
            let gauss = (-(t * t) / (2.0 * sigma * sigma)).exp();
            let derivative = -t / (sigma * sigma) * gauss;
            gauss + beta * derivative
        })
        .collect();
    normalize(raw)
}

/// Rectangular envelope: constant 1.0, already normalized.
pub fn square_pulse(duration: usize) -> PulseResult<Vec<Sample>> {
    check_duration(duration)?;
    Ok(vec![1.0; duration])
}

/// Band-limited sinc envelope over a fixed −4..4 window.
pub fn sinc_pulse(duration: usize) -> PulseResult<Vec<Sample>> {
    check_duration(duration)?;
    let raw = linspace(-4.0, 4.0, duration)
        .into_iter()
        .map(|t| {
            if t == 0.0 {
                1.0
            } else {
                (PI * t).sin() / (PI * t)
            }
        })
        .collect();
    normalize(raw)
}

/// Raised-cosine envelope, zero at both edges, clipped at zero from
/// below so no negative lobe survives rounding.
pub fn raised_cosine_pulse(duration: usize) -> PulseResult<Vec<Sample>> {
    check_duration(duration)?;
    let raw = linspace(-1.0, 1.0, duration)
        .into_iter()
        .map(|t| (0.5 * (1.0 + (PI * t).cos())).max(0.0))
        .collect();
    normalize(raw)
}

/// Flat-top envelope with Gaussian rise and fall edges.
///
/// σ = duration / 8. The edge length is
/// `round(duration · (1 − flat_fraction) / 2)`; the flat segment takes
/// whatever remains, so the three segments always sum to `duration`.
pub fn gaussian_square_pulse(duration: usize, flat_fraction: f64) -> PulseResult<Vec<Sample>> {
    check_duration(duration)?;
    let sigma = duration as f64 / 8.0;
    let half = duration as f64 / 2.0;
    let t = linspace(-half, half, duration);
    let edge = ((duration as f64 * (1.0 - flat_fraction)) / 2.0).round() as usize;
    let edge = edge.min(duration / 2);

    let gauss = |x: f64| (-(x * x) / (2.0 * sigma * sigma)).exp();
    let mut raw = Vec::with_capacity(duration);
    for (i, &ti) in t.iter().enumerate() {
        if i < edge || i >= duration - edge {
            raw.push(gauss(ti));
        } else {
            raw.push(1.0);
        }
    }
    normalize(raw)
}

/// Closed set of supported pulse shapes, each carrying its own
/// parameter record.
///
/// Shapes dispatch to the free generator functions above; adding a
/// shape means adding a variant, keeping the catalog extensible
/// without open-ended dynamic dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PulseShape {
    /// Golden-ratio decay over the time window `[t_min, t_max]`.
    Phi { t_min: f64, t_max: f64 },
    /// Gaussian with σ = duration / `sigma_divisor`.
    Gaussian { sigma_divisor: f64 },
    /// Gaussian plus β-scaled derivative term.
    Drag { sigma_divisor: f64, beta: f64 },
    /// Constant unit amplitude.
    Square,
    /// sin(πt)/(πt) over −4..4.
    Sinc,
    /// ½(1 + cos πt) over −1..1, clipped at zero.
    RaisedCosine,
    /// Flat top with Gaussian edges; `flat_fraction` of the duration
    /// stays at unit amplitude.
    GaussianSquare { flat_fraction: f64 },
}

impl PulseShape {
    /// Phi shape at the default −6..5 window.
    pub fn phi() -> Self {
        Self::Phi {
            t_min: DEFAULT_PHI_WINDOW.0,
            t_max: DEFAULT_PHI_WINDOW.1,
        }
    }

    /// Gaussian shape at the default σ divisor.
    pub fn gaussian() -> Self {
        Self::Gaussian {
            sigma_divisor: DEFAULT_SIGMA_DIVISOR,
        }
    }

    /// DRAG shape at the default σ divisor and β.
    pub fn drag() -> Self {
        Self::Drag {
            sigma_divisor: DEFAULT_SIGMA_DIVISOR,
            beta: DEFAULT_DRAG_BETA,
        }
    }

    /// Gaussian-square shape at the default flat fraction.
    pub fn gaussian_square() -> Self {
        Self::GaussianSquare {
            flat_fraction: DEFAULT_FLAT_FRACTION,
        }
    }

    /// The full catalog at default parameters, phi first.
    ///
    /// This is the canonical sweep order used by comparison reports and
    /// waveform archives.
    pub fn all() -> Vec<PulseShape> {
        vec![
            Self::phi(),
            Self::gaussian(),
            Self::drag(),
            Self::Square,
            Self::Sinc,
            Self::RaisedCosine,
            Self::gaussian_square(),
        ]
    }

    /// Human-readable display name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Phi { .. } => "Phi (Golden Ratio)",
            Self::Gaussian { .. } => "Gaussian",
            Self::Drag { .. } => "DRAG",
            Self::Square => "Square",
            Self::Sinc => "Sinc",
            Self::RaisedCosine => "Raised Cosine",
            Self::GaussianSquare { .. } => "Gaussian Square",
        }
    }

    /// Short identifier used as an archive key.
    pub fn slug(&self) -> &'static str {
        match self {
            Self::Phi { .. } => "phi",
            Self::Gaussian { .. } => "gaussian",
            Self::Drag { .. } => "drag",
            Self::Square => "square",
            Self::Sinc => "sinc",
            Self::RaisedCosine => "raised_cosine",
            Self::GaussianSquare { .. } => "gaussian_square",
        }
    }

    /// Generate this shape's envelope at the given duration.
    pub fn generate(&self, duration: usize) -> PulseResult<Vec<Sample>> {
        match *self {
            Self::Phi { t_min, t_max } => phi_pulse(duration, t_min, t_max),
            Self::Gaussian { sigma_divisor } => gaussian_pulse(duration, sigma_divisor),
            Self::Drag {
                sigma_divisor,
                beta,
            } => drag_pulse(duration, sigma_divisor, beta),
            Self::Square => square_pulse(duration),
            Self::Sinc => sinc_pulse(duration),
            Self::RaisedCosine => raised_cosine_pulse(duration),
            Self::GaussianSquare { flat_fraction } => {
                gaussian_square_pulse(duration, flat_fraction)
            }
        }
    }
}

impl fmt::Display for PulseShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn peak(samples: &[Sample]) -> f64 {
        samples.iter().fold(0.0_f64, |m, &s| m.max(s.abs()))
    }

    #[test]
    fn test_linspace_endpoints() {
        let t = linspace(-6.0, 5.0, 12);
        assert_eq!(t.len(), 12);
        assert_relative_eq!(t[0], -6.0);
        assert_relative_eq!(t[11], 5.0);
        assert_relative_eq!(t[1] - t[0], 1.0, epsilon = 1e-12);

        assert_eq!(linspace(3.0, 9.0, 1), vec![3.0]);
        assert!(linspace(0.0, 1.0, 0).is_empty());
    }

    #[test]
    fn test_all_shapes_normalized_and_sized() {
        for duration in [3, 7, 160, 333] {
            for shape in PulseShape::all() {
                let samples = shape.generate(duration).unwrap();
                assert_eq!(samples.len(), duration, "{shape} length at {duration}");
                assert_relative_eq!(peak(&samples), 1.0, epsilon = 1e-10);
            }
        }
    }

    #[test]
    fn test_degenerate_raised_cosine_is_reported() {
        // Both samples of a two-point −1..1 axis sit on cosine zeros,
        // so the raw envelope is identically zero and peak
        // normalization has nothing to divide by.
        assert!(matches!(
            raised_cosine_pulse(2),
            Err(PulseError::DegenerateEnvelope)
        ));
    }

    #[test]
    fn test_zero_duration_rejected() {
        for shape in PulseShape::all() {
            assert!(matches!(
                shape.generate(0),
                Err(PulseError::EmptyDuration)
            ));
        }
    }

    #[test]
    fn test_generators_are_pure() {
        for shape in PulseShape::all() {
            let a = shape.generate(160).unwrap();
            let b = shape.generate(160).unwrap();
            assert_eq!(a, b, "{shape} not bit-identical across calls");
        }
    }

    #[test]
    fn test_square_is_all_ones() {
        let samples = square_pulse(16).unwrap();
        assert!(samples.iter().all(|&s| s == 1.0));
    }

    #[test]
    fn test_phi_peak_near_window_center() {
        // Exponent −t(t+1)/2 is maximal at t = −1/2, which the default
        // −6..5 window places just before the midpoint.
        let samples = phi_pulse(160, -6.0, 5.0).unwrap();
        let (idx, _) = samples
            .iter()
            .enumerate()
            .fold((0, 0.0), |acc, (i, &s)| if s > acc.1 { (i, s) } else { acc });
        let t = linspace(-6.0, 5.0, 160)[idx];
        assert!((t + 0.5).abs() < 0.1, "peak at t = {t}");
    }

    #[test]
    fn test_raised_cosine_nonnegative_with_zero_edges() {
        let samples = raised_cosine_pulse(161).unwrap();
        assert!(samples.iter().all(|&s| s >= 0.0));
        assert_relative_eq!(samples[0], 0.0, epsilon = 1e-15);
        assert_relative_eq!(samples[160], 0.0, epsilon = 1e-15);
        assert_relative_eq!(samples[80], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_sinc_center_value() {
        // Odd duration puts a sample exactly at t = 0.
        let samples = sinc_pulse(161).unwrap();
        assert_relative_eq!(samples[80], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_gaussian_square_segments() {
        let duration = 160;
        let samples = gaussian_square_pulse(duration, 0.5).unwrap();
        // edge = round(160 · 0.5 / 2) = 40, flat = 80
        let flat = &samples[40..120];
        assert!(flat.iter().all(|&s| s == 1.0));
        assert!(samples[..40].iter().all(|&s| s < 1.0));
        assert!(samples[120..].iter().all(|&s| s < 1.0));
        // Rise and fall mirror each other on the symmetric time axis.
        for i in 0..40 {
            assert_relative_eq!(samples[i], samples[duration - 1 - i], epsilon = 1e-12);
        }
    }

    #[test]
    fn test_gaussian_square_length_odd_inputs() {
        // Rounding of the edge split must never change the total length.
        for duration in [9, 31, 157] {
            for flat_fraction in [0.1, 0.33, 0.5, 0.9] {
                let samples = gaussian_square_pulse(duration, flat_fraction).unwrap();
                assert_eq!(samples.len(), duration);
            }
        }
    }

    #[test]
    fn test_drag_differs_from_gaussian() {
        let gauss = gaussian_pulse(160, DEFAULT_SIGMA_DIVISOR).unwrap();
        let drag = drag_pulse(160, DEFAULT_SIGMA_DIVISOR, DEFAULT_DRAG_BETA).unwrap();
        let max_diff = gauss
            .iter()
            .zip(&drag)
            .fold(0.0_f64, |m, (&g, &d)| m.max((g - d).abs()));
        assert!(max_diff > 1e-3);
    }

    #[test]
    fn test_shape_names_and_slugs() {
        let shapes = PulseShape::all();
        assert_eq!(shapes.len(), 7);
        assert_eq!(shapes[0].name(), "Phi (Golden Ratio)");
        assert_eq!(shapes[0].slug(), "phi");
        assert_eq!(shapes[6].slug(), "gaussian_square");
        assert_eq!(format!("{}", shapes[2]), "DRAG");
    }

    #[test]
    fn test_shape_serde_roundtrip() {
        for shape in PulseShape::all() {
            let json = serde_json::to_string(&shape).unwrap();
            let back: PulseShape = serde_json::from_str(&json).unwrap();
            assert_eq!(back, shape);
        }
    }
}
