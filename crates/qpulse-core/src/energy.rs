//! Pulse Energy — Sum of Squared Magnitudes
//!
//! A single scalar comparator for the "pulse power budget" across
//! envelope shapes. Lower energy at the same peak amplitude means less
//! integrated drive power delivered to the qubit line.
//!
//! ## Example
//!
//! ```rust
//! use qpulse_core::energy::{energy_savings_pct, pulse_energy};
//!
//! let square = vec![1.0; 160];
//! assert_eq!(pulse_energy(&square), 160.0);
//!
//! // A pulse with half the energy saves 50%.
//! assert_eq!(energy_savings_pct(80.0, 160.0), 50.0);
//! ```

use crate::types::Sample;

/// Sum of squared sample magnitudes.
///
/// Defined for any sequence, including an all-zero or empty one
/// (both yield 0).
pub fn pulse_energy(samples: &[Sample]) -> f64 {
    samples.iter().map(|&s| s * s).sum()
}

/// Percentage of energy saved by a reference pulse relative to another.
///
/// `100 · (1 − E_ref / E_other)`; 0 when the other pulse carries no
/// energy (nothing to save against).
pub fn energy_savings_pct(reference_energy: f64, other_energy: f64) -> f64 {
    if other_energy > 0.0 {
        100.0 * (1.0 - reference_energy / other_energy)
    } else {
        0.0
    }
}
