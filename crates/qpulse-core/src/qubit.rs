//! Single-Qubit Rotation Proxy and State Fidelity
//!
//! A simplified stand-in for driving a qubit with a control pulse: the
//! pulse's energy budget scales an X-rotation angle, the rotation is
//! applied to |0⟩, and the result is scored against the ideal rotated
//! state. This is a display-grade proxy for how pulse shaping affects
//! gate angles, not a physical simulator — no Hamiltonian integration,
//! no decoherence.
//!
//! ```text
//! effective_angle = target_angle · (energy / duration) / 0.5
//!
//! R_x(θ) = ⎡  cos θ/2   −i·sin θ/2 ⎤
//!          ⎣ −i·sin θ/2   cos θ/2  ⎦
//! ```
//!
//! ## Fidelity backends
//!
//! `state_fidelity(a, b) = |⟨a|b⟩|²` has two interchangeable
//! implementations selected at build time: the built-in complex
//! inner product, or an `ndarray` dot product behind the
//! `ndarray-fidelity` cargo feature. Results are mathematically
//! identical either way.
//!
//! ## Example
//!
//! ```rust
//! use qpulse_core::envelope::square_pulse;
//! use qpulse_core::qubit::simulate_rotation;
//! use std::f64::consts::FRAC_PI_2;
//!
//! // A square pulse carries energy == duration, so the effective
//! // angle is exactly twice the target.
//! let samples = square_pulse(160).unwrap();
//! let outcome = simulate_rotation(&samples, FRAC_PI_2).unwrap();
//! assert!((outcome.effective_angle_rad - 2.0 * FRAC_PI_2).abs() < 1e-12);
//! assert!(outcome.fidelity > 0.9999);
//! ```

use crate::energy::pulse_energy;
use crate::types::{Complex, PulseError, PulseResult, Sample};

/// A normalized two-level quantum state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateVector {
    amplitudes: [Complex; 2],
}

impl StateVector {
    /// Build a state from raw amplitudes, normalizing to unit norm.
    pub fn new(zero: Complex, one: Complex) -> PulseResult<Self> {
        let norm = (zero.norm_sqr() + one.norm_sqr()).sqrt();
        if norm == 0.0 {
            return Err(PulseError::ZeroNormState);
        }
        Ok(Self {
            amplitudes: [zero / norm, one / norm],
        })
    }

    /// The computational ground state |0⟩.
    pub fn ground() -> Self {
        Self {
            amplitudes: [Complex::new(1.0, 0.0), Complex::new(0.0, 0.0)],
        }
    }

    /// Amplitudes of |0⟩ and |1⟩.
    pub fn amplitudes(&self) -> &[Complex; 2] {
        &self.amplitudes
    }
}

#[cfg(not(feature = "ndarray-fidelity"))]
fn inner_product(a: &[Complex; 2], b: &[Complex; 2]) -> Complex {
    a.iter().zip(b.iter()).map(|(x, y)| x.conj() * y).sum()
}

#[cfg(feature = "ndarray-fidelity")]
fn inner_product(a: &[Complex; 2], b: &[Complex; 2]) -> Complex {
    let bra = ndarray::arr1(&[a[0].conj(), a[1].conj()]);
    let ket = ndarray::arr1(&b[..]);
    bra.dot(&ket)
}

/// Fidelity between two states: `|⟨a|b⟩|²`, in [0, 1].
pub fn state_fidelity(a: &StateVector, b: &StateVector) -> f64 {
    inner_product(&a.amplitudes, &b.amplitudes).norm_sqr()
}

/// Result of the rotation proxy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationOutcome {
    /// State after applying the energy-scaled rotation to |0⟩.
    pub state: StateVector,
    /// Fidelity against the ideal rotated state.
    pub fidelity: f64,
    /// The energy-scaled rotation angle actually applied, in radians.
    pub effective_angle_rad: f64,
}

/// Apply the energy-scaled X rotation of a pulse to |0⟩.
///
/// The target angle is scaled by the pulse's mean power relative to
/// the 0.5 reference of a half-amplitude square drive.
pub fn simulate_rotation(samples: &[Sample], target_angle_rad: f64) -> PulseResult<RotationOutcome> {
    if samples.is_empty() {
        return Err(PulseError::EmptySignal);
    }

    let energy = pulse_energy(samples);
    let duration = samples.len() as f64;
    let effective_angle_rad = target_angle_rad * (energy / duration) / 0.5;

    let cos_half = (effective_angle_rad / 2.0).cos();
    let sin_half = (effective_angle_rad / 2.0).sin();
    let m_i_sin = Complex::new(0.0, -sin_half);
    let rotation = [
        [Complex::new(cos_half, 0.0), m_i_sin],
        [m_i_sin, Complex::new(cos_half, 0.0)],
    ];

    let initial = StateVector::ground();
    let [a0, a1] = *initial.amplitudes();
    let state = StateVector::new(
        rotation[0][0] * a0 + rotation[0][1] * a1,
        rotation[1][0] * a0 + rotation[1][1] * a1,
    )?;

    let target = StateVector::new(Complex::new(cos_half, 0.0), m_i_sin)?;
    let fidelity = state_fidelity(&state, &target);

    Ok(RotationOutcome {
        state,
        fidelity,
        effective_angle_rad,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelope::{gaussian_pulse, phi_pulse, square_pulse};
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_fidelity_with_self_is_one() {
        let state = StateVector::new(Complex::new(0.6, 0.0), Complex::new(0.0, 0.8)).unwrap();
        assert_relative_eq!(state_fidelity(&state, &state), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_orthogonal_states_have_zero_fidelity() {
        let zero = StateVector::ground();
        let one = StateVector::new(Complex::new(0.0, 0.0), Complex::new(1.0, 0.0)).unwrap();
        assert_relative_eq!(state_fidelity(&zero, &one), 0.0, epsilon = 1e-15);
    }

    #[test]
    fn test_construction_normalizes() {
        let state = StateVector::new(Complex::new(3.0, 0.0), Complex::new(4.0, 0.0)).unwrap();
        let [a, b] = *state.amplitudes();
        assert_relative_eq!(a.norm_sqr() + b.norm_sqr(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(a.re, 0.6, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_norm_rejected() {
        assert!(matches!(
            StateVector::new(Complex::new(0.0, 0.0), Complex::new(0.0, 0.0)),
            Err(PulseError::ZeroNormState)
        ));
    }

    #[test]
    fn test_square_pulse_doubles_target_angle() {
        let samples = square_pulse(160).unwrap();
        let outcome = simulate_rotation(&samples, FRAC_PI_2).unwrap();
        assert_relative_eq!(outcome.effective_angle_rad, 2.0 * FRAC_PI_2, epsilon = 1e-12);
        assert_relative_eq!(outcome.fidelity, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_lower_energy_pulse_rotates_less() {
        let phi = phi_pulse(160, -6.0, 5.0).unwrap();
        let gauss = gaussian_pulse(160, 5.0).unwrap();
        let phi_angle = simulate_rotation(&phi, FRAC_PI_2)
            .unwrap()
            .effective_angle_rad;
        let gauss_angle = simulate_rotation(&gauss, FRAC_PI_2)
            .unwrap()
            .effective_angle_rad;
        assert!(phi_angle < gauss_angle);
    }

    #[test]
    fn test_empty_pulse_rejected() {
        assert!(matches!(
            simulate_rotation(&[], FRAC_PI_2),
            Err(PulseError::EmptySignal)
        ));
    }
}
