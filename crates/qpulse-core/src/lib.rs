//! # Quantum Control-Pulse Design Library
//!
//! This crate generates and compares parametric control-pulse envelopes
//! used in quantum-hardware signal design, computes their spectral
//! leakage characteristics, and drives a simplified single-qubit
//! rotation proxy for each pulse.
//!
//! ## Overview
//!
//! Single-qubit gates on superconducting hardware are played as shaped
//! microwave envelopes from a 1 GS/s arbitrary waveform generator. The
//! shape decides two budgets at once: the integrated drive power, and
//! how much spectral content lands outside the qubit's frequency band
//! where it can excite neighboring states. This library implements:
//!
//! - **Envelope Generators**: seven closed-form shapes — golden-ratio
//!   decay (phi), Gaussian, DRAG, square, sinc, raised cosine, and
//!   Gaussian-square — all peak-normalized to 1.0
//! - **Spectral Analysis**: FFT-based, centered, dB-normalized power
//!   spectral density with the peak pinned at exactly 0 dB
//! - **Leakage Metrics**: out-of-band power percentage and −40 dB
//!   two-sided bandwidth
//! - **Energy and Comparison**: power-budget scalars and a full-catalog
//!   comparison report with JSON and text rendering
//! - **Waveform Archive**: self-describing pulse file for external
//!   quantum-control toolchains
//!
//! ## Signal Flow
//!
//! ```text
//! parameters → [Envelope Generator] → samples ─┬→ [Energy]   → scalar
//!                                              └→ [Spectrum] → PSD curve
//!                                                     │
//!                                              [Leakage Metrics]
//!                                                     │
//!                                         (leakage %, −40 dB bandwidth)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use qpulse_core::prelude::*;
//!
//! // Generate the phi pulse at the default 160-sample duration
//! let shape = PulseShape::phi();
//! let samples = shape.generate(DEFAULT_DURATION).unwrap();
//!
//! // How much of its power leaks above 20% of Nyquist?
//! let metrics = leakage_metrics(
//!     &samples,
//!     DEFAULT_HIGH_FREQ_FRACTION,
//!     SampleRate::default(),
//! )
//! .unwrap();
//! assert!(metrics.leakage_pct < 0.01);
//!
//! // Compare the full catalog
//! let report = ComparisonReport::with_defaults().unwrap();
//! println!("{}", report.to_text_table());
//! ```
//!
//! Everything is a pure, synchronous, in-memory computation: no
//! generator call shares state with another, so callers may sweep the
//! catalog in any order (or in parallel) without synchronization.

pub mod comparison;
pub mod energy;
pub mod envelope;
pub mod export;
pub mod leakage;
pub mod observe;
pub mod qubit;
pub mod spectrum;
pub mod types;

// Re-export main types
pub use comparison::{ComparisonConfig, ComparisonReport, ShapeEntry};
pub use energy::{energy_savings_pct, pulse_energy};
pub use envelope::{PulseShape, DEFAULT_DURATION};
pub use export::{ArchiveHeader, PulseArchive};
pub use leakage::{leakage_metrics, LeakageMetrics, BANDWIDTH_CUTOFF_DB};
pub use qubit::{simulate_rotation, state_fidelity, RotationOutcome, StateVector};
pub use spectrum::{spectral_energy, SpectralCurve};
pub use types::{Complex, PulseError, PulseResult, Sample, SampleRate};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::comparison::ComparisonReport;
    pub use crate::energy::pulse_energy;
    pub use crate::envelope::{PulseShape, DEFAULT_DURATION};
    pub use crate::leakage::{leakage_metrics, LeakageMetrics, DEFAULT_HIGH_FREQ_FRACTION};
    pub use crate::spectrum::{spectral_energy, SpectralCurve};
    pub use crate::types::{PulseError, PulseResult, Sample, SampleRate};
}
