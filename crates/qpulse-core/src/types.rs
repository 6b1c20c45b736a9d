//! Core types for pulse generation and spectral analysis
//!
//! This module defines the fundamental types shared across the crate:
//! real-valued envelope samples, complex spectral buffers, the explicit
//! sample-rate configuration, and the error taxonomy.
//!
//! ## Units
//!
//! The whole crate works in hardware-native units for 1 GS/s arbitrary
//! waveform generators:
//!
//! ```text
//! sample index  →  nanoseconds   (1 sample = 1 ns at 1 GS/s)
//! FFT bin       →  gigahertz     (bin spacing = 1/(n·dt) Hz ÷ 1e9)
//! Nyquist       =  0.5 × sample rate = 0.5 GHz at the default rate
//! ```
//!
//! The rate is never an implicit global: every frequency-domain
//! computation receives a [`SampleRate`] (or its `dt_sec()`) explicitly,
//! so alternate rates can be tested without hidden coupling.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

/// A single real-valued envelope amplitude, normalized to [-1, 1]
pub type Sample = f64;

/// Type alias for complex numbers using f64 precision
pub type Complex = Complex64;

/// Result type for pulse and spectral operations
pub type PulseResult<T> = Result<T, PulseError>;

/// Errors that can occur during pulse generation and analysis
#[derive(Debug, thiserror::Error)]
pub enum PulseError {
    #[error("duration must be at least 1 sample")]
    EmptyDuration,

    #[error("envelope is identically zero; peak normalization is undefined")]
    DegenerateEnvelope,

    #[error("signal is empty; no spectrum exists")]
    EmptySignal,

    #[error("state vector has zero norm")]
    ZeroNormState,

    #[error("malformed pulse archive: {0}")]
    MalformedArchive(String),

    #[error("archive header error: {0}")]
    Header(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Sampling rate of the waveform playback hardware.
///
/// Stored in gigasamples per second. The process-wide convention is
/// 1 GS/s (sample period 1 ns), which [`Default`] reproduces, but the
/// value is threaded explicitly into every consumer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SampleRate {
    gigasamples_per_sec: f64,
}

impl SampleRate {
    /// Create a sample rate from a value in gigasamples per second.
    pub fn from_gs(gigasamples_per_sec: f64) -> Self {
        Self {
            gigasamples_per_sec,
        }
    }

    /// Rate in gigasamples per second.
    pub fn gs(&self) -> f64 {
        self.gigasamples_per_sec
    }

    /// Sample period in seconds (1e-9 at 1 GS/s).
    pub fn dt_sec(&self) -> f64 {
        1.0 / (self.gigasamples_per_sec * 1e9)
    }

    /// Nyquist frequency in GHz: half the sample rate.
    pub fn nyquist_ghz(&self) -> f64 {
        0.5 * self.gigasamples_per_sec
    }
}

impl Default for SampleRate {
    fn default() -> Self {
        Self {
            gigasamples_per_sec: 1.0,
        }
    }
}
