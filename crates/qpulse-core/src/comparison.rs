//! Cross-Shape Comparison Report
//!
//! Sweeps the full pulse catalog at a common duration and collects the
//! headline numbers for each shape: energy, spectral leakage, and
//! −40 dB bandwidth, plus the energy saved by the phi pulse relative to
//! every other shape. The report serializes to JSON for downstream
//! tooling and renders a fixed-width text table for terminals.
//!
//! Entries are computed independently per shape — generator calls share
//! no state, so the sweep order is irrelevant to the results.
//!
//! ## Example
//!
//! ```rust
//! use qpulse_core::comparison::ComparisonReport;
//!
//! let report = ComparisonReport::with_defaults().unwrap();
//! assert_eq!(report.entries.len(), 7);
//! let phi = report.entry("phi").unwrap();
//! let gauss = report.entry("gaussian").unwrap();
//! assert!(phi.energy < gauss.energy);
//! println!("{}", report.to_text_table());
//! ```

use crate::energy::{energy_savings_pct, pulse_energy};
use crate::envelope::{PulseShape, DEFAULT_DURATION};
use crate::leakage::{leakage_metrics, DEFAULT_HIGH_FREQ_FRACTION};
use crate::types::{PulseResult, SampleRate};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// Sweep configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComparisonConfig {
    /// Pulse length in samples for every shape.
    pub duration: usize,
    /// Playback sample rate.
    pub sample_rate: SampleRate,
    /// High-frequency leakage threshold as a fraction of Nyquist.
    pub threshold_frac: f64,
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            duration: DEFAULT_DURATION,
            sample_rate: SampleRate::default(),
            threshold_frac: DEFAULT_HIGH_FREQ_FRACTION,
        }
    }
}

/// Per-shape results within a comparison sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeEntry {
    /// Shape and its parameters.
    pub shape: PulseShape,
    /// Display name ("Phi (Golden Ratio)", "DRAG", ...).
    pub name: String,
    /// Archive key ("phi", "drag", ...).
    pub slug: String,
    /// Sum of squared sample magnitudes.
    pub energy: f64,
    /// Out-of-band power percentage.
    pub leakage_pct: f64,
    /// Two-sided −40 dB bandwidth in GHz.
    pub bandwidth_ghz: f64,
    /// Energy saved by the phi pulse relative to this shape; absent on
    /// the phi entry itself.
    pub phi_savings_pct: Option<f64>,
}

/// Full catalog comparison at a common duration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub duration: usize,
    pub sample_rate_gs: f64,
    pub threshold_frac: f64,
    pub entries: Vec<ShapeEntry>,
}

impl ComparisonReport {
    /// Run the sweep described by `config`.
    pub fn run(config: &ComparisonConfig) -> PulseResult<Self> {
        let shapes = PulseShape::all();
        let mut entries = Vec::with_capacity(shapes.len());

        for shape in shapes {
            let samples = shape.generate(config.duration)?;
            let energy = pulse_energy(&samples);
            let metrics =
                leakage_metrics(&samples, config.threshold_frac, config.sample_rate)?;
            tracing::debug!(
                shape = shape.name(),
                energy,
                leakage_pct = metrics.leakage_pct,
                "pulse analyzed"
            );
            entries.push(ShapeEntry {
                shape,
                name: shape.name().to_string(),
                slug: shape.slug().to_string(),
                energy,
                leakage_pct: metrics.leakage_pct,
                bandwidth_ghz: metrics.bandwidth_ghz,
                phi_savings_pct: None,
            });
        }

        // Catalog order puts phi first; look it up by key anyway.
        let phi_energy = entries
            .iter()
            .find(|e| e.slug == "phi")
            .map(|e| e.energy)
            .unwrap_or(0.0);
        for entry in entries.iter_mut() {
            if entry.slug != "phi" {
                entry.phi_savings_pct = Some(energy_savings_pct(phi_energy, entry.energy));
            }
        }

        Ok(Self {
            duration: config.duration,
            sample_rate_gs: config.sample_rate.gs(),
            threshold_frac: config.threshold_frac,
            entries,
        })
    }

    /// Run at the fixed default parameter set (duration 160, 1 GS/s).
    pub fn with_defaults() -> PulseResult<Self> {
        Self::run(&ComparisonConfig::default())
    }

    /// Look up an entry by its archive key.
    pub fn entry(&self, slug: &str) -> Option<&ShapeEntry> {
        self.entries.iter().find(|e| e.slug == slug)
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Fixed-width text table for terminal display.
    pub fn to_text_table(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "Pulse comparison — duration {} samples at {} GS/s",
            self.duration, self.sample_rate_gs
        );
        let _ = writeln!(
            out,
            "{:<20} {:>10} {:>12} {:>14} {:>12}",
            "shape", "energy", "leakage %", "-40dB BW (GHz)", "phi saves"
        );
        for e in &self.entries {
            let savings = match e.phi_savings_pct {
                Some(s) => format!("{s:.1}%"),
                None => "—".to_string(),
            };
            let _ = writeln!(
                out,
                "{:<20} {:>10.2} {:>12.6} {:>14.3} {:>12}",
                e.name, e.energy, e.leakage_pct, e.bandwidth_ghz, savings
            );
        }
        out
    }
}
