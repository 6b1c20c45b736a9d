//! Waveform Archive — Self-Describing Pulse File I/O
//!
//! Serializes generated pulse envelopes, together with the metadata
//! triple (duration, sample period, sample rate), into a single file
//! for consumption by external quantum-control toolchains.
//!
//! ## Format
//!
//! The file starts with a JSON header line terminated by `\n`, followed
//! by the concatenated little-endian `f64` sample data of every pulse
//! in header order. The header records the sample rate in GS/s, the
//! sample period in seconds, the common duration, and the ordered list
//! of pulse names with their sample counts.
//!
//! ```text
//! {"sample_rate_gs":1.0,"dt_sec":1e-9,"duration":160,"pulses":[...]}\n
//! <phi samples><gaussian samples>...<gaussian_square samples>
//! ```
//!
//! Round-trips are bit-exact: the reader recovers the same `f64` values
//! the writer was given.
//!
//! ## Example
//!
//! ```rust,no_run
//! use qpulse_core::export::PulseArchive;
//!
//! let archive = PulseArchive::default_catalog().unwrap();
//! archive.write("phi_pulses.qpa").unwrap();
//!
//! let back = PulseArchive::read("phi_pulses.qpa").unwrap();
//! assert_eq!(back.header.duration, 160);
//! assert_eq!(back.waveforms.len(), 7);
//! ```

use crate::envelope::{PulseShape, DEFAULT_DURATION};
use crate::types::{PulseError, PulseResult, Sample, SampleRate};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;

/// One pulse entry in the archive header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchiveRecord {
    /// Archive key ("phi", "gaussian", ...).
    pub name: String,
    /// Number of `f64` samples stored for this pulse.
    pub num_samples: u64,
}

/// Archive metadata, serialized as the JSON header line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchiveHeader {
    /// Sample rate in gigasamples per second.
    pub sample_rate_gs: f64,
    /// Sample period in seconds.
    pub dt_sec: f64,
    /// Common pulse duration in samples.
    pub duration: u64,
    /// Stored pulses, in payload order.
    pub pulses: Vec<ArchiveRecord>,
}

/// An in-memory pulse archive: header plus named waveforms.
#[derive(Debug, Clone, PartialEq)]
pub struct PulseArchive {
    pub header: ArchiveHeader,
    /// Waveforms in the same order as `header.pulses`.
    pub waveforms: Vec<(String, Vec<Sample>)>,
}

impl PulseArchive {
    /// Build an archive from named waveforms.
    ///
    /// `duration` is recorded as the nominal common length; individual
    /// waveform lengths are taken from the data itself.
    pub fn new(
        waveforms: Vec<(String, Vec<Sample>)>,
        duration: usize,
        sample_rate: SampleRate,
    ) -> Self {
        let pulses = waveforms
            .iter()
            .map(|(name, samples)| ArchiveRecord {
                name: name.clone(),
                num_samples: samples.len() as u64,
            })
            .collect();
        Self {
            header: ArchiveHeader {
                sample_rate_gs: sample_rate.gs(),
                dt_sec: sample_rate.dt_sec(),
                duration: duration as u64,
                pulses,
            },
            waveforms,
        }
    }

    /// Generate the full catalog at the fixed default parameter set
    /// (duration 160, 1 GS/s) and wrap it in an archive.
    pub fn default_catalog() -> PulseResult<Self> {
        let rate = SampleRate::default();
        let mut waveforms = Vec::new();
        for shape in PulseShape::all() {
            let samples = shape.generate(DEFAULT_DURATION)?;
            waveforms.push((shape.slug().to_string(), samples));
        }
        Ok(Self::new(waveforms, DEFAULT_DURATION, rate))
    }

    /// Write the archive to `path`.
    pub fn write<P: AsRef<Path>>(&self, path: P) -> PulseResult<()> {
        let mut out = BufWriter::new(File::create(path.as_ref())?);
        let header = serde_json::to_string(&self.header)?;
        out.write_all(header.as_bytes())?;
        out.write_all(b"\n")?;
        for (_, samples) in &self.waveforms {
            for &s in samples {
                out.write_all(&s.to_le_bytes())?;
            }
        }
        out.flush()?;
        tracing::debug!(
            path = %path.as_ref().display(),
            pulses = self.waveforms.len(),
            "pulse archive written"
        );
        Ok(())
    }

    /// Read an archive back from `path`.
    pub fn read<P: AsRef<Path>>(path: P) -> PulseResult<Self> {
        let mut reader = BufReader::new(File::open(path.as_ref())?);

        let mut header_line = String::new();
        reader.read_line(&mut header_line)?;
        if !header_line.ends_with('\n') {
            return Err(PulseError::MalformedArchive(
                "missing header line terminator".into(),
            ));
        }
        let header: ArchiveHeader = serde_json::from_str(header_line.trim_end())?;

        let mut waveforms = Vec::with_capacity(header.pulses.len());
        let mut buf = [0u8; 8];
        for record in &header.pulses {
            let mut samples = Vec::with_capacity(record.num_samples as usize);
            for _ in 0..record.num_samples {
                reader.read_exact(&mut buf).map_err(|e| {
                    if e.kind() == std::io::ErrorKind::UnexpectedEof {
                        PulseError::MalformedArchive(format!(
                            "payload truncated in pulse '{}'",
                            record.name
                        ))
                    } else {
                        PulseError::Io(e)
                    }
                })?;
                samples.push(f64::from_le_bytes(buf));
            }
            waveforms.push((record.name.clone(), samples));
        }

        Ok(Self { header, waveforms })
    }

    /// Samples for a named pulse, if present.
    pub fn waveform(&self, name: &str) -> Option<&[Sample]> {
        self.waveforms
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, s)| s.as_slice())
    }
}
