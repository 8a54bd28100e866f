//! Errors raised by line construction and field evaluation.

use fulgur_waveforms::WaveformError;
use thiserror::Error;

/// Errors that can occur while building lines or accumulating fields.
#[derive(Debug, Error, PartialEq)]
pub enum FieldError {
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("Length mismatch for {what}: expected {expected}, found {found}")]
    ShapeMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("Waveform error: {0}")]
    Waveform(#[from] WaveformError),
}
