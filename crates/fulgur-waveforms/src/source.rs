//! Current source trait and waveform errors.
//!
//! Every pulse shape implements [`CurrentSource`], which exposes the three
//! quantities the field engine consumes: the instantaneous current, its time
//! derivative and its running time integral (the transported charge).

use thiserror::Error;

/// Errors raised while constructing a waveform.
#[derive(Debug, Error, PartialEq)]
pub enum WaveformError {
    #[error("Invalid time domain [{min}, {max}] with step {step}")]
    InvalidDomain { min: f64, max: f64, step: f64 },

    #[error("Sample arrays differ in length: {times} times, {currents} currents")]
    ShapeMismatch { times: usize, currents: usize },

    #[error("At least {required} samples are needed, got {found}")]
    TooFewSamples { required: usize, found: usize },

    #[error("Sample times must be strictly increasing (index {index})")]
    NotIncreasing { index: usize },

    #[error("Invalid parameter '{name}' = {value}")]
    InvalidParameter { name: &'static str, value: f64 },
}

/// A current pulse evaluated in the time domain.
///
/// All three methods return zero before the pulse starts. The spline variant
/// is the one exception for [`integral`](CurrentSource::integral), which
/// saturates at its total charge past the end of the data.
pub trait CurrentSource: Send + Sync {
    /// Instantaneous current $i(t)$ (A).
    fn current(&self, t: f64) -> f64;

    /// Time derivative $\mathrm{d}i/\mathrm{d}t$ (A/s).
    fn derivative(&self, t: f64) -> f64;

    /// Transported charge $\int_{-\infty}^{t} i(s)\,\mathrm{d}s$ (C).
    fn integral(&self, t: f64) -> f64;
}

/// Reject non-finite or non-positive scalar parameters.
pub(crate) fn positive(name: &'static str, value: f64) -> Result<f64, WaveformError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(WaveformError::InvalidParameter { name, value })
    }
}
