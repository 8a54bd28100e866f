//! # Fulgur Waveforms
//!
//! Current pulse shapes driving the Fulgur dipole field engine. Every shape
//! implements [`CurrentSource`](source::CurrentSource), which provides the
//! instantaneous current, its time derivative and the transported charge.
//!
//! ## Available shapes
//!
//! | Shape | Module | Accuracy |
//! |-------|--------|----------|
//! | Bi-Gaussian | [`bigaussian`] | Exact |
//! | Arbitrary function (incl. Heidler) | [`function`] | Charge is $O(\Delta t^2)$ |
//! | Measured samples | [`tabulated`] | Cubic spline |
//!
//! [`CurrentWaveform`] is the tagged union the engine stores; dispatch is a
//! plain `match` on the variant.

pub mod bigaussian;
pub mod function;
pub mod integrate;
pub mod source;
pub mod spline;
pub mod tabulated;

pub use bigaussian::BiGaussian;
pub use function::FunctionWaveform;
pub use source::{CurrentSource, WaveformError};
pub use tabulated::SplineWaveform;

/// Any supported current pulse.
#[derive(Debug)]
pub enum CurrentWaveform {
    Function(FunctionWaveform),
    BiGaussian(BiGaussian),
    Spline(SplineWaveform),
}

impl CurrentWaveform {
    /// Short identifier of the variant, used in logs and output headers.
    pub fn kind(&self) -> &'static str {
        match self {
            CurrentWaveform::Function(_) => "function",
            CurrentWaveform::BiGaussian(_) => "bigaussian",
            CurrentWaveform::Spline(_) => "spline",
        }
    }
}

impl CurrentSource for CurrentWaveform {
    fn current(&self, t: f64) -> f64 {
        match self {
            CurrentWaveform::Function(w) => w.current(t),
            CurrentWaveform::BiGaussian(w) => w.current(t),
            CurrentWaveform::Spline(w) => w.current(t),
        }
    }

    fn derivative(&self, t: f64) -> f64 {
        match self {
            CurrentWaveform::Function(w) => w.derivative(t),
            CurrentWaveform::BiGaussian(w) => w.derivative(t),
            CurrentWaveform::Spline(w) => w.derivative(t),
        }
    }

    fn integral(&self, t: f64) -> f64 {
        match self {
            CurrentWaveform::Function(w) => w.integral(t),
            CurrentWaveform::BiGaussian(w) => w.integral(t),
            CurrentWaveform::Spline(w) => w.integral(t),
        }
    }
}

impl From<FunctionWaveform> for CurrentWaveform {
    fn from(w: FunctionWaveform) -> Self {
        CurrentWaveform::Function(w)
    }
}

impl From<BiGaussian> for CurrentWaveform {
    fn from(w: BiGaussian) -> Self {
        CurrentWaveform::BiGaussian(w)
    }
}

impl From<SplineWaveform> for CurrentWaveform {
    fn from(w: SplineWaveform) -> Self {
        CurrentWaveform::Spline(w)
    }
}
