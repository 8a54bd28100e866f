//! Waveform fitted to measured `(t, i)` samples.

use crate::source::{CurrentSource, WaveformError};
use crate::spline::CubicSpline;

/// Spline-interpolated current record on `[tmin, tmax]`.
///
/// Current and derivative vanish outside the open interval `(tmin, tmax)`.
/// The integral does not: it runs from `tmin` to `clamp(t, tmin, tmax)`, so
/// after the record ends it holds the total transported charge.
#[derive(Debug, Clone)]
pub struct SplineWaveform {
    spline: CubicSpline,
    tmin: f64,
    tmax: f64,
}

impl SplineWaveform {
    /// Fit a natural cubic spline through the samples.
    pub fn new(times: Vec<f64>, currents: Vec<f64>) -> Result<Self, WaveformError> {
        if times.len() != currents.len() {
            return Err(WaveformError::ShapeMismatch {
                times: times.len(),
                currents: currents.len(),
            });
        }
        if times.len() < 2 {
            return Err(WaveformError::TooFewSamples { required: 2, found: times.len() });
        }
        if let Some(index) = (1..times.len()).find(|&i| !(times[i] > times[i - 1])) {
            return Err(WaveformError::NotIncreasing { index });
        }

        let spline = CubicSpline::new(times, currents);
        let tmin = spline.x_min();
        let tmax = spline.x_max();
        Ok(Self { spline, tmin, tmax })
    }

    /// First sample time.
    pub fn tmin(&self) -> f64 {
        self.tmin
    }

    /// Last sample time.
    pub fn tmax(&self) -> f64 {
        self.tmax
    }

    fn inside(&self, t: f64) -> bool {
        self.tmin < t && t < self.tmax
    }
}

impl CurrentSource for SplineWaveform {
    fn current(&self, t: f64) -> f64 {
        if self.inside(t) {
            self.spline.evaluate(t)
        } else {
            0.0
        }
    }

    fn derivative(&self, t: f64) -> f64 {
        if self.inside(t) {
            self.spline.derivative(t)
        } else {
            0.0
        }
    }

    fn integral(&self, t: f64) -> f64 {
        self.spline.integrate(self.tmin, t.clamp(self.tmin, self.tmax))
    }
}
