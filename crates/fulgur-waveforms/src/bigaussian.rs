//! Closed-form bi-Gaussian current pulse.
//!
//! $$
//! i(t) = I_0 \left( e^{-t^2/\tau_1^2} - e^{-t^2/\tau_2^2} \right), \quad t > 0
//! $$
//!
//! With $\tau_1 > \tau_2$ the pulse rises on the $\tau_2$ scale and decays on
//! the $\tau_1$ scale. Current, derivative and charge are all analytic, so
//! this variant carries no discretisation error.

use std::f64::consts::PI;

use statrs::function::erf::erf;

use crate::source::{positive, CurrentSource, WaveformError};

/// Analytic bi-Gaussian pulse, zero for $t \le 0$.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BiGaussian {
    /// Amplitude $I_0$ (A).
    pub i0: f64,
    /// Decay scale $\tau_1$ (s).
    pub tau1: f64,
    /// Rise scale $\tau_2$ (s).
    pub tau2: f64,
}

impl BiGaussian {
    /// Create a pulse, rejecting non-finite amplitudes and non-positive scales.
    pub fn new(i0: f64, tau1: f64, tau2: f64) -> Result<Self, WaveformError> {
        if !i0.is_finite() {
            return Err(WaveformError::InvalidParameter { name: "i0", value: i0 });
        }
        Ok(Self {
            i0,
            tau1: positive("tau1", tau1)?,
            tau2: positive("tau2", tau2)?,
        })
    }
}

impl CurrentSource for BiGaussian {
    fn current(&self, t: f64) -> f64 {
        if t <= 0.0 {
            return 0.0;
        }
        let t2 = t * t;
        self.i0 * ((-t2 / (self.tau1 * self.tau1)).exp() - (-t2 / (self.tau2 * self.tau2)).exp())
    }

    fn derivative(&self, t: f64) -> f64 {
        if t <= 0.0 {
            return 0.0;
        }
        let t2 = t * t;
        let s1 = self.tau1 * self.tau1;
        let s2 = self.tau2 * self.tau2;
        2.0 * self.i0 * t * ((-t2 / s2).exp() / s2 - (-t2 / s1).exp() / s1)
    }

    fn integral(&self, t: f64) -> f64 {
        if t <= 0.0 {
            return 0.0;
        }
        0.5 * PI.sqrt() * self.i0 * (self.tau1 * erf(t / self.tau1) - self.tau2 * erf(t / self.tau2))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn pulse() -> BiGaussian {
        BiGaussian::new(10e3, 20e-6, 2e-6).unwrap()
    }

    #[test]
    fn test_zero_before_onset() {
        let p = pulse();
        for &t in &[0.0, -1e-9, -1.0, -1e6] {
            assert_eq!(p.current(t), 0.0);
            assert_eq!(p.derivative(t), 0.0);
            assert_eq!(p.integral(t), 0.0);
        }
    }

    #[test]
    fn test_integral_differentiates_to_current() {
        let p = pulse();
        for k in 1..40 {
            let t = k as f64 * 1.5e-6;
            let h = 1e-10;
            let fd = (p.integral(t + h) - p.integral(t - h)) / (2.0 * h);
            assert_relative_eq!(fd, p.current(t), max_relative = 1e-5, epsilon = 1e-3);
        }
    }

    #[test]
    fn test_derivative_matches_finite_difference() {
        let p = pulse();
        for k in 1..40 {
            let t = k as f64 * 1.5e-6;
            let h = 1e-11;
            let fd = (p.current(t + h) - p.current(t - h)) / (2.0 * h);
            assert_relative_eq!(fd, p.derivative(t), max_relative = 1e-5, epsilon = 1.0);
        }
    }

    #[test]
    fn test_total_charge_limit() {
        // erf → 1, so Q(∞) = √π/2 · I₀ · (τ₁ − τ₂)
        let p = pulse();
        let expected = 0.5 * PI.sqrt() * p.i0 * (p.tau1 - p.tau2);
        assert_relative_eq!(p.integral(1.0), expected, max_relative = 1e-12);
    }

    #[test]
    fn test_rejects_bad_scales() {
        assert!(BiGaussian::new(1.0, 0.0, 1.0).is_err());
        assert!(BiGaussian::new(1.0, 1.0, f64::NAN).is_err());
        assert!(BiGaussian::new(f64::INFINITY, 1.0, 1.0).is_err());
    }
}
