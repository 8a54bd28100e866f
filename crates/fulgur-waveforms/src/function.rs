//! Waveform backed by an arbitrary scalar function.
//!
//! The function is sampled once on a grid of step `dt` over `[mint, maxt]`
//! (the last interval is shortened so the grid ends exactly at `maxt`) and the
//! running trapezoid integral is stored as a lookup table. Current and
//! derivative are evaluated from the function itself; only the charge goes
//! through the table, with $O(\Delta t^2)$ error.

use std::fmt;

use crate::integrate::{cumulative_trapezoid, interpolate_linear};
use crate::source::{positive, CurrentSource, WaveformError};

/// Upper bound on the number of grid intervals of the integral table.
pub const MAX_GRID_STEPS: usize = 1 << 26;

/// Boxed scalar function of time.
pub type ScalarFn = Box<dyn Fn(f64) -> f64 + Send + Sync>;

/// A current pulse defined by a closure on `[mint, maxt]`.
pub struct FunctionWaveform {
    func: ScalarFn,
    derivative: Option<ScalarFn>,
    mint: f64,
    maxt: f64,
    dt: f64,
    /// Sampling grid.
    grid: Vec<f64>,
    /// Cumulative integral of `func` on `grid`.
    table: Vec<f64>,
}

impl FunctionWaveform {
    /// Sample `func` every `dt` over `[mint, maxt]` and tabulate its integral.
    ///
    /// # Errors
    /// [`WaveformError::InvalidDomain`] if a bound is not finite, the domain
    /// is empty, `dt` is not in `(0, maxt - mint]`, or the grid would exceed
    /// [`MAX_GRID_STEPS`] intervals.
    pub fn new<F>(func: F, mint: f64, maxt: f64, dt: f64) -> Result<Self, WaveformError>
    where
        F: Fn(f64) -> f64 + Send + Sync + 'static,
    {
        let invalid = || WaveformError::InvalidDomain { min: mint, max: maxt, step: dt };
        if !(mint.is_finite() && maxt.is_finite() && dt.is_finite()) || maxt <= mint || dt <= 0.0 {
            return Err(invalid());
        }
        let span = maxt - mint;
        let ratio = span / dt;
        if dt > span || !ratio.is_finite() || ratio > MAX_GRID_STEPS as f64 {
            return Err(invalid());
        }

        // Grid points mint + k dt that do not overshoot maxt; the relative
        // slack keeps an exact endpoint like 10 / 0.01 from being dropped.
        let steps = (ratio * (1.0 + 1e-12)).floor() as usize;
        let mut grid: Vec<f64> = (0..=steps).map(|k| mint + k as f64 * dt).collect();
        // Close the grid at maxt: snap a last point that lands within
        // round-off of it, otherwise append a shorter final interval.
        let last = grid[steps];
        if maxt - last <= dt * 1e-9 {
            grid[steps] = maxt;
        } else {
            grid.push(maxt);
        }
        let samples: Vec<f64> = grid.iter().map(|&t| func(t)).collect();
        let table = cumulative_trapezoid(&grid, &samples);

        Ok(Self {
            func: Box::new(func),
            derivative: None,
            mint,
            maxt,
            dt,
            grid,
            table,
        })
    }

    /// Attach an analytic derivative, replacing the finite-difference one.
    pub fn with_derivative<D>(mut self, derivative: D) -> Self
    where
        D: Fn(f64) -> f64 + Send + Sync + 'static,
    {
        self.derivative = Some(Box::new(derivative));
        self
    }

    /// Heidler channel-base current:
    ///
    /// $$
    /// i(t) = \frac{I_0}{\eta} \frac{(t/\tau_1)^n}{1 + (t/\tau_1)^n} e^{-t/\tau_2}
    /// $$
    ///
    /// where the closed-form correction $\eta$ brings the peak close to $I_0$
    /// (exact only for large $n$). Sampled on `[0, maxt]`.
    pub fn heidler(
        i0: f64,
        tau1: f64,
        tau2: f64,
        n: f64,
        maxt: f64,
        dt: f64,
    ) -> Result<Self, WaveformError> {
        if !i0.is_finite() {
            return Err(WaveformError::InvalidParameter { name: "i0", value: i0 });
        }
        let tau1 = positive("tau1", tau1)?;
        let tau2 = positive("tau2", tau2)?;
        let n = positive("n", n)?;

        let eta = (-(tau1 / tau2) * (n * tau2 / tau1).powf(1.0 / n)).exp();
        let amp = i0 / eta;

        let current = move |t: f64| {
            if t <= 0.0 {
                return 0.0;
            }
            let x = (t / tau1).powf(n);
            amp * x / (1.0 + x) * (-t / tau2).exp()
        };
        // d/dt [x/(1+x) e^{-t/τ₂}] with x = (t/τ₁)ⁿ, dx/dt = n x / t
        let derivative = move |t: f64| {
            if t <= 0.0 {
                return 0.0;
            }
            let x = (t / tau1).powf(n);
            let decay = (-t / tau2).exp();
            let shape = x / (1.0 + x);
            let dshape = n * x / (t * (1.0 + x) * (1.0 + x));
            amp * decay * (dshape - shape / tau2)
        };

        Ok(Self::new(current, 0.0, maxt, dt)?.with_derivative(derivative))
    }

    /// Domain start.
    pub fn mint(&self) -> f64 {
        self.mint
    }

    /// Domain end.
    pub fn maxt(&self) -> f64 {
        self.maxt
    }

    /// Sampling step of the integral table.
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Fourth-order central difference of the underlying function.
    fn numeric_derivative(&self, t: f64) -> f64 {
        let h = self.dt * 1e-3;
        let f = &self.func;
        (f(t - 2.0 * h) - 8.0 * f(t - h) + 8.0 * f(t + h) - f(t + 2.0 * h)) / (12.0 * h)
    }
}

impl fmt::Debug for FunctionWaveform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionWaveform")
            .field("mint", &self.mint)
            .field("maxt", &self.maxt)
            .field("dt", &self.dt)
            .field("samples", &self.grid.len())
            .field("analytic_derivative", &self.derivative.is_some())
            .finish()
    }
}

impl CurrentSource for FunctionWaveform {
    fn current(&self, t: f64) -> f64 {
        if t <= self.mint {
            return 0.0;
        }
        (self.func)(t)
    }

    fn derivative(&self, t: f64) -> f64 {
        if t <= self.mint {
            return 0.0;
        }
        match &self.derivative {
            Some(d) => d(t),
            None => self.numeric_derivative(t),
        }
    }

    fn integral(&self, t: f64) -> f64 {
        if t <= self.mint {
            return 0.0;
        }
        interpolate_linear(&self.grid, &self.table, t.min(self.maxt))
    }
}
