//! Transmission-line discretisation.
//!
//! A straight channel from `r0` to `r1` is cut into `n` equal segments. The
//! current front enters at `r0` and travels at speed `v`, so segment `k`
//! (distance $s_k = kL/n$ from the injection point) sees the baseline pulse
//! delayed by $s_k / v + t_0$ and attenuated by $w_0 e^{-s_k/\lambda}$
//! (the MTLE model).

use std::sync::Arc;

use fulgur_waveforms::CurrentWaveform;

use crate::dipole::Dipole;
use crate::error::FieldError;
use crate::types::Vec3;

/// Optional line parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineOptions {
    /// Append the ground image about `z = 0` after the direct dipoles.
    pub mirror: bool,
    /// Attenuation at the injection point.
    pub w0: f64,
    /// Delay at the injection point (s).
    pub t0: f64,
}

impl Default for LineOptions {
    fn default() -> Self {
        Self {
            mirror: false,
            w0: 1.0,
            t0: 0.0,
        }
    }
}

/// An ordered, immutable sequence of dipoles.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TransmissionLine {
    dipoles: Vec<Dipole>,
}

impl TransmissionLine {
    /// Wrap an explicit dipole list.
    pub fn from_dipoles(dipoles: Vec<Dipole>) -> Self {
        Self { dipoles }
    }

    /// Discretise the straight segment `r0 → r1` into `n` dipoles.
    ///
    /// # Arguments
    /// * `waveform` - Baseline current shared by every dipole.
    /// * `v` - Front propagation speed (m/s), finite and positive.
    /// * `lambda` - Attenuation length (m); `f64::INFINITY` disables decay.
    /// * `n` - Number of segments, at least one.
    pub fn build(
        waveform: Arc<CurrentWaveform>,
        r0: Vec3,
        r1: Vec3,
        v: f64,
        lambda: f64,
        n: usize,
        options: LineOptions,
    ) -> Result<Self, FieldError> {
        if n == 0 {
            return Err(FieldError::InvalidGeometry(
                "a line needs at least one segment".into(),
            ));
        }
        if !(v.is_finite() && v > 0.0) {
            return Err(FieldError::InvalidGeometry(format!(
                "propagation speed must be finite and positive, got {}",
                v
            )));
        }
        if lambda.is_nan() || lambda <= 0.0 {
            return Err(FieldError::InvalidGeometry(format!(
                "attenuation length must be positive, got {}",
                lambda
            )));
        }

        let span = r1 - r0;
        let total_length = span.norm();
        let segment = span / n as f64;
        let step = total_length / n as f64;

        let mut dipoles = Vec::with_capacity(if options.mirror { 2 * n } else { n });
        for k in 0..n {
            let s = k as f64 * step;
            let position = r0 + segment * (k as f64 + 0.5);
            // s / ∞ = 0, so an infinite lambda leaves w = w0.
            let attenuation = options.w0 * (-s / lambda).exp();
            let delay = s / v + options.t0;
            dipoles.push(Dipole::new(
                position,
                segment,
                attenuation,
                delay,
                Arc::clone(&waveform),
            ));
        }

        if options.mirror {
            let images: Vec<Dipole> = dipoles.iter().map(|d| d.image(0.0)).collect();
            dipoles.extend(images);
        }

        log::debug!(
            "Built line of {} dipoles ({} segments, L = {:.3} m, mirror = {})",
            dipoles.len(),
            n,
            total_length,
            options.mirror
        );

        Ok(Self { dipoles })
    }

    /// Mirror every dipole across the horizontal plane at height `z`.
    pub fn image(&self, z: f64) -> Self {
        Self {
            dipoles: self.dipoles.iter().map(|d| d.image(z)).collect(),
        }
    }

    /// This line followed by `other`.
    pub fn concat(&self, other: &TransmissionLine) -> Self {
        let mut dipoles = Vec::with_capacity(self.len() + other.len());
        dipoles.extend_from_slice(&self.dipoles);
        dipoles.extend_from_slice(&other.dipoles);
        Self { dipoles }
    }

    pub fn dipoles(&self) -> &[Dipole] {
        &self.dipoles
    }

    pub fn len(&self) -> usize {
        self.dipoles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dipoles.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Dipole> {
        self.dipoles.iter()
    }
}

impl<'a> IntoIterator for &'a TransmissionLine {
    type Item = &'a Dipole;
    type IntoIter = std::slice::Iter<'a, Dipole>;

    fn into_iter(self) -> Self::IntoIter {
        self.dipoles.iter()
    }
}
