//! Time-domain field accumulation over transmission lines.
//!
//! The field at observation time $t$ is the superposition
//!
//! $$
//! \mathbf{E}(t) = \sum_j w_j \bigl[
//!   q(t'_j)\,\mathbf{v}^{s}_j + i(t'_j)\,\mathbf{v}^{i}_j + \tfrac{di}{dt}(t'_j)\,\mathbf{v}^{r}_j
//! \bigr], \qquad t'_j = t - \tau_j - \rho_j / c
//! $$
//!
//! where the $\mathbf{v}_j$ come from the cached [`Propagator`] of dipole $j$.
//! Building propagators costs $O(D)$; the accumulation itself is
//! $O(D \times T)$ with no allocation in the inner loop.

use fulgur_waveforms::CurrentSource;

use crate::dipole::Dipole;
use crate::error::FieldError;
use crate::line::TransmissionLine;
use crate::propagator::Propagator;
use crate::types::{FieldComponents, Vec3};

/// Field of a single dipole at observation time `t`.
///
/// Before the retarded time reaches the pulse onset every waveform returns
/// zero, so the contribution is exactly zero (causality).
pub fn remote_field(dipole: &Dipole, propagator: &Propagator, t: f64) -> FieldComponents {
    let retarded = t - dipole.delay - propagator.delay;
    let w = dipole.attenuation;
    let waveform = &*dipole.waveform;
    FieldComponents {
        electrostatic: propagator.electrostatic * (w * waveform.integral(retarded)),
        induction: propagator.induction * (w * waveform.current(retarded)),
        radiation: propagator.radiation * (w * waveform.derivative(retarded)),
    }
}

/// Build one propagator per dipole of `line` towards `observer`.
pub fn build_propagators(line: &TransmissionLine, observer: &Vec3) -> Vec<Propagator> {
    line.iter().map(|d| Propagator::new(d, observer)).collect()
}

/// How the time samples are distributed over threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionMode {
    /// Single-threaded loop.
    #[default]
    Serial,
    /// Time samples partitioned across the Rayon pool, one owner per sample.
    ///
    /// Each sample still sums its dipoles in line order, so the result is
    /// bitwise identical to [`ExecutionMode::Serial`]. Falls back to serial
    /// when the `parallel` feature is disabled.
    Parallel,
}

/// Drives propagator construction and field accumulation.
#[derive(Debug, Clone, Default)]
pub struct FieldEngine {
    pub mode: ExecutionMode,
}

impl FieldEngine {
    pub fn new(mode: ExecutionMode) -> Self {
        Self { mode }
    }

    /// Add the field of `line` at `observer` into `out`, one entry per time.
    pub fn accumulate(
        &self,
        out: &mut [FieldComponents],
        line: &TransmissionLine,
        observer: &Vec3,
        times: &[f64],
    ) -> Result<(), FieldError> {
        self.accumulate_with(out, line, observer, times, |_| 1.0, None)
    }

    /// Add the weighted field of `line` at `observer` into `out`.
    ///
    /// # Arguments
    /// * `weights` - Extra factor per dipole index, multiplied onto each
    ///   contribution.
    /// * `cache` - Optional caller-owned propagator buffer. It must hold exactly
    ///   one entry per dipole and is overwritten with the propagators towards
    ///   `observer`, so the caller can reuse them afterwards.
    ///
    /// # Errors
    /// [`FieldError::ShapeMismatch`] if `out` and `times` differ in length or
    /// the cache length differs from the dipole count. Nothing is written in
    /// that case.
    pub fn accumulate_with<W>(
        &self,
        out: &mut [FieldComponents],
        line: &TransmissionLine,
        observer: &Vec3,
        times: &[f64],
        weights: W,
        cache: Option<&mut [Propagator]>,
    ) -> Result<(), FieldError>
    where
        W: Fn(usize) -> f64 + Sync,
    {
        if out.len() != times.len() {
            return Err(FieldError::ShapeMismatch {
                what: "output buffer",
                expected: times.len(),
                found: out.len(),
            });
        }

        let owned: Vec<Propagator>;
        let propagators: &[Propagator] = match cache {
            Some(cache) => {
                if cache.len() != line.len() {
                    return Err(FieldError::ShapeMismatch {
                        what: "propagator cache",
                        expected: line.len(),
                        found: cache.len(),
                    });
                }
                for (slot, dipole) in cache.iter_mut().zip(line) {
                    *slot = Propagator::new(dipole, observer);
                }
                &*cache
            }
            None => {
                owned = build_propagators(line, observer);
                owned.as_slice()
            }
        };

        log::debug!(
            "Accumulating {} dipoles x {} samples ({:?})",
            line.len(),
            times.len(),
            self.mode
        );

        let dipoles = line.dipoles();
        let add_sample = |slot: &mut FieldComponents, t: f64| {
            for (j, (dipole, propagator)) in dipoles.iter().zip(propagators).enumerate() {
                *slot += remote_field(dipole, propagator, t) * weights(j);
            }
        };

        match self.mode {
            #[cfg(feature = "parallel")]
            ExecutionMode::Parallel => {
                use rayon::prelude::*;

                out.par_iter_mut()
                    .zip(times.par_iter())
                    .for_each(|(slot, &t)| add_sample(slot, t));
            }
            _ => {
                for (slot, &t) in out.iter_mut().zip(times) {
                    add_sample(slot, t);
                }
            }
        }

        Ok(())
    }

    /// Accumulate several lines (e.g. a channel and its ground image) into the
    /// same buffer, in order.
    pub fn accumulate_lines(
        &self,
        out: &mut [FieldComponents],
        lines: &[&TransmissionLine],
        observer: &Vec3,
        times: &[f64],
    ) -> Result<(), FieldError> {
        for line in lines {
            self.accumulate(out, line, observer, times)?;
        }
        Ok(())
    }

    /// Field of `line` at `observer` for every entry of `times`.
    pub fn evaluate(
        &self,
        line: &TransmissionLine,
        observer: &Vec3,
        times: &[f64],
    ) -> Result<Vec<FieldComponents>, FieldError> {
        let mut out = vec![FieldComponents::zero(); times.len()];
        self.accumulate(&mut out, line, observer, times)?;
        Ok(out)
    }

    /// Combined field of several lines for every entry of `times`.
    pub fn evaluate_lines(
        &self,
        lines: &[&TransmissionLine],
        observer: &Vec3,
        times: &[f64],
    ) -> Result<Vec<FieldComponents>, FieldError> {
        let mut out = vec![FieldComponents::zero(); times.len()];
        self.accumulate_lines(&mut out, lines, observer, times)?;
        Ok(out)
    }
}
