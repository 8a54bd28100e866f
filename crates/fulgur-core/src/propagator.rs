//! Time-independent geometry of the dipole field.
//!
//! For a current element $\mathbf{l}\,i(t)$ observed at distance $\rho$ along
//! the unit vector $\hat{\mathbf{n}}$, the electric field is
//!
//! $$
//! \mathbf{E} = \frac{1}{4\pi\epsilon_0}\left[
//!   \frac{3\hat{\mathbf{n}}\hat{\mathbf{n}}^T - \mathbf{I}}{\rho^3}\,\mathbf{l}\,q(t')
//! + \frac{3\hat{\mathbf{n}}\hat{\mathbf{n}}^T - \mathbf{I}}{c\rho^2}\,\mathbf{l}\,i(t')
//! + \frac{\hat{\mathbf{n}}\hat{\mathbf{n}}^T - \mathbf{I}}{c^2\rho}\,\mathbf{l}\,\frac{di}{dt}(t')
//! \right]
//! $$
//!
//! with $q = \int i\,dt$ and $t' = t - \tau - \rho/c$. Only $q$, $i$ and
//! $di/dt$ depend on time, so the three matrix–vector products and the delay
//! are computed once per (dipole, observer) pair and reused for every sample.

use crate::constants::{COULOMB, SPEED_OF_LIGHT};
use crate::dipole::Dipole;
use crate::types::{Tensor3x3, Vec3};

/// The three regime tensors for one source/observer pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalFactors {
    pub electrostatic: Tensor3x3,
    pub induction: Tensor3x3,
    pub radiation: Tensor3x3,
    /// Source-to-observer distance ρ (m).
    pub distance: f64,
}

/// Compute the regime tensors from `dipole` to `observer`.
///
/// The observer must not coincide with the dipole position: at $\rho = 0$ the
/// result is non-finite. This is not checked.
pub fn directional_factors(dipole: &Dipole, observer: &Vec3) -> DirectionalFactors {
    let r = observer - dipole.position;
    let rho = r.norm();
    let n_hat = r / rho;

    let nn = n_hat * n_hat.transpose();
    let identity = Tensor3x3::identity();
    let near = nn * 3.0 - identity;
    let far = nn - identity;

    let rho2 = rho * rho;
    DirectionalFactors {
        electrostatic: near * (COULOMB / (rho2 * rho)),
        induction: near * (COULOMB / (rho2 * SPEED_OF_LIGHT)),
        radiation: far * (COULOMB / (rho * SPEED_OF_LIGHT * SPEED_OF_LIGHT)),
        distance: rho,
    }
}

/// Cached geometry for one (dipole, observer) pair.
///
/// `Default` yields an all-zero placeholder so callers can preallocate a
/// cache buffer that the engine later overwrites.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Propagator {
    /// Electrostatic tensor applied to the dipole length vector.
    pub electrostatic: Vec3,
    /// Induction tensor applied to the dipole length vector.
    pub induction: Vec3,
    /// Radiation tensor applied to the dipole length vector.
    pub radiation: Vec3,
    /// Light-speed travel time from dipole to observer (s).
    pub delay: f64,
}

impl Propagator {
    pub fn new(dipole: &Dipole, observer: &Vec3) -> Self {
        let f = directional_factors(dipole, observer);
        Self {
            electrostatic: f.electrostatic * dipole.length,
            induction: f.induction * dipole.length,
            radiation: f.radiation * dipole.length,
            delay: f.distance / SPEED_OF_LIGHT,
        }
    }
}
