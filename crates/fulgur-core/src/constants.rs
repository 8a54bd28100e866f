//! Physical constants (SI, CODATA 2018).

use std::f64::consts::PI;

/// Vacuum permittivity ε₀ (F/m).
pub const VACUUM_PERMITTIVITY: f64 = 8.854_187_812_8e-12;

/// Speed of light in vacuum c (m/s). Exact by SI definition.
pub const SPEED_OF_LIGHT: f64 = 299_792_458.0;

/// Coulomb prefactor 1 / (4π ε₀) (m/F).
pub const COULOMB: f64 = 1.0 / (4.0 * PI * VACUUM_PERMITTIVITY);
