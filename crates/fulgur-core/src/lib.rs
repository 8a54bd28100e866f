//! # Fulgur Core
//!
//! Time-domain electric field of a current pulse travelling along a
//! transmission-line channel (e.g. a lightning return stroke), computed by
//! superposing the fields of many short dipole segments.
//!
//! ## Architecture
//!
//! A [`line::TransmissionLine`] is an ordered list of [`dipole::Dipole`]s that
//! share one baseline [`CurrentWaveform`](fulgur_waveforms::CurrentWaveform).
//! For a given observer the [`engine::FieldEngine`] builds one
//! [`propagator::Propagator`] per dipole (geometry only, computed once) and
//! then sums retarded, attenuated contributions into a caller-owned buffer of
//! [`types::FieldComponents`], one per time sample.
//!
//! ## Modules
//!
//! - [`types`] — `FieldComponents` and fixed-size vector aliases.
//! - [`dipole`] — Current segments and their ground images.
//! - [`line`] — MTLE line discretisation.
//! - [`propagator`] — Electrostatic / induction / radiation geometry.
//! - [`engine`] — Field accumulation over times and lines.
//! - [`constants`] — Physical constants.

pub mod constants;
pub mod dipole;
pub mod engine;
pub mod error;
pub mod line;
pub mod propagator;
pub mod types;

pub use dipole::Dipole;
pub use engine::{remote_field, ExecutionMode, FieldEngine};
pub use error::FieldError;
pub use line::{LineOptions, TransmissionLine};
pub use propagator::{directional_factors, DirectionalFactors, Propagator};
pub use types::{FieldComponents, Tensor3x3, Vec3};
