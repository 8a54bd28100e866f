//! Elementary current segments.

use std::fmt;
use std::sync::Arc;

use fulgur_waveforms::CurrentWaveform;

use crate::types::Vec3;

/// A short straight segment carrying a delayed, attenuated copy of a baseline
/// current pulse.
///
/// The waveform is shared: every dipole produced by one line build points at
/// the same allocation.
#[derive(Clone)]
pub struct Dipole {
    /// Segment midpoint (m).
    pub position: Vec3,
    /// Segment length vector, oriented along the current (m).
    pub length: Vec3,
    /// Attenuation factor applied to the baseline current.
    pub attenuation: f64,
    /// Arrival delay of the current front at this segment (s).
    pub delay: f64,
    /// Baseline current pulse.
    pub waveform: Arc<CurrentWaveform>,
}

impl Dipole {
    pub fn new(
        position: Vec3,
        length: Vec3,
        attenuation: f64,
        delay: f64,
        waveform: Arc<CurrentWaveform>,
    ) -> Self {
        Self {
            position,
            length,
            attenuation,
            delay,
            waveform,
        }
    }

    /// Mirror image across the horizontal plane at height `z`.
    ///
    /// Models a perfectly conducting ground: the horizontal current components
    /// flip sign, the vertical one is kept, and the position is reflected.
    pub fn image(&self, z: f64) -> Self {
        Self {
            position: Vec3::new(self.position.x, self.position.y, 2.0 * z - self.position.z),
            length: Vec3::new(-self.length.x, -self.length.y, self.length.z),
            attenuation: self.attenuation,
            delay: self.delay,
            waveform: Arc::clone(&self.waveform),
        }
    }
}

impl PartialEq for Dipole {
    fn eq(&self, other: &Self) -> bool {
        self.position == other.position
            && self.length == other.length
            && self.attenuation == other.attenuation
            && self.delay == other.delay
            && Arc::ptr_eq(&self.waveform, &other.waveform)
    }
}

impl fmt::Debug for Dipole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dipole")
            .field("position", &[self.position.x, self.position.y, self.position.z])
            .field("length", &[self.length.x, self.length.y, self.length.z])
            .field("attenuation", &self.attenuation)
            .field("delay", &self.delay)
            .field("waveform", &self.waveform.kind())
            .finish()
    }
}
