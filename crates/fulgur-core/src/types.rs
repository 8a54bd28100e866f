//! Core value types shared across the engine.

use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul};

use nalgebra::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};

/// Stack-allocated 3-vector (m, or V/m for field values).
pub type Vec3 = Vector3<f64>;

/// Stack-allocated 3×3 real tensor.
pub type Tensor3x3 = Matrix3<f64>;

/// Electric field split into its three distance regimes.
///
/// - `electrostatic` decays as $1/\rho^3$ and is driven by transported charge,
/// - `induction` decays as $1/\rho^2$ and is driven by current,
/// - `radiation` decays as $1/\rho$ and is driven by the current derivative.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FieldComponents {
    pub electrostatic: Vec3,
    pub induction: Vec3,
    pub radiation: Vec3,
}

impl FieldComponents {
    pub fn new(electrostatic: Vec3, induction: Vec3, radiation: Vec3) -> Self {
        Self {
            electrostatic,
            induction,
            radiation,
        }
    }

    /// The additive identity.
    pub fn zero() -> Self {
        Self::default()
    }

    /// Total field: sum of the three regimes.
    pub fn total(&self) -> Vec3 {
        self.electrostatic + self.induction + self.radiation
    }
}

impl Add for FieldComponents {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            electrostatic: self.electrostatic + rhs.electrostatic,
            induction: self.induction + rhs.induction,
            radiation: self.radiation + rhs.radiation,
        }
    }
}

impl AddAssign for FieldComponents {
    fn add_assign(&mut self, rhs: Self) {
        self.electrostatic += rhs.electrostatic;
        self.induction += rhs.induction;
        self.radiation += rhs.radiation;
    }
}

impl Mul<f64> for FieldComponents {
    type Output = Self;

    fn mul(self, k: f64) -> Self {
        Self {
            electrostatic: self.electrostatic * k,
            induction: self.induction * k,
            radiation: self.radiation * k,
        }
    }
}

impl Mul<FieldComponents> for f64 {
    type Output = FieldComponents;

    fn mul(self, f: FieldComponents) -> FieldComponents {
        f * self
    }
}

impl Sum for FieldComponents {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), Add::add)
    }
}
