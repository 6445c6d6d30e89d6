//! Position/velocity pair produced by ephemeris interpolation.
//!
//! Units
//! -----------------
//! Record-level interpolation yields kilometers and kilometers per day (the
//! units the Chebyshev coefficients are stored in). The public
//! [`compute`](crate::ephemeris::file::EphemerisFile::compute) surface
//! converts outward with [`StateVector::to_au`] using the file's `AU`
//! constant, giving AU and AU/day.
//!
//! Arithmetic semantics
//! -----------------
//! Addition and subtraction are component-wise on both fields; scalar
//! multiplication and division scale both fields. Frame corrections and the
//! Earth/Moon barycenter split are expressed entirely through these
//! operators.

use nalgebra::Vector3;
use std::ops::{Add, Div, Mul, Sub};

/// Cartesian state of a body at one epoch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateVector {
    /// Position (km, or AU after [`StateVector::to_au`]).
    pub position: Vector3<f64>,
    /// Velocity (km/day, or AU/day after [`StateVector::to_au`]).
    pub velocity: Vector3<f64>,
}

impl StateVector {
    pub fn zeros() -> Self {
        StateVector {
            position: Vector3::zeros(),
            velocity: Vector3::zeros(),
        }
    }

    /// Convert a km-based state to AU-based units.
    ///
    /// Arguments
    /// ---------
    /// * `au_km`: length of one astronomical unit in kilometers (the file's
    ///   `AU` constant)
    ///
    /// Return
    /// ------
    /// * the same state expressed in AU and AU/day
    #[must_use = "`.to_au()` returns a new StateVector; assign or use it"]
    pub fn to_au(&self, au_km: f64) -> Self {
        self / au_km
    }

    /// True when every component of both fields is finite.
    pub fn is_finite(&self) -> bool {
        self.position.iter().all(|c| c.is_finite()) && self.velocity.iter().all(|c| c.is_finite())
    }
}

impl Add for StateVector {
    type Output = Self;

    fn add(self, other: Self) -> Self::Output {
        StateVector {
            position: self.position + other.position,
            velocity: self.velocity + other.velocity,
        }
    }
}

impl Sub for StateVector {
    type Output = Self;

    fn sub(self, other: Self) -> Self::Output {
        StateVector {
            position: self.position - other.position,
            velocity: self.velocity - other.velocity,
        }
    }
}

impl Mul<f64> for StateVector {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self::Output {
        StateVector {
            position: self.position * rhs,
            velocity: self.velocity * rhs,
        }
    }
}

impl Div<f64> for StateVector {
    type Output = Self;

    fn div(self, rhs: f64) -> Self::Output {
        StateVector {
            position: self.position / rhs,
            velocity: self.velocity / rhs,
        }
    }
}

impl Div<f64> for &StateVector {
    type Output = StateVector;

    fn div(self, rhs: f64) -> Self::Output {
        StateVector {
            position: self.position / rhs,
            velocity: self.velocity / rhs,
        }
    }
}
