//! Spherical coordinates and direction operations on 3D vectors.
//!
//! The crate's vector type is [`nalgebra::Vector3<f64>`]; arithmetic,
//! dot/cross products, norms and distances come from nalgebra directly. This
//! module adds what nalgebra does not cover:
//!
//! * [`Spherical`] (longitude, latitude, radial distance) and its conversions
//!   to and from Cartesian vectors,
//! * a fallible [`unit_vector`] with an explicit zero-magnitude policy,
//! * [`angular_separation`] and [`position_angle`] between directions,
//!   invariant to uniform scaling of either input.
//!
//! Separation uses the normalized dot product clamped to [-1, 1] before the
//! inverse cosine, so antipodal and coincident directions stay inside the
//! `acos` domain. Position angle is measured from celestial north through
//! east; from a pole every direction is south/north and the returned angle
//! degenerates to a longitude-dependent value, which is the standard
//! convention rather than an error.

use nalgebra::Vector3;

use crate::angle::atan2pi;
use crate::astrokit_errors::AstrokitError;
use crate::constants::Radian;

/// A point in spherical coordinates.
///
/// Fields
/// ------
/// * `lon`: longitude-like angle in radians, conventionally in [0, 2π)
/// * `lat`: latitude-like angle in radians, in [-π/2, π/2]
/// * `rad`: radial distance, same unit as the Cartesian vectors it maps to
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spherical {
    pub lon: Radian,
    pub lat: Radian,
    pub rad: f64,
}

impl Spherical {
    pub fn new(lon: Radian, lat: Radian, rad: f64) -> Self {
        Spherical { lon, lat, rad }
    }

    /// Convert to a Cartesian vector (unit sphere scaled by `rad`).
    pub fn to_vector(&self) -> Vector3<f64> {
        let (sin_lon, cos_lon) = self.lon.sin_cos();
        let (sin_lat, cos_lat) = self.lat.sin_cos();
        Vector3::new(
            self.rad * cos_lat * cos_lon,
            self.rad * cos_lat * sin_lon,
            self.rad * sin_lat,
        )
    }

    /// Convert a Cartesian vector to spherical coordinates.
    ///
    /// The longitude is wrapped into [0, 2π). The zero vector maps to the
    /// all-zero `Spherical`; the fallible policy for zero-magnitude input
    /// lives on [`unit_vector`], not here.
    pub fn from_vector(v: &Vector3<f64>) -> Self {
        let rad = v.norm();
        if rad == 0.0 {
            return Spherical::new(0.0, 0.0, 0.0);
        }
        let lat = (v.z / rad).clamp(-1.0, 1.0).asin();
        let lon = atan2pi(v.y, v.x);
        Spherical::new(lon, lat, rad)
    }

    /// Great-circle separation between this direction and `other`, ignoring
    /// both radial distances.
    pub fn angular_separation(&self, other: &Spherical) -> Radian {
        let a = Spherical::new(self.lon, self.lat, 1.0).to_vector();
        let b = Spherical::new(other.lon, other.lat, 1.0).to_vector();
        a.dot(&b).clamp(-1.0, 1.0).acos()
    }

    /// Position angle of `other` as seen from this direction, measured from
    /// north through east, in [0, 2π).
    pub fn position_angle(&self, other: &Spherical) -> Radian {
        let dlon = other.lon - self.lon;
        let eta = other.lat.cos() * dlon.sin();
        let xi = self.lat.cos() * other.lat.sin() - self.lat.sin() * other.lat.cos() * dlon.cos();
        atan2pi(eta, xi)
    }
}

/// Normalize a vector to unit magnitude.
///
/// Arguments
/// ---------
/// * `v`: the vector to normalize
///
/// Return
/// ------
/// * the unit vector, or [`AstrokitError::DegenerateVector`] when the
///   magnitude is zero (the input is never silently returned)
pub fn unit_vector(v: &Vector3<f64>) -> Result<Vector3<f64>, AstrokitError> {
    v.try_normalize(0.0).ok_or(AstrokitError::DegenerateVector)
}

/// Angular separation between two directions given as vectors.
///
/// Invariant to uniform scaling of either input; fails with
/// [`AstrokitError::DegenerateVector`] when either vector has zero magnitude.
pub fn angular_separation(a: &Vector3<f64>, b: &Vector3<f64>) -> Result<Radian, AstrokitError> {
    let ua = unit_vector(a)?;
    let ub = unit_vector(b)?;
    Ok(ua.dot(&ub).clamp(-1.0, 1.0).acos())
}

/// Position angle of direction `b` as seen from direction `a`, measured from
/// north through east, in [0, 2π).
///
/// Both vectors are projected onto the sphere first, so the result is
/// invariant to uniform scaling; a zero-magnitude input fails with
/// [`AstrokitError::DegenerateVector`].
pub fn position_angle(a: &Vector3<f64>, b: &Vector3<f64>) -> Result<Radian, AstrokitError> {
    if a.norm() == 0.0 || b.norm() == 0.0 {
        return Err(AstrokitError::DegenerateVector);
    }
    let sa = Spherical::from_vector(a);
    let sb = Spherical::from_vector(b);
    Ok(sa.position_angle(&sb))
}
