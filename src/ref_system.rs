//! Rotation matrices for reference-frame work.
//!
//! Frame transformations in this crate are plain [`nalgebra::Matrix3<f64>`]
//! values: identity and multiplication come from nalgebra, [`rotmt`] builds
//! the elementary rotation about one coordinate axis, and
//! [`checked_inverse`] inverts a general 3×3 matrix with an explicit
//! singularity policy. For orthonormal rotation matrices the inverse equals
//! the transpose; `checked_inverse` reproduces that to machine precision and
//! the unit tests pin it as a regression.

use nalgebra::{Matrix3, Rotation3, Vector3};

use crate::astrokit_errors::AstrokitError;
use crate::constants::Radian;

/// Determinant magnitude below which a matrix is reported as singular.
const SINGULARITY_TOL: f64 = 1e-12;

/// Elementary rotation matrix about one coordinate axis.
///
/// Arguments
/// ---------
/// * `alpha`: rotation angle in radians
/// * `k`: axis index, 0 = x, 1 = y, 2 = z
///
/// Return
/// ------
/// * the active rotation matrix about the requested axis
///
/// Panics if `k > 2`, as only axes 0–2 are valid.
pub fn rotmt(alpha: Radian, k: usize) -> Matrix3<f64> {
    let axis = match k {
        0 => Vector3::x_axis(),
        1 => Vector3::y_axis(),
        2 => Vector3::z_axis(),
        _ => panic!("**** ROTMT: invalid axis index {k} (must be 0,1,2) ****"),
    };

    Rotation3::from_axis_angle(&axis, alpha).into()
}

/// General 3×3 matrix inverse with an explicit singularity check.
///
/// Arguments
/// ---------
/// * `m`: the matrix to invert
///
/// Return
/// ------
/// * the inverse, or [`AstrokitError::SingularMatrix`] when the determinant
///   magnitude is below `1e-12`
///
/// For a rotation matrix the result equals the transpose to machine
/// precision.
pub fn checked_inverse(m: &Matrix3<f64>) -> Result<Matrix3<f64>, AstrokitError> {
    let det = m.determinant();
    if det.abs() < SINGULARITY_TOL {
        return Err(AstrokitError::SingularMatrix(det));
    }
    m.try_inverse().ok_or(AstrokitError::SingularMatrix(det))
}
