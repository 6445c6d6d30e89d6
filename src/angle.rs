//! Angle wrapping helpers and sexagesimal angle representations.
//!
//! Angles are plain `f64` radians everywhere in the crate (see the aliases in
//! [`crate::constants`]). This module adds the operations that are not plain
//! arithmetic:
//!
//! * wrapping an angle into [0, 2π) or (-π, π],
//! * the sexagesimal value types [`DegMinSec`] and [`HourMinSec`], parseable
//!   from `"±D M S.s"` / `"H M S.s"` strings and convertible to and from
//!   radians.

use std::fmt;
use std::str::FromStr;

use crate::astrokit_errors::AstrokitError;
use crate::constants::{Radian, DPI, RADEG, RADH};

/// Wrap an angle into the interval [0, 2π).
///
/// Arguments
/// ---------
/// * `angle`: angle in radians, any magnitude
///
/// Return
/// ------
/// * the equivalent angle in [0, 2π)
pub fn mod2pi(angle: Radian) -> Radian {
    let wrapped = angle.rem_euclid(DPI);
    // Rounding of a tiny negative input can land exactly on 2π
    if wrapped == DPI {
        0.0
    } else {
        wrapped
    }
}

/// Wrap an angle into the interval (-π, π].
pub fn modpi(angle: Radian) -> Radian {
    let wrapped = mod2pi(angle);
    if wrapped > std::f64::consts::PI {
        wrapped - DPI
    } else {
        wrapped
    }
}

/// Four-quadrant arctangent wrapped into [0, 2π).
///
/// `atan2` returns values in (-π, π]; celestial longitudes and position
/// angles are conventionally expressed in [0, 2π).
pub fn atan2pi(y: f64, x: f64) -> Radian {
    mod2pi(y.atan2(x))
}

/// Split a string into exactly three whitespace-separated fields.
///
/// The first field may carry a leading sign, which applies to the whole
/// magnitude. Returns the sign, the two leading integer fields and the
/// fractional seconds field.
fn parse_three_fields(s: &str) -> Result<(bool, u16, u16, f64), AstrokitError> {
    let malformed = || AstrokitError::MalformedAngleString(s.to_string());

    let parts: Vec<&str> = s.split_whitespace().collect();
    if parts.len() != 3 {
        return Err(malformed());
    }

    let negative = parts[0].starts_with('-');
    let first: u16 = parts[0]
        .trim_start_matches(['-', '+'])
        .parse()
        .map_err(|_| malformed())?;
    let minute: u16 = parts[1].parse().map_err(|_| malformed())?;
    let second: f64 = parts[2].parse().map_err(|_| malformed())?;
    if !second.is_finite() {
        return Err(malformed());
    }

    Ok((negative, first, minute, second))
}

/// An angle as sign + degrees, arcminutes and arcseconds.
///
/// The sign applies to the whole magnitude, so `-0 30 14.2` represents
/// minus half a degree and change. Values produced by
/// [`DegMinSec::from_radians`] keep `minutes` and `seconds` in [0, 60);
/// parsed values are summed as given.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DegMinSec {
    pub negative: bool,
    pub degrees: u16,
    pub minutes: u16,
    pub seconds: f64,
}

impl DegMinSec {
    pub fn new(negative: bool, degrees: u16, minutes: u16, seconds: f64) -> Self {
        DegMinSec {
            negative,
            degrees,
            minutes,
            seconds,
        }
    }

    /// Decompose an angle in radians into sign + degrees/arcminutes/arcseconds.
    ///
    /// Arguments
    /// ---------
    /// * `angle`: angle in radians
    ///
    /// Return
    /// ------
    /// * the sexagesimal decomposition, with `minutes` and `seconds` in [0, 60)
    pub fn from_radians(angle: Radian) -> Self {
        let total_degrees = (angle / RADEG).abs();
        let degrees = total_degrees.trunc();
        let minutes = (60.0 * (total_degrees - degrees)).trunc();
        let seconds = 3600.0 * (total_degrees - degrees - minutes / 60.0);

        DegMinSec {
            negative: angle < 0.0,
            degrees: degrees as u16,
            minutes: minutes as u16,
            seconds,
        }
    }

    /// Recompose the angle in radians. Exact inverse of
    /// [`DegMinSec::from_radians`] within floating rounding.
    pub fn to_radians(&self) -> Radian {
        let sign = if self.negative { -1.0 } else { 1.0 };
        sign * (self.degrees as f64 + self.minutes as f64 / 60.0 + self.seconds / 3600.0) * RADEG
    }
}

impl FromStr for DegMinSec {
    type Err = AstrokitError;

    /// Parse a `"±D M S.s"` string (e.g. `"-16 42 58.0"`).
    ///
    /// Fails with [`AstrokitError::MalformedAngleString`] on a wrong field
    /// count or a non-numeric token.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (negative, degrees, minutes, seconds) = parse_three_fields(s)?;
        Ok(DegMinSec {
            negative,
            degrees,
            minutes,
            seconds,
        })
    }
}

impl fmt::Display for DegMinSec {
    /// Canonical form with an explicit sign: `+05 13 30.0`, `-16 42 58.0`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.negative { '-' } else { '+' };
        write!(
            f,
            "{}{:02} {:02} {:04.1}",
            sign, self.degrees, self.minutes, self.seconds
        )
    }
}

/// An angle as sign + hours, minutes and seconds of time (one hour = 15°).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HourMinSec {
    pub negative: bool,
    pub hours: u16,
    pub minutes: u16,
    pub seconds: f64,
}

impl HourMinSec {
    pub fn new(negative: bool, hours: u16, minutes: u16, seconds: f64) -> Self {
        HourMinSec {
            negative,
            hours,
            minutes,
            seconds,
        }
    }

    /// Decompose an angle in radians into hours/minutes/seconds of time.
    pub fn from_radians(angle: Radian) -> Self {
        let total_hours = (angle / RADH).abs();
        let hours = total_hours.trunc();
        let minutes = (60.0 * (total_hours - hours)).trunc();
        let seconds = 3600.0 * (total_hours - hours - minutes / 60.0);

        HourMinSec {
            negative: angle < 0.0,
            hours: hours as u16,
            minutes: minutes as u16,
            seconds,
        }
    }

    /// Recompose the angle in radians. Exact inverse of
    /// [`HourMinSec::from_radians`] within floating rounding.
    pub fn to_radians(&self) -> Radian {
        let sign = if self.negative { -1.0 } else { 1.0 };
        sign * (self.hours as f64 + self.minutes as f64 / 60.0 + self.seconds / 3600.0) * RADH
    }
}

impl FromStr for HourMinSec {
    type Err = AstrokitError;

    /// Parse a `"H M S.s"` string (e.g. `"06 45 08.92"`); a leading sign on
    /// the hour field is accepted and applies to the whole magnitude.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (negative, hours, minutes, seconds) = parse_three_fields(s)?;
        Ok(HourMinSec {
            negative,
            hours,
            minutes,
            seconds,
        })
    }
}

impl fmt::Display for HourMinSec {
    /// Canonical form: `06 45 08.92`; negative angles carry a leading `-`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative {
            write!(f, "-")?;
        }
        write!(
            f,
            "{:02} {:02} {:05.2}",
            self.hours, self.minutes, self.seconds
        )
    }
}
