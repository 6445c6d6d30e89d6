//! Julian-date time values, calendar dates and sidereal time.
//!
//! [`Time`] wraps a UTC Julian Date scalar and derives the two quantities the
//! ephemeris side of the crate needs: the Julian Ephemeris Date (the same
//! instant on the dynamical ET/TDB scale, via hifitime's leap-second and
//! TT-offset machinery) and the Greenwich sidereal time. [`Date`] is the
//! calendar decomposition of a Julian Date for a given UTC-offset zone.

use std::fmt;

use hifitime::{Epoch, TimeScale};

use crate::constants::{
    JulianDate, JulianEphemerisDate, Radian, DPI, JDTOMJD, MJD, T2000,
};

/// Compute the Greenwich Mean Sidereal Time (GMST) in radians
/// for a given Modified Julian Date (UT1 time scale).
///
/// This function implements the IAU 1982/2000 polynomial formula
/// for the mean sidereal time at 0h UT1, plus the fractional-day
/// correction term due to Earth's rotation rate.
///
/// # Arguments
/// * `tjm` - Modified Julian Date (MJD, UT1 time scale)
///
/// # Returns
/// * GMST angle in radians, normalized to the interval [0, 2π).
///
/// # References
/// * IAU 1982, IERS Conventions 1996/2000.
/// * Explanatory Supplement to the Astronomical Almanac (1992).
pub fn gmst(tjm: MJD) -> Radian {
    // Polynomial coefficients for GMST at 0h UT1 (in seconds)
    const C0: f64 = 24110.54841;
    const C1: f64 = 8640184.812866;
    const C2: f64 = 9.3104e-2;
    const C3: f64 = -6.2e-6;

    // Ratio of sidereal day to solar day
    const RAP: f64 = 1.00273790934;

    // Extract the integer MJD (0h UT1) and compute centuries since J2000.0
    let itjm = tjm.floor();
    let t = (itjm - T2000) / 36525.0;

    // GMST at 0h UT1 using the polynomial expression
    let mut gmst0 = ((C3 * t + C2) * t + C1) * t + C0;

    // Convert GMST from seconds to radians (86400 seconds per day)
    gmst0 *= DPI / 86400.0;

    // Add the rotation during the fractional day, scaled by the
    // solar-to-sidereal day ratio
    let h = tjm.fract() * DPI;
    let mut gmst = gmst0 + h * RAP;

    // Normalize GMST to the [0, 2π) range
    let mut i: i64 = (gmst / DPI).floor() as i64;
    if gmst < 0.0 {
        i -= 1;
    }
    gmst -= i as f64 * DPI;

    gmst
}

/// An instant as a UTC Julian Date scalar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Time {
    /// Julian Date on the UTC scale.
    pub jd: JulianDate,
}

impl Time {
    pub fn from_julian_date(jd: JulianDate) -> Self {
        Time { jd }
    }

    /// Current instant from the system clock.
    ///
    /// Panics if the system clock cannot be read.
    pub fn from_system() -> Self {
        let epoch = Epoch::now().expect("system clock unavailable");
        Time {
            jd: epoch.to_jde_utc_days(),
        }
    }

    /// The same instant as a Julian Ephemeris Date, i.e. on the dynamical
    /// (ET/TDB) time scale used by planetary ephemerides.
    ///
    /// The correction applied on top of the UTC Julian Date is
    /// time-dependent: accumulated leap seconds, the fixed TT offset and the
    /// periodic TDB terms, all handled by hifitime.
    pub fn julian_ephemeris_date(&self) -> JulianEphemerisDate {
        Epoch::from_jde_utc(self.jd).to_jde_et_days()
    }

    /// Greenwich sidereal time plus an east-longitude offset, in [0, 2π).
    ///
    /// Arguments
    /// ---------
    /// * `longitude`: site longitude in radians, positive east of Greenwich
    ///
    /// Return
    /// ------
    /// * the local mean sidereal time in [0, 2π)
    ///
    /// The Julian Date is treated as UT1 for Earth-rotation purposes, as in
    /// [`gmst`].
    pub fn sidereal_time(&self, longitude: Radian) -> Radian {
        crate::angle::mod2pi(gmst(self.jd - JDTOMJD) + longitude)
    }

    /// Calendar decomposition for a given UTC-offset zone (hours east).
    pub fn to_date(&self, zone: f64) -> Date {
        Date::from_julian_date(self.jd, zone)
    }
}

/// A calendar date with a UTC-offset zone.
///
/// `day` carries the fractional day matching `hour`/`minute`/`second`; the
/// recomposition [`Date::to_julian_date`] uses the whole-day part together
/// with the time fields. Calendar is proleptic Gregorian.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Date {
    pub year: i32,
    pub month: u8,
    pub day: f64,
    pub hour: u8,
    pub minute: u8,
    pub second: f64,
    /// UTC offset in hours, positive east.
    pub zone: f64,
}

impl Date {
    /// Decompose a Julian Date into local calendar fields.
    ///
    /// Arguments
    /// ---------
    /// * `jd`: Julian Date, UTC scale
    /// * `zone`: UTC offset in hours, positive east
    pub fn from_julian_date(jd: JulianDate, zone: f64) -> Self {
        let local = Epoch::from_jde_utc(jd + zone / 24.0);
        let (year, month, day, hour, minute, second, nanos) = local.to_gregorian_utc();
        let second = second as f64 + nanos as f64 * 1e-9;
        let day_fraction = (hour as f64 + minute as f64 / 60.0 + second / 3600.0) / 24.0;

        Date {
            year,
            month,
            day: day as f64 + day_fraction,
            hour,
            minute,
            second,
            zone,
        }
    }

    /// Recompose the Julian Date (UTC scale) from the calendar fields.
    pub fn to_julian_date(&self) -> JulianDate {
        let whole_seconds = self.second.trunc();
        let nanos = ((self.second - whole_seconds) * 1e9) as u32;

        let local = Epoch::from_gregorian(
            self.year,
            self.month,
            self.day.trunc() as u8,
            self.hour,
            self.minute,
            whole_seconds as u8,
            nanos,
            TimeScale::UTC,
        );

        local.to_jde_utc_days() - self.zone / 24.0
    }
}

impl fmt::Display for Date {
    /// `2000-01-01 12:00:00.000 (UTC+0)`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:06.3} (UTC{:+})",
            self.year,
            self.month,
            self.day.trunc() as u8,
            self.hour,
            self.minute,
            self.second,
            self.zone
        )
    }
}
