use std::fmt;

use crate::astrokit_errors::AstrokitError;

/// Identifier for the bodies an ephemeris file can tabulate.
///
/// Callers address bodies by the integer IDs `0..=10`; this enum provides the
/// typed mapping between those raw integers and their physical meaning.
///
/// Conversions
/// -----------
/// * Use [`TryFrom<i64>`] to convert from a raw integer ID to a `Body`.
///   Invalid values fail with [`AstrokitError::InvalidBody`].
/// * Use [`From<Body>`] to recover the integer ID (`i64`).
///
/// See also
/// --------
/// * [`Body::layout_slot`] – where the body's coefficients live inside a
///   data record.
/// * [`EphemerisFile::compute`](crate::ephemeris::file::EphemerisFile::compute)
///   – state-vector evaluation keyed by `Body`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Body {
    Sun = 0,
    Mercury = 1,
    Venus = 2,
    Earth = 3,
    Mars = 4,
    Jupiter = 5,
    Saturn = 6,
    Uranus = 7,
    Neptune = 8,
    Pluto = 9,
    Moon = 10,
}

impl Body {
    /// Layout-table slot holding this body's Chebyshev coefficients.
    ///
    /// Data records tabulate the Earth-Moon *barycenter* (slot 2) and the
    /// *geocentric* Moon (slot 9), so `Earth` and `Moon` map to those slots
    /// and their barycentric states are recovered from both series plus the
    /// Earth-Moon mass ratio.
    pub(crate) fn layout_slot(self) -> usize {
        match self {
            Body::Mercury => 0,
            Body::Venus => 1,
            Body::Earth => 2,
            Body::Mars => 3,
            Body::Jupiter => 4,
            Body::Saturn => 5,
            Body::Uranus => 6,
            Body::Neptune => 7,
            Body::Pluto => 8,
            Body::Moon => 9,
            Body::Sun => 10,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Body::Sun => "Sun",
            Body::Mercury => "Mercury",
            Body::Venus => "Venus",
            Body::Earth => "Earth",
            Body::Mars => "Mars",
            Body::Jupiter => "Jupiter",
            Body::Saturn => "Saturn",
            Body::Uranus => "Uranus",
            Body::Neptune => "Neptune",
            Body::Pluto => "Pluto",
            Body::Moon => "Moon",
        }
    }
}

impl TryFrom<i64> for Body {
    type Error = AstrokitError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Body::Sun),
            1 => Ok(Body::Mercury),
            2 => Ok(Body::Venus),
            3 => Ok(Body::Earth),
            4 => Ok(Body::Mars),
            5 => Ok(Body::Jupiter),
            6 => Ok(Body::Saturn),
            7 => Ok(Body::Uranus),
            8 => Ok(Body::Neptune),
            9 => Ok(Body::Pluto),
            10 => Ok(Body::Moon),
            _ => Err(AstrokitError::InvalidBody(format!(
                "no body with identifier {value}"
            ))),
        }
    }
}

impl From<Body> for i64 {
    fn from(body: Body) -> Self {
        body as i64
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Reference point of a computed state vector.
///
/// Replaces a boolean "relative" flag: the reference body is named
/// explicitly, which keeps the subtraction path self-documenting and lets
/// [`compute`](crate::ephemeris::file::EphemerisFile::compute) reject a
/// reference equal to the target before touching the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// State relative to the solar-system barycenter, as tabulated.
    Barycentric,
    /// State relative to another body's barycentric state at the same epoch.
    BodyRelative(Body),
}
