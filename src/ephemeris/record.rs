//! Data records: packed Chebyshev coefficient blocks and their evaluation.
//!
//! A record is `record_size / 8` little-endian f64 words: its covered span
//! (start and end JED) followed by the per-body coefficient blocks described
//! by the header's layout table. Within a record each populated body has
//! `nsub` equal time sub-intervals, each holding `ncoeff` coefficients per
//! axis; [`CoefficientRecord::body_state`] selects the sub-interval covering
//! the requested epoch and evaluates the series and its analytic derivative.

use nalgebra::Vector3;
use nom::{multi::count, number::complete::le_f64, Parser};

use super::header::BodyLayout;
use super::state_vector::StateVector;
use crate::astrokit_errors::AstrokitError;
use crate::constants::JulianEphemerisDate;

/// One decoded data record.
///
/// Holds the raw coefficient words; evaluation slices them per body through
/// the header's [`BodyLayout`]. The record keeps its grid `index` so the
/// store can recognize it on the next fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct CoefficientRecord {
    /// Position of this record on the file's uniform time grid.
    pub index: usize,
    /// Start of the covered span (word 0).
    pub start_jed: JulianEphemerisDate,
    /// End of the covered span (word 1).
    pub end_jed: JulianEphemerisDate,
    words: Vec<f64>,
}

impl CoefficientRecord {
    /// Decode one record from exactly `record_size` bytes.
    ///
    /// Arguments
    /// ---------
    /// * `index`: grid index of the record inside the file
    /// * `bytes`: the record image; every 8 bytes become one f64 word
    ///
    /// Return
    /// ------
    /// * the decoded record, or [`AstrokitError::TruncatedFile`] when the
    ///   image cannot hold even the two span words
    pub(crate) fn decode(index: usize, bytes: &[u8]) -> Result<Self, AstrokitError> {
        let n_words = bytes.len() / 8;
        let (_, words) = count(le_f64::<_, nom::error::Error<_>>, n_words)
            .parse(bytes)
            .map_err(|_| {
                AstrokitError::TruncatedFile(format!("record {index} could not be decoded"))
            })?;

        if words.len() < 2 {
            return Err(AstrokitError::TruncatedFile(format!(
                "record {index} holds {} words, need at least the span pair",
                words.len()
            )));
        }

        Ok(CoefficientRecord {
            index,
            start_jed: words[0],
            end_jed: words[1],
            words,
        })
    }

    /// Whether `jed` falls inside the record's covered span (inclusive).
    pub fn covers(&self, jed: JulianEphemerisDate) -> bool {
        (self.start_jed..=self.end_jed).contains(&jed)
    }

    /// Evaluate one body's position and velocity at `jed`.
    ///
    /// The slot's `nsub` equal sub-spans are indexed by
    /// `floor(frac * nsub)` clamped to `nsub - 1`, where `frac` is the
    /// position of `jed` inside the record span: an exact interior boundary
    /// selects the later sub-interval and the record's end epoch selects the
    /// last. The epoch is then normalized to `tc in [-1, 1]` over the chosen
    /// sub-span.
    ///
    /// Position sums the Chebyshev series `T_0 = 1`, `T_1 = tc`,
    /// `T_n = 2 tc T_{n-1} - T_{n-2}` per axis; velocity sums the derivative
    /// series `T'_1 = 1`, `T'_2 = 4 tc`,
    /// `T'_n = 2 tc T'_{n-1} + 2 T_{n-1} - T'_{n-2}` scaled by the chain-rule
    /// factor `2 nsub / span` (per day).
    ///
    /// Arguments
    /// ---------
    /// * `layout`: the body's slot, which must be populated
    /// * `jed`: evaluation epoch inside the record span
    ///
    /// Return
    /// ------
    /// * position in km and velocity in km/day
    pub(crate) fn body_state(&self, layout: &BodyLayout, jed: JulianEphemerisDate) -> StateVector {
        let ncoeff = layout.ncoeff as usize;
        let nsub = layout.nsub as usize;

        let span = self.end_jed - self.start_jed;
        let scaled = (jed - self.start_jed) / span * nsub as f64;
        let sub = scaled.floor().clamp(0.0, nsub as f64 - 1.0) as usize;
        let tc = (2.0 * (scaled - sub as f64) - 1.0).clamp(-1.0, 1.0);

        let base = layout.offset as usize - 1 + sub * 3 * ncoeff;
        let x = &self.words[base..base + ncoeff];
        let y = &self.words[base + ncoeff..base + 2 * ncoeff];
        let z = &self.words[base + 2 * ncoeff..base + 3 * ncoeff];

        let mut tcheb = vec![0.0; ncoeff];
        tcheb[0] = 1.0;
        if ncoeff > 1 {
            tcheb[1] = tc;
            for degree in 2..ncoeff {
                tcheb[degree] = 2.0 * tc * tcheb[degree - 1] - tcheb[degree - 2];
            }
        }

        let eval =
            |coeffs: &[f64], basis: &[f64]| -> f64 { coeffs.iter().zip(basis).map(|(c, b)| c * b).sum() };

        let position = Vector3::new(eval(x, &tcheb), eval(y, &tcheb), eval(z, &tcheb));

        let mut velocity = Vector3::zeros();
        if ncoeff > 1 {
            let mut tcheb_deriv = vec![0.0; ncoeff];
            tcheb_deriv[1] = 1.0;
            if ncoeff > 2 {
                tcheb_deriv[2] = 4.0 * tc;
                for degree in 3..ncoeff {
                    tcheb_deriv[degree] = 2.0 * tc * tcheb_deriv[degree - 1]
                        + 2.0 * tcheb[degree - 1]
                        - tcheb_deriv[degree - 2];
                }
            }

            // d(tc)/d(jed) = 2 nsub / span
            let vfac = 2.0 * nsub as f64 / span;
            velocity = Vector3::new(
                vfac * eval(x, &tcheb_deriv),
                vfac * eval(y, &tcheb_deriv),
                vfac * eval(z, &tcheb_deriv),
            );
        }

        StateVector { position, velocity }
    }
}
