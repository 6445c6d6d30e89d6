//! The ephemeris file handle: open, query, compute, close.
//!
//! [`EphemerisFile`] is an explicit handle, not process-wide state: any
//! number of files can be open at once and each carries its own header and
//! record store. `compute` takes `&self` and serializes concurrent callers
//! through the store's mutex; `open` and `close` take the handle by value or
//! `&mut`, so the borrow checker keeps them exclusive with in-flight
//! computations.

use std::fmt;
use std::fs::File;
use std::io::Read;
use std::sync::{Mutex, PoisonError};

use camino::Utf8Path;

use super::bodies::{Body, Origin};
use super::header::{EphemHeader, HEADER_BYTES};
use super::state_vector::StateVector;
use super::store::RecordStore;
use crate::astrokit_errors::AstrokitError;
use crate::constants::JulianEphemerisDate;

/// An open binary ephemeris file.
///
/// Created by [`EphemerisFile::open`]; queries and [`EphemerisFile::compute`]
/// borrow it shared, [`EphemerisFile::close`] releases the underlying file
/// handle and cached record. After `close` every operation fails with
/// [`AstrokitError::FileClosed`].
#[derive(Debug)]
pub struct EphemerisFile {
    inner: Option<Inner>,
}

#[derive(Debug)]
struct Inner {
    header: EphemHeader,
    store: Mutex<RecordStore>,
}

/// Barycentric state of `body` in km and km/day.
///
/// Directly tabulated bodies come straight from their layout slot. Earth and
/// the Moon are recovered from the Earth-Moon barycenter and geocentric Moon
/// series:
/// `earth = emb - moon_geo / (1 + EMRAT)`,
/// `moon = emb + moon_geo * EMRAT / (1 + EMRAT)`.
fn barycentric_state(
    header: &EphemHeader,
    store: &mut RecordStore,
    body: Body,
    jed: JulianEphemerisDate,
) -> Result<StateVector, AstrokitError> {
    match body {
        Body::Earth => {
            let emb = slot_state(header, store, Body::Earth, jed)?;
            let moon_geo = slot_state(header, store, Body::Moon, jed)?;
            Ok(emb - moon_geo / (1.0 + header.emrat))
        }
        Body::Moon => {
            let emb = slot_state(header, store, Body::Earth, jed)?;
            let moon_geo = slot_state(header, store, Body::Moon, jed)?;
            Ok(emb + moon_geo * (header.emrat / (1.0 + header.emrat)))
        }
        direct => slot_state(header, store, direct, jed),
    }
}

/// Interpolate one layout slot, failing with `InvalidBody` when the file
/// does not tabulate it.
fn slot_state(
    header: &EphemHeader,
    store: &mut RecordStore,
    body: Body,
    jed: JulianEphemerisDate,
) -> Result<StateVector, AstrokitError> {
    let slot = body.layout_slot();
    let layout = &header.layout[slot];
    if !layout.is_populated() {
        return Err(AstrokitError::InvalidBody(format!(
            "{body} has no coefficients in this file (layout slot {slot} is empty)"
        )));
    }

    let record = store.fetch_record(jed)?;
    Ok(record.body_state(layout, jed))
}

impl EphemerisFile {
    /// Open an ephemeris file and validate its header.
    ///
    /// Arguments
    /// ---------
    /// * `path`: path of the binary ephemeris file
    ///
    /// Return
    /// ------
    /// * the open handle, or [`AstrokitError::Io`] when the file cannot be
    ///   read, or [`AstrokitError::CorruptHeader`] when the header is
    ///   inconsistent. A failed open leaves nothing resident.
    ///
    /// See also
    /// ------------
    /// * [`EphemHeader::parse`] – the validation battery applied here.
    pub fn open(path: &Utf8Path) -> Result<Self, AstrokitError> {
        let mut file = File::open(path.as_std_path())?;

        let mut bytes = vec![0u8; HEADER_BYTES];
        file.read_exact(&mut bytes).map_err(|error| {
            if error.kind() == std::io::ErrorKind::UnexpectedEof {
                AstrokitError::CorruptHeader(format!(
                    "file ends inside the {HEADER_BYTES}-byte header"
                ))
            } else {
                AstrokitError::Io(error)
            }
        })?;

        let header = EphemHeader::parse(&bytes)?;
        let store = RecordStore::new(file, &header);

        Ok(EphemerisFile {
            inner: Some(Inner {
                header,
                store: Mutex::new(store),
            }),
        })
    }

    fn inner(&self) -> Result<&Inner, AstrokitError> {
        self.inner.as_ref().ok_or(AstrokitError::FileClosed)
    }

    /// First Julian Ephemeris Date the file covers.
    pub fn start_jed(&self) -> Result<JulianEphemerisDate, AstrokitError> {
        Ok(self.inner()?.header.start_jed)
    }

    /// Last Julian Ephemeris Date the file covers.
    pub fn stop_jed(&self) -> Result<JulianEphemerisDate, AstrokitError> {
        Ok(self.inner()?.header.stop_jed)
    }

    /// Number of named constants in the header.
    pub fn constant_count(&self) -> Result<usize, AstrokitError> {
        Ok(self.inner()?.header.constant_count())
    }

    /// Name of the header constant at `index`.
    pub fn constant_name(&self, index: usize) -> Result<&str, AstrokitError> {
        self.inner()?.header.constant_name(index)
    }

    /// Value of the header constant at `index`.
    pub fn constant_value(&self, index: usize) -> Result<f64, AstrokitError> {
        self.inner()?.header.constant_value(index)
    }

    /// The parsed header.
    pub fn header(&self) -> Result<&EphemHeader, AstrokitError> {
        Ok(&self.inner()?.header)
    }

    /// Position and velocity of `body` at `jed`, in AU and AU/day.
    ///
    /// Fetches the record covering `jed` (cached MRU-1), interpolates the
    /// body's Chebyshev series, applies the Earth/Moon barycenter split where
    /// needed, optionally subtracts the reference body's state at the same
    /// epoch, and scales with the file's `AU` constant.
    ///
    /// Arguments
    /// ---------
    /// * `body`: the target body
    /// * `jed`: evaluation epoch (Julian Ephemeris Date)
    /// * `origin`: [`Origin::Barycentric`] for the tabulated frame, or
    ///   [`Origin::BodyRelative`] to subtract a reference body's barycentric
    ///   state
    ///
    /// Return
    /// ------
    /// * the state vector, or [`AstrokitError::InvalidBody`] when the target
    ///   is not tabulated or the reference equals the target, or
    ///   [`AstrokitError::TimeOutOfRange`] outside `[start_jed, stop_jed]`,
    ///   or [`AstrokitError::FileClosed`] after close
    ///
    /// See also
    /// ------------
    /// * [`CoefficientRecord::body_state`](super::record::CoefficientRecord::body_state)
    ///   – the per-record evaluation.
    /// * [`StateVector::to_au`] – the outward unit conversion.
    pub fn compute(
        &self,
        body: Body,
        jed: JulianEphemerisDate,
        origin: Origin,
    ) -> Result<StateVector, AstrokitError> {
        let inner = self.inner()?;

        if let Origin::BodyRelative(reference) = origin {
            if reference == body {
                return Err(AstrokitError::InvalidBody(format!(
                    "reference body {reference} equals the requested body"
                )));
            }
        }

        let mut store = inner.store.lock().unwrap_or_else(PoisonError::into_inner);

        let state = barycentric_state(&inner.header, &mut store, body, jed)?;
        let state = match origin {
            Origin::Barycentric => state,
            Origin::BodyRelative(reference) => {
                state - barycentric_state(&inner.header, &mut store, reference, jed)?
            }
        };

        Ok(state.to_au(inner.header.au))
    }

    /// Release the file handle and the cached record.
    ///
    /// Idempotent; dropping the handle has the same effect.
    pub fn close(&mut self) {
        self.inner = None;
    }

    /// Whether the handle still owns an open file.
    pub fn is_open(&self) -> bool {
        self.inner.is_some()
    }
}

impl fmt::Display for EphemerisFile {
    /// Header summary table, or a one-line note once closed.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.inner {
            Some(inner) => inner.header.fmt(f),
            None => writeln!(f, "closed ephemeris file"),
        }
    }
}
