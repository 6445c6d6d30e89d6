//! On-demand record loading with a most-recently-used cache of depth one.
//!
//! The store owns the open file handle after the header has been parsed.
//! [`RecordStore::fetch_record`] maps an epoch to its record on the file's
//! uniform time grid and loads the record with a single positioned read of
//! exactly `record_size` bytes; the one most recently loaded record stays
//! resident, so sweeping a time range in order costs one read per record
//! span. The cache is about avoiding repeated reads, not about speed
//! guarantees: consecutive epochs usually share a record.

use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};

use super::header::{EphemHeader, HEADER_BYTES};
use super::record::CoefficientRecord;
use crate::astrokit_errors::AstrokitError;
use crate::constants::JulianEphemerisDate;

/// Loads and caches the coefficient record covering a requested epoch.
#[derive(Debug)]
pub struct RecordStore {
    reader: BufReader<File>,
    start_jed: JulianEphemerisDate,
    stop_jed: JulianEphemerisDate,
    step_days: f64,
    record_size: usize,
    n_records: usize,
    cached: Option<CoefficientRecord>,
}

/// Positioned read of one record image, decoded.
///
/// A read that ends before `record_size` bytes means the file does not hold
/// the record its header promises: that is a [`AstrokitError::TruncatedFile`],
/// and no partial record is ever decoded.
fn read_record(
    reader: &mut BufReader<File>,
    record_size: usize,
    index: usize,
) -> Result<CoefficientRecord, AstrokitError> {
    let offset = (HEADER_BYTES + index * record_size) as u64;
    reader.seek(SeekFrom::Start(offset))?;

    let mut buffer = vec![0u8; record_size];
    reader.read_exact(&mut buffer).map_err(|error| {
        if error.kind() == std::io::ErrorKind::UnexpectedEof {
            AstrokitError::TruncatedFile(format!(
                "record {index} at byte {offset} ends before {record_size} bytes"
            ))
        } else {
            AstrokitError::Io(error)
        }
    })?;

    CoefficientRecord::decode(index, &buffer)
}

impl RecordStore {
    pub(crate) fn new(file: File, header: &EphemHeader) -> Self {
        RecordStore {
            reader: BufReader::new(file),
            start_jed: header.start_jed,
            stop_jed: header.stop_jed,
            step_days: header.step_days,
            record_size: header.record_size,
            n_records: header.n_records,
            cached: None,
        }
    }

    /// The record covering `jed`, loading it if it is not resident.
    ///
    /// Arguments
    /// ---------
    /// * `jed`: requested epoch, must lie in `[start_jed, stop_jed]`
    ///
    /// Return
    /// ------
    /// * the resident record, or [`AstrokitError::TimeOutOfRange`] outside
    ///   the covered span, or [`AstrokitError::TruncatedFile`] /
    ///   [`AstrokitError::Io`] when the read fails
    pub fn fetch_record(
        &mut self,
        jed: JulianEphemerisDate,
    ) -> Result<&CoefficientRecord, AstrokitError> {
        if !(self.start_jed..=self.stop_jed).contains(&jed) {
            return Err(AstrokitError::TimeOutOfRange {
                jed,
                start_jed: self.start_jed,
                stop_jed: self.stop_jed,
            });
        }

        // Grid index; the stop epoch resolves to the last record.
        let index = ((jed - self.start_jed) / self.step_days).floor() as usize;
        let index = index.min(self.n_records - 1);

        if matches!(&self.cached, Some(record) if record.index == index) {
            return Ok(self.cached.as_ref().expect("cached record checked above"));
        }
        let record = read_record(&mut self.reader, self.record_size, index)?;
        Ok(self.cached.insert(record))
    }
}
