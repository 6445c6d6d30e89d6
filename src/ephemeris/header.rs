//! Ephemeris file header: fixed binary layout, parsing and validation.
//!
//! The header occupies the first [`HEADER_BYTES`] bytes of an ephemeris file
//! (little-endian throughout): an 8-byte magic, format version, constant
//! count, the covered JED span and record step, the declared record size,
//! a 400-entry constants table (6-byte space-padded names, then f64 values),
//! and a 15-slot per-body coefficient layout table. [`EphemHeader::parse`]
//! decodes the image with nom and cross-checks every declared quantity
//! against the others; any inconsistency fails with
//! [`AstrokitError::CorruptHeader`] and the file is never half-opened.

use std::fmt;

use nom::{
    bytes::complete::take,
    multi::count,
    number::complete::{le_f64, le_u32},
    IResult, Parser,
};

use crate::astrokit_errors::AstrokitError;
use crate::constants::{JulianEphemerisDate, Kilometer};

/// File magic, first 8 bytes of every ephemeris file.
pub const MAGIC: [u8; 8] = *b"ASTROEPH";

/// The single file format version this reader understands.
pub const FORMAT_VERSION: u32 = 1;

/// Fixed size of the constants table (names and values are always written
/// for 400 entries; entries at index >= `ncon` are ignored).
pub const MAX_CONSTANTS: usize = 400;

/// Number of per-body slots in the layout table.
pub const LAYOUT_SLOTS: usize = 15;

/// Total header size in bytes; the first data record starts here.
pub const HEADER_BYTES: usize = 5824;

/// 1-based word index of the first coefficient in a record (words 0 and 1
/// hold the record's start and end JED).
pub const FIRST_COEFF_WORD: u32 = 3;

/// One slot of the per-body coefficient layout table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BodyLayout {
    /// 1-based f64-word index of the slot's first coefficient in a record.
    pub offset: u32,
    /// Chebyshev coefficients per axis and per sub-interval.
    pub ncoeff: u32,
    /// Equal time sub-intervals per record.
    pub nsub: u32,
}

impl BodyLayout {
    /// An empty slot (no coefficients tabulated) has both counts zero.
    pub fn is_populated(&self) -> bool {
        self.ncoeff > 0 && self.nsub > 0
    }

    /// f64 words this slot occupies in a record (three axes per sub-interval).
    pub fn words(&self) -> usize {
        3 * self.ncoeff as usize * self.nsub as usize
    }
}

/// Parsed and validated ephemeris file header.
///
/// Constants are exposed by index ([`EphemHeader::constant_name`],
/// [`EphemHeader::constant_value`]) and by name ([`EphemHeader::constant`]);
/// the two constants every file must carry, `AU` (kilometers per
/// astronomical unit) and `EMRAT` (Earth-Moon mass ratio), are cached on the
/// struct because interpolation is undefined without them.
#[derive(Debug, Clone, PartialEq)]
pub struct EphemHeader {
    constant_names: Vec<String>,
    constant_values: Vec<f64>,
    pub start_jed: JulianEphemerisDate,
    pub stop_jed: JulianEphemerisDate,
    /// Time span covered by one data record, in days.
    pub step_days: f64,
    /// Size of one data record in bytes.
    pub record_size: usize,
    pub layout: [BodyLayout; LAYOUT_SLOTS],
    /// Number of data records following the header.
    pub n_records: usize,
    /// Kilometers per astronomical unit (constant `AU`).
    pub au: Kilometer,
    /// Earth-Moon mass ratio (constant `EMRAT`).
    pub emrat: f64,
}

/// Raw header fields straight out of the byte image, before validation.
struct RawHeader<'a> {
    magic: &'a [u8],
    version: u32,
    ncon: u32,
    start_jed: f64,
    stop_jed: f64,
    step_days: f64,
    record_size: u32,
    names: Vec<String>,
    values: Vec<f64>,
    layout: [BodyLayout; LAYOUT_SLOTS],
}

/// Parse a 6-byte space-padded constant name.
fn parse_char6(input: &[u8]) -> IResult<&[u8], String> {
    let (rest, raw) = take(6usize)(input)?;
    Ok((rest, String::from_utf8_lossy(raw).trim_end().to_string()))
}

fn parse_layout_slot(input: &[u8]) -> IResult<&[u8], BodyLayout> {
    let (input, offset) = le_u32(input)?;
    let (input, ncoeff) = le_u32(input)?;
    let (input, nsub) = le_u32(input)?;
    Ok((input, BodyLayout { offset, ncoeff, nsub }))
}

fn parse_layout(input: &[u8]) -> IResult<&[u8], [BodyLayout; LAYOUT_SLOTS]> {
    let mut layout = [BodyLayout::default(); LAYOUT_SLOTS];
    let mut rest = input;
    for slot in &mut layout {
        let (remaining, parsed) = parse_layout_slot(rest)?;
        *slot = parsed;
        rest = remaining;
    }
    Ok((rest, layout))
}

fn parse_fields(input: &[u8]) -> IResult<&[u8], RawHeader<'_>> {
    let (input, magic) = take(8usize)(input)?;
    let (input, version) = le_u32(input)?;
    let (input, ncon) = le_u32(input)?;
    let (input, start_jed) = le_f64(input)?;
    let (input, stop_jed) = le_f64(input)?;
    let (input, step_days) = le_f64(input)?;
    let (input, record_size) = le_u32(input)?;
    let (input, names) = count(parse_char6, MAX_CONSTANTS).parse(input)?;
    let (input, values) = count(le_f64, MAX_CONSTANTS).parse(input)?;
    let (input, layout) = parse_layout(input)?;

    Ok((
        input,
        RawHeader {
            magic,
            version,
            ncon,
            start_jed,
            stop_jed,
            step_days,
            record_size,
            names,
            values,
            layout,
        },
    ))
}

impl EphemHeader {
    /// Decode and validate a header image.
    ///
    /// Arguments
    /// ---------
    /// * `bytes`: at least [`HEADER_BYTES`] bytes from the start of the file
    ///
    /// Return
    /// ------
    /// * the validated header, or [`AstrokitError::CorruptHeader`] naming the
    ///   first inconsistency found
    ///
    /// See also
    /// ------------
    /// * [`EphemerisFile::open`](crate::ephemeris::file::EphemerisFile::open)
    ///   – reads the image and owns the resulting header.
    pub fn parse(bytes: &[u8]) -> Result<Self, AstrokitError> {
        let (_, raw) = parse_fields(bytes).map_err(|_| {
            AstrokitError::CorruptHeader(String::from(
                "header image is shorter than the fixed header layout",
            ))
        })?;

        if raw.magic != MAGIC {
            return Err(AstrokitError::CorruptHeader(format!(
                "bad magic {:?}",
                String::from_utf8_lossy(raw.magic)
            )));
        }
        if raw.version != FORMAT_VERSION {
            return Err(AstrokitError::CorruptHeader(format!(
                "unsupported format version {}",
                raw.version
            )));
        }

        let ncon = raw.ncon as usize;
        if ncon > MAX_CONSTANTS {
            return Err(AstrokitError::CorruptHeader(format!(
                "constant count {ncon} exceeds the {MAX_CONSTANTS}-entry table"
            )));
        }

        if !raw.start_jed.is_finite() || !raw.stop_jed.is_finite() || raw.stop_jed <= raw.start_jed
        {
            return Err(AstrokitError::CorruptHeader(format!(
                "invalid time span [{}, {}]",
                raw.start_jed, raw.stop_jed
            )));
        }
        if !raw.step_days.is_finite() || raw.step_days <= 0.0 {
            return Err(AstrokitError::CorruptHeader(format!(
                "invalid record step {} days",
                raw.step_days
            )));
        }

        let span = raw.stop_jed - raw.start_jed;
        let n_records = (span / raw.step_days).round();
        if n_records < 1.0 || (n_records * raw.step_days - span).abs() > 1e-9 * raw.step_days {
            return Err(AstrokitError::CorruptHeader(format!(
                "time span {span} days is not a whole number of {}-day records",
                raw.step_days
            )));
        }
        let n_records = n_records as usize;

        let record_size = raw.record_size as usize;
        if record_size == 0 || record_size % 8 != 0 {
            return Err(AstrokitError::CorruptHeader(format!(
                "record size {record_size} is not a positive multiple of 8"
            )));
        }

        // Populated slots must tile the record contiguously after the two
        // span words, and the declared record size must match their total.
        let mut expected_offset = FIRST_COEFF_WORD;
        for (index, slot) in raw.layout.iter().enumerate() {
            if slot.is_populated() {
                if slot.offset != expected_offset {
                    return Err(AstrokitError::CorruptHeader(format!(
                        "layout slot {index} starts at word {}, expected {expected_offset}",
                        slot.offset
                    )));
                }
                expected_offset += slot.words() as u32;
            } else if slot.ncoeff != 0 || slot.nsub != 0 {
                return Err(AstrokitError::CorruptHeader(format!(
                    "layout slot {index} is half-populated (ncoeff {}, nsub {})",
                    slot.ncoeff, slot.nsub
                )));
            }
        }
        let total_words = 2 + (expected_offset - FIRST_COEFF_WORD) as usize;
        if record_size != 8 * total_words {
            return Err(AstrokitError::CorruptHeader(format!(
                "record size {record_size} does not match the layout ({total_words} words)"
            )));
        }

        let constant_names: Vec<String> = raw.names.into_iter().take(ncon).collect();
        let constant_values: Vec<f64> = raw.values.into_iter().take(ncon).collect();

        let lookup = |name: &str| -> Option<f64> {
            constant_names
                .iter()
                .position(|n| n == name)
                .and_then(|i| constant_values.get(i).copied())
        };
        let au = match lookup("AU") {
            Some(value) if value > 0.0 => value,
            _ => {
                return Err(AstrokitError::CorruptHeader(String::from(
                    "required constant AU missing or non-positive",
                )))
            }
        };
        let emrat = match lookup("EMRAT") {
            Some(value) if value > 0.0 => value,
            _ => {
                return Err(AstrokitError::CorruptHeader(String::from(
                    "required constant EMRAT missing or non-positive",
                )))
            }
        };

        Ok(EphemHeader {
            constant_names,
            constant_values,
            start_jed: raw.start_jed,
            stop_jed: raw.stop_jed,
            step_days: raw.step_days,
            record_size,
            layout: raw.layout,
            n_records,
            au,
            emrat,
        })
    }

    /// Number of populated entries in the constants table.
    pub fn constant_count(&self) -> usize {
        self.constant_names.len()
    }

    /// Name of the constant at `index`.
    ///
    /// Fails with [`AstrokitError::IndexOutOfRange`] outside
    /// `[0, constant_count())`.
    pub fn constant_name(&self, index: usize) -> Result<&str, AstrokitError> {
        self.constant_names
            .get(index)
            .map(String::as_str)
            .ok_or(AstrokitError::IndexOutOfRange {
                index,
                count: self.constant_names.len(),
            })
    }

    /// Value of the constant at `index`.
    ///
    /// Fails with [`AstrokitError::IndexOutOfRange`] outside
    /// `[0, constant_count())`.
    pub fn constant_value(&self, index: usize) -> Result<f64, AstrokitError> {
        self.constant_values
            .get(index)
            .copied()
            .ok_or(AstrokitError::IndexOutOfRange {
                index,
                count: self.constant_values.len(),
            })
    }

    /// Value of a named constant, if the table carries it.
    pub fn constant(&self, name: &str) -> Option<f64> {
        self.constant_names
            .iter()
            .position(|n| n == name)
            .and_then(|i| self.constant_values.get(i).copied())
    }
}

impl fmt::Display for EphemHeader {
    /// Fixed-width summary table of the parsed header.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = 18;
        let value = 40;

        let border = format!(
            "+{:-<label_col$}+{:-<value_col$}+",
            "",
            "",
            label_col = label + 2,
            value_col = value + 2
        );

        writeln!(
            f,
            "+{:^label_col$}+{:^value_col$}+",
            "Ephemeris Header",
            "",
            label_col = label + 2,
            value_col = value + 2
        )?;
        writeln!(f, "{border}")?;

        writeln!(f, "| {:<label$} | {:<value$} |", "Format version", FORMAT_VERSION)?;
        writeln!(
            f,
            "| {:<label$} | {:<value$} |",
            "Time span (JED)",
            format!("{} to {}", self.start_jed, self.stop_jed)
        )?;
        writeln!(f, "| {:<label$} | {:<value$} |", "Step (days)", self.step_days)?;
        writeln!(
            f,
            "| {:<label$} | {:<value$} |",
            "Records",
            format!("{} x {} bytes", self.n_records, self.record_size)
        )?;
        writeln!(
            f,
            "| {:<label$} | {:<value$} |",
            "Constants",
            self.constant_count()
        )?;
        writeln!(f, "| {:<label$} | {:<value$} |", "AU (km)", self.au)?;
        writeln!(f, "| {:<label$} | {:<value$} |", "EMRAT", self.emrat)?;
        writeln!(f, "{border}")?;

        for (index, slot) in self.layout.iter().enumerate() {
            if slot.is_populated() {
                writeln!(
                    f,
                    "| {:<label$} | {:<value$} |",
                    format!("Slot {index}"),
                    format!(
                        "offset {}, ncoeff {}, nsub {}",
                        slot.offset, slot.ncoeff, slot.nsub
                    )
                )?;
            }
        }
        writeln!(f, "{border}")?;

        Ok(())
    }
}
