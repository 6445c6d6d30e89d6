//! Synthetic ephemeris fixtures.
//!
//! The builder writes a complete, structurally valid ephemeris file whose
//! coefficients encode *linear* state functions, one per tabulated slot:
//! `f(jed) = base + rate * (jed - start_jed)` in km, per axis. A linear
//! function is exactly representable by a degree-1 Chebyshev series on every
//! sub-interval, so interpolated positions and velocities have closed-form
//! expectations at any epoch and every continuity property holds exactly.

use std::io::Write;

use camino::Utf8PathBuf;
use nalgebra::Vector3;

use astrokit::ephemeris::state_vector::StateVector;

/// Span of the fixture files: the header of the concrete test scenario.
pub const START_JED: f64 = 2433282.5;
pub const STOP_JED: f64 = 2469807.5;
/// 25 records of 1461 days each cover the span exactly.
pub const STEP_DAYS: f64 = 1461.0;

pub const AU_KM: f64 = 149_597_870.7;
pub const EMRAT: f64 = 81.30056;

const MAX_CONSTANTS: usize = 400;
const LAYOUT_SLOTS: usize = 15;

/// One tabulated series: a layout slot filled with the Chebyshev encoding of
/// a linear state function.
#[derive(Debug, Clone, Copy)]
pub struct LinearSeries {
    pub slot: usize,
    /// Position at `START_JED`, km.
    pub base: Vector3<f64>,
    /// Constant velocity, km/day.
    pub rate: Vector3<f64>,
}

impl LinearSeries {
    /// Exact state of this series at `jed`, in km and km/day.
    pub fn state_at(&self, jed: f64) -> StateVector {
        StateVector {
            position: self.base + self.rate * (jed - START_JED),
            velocity: self.rate,
        }
    }
}

/// The four slots every fixture tabulates: Earth-Moon barycenter (2), Mars
/// (3), geocentric Moon (9) and the Sun (10). Mercury, Venus and the outer
/// planets stay empty so the invalid-body path has something to hit.
pub fn standard_series() -> Vec<LinearSeries> {
    vec![
        LinearSeries {
            slot: 2,
            base: Vector3::new(1.2e8, -6.0e7, 3.0e7),
            rate: Vector3::new(1.5e6, 2.2e6, 0.9e6),
        },
        LinearSeries {
            slot: 3,
            base: Vector3::new(-2.0e8, 1.1e8, 4.0e7),
            rate: Vector3::new(-1.0e6, 1.8e6, 0.4e6),
        },
        LinearSeries {
            slot: 9,
            base: Vector3::new(3.6e5, -1.2e5, 5.0e4),
            rate: Vector3::new(8.0e4, 6.0e4, -2.0e4),
        },
        LinearSeries {
            slot: 10,
            base: Vector3::new(4.0e5, 7.0e5, -2.0e5),
            rate: Vector3::new(5.0e2, -3.0e2, 1.0e2),
        },
    ]
}

/// Exact barycentric Earth state implied by `standard_series`, in km and
/// km/day: the Earth-Moon barycenter minus the geocentric Moon scaled by
/// `1 / (1 + EMRAT)`.
pub fn expected_earth(jed: f64) -> StateVector {
    let series = standard_series();
    let emb = series[0].state_at(jed);
    let moon_geo = series[2].state_at(jed);
    emb - moon_geo / (1.0 + EMRAT)
}

/// Exact barycentric Moon state implied by `standard_series`.
pub fn expected_moon(jed: f64) -> StateVector {
    let series = standard_series();
    let emb = series[0].state_at(jed);
    let moon_geo = series[2].state_at(jed);
    emb + moon_geo * (EMRAT / (1.0 + EMRAT))
}

/// Coefficients per axis and sub-interval in the fixture layout.
const NCOEFF: usize = 2;
/// Sub-intervals per record.
const NSUB: usize = 2;

fn record_words(series: &[LinearSeries]) -> usize {
    2 + series.len() * 3 * NCOEFF * NSUB
}

/// Serialize the fixed 5824-byte header for the given series set.
fn header_bytes(series: &[LinearSeries], constants: &[(&str, f64)]) -> Vec<u8> {
    let record_size = (8 * record_words(series)) as u32;

    let mut bytes = Vec::with_capacity(5824);
    bytes.extend_from_slice(b"ASTROEPH");
    bytes.extend_from_slice(&1u32.to_le_bytes());
    bytes.extend_from_slice(&(constants.len() as u32).to_le_bytes());
    bytes.extend_from_slice(&START_JED.to_le_bytes());
    bytes.extend_from_slice(&STOP_JED.to_le_bytes());
    bytes.extend_from_slice(&STEP_DAYS.to_le_bytes());
    bytes.extend_from_slice(&record_size.to_le_bytes());

    let mut names = vec![b' '; 6 * MAX_CONSTANTS];
    for (index, (name, _)) in constants.iter().enumerate() {
        names[6 * index..6 * index + name.len()].copy_from_slice(name.as_bytes());
    }
    bytes.extend_from_slice(&names);

    let mut values = vec![0.0f64; MAX_CONSTANTS];
    for (index, (_, value)) in constants.iter().enumerate() {
        values[index] = *value;
    }
    for value in values {
        bytes.extend_from_slice(&value.to_le_bytes());
    }

    // Populated slots tile the record contiguously after the two span words.
    let mut layout = [[0u32; 3]; LAYOUT_SLOTS];
    let mut offset = 3u32;
    for entry in series {
        layout[entry.slot] = [offset, NCOEFF as u32, NSUB as u32];
        offset += (3 * NCOEFF * NSUB) as u32;
    }
    for slot in layout {
        for word in slot {
            bytes.extend_from_slice(&word.to_le_bytes());
        }
    }

    assert_eq!(bytes.len(), 5824);
    bytes
}

/// Serialize one data record.
///
/// On a sub-interval `[t0, t0 + h]` the linear function
/// `f(t) = base + rate * (t - START_JED)` has the degree-1 Chebyshev
/// coefficients `c0 = f(t0 + h/2)` and `c1 = rate * h / 2`.
fn record_bytes(series: &[LinearSeries], record_index: usize) -> Vec<u8> {
    let r0 = START_JED + record_index as f64 * STEP_DAYS;
    let r1 = r0 + STEP_DAYS;
    let h = STEP_DAYS / NSUB as f64;

    let mut words = vec![r0, r1];
    for entry in series {
        for sub in 0..NSUB {
            let mid = r0 + (sub as f64 + 0.5) * h;
            let c0 = entry.base + entry.rate * (mid - START_JED);
            let c1 = entry.rate * (h / 2.0);
            for axis in 0..3 {
                words.push(c0[axis]);
                words.push(c1[axis]);
            }
        }
    }

    let mut bytes = Vec::with_capacity(8 * words.len());
    for word in words {
        bytes.extend_from_slice(&word.to_le_bytes());
    }
    bytes
}

/// Write a complete fixture file and return its path.
pub fn write_ephemeris_fixture(name: &str) -> Utf8PathBuf {
    write_fixture_with(name, &standard_series(), &[("AU", AU_KM), ("EMRAT", EMRAT)])
}

/// Write a fixture with custom series and constants.
pub fn write_fixture_with(
    name: &str,
    series: &[LinearSeries],
    constants: &[(&str, f64)],
) -> Utf8PathBuf {
    let path = Utf8PathBuf::from_path_buf(std::env::temp_dir())
        .unwrap()
        .join(name);
    let mut file = std::fs::File::create(&path).unwrap();

    file.write_all(&header_bytes(series, constants)).unwrap();
    let n_records = ((STOP_JED - START_JED) / STEP_DAYS).round() as usize;
    for index in 0..n_records {
        file.write_all(&record_bytes(series, index)).unwrap();
    }

    path
}

/// Write a fixture whose last record is cut short by `missing_bytes`.
pub fn write_truncated_fixture(name: &str, missing_bytes: usize) -> Utf8PathBuf {
    let path = write_ephemeris_fixture(name);
    let full = std::fs::metadata(path.as_std_path()).unwrap().len();
    let file = std::fs::OpenOptions::new()
        .write(true)
        .open(path.as_std_path())
        .unwrap();
    file.set_len(full - missing_bytes as u64).unwrap();
    path
}

pub fn assert_states_close(actual: &StateVector, expected: &StateVector, epsilon: f64) {
    for axis in 0..3 {
        assert!(
            (actual.position[axis] - expected.position[axis]).abs() <= epsilon,
            "position axis {axis}: {} vs {}",
            actual.position[axis],
            expected.position[axis]
        );
        assert!(
            (actual.velocity[axis] - expected.velocity[axis]).abs() <= epsilon,
            "velocity axis {axis}: {} vs {}",
            actual.velocity[axis],
            expected.velocity[axis]
        );
    }
}
