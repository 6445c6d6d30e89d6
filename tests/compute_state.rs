//! Chebyshev interpolation engine: state vectors, frame correction and
//! boundary behavior, checked against the closed-form fixture series.

mod common;

use astrokit::astrokit_errors::AstrokitError;
use astrokit::ephemeris::{Body, EphemerisFile, Origin};

use common::{
    assert_states_close, expected_earth, expected_moon, standard_series, write_ephemeris_fixture,
    AU_KM, START_JED, STEP_DAYS, STOP_JED,
};

/// Tolerance for interpolated states in AU / AU/day. The fixture series are
/// exactly representable, so only floating rounding remains.
const TOL: f64 = 1e-9;

#[test]
fn test_direct_body_state() {
    let path = write_ephemeris_fixture("astrokit_direct.eph");
    let file = EphemerisFile::open(&path).unwrap();
    let mars = standard_series()[1];

    for jed in [START_JED, 2441000.25, 2451545.0, 2460001.5, STOP_JED] {
        let state = file.compute(Body::Mars, jed, Origin::Barycentric).unwrap();
        let expected = mars.state_at(jed).to_au(AU_KM);
        assert_states_close(&state, &expected, TOL);
    }
}

#[test]
fn test_earth_and_moon_barycenter_split() {
    let path = write_ephemeris_fixture("astrokit_emb.eph");
    let file = EphemerisFile::open(&path).unwrap();

    let jed = 2451545.0;
    let earth = file.compute(Body::Earth, jed, Origin::Barycentric).unwrap();
    assert_states_close(&earth, &expected_earth(jed).to_au(AU_KM), TOL);

    let moon = file.compute(Body::Moon, jed, Origin::Barycentric).unwrap();
    assert_states_close(&moon, &expected_moon(jed).to_au(AU_KM), TOL);
}

#[test]
fn test_relative_equals_barycentric_difference() {
    let path = write_ephemeris_fixture("astrokit_relative.eph");
    let file = EphemerisFile::open(&path).unwrap();

    for jed in [START_JED + 0.5, 2445000.0, 2451545.0, STOP_JED - 0.5] {
        let mars_bary = file.compute(Body::Mars, jed, Origin::Barycentric).unwrap();
        let earth_bary = file.compute(Body::Earth, jed, Origin::Barycentric).unwrap();
        let mars_geo = file
            .compute(Body::Mars, jed, Origin::BodyRelative(Body::Earth))
            .unwrap();

        assert_states_close(&mars_geo, &(mars_bary - earth_bary), TOL);
    }
}

#[test]
fn test_concrete_scenario() {
    // Header span 2433282.5 to 2469807.5: body 3 (Earth) relative to the Sun
    // at J2000 is finite and non-zero, and an epoch before the span fails.
    let path = write_ephemeris_fixture("astrokit_scenario.eph");
    let file = EphemerisFile::open(&path).unwrap();

    let body = Body::try_from(3).unwrap();
    let state = file
        .compute(body, 2451545.0, Origin::BodyRelative(Body::Sun))
        .unwrap();

    assert!(state.is_finite());
    assert!(state.position.norm() > 0.0);
    assert!(state.velocity.norm() > 0.0);

    assert_eq!(
        file.compute(body, 2400000.0, Origin::BodyRelative(Body::Sun))
            .unwrap_err(),
        AstrokitError::TimeOutOfRange {
            jed: 2400000.0,
            start_jed: START_JED,
            stop_jed: STOP_JED,
        }
    );
}

#[test]
fn test_time_one_unit_outside_span() {
    let path = write_ephemeris_fixture("astrokit_span_edges.eph");
    let file = EphemerisFile::open(&path).unwrap();

    for jed in [START_JED - 1.0, STOP_JED + 1.0] {
        let error = file.compute(Body::Mars, jed, Origin::Barycentric).unwrap_err();
        assert!(matches!(error, AstrokitError::TimeOutOfRange { .. }));
    }

    // Both span endpoints themselves are inside.
    assert!(file.compute(Body::Mars, START_JED, Origin::Barycentric).is_ok());
    assert!(file.compute(Body::Mars, STOP_JED, Origin::Barycentric).is_ok());
}

#[test]
fn test_record_boundary_continuity() {
    let path = write_ephemeris_fixture("astrokit_rec_boundary.eph");
    let file = EphemerisFile::open(&path).unwrap();

    // An epoch on the shared edge of records 0 and 1, evaluated exactly and
    // from just below: the states must agree.
    let boundary = START_JED + STEP_DAYS;
    let at = file.compute(Body::Mars, boundary, Origin::Barycentric).unwrap();
    let below = file
        .compute(Body::Mars, boundary - 1e-7, Origin::Barycentric)
        .unwrap();
    assert_states_close(&at, &below, 1e-6);
}

#[test]
fn test_sub_interval_boundary_continuity() {
    let path = write_ephemeris_fixture("astrokit_sub_boundary.eph");
    let file = EphemerisFile::open(&path).unwrap();

    // Mid-record epoch, the edge between the two sub-intervals of record 0.
    let boundary = START_JED + STEP_DAYS / 2.0;
    let at = file.compute(Body::Mars, boundary, Origin::Barycentric).unwrap();
    let below = file
        .compute(Body::Mars, boundary - 1e-7, Origin::Barycentric)
        .unwrap();
    assert_states_close(&at, &below, 1e-6);

    // The exact boundary matches the closed form, i.e. the later
    // sub-interval evaluated at tc = -1.
    let expected = standard_series()[1].state_at(boundary).to_au(AU_KM);
    assert_states_close(&at, &expected, TOL);
}

#[test]
fn test_body_without_coefficients() {
    let path = write_ephemeris_fixture("astrokit_no_coeffs.eph");
    let file = EphemerisFile::open(&path).unwrap();

    // Mercury's layout slot is empty in the fixture.
    let error = file
        .compute(Body::Mercury, 2451545.0, Origin::Barycentric)
        .unwrap_err();
    assert!(matches!(error, AstrokitError::InvalidBody(_)));

    // An empty reference body fails the same way.
    let error = file
        .compute(Body::Mars, 2451545.0, Origin::BodyRelative(Body::Venus))
        .unwrap_err();
    assert!(matches!(error, AstrokitError::InvalidBody(_)));
}

#[test]
fn test_reference_equal_to_target() {
    let path = write_ephemeris_fixture("astrokit_self_ref.eph");
    let file = EphemerisFile::open(&path).unwrap();

    let error = file
        .compute(Body::Earth, 2451545.0, Origin::BodyRelative(Body::Earth))
        .unwrap_err();
    assert!(matches!(error, AstrokitError::InvalidBody(_)));
}

#[test]
fn test_moon_relative_to_earth() {
    let path = write_ephemeris_fixture("astrokit_moon_geo.eph");
    let file = EphemerisFile::open(&path).unwrap();

    // Barycentric Moon minus barycentric Earth recovers the tabulated
    // geocentric series.
    let jed = 2455000.0;
    let moon_geo = file
        .compute(Body::Moon, jed, Origin::BodyRelative(Body::Earth))
        .unwrap();
    let expected = standard_series()[2].state_at(jed).to_au(AU_KM);
    assert_states_close(&moon_geo, &expected, TOL);
}

#[test]
fn test_sequential_epochs_across_records() {
    let path = write_ephemeris_fixture("astrokit_sweep.eph");
    let file = EphemerisFile::open(&path).unwrap();
    let mars = standard_series()[1];

    // Sweep the whole span; every epoch lands on the closed form no matter
    // which record or sub-interval serves it.
    let mut jed = START_JED;
    while jed <= STOP_JED {
        let state = file.compute(Body::Mars, jed, Origin::Barycentric).unwrap();
        assert_states_close(&state, &mars.state_at(jed).to_au(AU_KM), TOL);
        jed += 487.25;
    }
}

#[test]
fn test_compute_from_multiple_threads() {
    let path = write_ephemeris_fixture("astrokit_threads.eph");
    let file = EphemerisFile::open(&path).unwrap();
    let mars = standard_series()[1];

    std::thread::scope(|scope| {
        for offset in [100.5, 9000.25, 20000.75, 36000.5] {
            let file = &file;
            let mars = &mars;
            scope.spawn(move || {
                let jed = START_JED + offset;
                let state = file.compute(Body::Mars, jed, Origin::Barycentric).unwrap();
                assert_states_close(&state, &mars.state_at(jed).to_au(AU_KM), TOL);
            });
        }
    });
}
