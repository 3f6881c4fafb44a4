use approx::assert_relative_eq;

use prism_core::calibration::{
    Calibration, CalibrationError, CalibrationPoint, CalibrationPreset,
};

fn cal(points: &[(f64, f64)]) -> Calibration {
    Calibration::new(
        points
            .iter()
            .map(|&(position, wavelength)| CalibrationPoint::new(position, wavelength))
            .collect(),
    )
}

#[test]
fn test_wavelength_passes_through_all_points() {
    let map = cal(&[(0.1, 436.0), (0.5, 546.0), (0.9, 604.0)])
        .solve()
        .unwrap();
    assert_relative_eq!(map.wavelength(0.1), 436.0, epsilon = 1e-9);
    assert_relative_eq!(map.wavelength(0.5), 546.0, epsilon = 1e-9);
    assert_relative_eq!(map.wavelength(0.9), 604.0, epsilon = 1e-9);
}

#[test]
fn test_interior_uses_segment_extrapolation_uses_endpoints() {
    let map = cal(&[(0.1, 436.0), (0.5, 546.0), (0.9, 604.0)])
        .solve()
        .unwrap();

    // Interior: piecewise segment through (0.5, 546) and (0.9, 604).
    assert_relative_eq!(map.wavelength(0.7), 575.0, epsilon = 1e-9);

    // Extrapolation at x = 0: the endpoint line through the first and last
    // point, 436 - ((604-436)/(0.9-0.1)) * 0.1 = 415.
    assert_relative_eq!(map.wavelength(0.0), 415.0, epsilon = 1e-9);
    assert_relative_eq!(map.endpoint_line(0.0), 415.0, epsilon = 1e-9);

    // spline_line has no bracketing segment out there.
    assert!(map.spline_line(0.0).is_none());
    assert!(map.spline_line(0.95).is_none());
}

#[test]
fn test_wavelength_is_monotonic_over_unit_range() {
    let map = cal(&[(0.1, 436.0), (0.4, 510.0), (0.5, 546.0), (0.9, 604.0)])
        .solve()
        .unwrap();
    let mut previous = f64::MIN;
    for i in 0..=100 {
        let x = i as f64 / 100.0;
        let nm = map.wavelength(x);
        assert!(nm >= previous, "wavelength({x}) = {nm} < {previous}");
        previous = nm;
    }
}

#[test]
fn test_two_points_are_exactly_linear_everywhere() {
    let map = cal(&[(0.2, 450.0), (0.8, 650.0)]).solve().unwrap();
    let slope = (650.0 - 450.0) / (0.8 - 0.2);
    for i in 0..=20 {
        // Including positions beyond [0.2, 0.8].
        let x = -0.2 + i as f64 * 0.07;
        let expected = slope * (x - 0.2) + 450.0;
        assert_relative_eq!(map.wavelength(x), expected, epsilon = 1e-9);
    }
}

#[test]
fn test_non_monotonic_positions_rejected() {
    // Sorted by wavelength the positions run (0.5, 0.1): invalid.
    let calibration = cal(&[(0.1, 600.0), (0.5, 450.0)]);
    let err = calibration.validate().unwrap_err();
    assert!(matches!(err, CalibrationError::NonMonotonic { .. }));
    assert!(calibration.solve().is_err());

    // The message names the offending point.
    let text = err.to_string();
    assert!(text.contains("600"), "message: {text}");
}

#[test]
fn test_too_few_points_rejected() {
    assert!(matches!(
        cal(&[(0.5, 546.0)]).validate().unwrap_err(),
        CalibrationError::TooFewPoints(1)
    ));
    assert!(matches!(
        cal(&[]).validate().unwrap_err(),
        CalibrationError::TooFewPoints(0)
    ));
}

#[test]
fn test_point_limit_enforced_on_add() {
    let mut calibration = cal(&[
        (0.1, 400.0),
        (0.3, 450.0),
        (0.5, 500.0),
        (0.7, 550.0),
        (0.9, 600.0),
    ]);
    assert!(calibration.validate().is_ok());

    let err = calibration
        .add_point(CalibrationPoint::new(0.95, 650.0))
        .unwrap_err();
    assert!(matches!(err, CalibrationError::TooManyPoints(6)));
    assert_eq!(calibration.len(), 5);
}

#[test]
fn test_edit_operations() {
    let mut calibration = cal(&[(0.2, 450.0), (0.8, 650.0)]);

    calibration.set_wavelength(0, 460.0).unwrap();
    assert_relative_eq!(calibration.points()[0].wavelength, 460.0);

    // Positions clamp to the unit interval.
    calibration.set_position(1, 1.5).unwrap();
    assert_relative_eq!(calibration.points()[1].position, 1.0);

    assert!(matches!(
        calibration.set_position(7, 0.5),
        Err(CalibrationError::NoSuchPoint(7))
    ));

    let removed = calibration.remove_point(0).unwrap();
    assert_relative_eq!(removed.wavelength, 460.0);
    assert_eq!(calibration.len(), 1);
}

#[test]
fn test_presets_load_valid_calibrations() {
    let mut calibration = Calibration::default();

    calibration.load_preset(CalibrationPreset::Fluorescent);
    assert_eq!(calibration.len(), 3);
    assert!(calibration.validate().is_ok());
    let map = calibration.solve().unwrap();
    assert_relative_eq!(map.wavelength(0.25), 435.8, epsilon = 1e-9);
    assert_relative_eq!(map.wavelength(0.75), 611.6, epsilon = 1e-9);

    calibration.load_preset(CalibrationPreset::MercuryPair);
    assert_eq!(calibration.len(), 2);
    assert!(calibration.validate().is_ok());
}

#[test]
fn test_equal_positions_are_monotonic_but_guarded() {
    // Non-decreasing allows ties; the map degrades to a defined value
    // instead of dividing by zero.
    let map = cal(&[(0.5, 450.0), (0.5, 650.0)]).solve().unwrap();
    let nm = map.wavelength(0.5);
    assert!(nm.is_finite());
}
