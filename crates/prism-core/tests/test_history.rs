use approx::assert_relative_eq;

use prism_core::frame::IntensityLine;
use prism_core::smoother::{is_oversaturated, IntensityHistory};

fn line(values: &[f32]) -> IntensityLine {
    IntensityLine::new(values.to_vec())
}

#[test]
fn test_history_keeps_most_recent_five() {
    let mut history = IntensityHistory::new();
    for i in 0..6 {
        history.push(line(&[i as f32; 8]));
    }
    assert_eq!(history.len(), 5);

    // Lines 1..=5 survive; the mean of 1..=5 is 3.
    let averaged = history.averaged().unwrap();
    assert_eq!(averaged.values.len(), 8);
    for &v in &averaged.values {
        assert_relative_eq!(v, 3.0, epsilon = 1e-6);
    }
}

#[test]
fn test_length_change_resets_history() {
    let mut history = IntensityHistory::new();
    for i in 0..6 {
        history.push(line(&[i as f32; 8]));
    }
    assert_eq!(history.len(), 5);

    // The reader box was resized: a different-length line restarts the
    // history with just itself.
    history.push(line(&[42.0; 12]));
    assert_eq!(history.len(), 1);
    assert_eq!(history.line_len(), Some(12));

    let averaged = history.averaged().unwrap();
    for &v in &averaged.values {
        assert_relative_eq!(v, 42.0, epsilon = 1e-6);
    }
}

#[test]
fn test_averaged_is_elementwise_mean() {
    let mut history = IntensityHistory::new();
    history.push(line(&[10.0, 20.0, 30.0]));
    history.push(line(&[20.0, 40.0, 60.0]));

    let averaged = history.averaged().unwrap();
    assert_relative_eq!(averaged.values[0], 15.0, epsilon = 1e-6);
    assert_relative_eq!(averaged.values[1], 30.0, epsilon = 1e-6);
    assert_relative_eq!(averaged.values[2], 45.0, epsilon = 1e-6);
}

#[test]
fn test_empty_history_has_no_average() {
    let history = IntensityHistory::new();
    assert!(history.averaged().is_none());
    assert!(history.is_empty());
    assert_eq!(history.line_len(), None);
}

#[test]
fn test_oversaturation_threshold() {
    // Any value above 98 flags the line; exactly 98 does not.
    assert!(is_oversaturated(&[10.0, 98.1, 50.0]));
    assert!(!is_oversaturated(&[10.0, 98.0, 50.0]));
    assert!(!is_oversaturated(&[]));

    let mut history = IntensityHistory::new();
    history.push(line(&[99.0, 10.0]));
    assert!(history.averaged().unwrap().oversaturated);

    let mut history = IntensityHistory::new();
    history.push(line(&[98.0, 10.0]));
    assert!(!history.averaged().unwrap().oversaturated);
}
