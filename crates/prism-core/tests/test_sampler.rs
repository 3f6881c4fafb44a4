use approx::assert_relative_eq;
use ndarray::Array3;

use prism_core::error::PrismError;
use prism_core::frame::RgbFrame;
use prism_core::io::frames::{load_rgb_frame, save_preview_png};
use prism_core::geometry::{NormPoint, ReaderBox};
use prism_core::pipeline::FrameArena;
use prism_core::sampler::{sample_reader_box, ReducePolicy};

/// Gray frame whose brightness ramps left to right: every channel of
/// pixel (row, col) is col / (w - 1).
fn horizontal_gradient(h: usize, w: usize) -> RgbFrame {
    let data = Array3::from_shape_fn((h, w, 3), |(_, col, _)| col as f32 / (w - 1) as f32);
    RgbFrame::new(data)
}

/// Gray frame whose brightness ramps top to bottom.
fn vertical_gradient(h: usize, w: usize) -> RgbFrame {
    let data = Array3::from_shape_fn((h, w, 3), |(row, _, _)| row as f32 / (h - 1) as f32);
    RgbFrame::new(data)
}

fn solid_frame(h: usize, w: usize, value: f32) -> RgbFrame {
    RgbFrame::new(Array3::from_elem((h, w, 3), value))
}

#[test]
fn test_horizontal_box_samples_gradient() {
    let frame = horizontal_gradient(100, 100);
    let rb = ReaderBox::new(
        NormPoint::new(0.2, 0.5),
        NormPoint::new(0.8, 0.5),
        0.1,
    );

    let mut arena = FrameArena::new();
    let mut scope = arena.scope();
    let strip = sample_reader_box(&frame, &rb, ReducePolicy::MiddleRow, &mut scope).unwrap();

    // Corner pixels land on cols 20..=79, so the line spans 60 columns.
    assert_eq!(strip.line.len(), 60);

    // Each column reads the gradient at frame column 20 + j.
    for (j, &v) in strip.line.values.iter().enumerate() {
        let expected = 100.0 * (20 + j) as f32 / 99.0;
        assert_relative_eq!(v, expected, epsilon = 1e-3);
    }
}

#[test]
fn test_vertical_box_rotates_to_horizontal() {
    let frame = vertical_gradient(100, 100);
    let rb = ReaderBox::new(
        NormPoint::new(0.5, 0.2),
        NormPoint::new(0.5, 0.8),
        0.1,
    );

    let mut arena = FrameArena::new();
    let mut scope = arena.scope();
    let strip = sample_reader_box(&frame, &rb, ReducePolicy::MiddleRow, &mut scope).unwrap();

    // The 90-degree box reads rows 20..=79; after rotation the line runs
    // low endpoint to high endpoint.
    assert_eq!(strip.line.len(), 60);
    for (j, &v) in strip.line.values.iter().enumerate() {
        let expected = 100.0 * (20 + j) as f32 / 99.0;
        assert_relative_eq!(v, expected, epsilon = 1e-3);
    }
}

#[test]
fn test_diagonal_box_on_solid_frame() {
    let frame = solid_frame(120, 120, 0.5);
    let rb = ReaderBox::new(
        NormPoint::new(0.2, 0.2),
        NormPoint::new(0.8, 0.8),
        0.08,
    );

    let mut arena = FrameArena::new();
    let mut scope = arena.scope();
    let strip = sample_reader_box(&frame, &rb, ReducePolicy::MiddleRow, &mut scope).unwrap();

    assert!(!strip.line.is_empty());
    for &v in &strip.line.values {
        assert_relative_eq!(v, 50.0, epsilon = 1e-3);
    }
}

#[test]
fn test_fully_saturated_line_reports_max() {
    // An all-white frame reports the top of the scale, it does not error.
    let frame = solid_frame(100, 100, 1.0);
    let rb = ReaderBox::new(
        NormPoint::new(0.2, 0.5),
        NormPoint::new(0.8, 0.5),
        0.1,
    );

    let mut arena = FrameArena::new();
    let mut scope = arena.scope();
    let strip = sample_reader_box(&frame, &rb, ReducePolicy::MiddleRow, &mut scope).unwrap();
    assert!(strip.line.values.iter().all(|&v| v == 100.0));
}

#[test]
fn test_max_saturation_picks_chromatic_row() {
    // Gray everywhere except frame row 47 (inside the box), which is pure
    // red: saturation 1 against 0 elsewhere.
    let mut data = Array3::from_elem((100, 100, 3), 0.5);
    for col in 0..100 {
        data[[47, col, 0]] = 1.0;
        data[[47, col, 1]] = 0.0;
        data[[47, col, 2]] = 0.0;
    }
    let frame = RgbFrame::new(data);
    let rb = ReaderBox::new(
        NormPoint::new(0.2, 0.5),
        NormPoint::new(0.8, 0.5),
        0.1,
    );

    let mut arena = FrameArena::new();

    let mut scope = arena.scope();
    let max_sat =
        sample_reader_box(&frame, &rb, ReducePolicy::MaxSaturation, &mut scope).unwrap();
    drop(scope);
    assert!(max_sat.line.values.iter().all(|&v| v == 100.0));

    let mut scope = arena.scope();
    let middle = sample_reader_box(&frame, &rb, ReducePolicy::MiddleRow, &mut scope).unwrap();
    assert!(middle.line.values.iter().all(|&v| (v - 50.0).abs() < 1e-3));
}

#[test]
fn test_corners_outside_frame_abort() {
    let frame = solid_frame(50, 50, 0.5);
    // High endpoint past the right edge.
    let rb = ReaderBox::new(
        NormPoint::new(0.9, 0.5),
        NormPoint::new(1.2, 0.5),
        0.05,
    );

    let mut arena = FrameArena::new();
    let mut scope = arena.scope();
    let err = sample_reader_box(&frame, &rb, ReducePolicy::MiddleRow, &mut scope).unwrap_err();
    assert!(matches!(err, PrismError::CornerOutOfBounds { .. }));
}

#[test]
fn test_preview_matches_strip_dimensions() {
    let frame = horizontal_gradient(100, 100);
    let rb = ReaderBox::new(
        NormPoint::new(0.2, 0.5),
        NormPoint::new(0.8, 0.5),
        0.1,
    );

    let mut arena = FrameArena::new();
    let mut scope = arena.scope();
    let strip = sample_reader_box(&frame, &rb, ReducePolicy::MiddleRow, &mut scope).unwrap();

    assert_eq!(strip.preview.width() as usize, strip.line.len());
    // Corner pixels span rows 45..=54 of the frame.
    assert_eq!(strip.preview.height(), 10);
}

#[test]
fn test_preview_round_trips_to_disk() {
    let frame = horizontal_gradient(100, 100);
    let rb = ReaderBox::new(
        NormPoint::new(0.2, 0.5),
        NormPoint::new(0.8, 0.5),
        0.1,
    );

    let mut arena = FrameArena::new();
    let mut scope = arena.scope();
    let strip = sample_reader_box(&frame, &rb, ReducePolicy::MiddleRow, &mut scope).unwrap();

    let tmp = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
    save_preview_png(&strip.preview, tmp.path()).unwrap();

    let reloaded = load_rgb_frame(tmp.path()).unwrap();
    assert_eq!(reloaded.width(), strip.line.len());
    assert_eq!(reloaded.height(), 10);
}

#[test]
fn test_arena_reuses_buffers_across_ticks() {
    let frame = horizontal_gradient(100, 100);
    let rb = ReaderBox::new(
        NormPoint::new(0.2, 0.5),
        NormPoint::new(0.8, 0.5),
        0.1,
    );

    let mut arena = FrameArena::new();
    for _ in 0..3 {
        let mut scope = arena.scope();
        sample_reader_box(&frame, &rb, ReducePolicy::MiddleRow, &mut scope).unwrap();
    }
    // Scratch buffers stay pooled between ticks, bounded by the budget.
    assert!(arena.pooled_bytes() > 0);
}
