mod common;

use ndarray::Array3;
use tempfile::tempdir;

use startrail_core::error::StarTrailError;
use startrail_core::frame::{Dimensions, Frame};
use startrail_core::pipeline::NoOpReporter;
use startrail_core::stack::{max_stack, stack_paths, stack_paths_parallel, MaxAccumulator};

use common::{write_grid_png, write_png, write_uniform_png};

fn gray_frame(rows: &[&[f32]]) -> Frame {
    let h = rows.len();
    let w = rows[0].len();
    Frame::new(Array3::from_shape_fn((h, w, 3), |(r, c, _)| rows[r][c]))
}

#[test]
fn test_new_accumulator_is_zero() {
    let acc = MaxAccumulator::new(Dimensions::new(5, 3));
    assert_eq!(acc.state().dim(), (3, 5, 3));
    assert!(acc.state().iter().all(|&v| v == 0.0));
    assert_eq!(acc.frame_count(), 0);
}

#[test]
fn test_two_by_two_scenario() {
    let a = gray_frame(&[&[10.0, 10.0], &[10.0, 10.0]]);
    let b = gray_frame(&[&[5.0, 50.0], &[5.0, 5.0]]);

    let mut acc = MaxAccumulator::new(a.dimensions());
    acc.accumulate(&a).unwrap();
    acc.accumulate(&b).unwrap();
    let img = acc.finalize().unwrap();

    for ch in 0..3 {
        assert_eq!(img.get_pixel(0, 0).0[ch], 10);
        assert_eq!(img.get_pixel(1, 0).0[ch], 50);
        assert_eq!(img.get_pixel(0, 1).0[ch], 10);
        assert_eq!(img.get_pixel(1, 1).0[ch], 10);
    }
}

#[test]
fn test_single_image_passes_through() {
    let frame = Frame::filled(Dimensions::new(1, 1), 200.0);
    let mut acc = MaxAccumulator::new(frame.dimensions());
    acc.accumulate(&frame).unwrap();
    let img = acc.finalize().unwrap();
    assert_eq!(img.dimensions(), (1, 1));
    assert_eq!(img.get_pixel(0, 0).0, [200, 200, 200]);
}

#[test]
fn test_accumulate_is_monotonic() {
    let dims = Dimensions::new(3, 2);
    let mut acc = MaxAccumulator::new(dims);
    let inputs = [
        gray_frame(&[&[7.0, 0.0, 30.0], &[1.0, 2.0, 3.0]]),
        gray_frame(&[&[3.0, 9.0, 10.0], &[0.0, 0.0, 0.0]]),
        gray_frame(&[&[255.0, 1.0, 29.0], &[4.0, 1.0, 2.0]]),
    ];

    for frame in &inputs {
        let before = acc.state().clone();
        acc.accumulate(frame).unwrap();
        for (after, before) in acc.state().iter().zip(before.iter()) {
            assert!(after >= before);
        }
    }
}

#[test]
fn test_darker_image_has_no_effect() {
    let bright = Frame::filled(Dimensions::new(4, 4), 120.0);
    let dark = Frame::filled(Dimensions::new(4, 4), 119.0);
    let mut acc = MaxAccumulator::new(bright.dimensions());
    acc.accumulate(&bright).unwrap();
    let snapshot = acc.state().clone();
    acc.accumulate(&dark).unwrap();
    assert_eq!(acc.state(), &snapshot);
}

#[test]
fn test_order_independent() {
    let frames = [
        gray_frame(&[&[1.0, 90.0], &[30.0, 4.0]]),
        gray_frame(&[&[80.0, 2.0], &[3.0, 40.0]]),
        gray_frame(&[&[5.0, 6.0], &[70.0, 8.0]]),
    ];
    let forward = max_stack(&frames).unwrap();
    let reversed: Vec<Frame> = frames.iter().rev().cloned().collect();
    let backward = max_stack(&reversed).unwrap();
    assert_eq!(forward.data, backward.data);
    assert_eq!(forward.data[[0, 0, 1]], 80.0);
    assert_eq!(forward.data[[1, 0, 2]], 70.0);
}

#[test]
fn test_duplicate_image_is_idempotent() {
    let a = gray_frame(&[&[12.0, 0.0], &[250.0, 3.0]]);
    let b = gray_frame(&[&[1.0, 99.0], &[0.0, 3.0]]);
    let once = max_stack(&[a.clone(), b.clone()]).unwrap();
    let twice = max_stack(&[a.clone(), b, a]).unwrap();
    assert_eq!(once.data, twice.data);
}

#[test]
fn test_black_image_is_identity() {
    let a = gray_frame(&[&[12.0, 0.0], &[250.0, 3.0]]);
    let black = Frame::filled(a.dimensions(), 0.0);
    let result = max_stack(&[black, a.clone()]).unwrap();
    assert_eq!(result.data, a.data);
}

#[test]
fn test_channels_are_independent() {
    let mut a = Frame::filled(Dimensions::new(1, 1), 0.0);
    a.data[[0, 0, 0]] = 200.0;
    let mut b = Frame::filled(Dimensions::new(1, 1), 0.0);
    b.data[[0, 0, 2]] = 100.0;
    let result = max_stack(&[a, b]).unwrap();
    assert_eq!(result.data[[0, 0, 0]], 200.0);
    assert_eq!(result.data[[0, 0, 1]], 0.0);
    assert_eq!(result.data[[0, 0, 2]], 100.0);
}

#[test]
fn test_shape_mismatch_reports_dimensions() {
    let mut acc = MaxAccumulator::new(Dimensions::new(4, 3));
    let wrong = Frame::filled(Dimensions::new(5, 3), 1.0);
    match acc.accumulate(&wrong) {
        Err(StarTrailError::ShapeMismatch {
            expected, actual, ..
        }) => {
            assert_eq!(expected, Dimensions::new(4, 3));
            assert_eq!(actual, Dimensions::new(5, 3));
        }
        other => panic!("expected ShapeMismatch, got {other:?}"),
    }
    assert_eq!(acc.frame_count(), 0);
}

#[test]
fn test_empty_error() {
    let frames: Vec<Frame> = vec![];
    assert!(matches!(
        max_stack(&frames),
        Err(StarTrailError::NoInputImages { .. })
    ));
    assert!(matches!(
        stack_paths(&[], &NoOpReporter),
        Err(StarTrailError::NoInputImages { .. })
    ));
}

#[test]
fn test_merge_is_commutative() {
    let dims = Dimensions::new(2, 2);
    let mut left = MaxAccumulator::new(dims);
    left.accumulate(&gray_frame(&[&[1.0, 50.0], &[3.0, 0.0]])).unwrap();
    let mut right = MaxAccumulator::new(dims);
    right.accumulate(&gray_frame(&[&[9.0, 2.0], &[3.0, 4.0]])).unwrap();

    let mut lr = left.clone();
    lr.merge(&right).unwrap();
    let mut rl = right.clone();
    rl.merge(&left).unwrap();

    assert_eq!(lr.state(), rl.state());
    assert_eq!(lr.frame_count(), 2);
}

#[test]
fn test_merge_rejects_other_size() {
    let mut a = MaxAccumulator::new(Dimensions::new(2, 2));
    let b = MaxAccumulator::new(Dimensions::new(2, 3));
    assert!(matches!(a.merge(&b), Err(StarTrailError::ShapeMismatch { .. })));
}

#[test]
fn test_large_frame_uses_same_result() {
    // Above the parallel threshold.
    let dims = Dimensions::new(300, 300);
    let mut a = Frame::filled(dims, 10.0);
    a.data[[299, 299, 1]] = 240.0;
    let b = Frame::filled(dims, 20.0);
    let result = max_stack(&[a, b]).unwrap();
    assert_eq!(result.data[[0, 0, 0]], 20.0);
    assert_eq!(result.data[[299, 299, 1]], 240.0);
    assert_eq!(result.data[[299, 299, 0]], 20.0);
}

#[test]
fn test_finalize_rounds_and_clamps() {
    let mut frame = Frame::filled(Dimensions::new(3, 1), 0.0);
    frame.data[[0, 0, 0]] = 99.6;
    frame.data[[0, 1, 0]] = 300.0;
    frame.data[[0, 2, 0]] = 12.4;
    let mut acc = MaxAccumulator::new(frame.dimensions());
    acc.accumulate(&frame).unwrap();
    let img = acc.finalize().unwrap();
    assert_eq!(img.get_pixel(0, 0).0[0], 100);
    assert_eq!(img.get_pixel(1, 0).0[0], 255);
    assert_eq!(img.get_pixel(2, 0).0[0], 12);
}

#[test]
fn test_stack_paths_streams_files() {
    let dir = tempdir().unwrap();
    let a = write_grid_png(dir.path(), "a.png", &[&[10, 10], &[10, 10]]);
    let b = write_grid_png(dir.path(), "b.png", &[&[5, 50], &[5, 5]]);

    let acc = stack_paths(&[a, b], &NoOpReporter).unwrap();
    assert_eq!(acc.frame_count(), 2);
    let img = acc.finalize().unwrap();
    assert_eq!(img.get_pixel(1, 0).0, [50, 50, 50]);
    assert_eq!(img.get_pixel(0, 1).0, [10, 10, 10]);
}

#[test]
fn test_stack_paths_stops_on_mismatch() {
    let dir = tempdir().unwrap();
    let a = write_uniform_png(dir.path(), "a.png", 4, 4, 1);
    let b = write_uniform_png(dir.path(), "b.png", 5, 4, 1);
    let err = stack_paths(&[a, b], &NoOpReporter).unwrap_err();
    assert!(matches!(err, StarTrailError::ShapeMismatch { .. }));
    assert!(err.to_string().contains("expected 4x4, got 5x4"), "got: {err}");
}

#[test]
fn test_stack_paths_stops_on_corrupt_file() {
    let dir = tempdir().unwrap();
    let good = write_uniform_png(dir.path(), "a.png", 2, 2, 1);
    let bad = dir.path().join("b.png");
    std::fs::write(&bad, b"not an image").unwrap();

    match stack_paths(&[good, bad.clone()], &NoOpReporter) {
        Err(StarTrailError::Decode { path, .. }) => assert_eq!(path, bad),
        other => panic!("expected Decode, got {other:?}"),
    }
}

#[test]
fn test_parallel_matches_sequential() {
    let dir = tempdir().unwrap();
    let paths: Vec<_> = (0..12u32)
        .map(|i| {
            write_png(dir.path(), &format!("img{i:03}.png"), 16, 9, move |x, y| {
                let v = ((x * 31 + y * 17 + i * 53) % 256) as u8;
                [v, v.wrapping_mul(3), 255 - v]
            })
        })
        .collect();

    let sequential = stack_paths(&paths, &NoOpReporter).unwrap();
    let parallel = stack_paths_parallel(&paths, &NoOpReporter).unwrap();
    assert_eq!(parallel.frame_count(), 12);
    assert_eq!(sequential.state(), parallel.state());
}

#[test]
fn test_parallel_detects_mismatch() {
    let dir = tempdir().unwrap();
    let mut paths: Vec<_> = (0..6)
        .map(|i| write_uniform_png(dir.path(), &format!("img{i}.png"), 8, 8, 3))
        .collect();
    paths.push(write_uniform_png(dir.path(), "odd.png", 8, 7, 3));
    assert!(matches!(
        stack_paths_parallel(&paths, &NoOpReporter),
        Err(StarTrailError::ShapeMismatch { .. })
    ));
}
