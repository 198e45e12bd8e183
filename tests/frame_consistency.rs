//! Behavioural invariants across a grid of image/container/position cases.
//!
//! Every property here must hold for any input the editor can produce:
//! cover never exposes container edges, the visible region never escapes the
//! source image, the crop frame never leaves the thumbnail, the reference
//! frame converters round-trip, and the forward chain (crop frame) and the
//! reverse solver (position from frame) agree for positions the clamper
//! allows.

use covercrop::{Dims, GeometryError, Position, Rect, Viewport};

const CONTAINER: Dims = Dims::new(1050.0, 600.0);
const THUMB: f64 = 120.0;

const IMAGES: [Dims; 5] = [
    Dims::new(1920.0, 1080.0), // landscape
    Dims::new(800.0, 1200.0),  // portrait
    Dims::new(1000.0, 1000.0), // square
    Dims::new(2400.0, 600.0),  // wide
    Dims::new(400.0, 1800.0),  // tall
];

const POSITIONS: [Position; 7] = [
    Position::new(0.0, 0.0, 1.0),
    Position::new(100.0, 0.0, 1.0),
    Position::new(0.0, 50.0, 1.0),
    Position::new(-75.0, 25.0, 1.0),
    Position::new(0.0, 0.0, 1.5),
    Position::new(0.0, 0.0, 0.8),
    Position::new(50.0, -30.0, 1.2),
];

fn assert_close(actual: f64, expected: f64, tol: f64, what: &str) {
    assert!(
        (actual - expected).abs() <= tol,
        "{what}: {actual} vs {expected} (tol {tol})"
    );
}

#[test]
fn cover_never_falls_short_of_the_container() {
    for image in IMAGES {
        let fit = Viewport::new(image, CONTAINER).cover_fit();
        assert!(
            fit.width >= CONTAINER.width - 1e-9 && fit.height >= CONTAINER.height - 1e-9,
            "cover of {image:?} fell short: {fit:?}"
        );
    }
}

#[test]
fn visible_region_stays_inside_the_image() {
    for image in IMAGES {
        let v = Viewport::new(image, CONTAINER);
        for pos in POSITIONS {
            let region = v
                .visible_region(pos)
                .unwrap_or_else(|e| panic!("{image:?} {pos:?} rejected: {e:?}"));
            assert!(
                region.x >= 0.0
                    && region.y >= 0.0
                    && region.right() <= image.width + 1e-9
                    && region.bottom() <= image.height + 1e-9,
                "visible region {region:?} escaped {image:?} at {pos:?}"
            );
        }
    }
}

#[test]
fn crop_frame_stays_inside_the_thumbnail() {
    for image in IMAGES {
        let v = Viewport::new(image, CONTAINER);
        for pos in POSITIONS {
            let frame = v.crop_frame(pos, THUMB).unwrap();
            assert!(
                frame.x >= 0.0
                    && frame.y >= 0.0
                    && frame.right() <= THUMB + 1e-9
                    && frame.bottom() <= THUMB + 1e-9,
                "frame {frame:?} left the thumbnail for {image:?} at {pos:?}"
            );
            assert!(
                frame.width >= 1.0 && frame.height >= 1.0,
                "frame {frame:?} collapsed for {image:?} at {pos:?}"
            );
        }
    }
}

#[test]
fn clamped_covering_positions_expose_no_edges() {
    for image in IMAGES {
        let v = Viewport::new(image, CONTAINER);
        for pos in POSITIONS.into_iter().filter(|p| p.scale >= 1.0) {
            let draw = v.resolve_draw(v.clamp(pos));
            assert!(
                draw.left <= 1.0 && draw.top <= 1.0,
                "clamped draw {draw:?} exposed a leading edge for {image:?} at {pos:?}"
            );
            assert!(
                draw.left + draw.width >= CONTAINER.width - 1.0
                    && draw.top + draw.height >= CONTAINER.height - 1.0,
                "clamped draw {draw:?} exposed a trailing edge for {image:?} at {pos:?}"
            );
        }
    }
}

#[test]
fn reference_frame_conversion_round_trips() {
    for image in IMAGES {
        let v = Viewport::new(image, CONTAINER);
        for pos in POSITIONS {
            let thumb_pos = v.position_to_thumbnail(pos);
            let back = v.position_from_thumbnail(thumb_pos);
            assert_close(back.x, pos.x, 0.1, "converter x");
            assert_close(back.y, pos.y, 0.1, "converter y");
            assert_close(back.scale, pos.scale, 0.1, "converter scale");
        }
    }
}

#[test]
fn solver_reproduces_the_frame_it_was_given() {
    // Forward and reverse paths are independently derived; they must agree
    // for every placement the clamper allows at covering scale.
    for image in IMAGES {
        let v = Viewport::new(image, CONTAINER);
        for pos in POSITIONS.into_iter().filter(|p| p.scale >= 1.0) {
            let pos = v.clamp(pos);
            let frame = v.crop_frame(pos, THUMB).unwrap();
            let solved = v.position_from_frame(frame, THUMB);
            let replayed = v.crop_frame(solved, THUMB).unwrap();
            assert_close(replayed.x, frame.x, 2.0, "replayed frame x");
            assert_close(replayed.y, frame.y, 2.0, "replayed frame y");
            assert_close(replayed.width, frame.width, 2.0, "replayed frame width");
            assert_close(replayed.height, frame.height, 2.0, "replayed frame height");
        }
    }
}

#[test]
fn solved_positions_land_inside_clamp_bounds() {
    for image in IMAGES {
        let v = Viewport::new(image, CONTAINER);
        for pos in POSITIONS.into_iter().filter(|p| p.scale >= 1.0) {
            let pos = v.clamp(pos);
            let frame = v.crop_frame(pos, THUMB).unwrap();
            let solved = v.position_from_frame(frame, THUMB);
            let clamped = v.clamp(solved);
            assert_close(solved.x, clamped.x, 1.0, "solved x within clamp bounds");
            assert_close(solved.y, clamped.y, 1.0, "solved y within clamp bounds");
        }
    }
}

#[test]
fn degenerate_inputs_yield_sentinels_everywhere() {
    let v = Viewport::new(Dims::new(1920.0, 1080.0), CONTAINER);
    let bad_positions = [
        Position::new(f64::NAN, 0.0, 1.0),
        Position::new(0.0, f64::INFINITY, 1.0),
        Position::new(0.0, 0.0, 0.0),
        Position::new(0.0, 0.0, -2.0),
        Position::new(0.0, 0.0, f64::NAN),
    ];
    for pos in bad_positions {
        assert!(v.visible_region(pos).is_err(), "{pos:?} accepted");
        assert!(v.crop_frame(pos, THUMB).is_err(), "{pos:?} accepted");
        assert_eq!(v.clamp(pos), pos, "{pos:?} altered by clamp");
    }

    let empty = Viewport::new(Dims::new(0.0, 0.0), CONTAINER);
    let fit = empty.cover_fit();
    assert_eq!((fit.scale, fit.width, fit.height), (1.0, 0.0, 0.0));
    assert_eq!(
        empty.visible_region(Position::IDENTITY),
        Err(GeometryError::EmptyDims)
    );
    assert_eq!(
        empty.position_from_frame(Rect::new(0.0, 0.0, 60.0, 60.0), THUMB),
        Position::IDENTITY
    );

    let bad_frames = [
        Rect::new(0.0, 0.0, 0.0, 60.0),
        Rect::new(0.0, 0.0, 60.0, -1.0),
        Rect::new(f64::NAN, 0.0, 60.0, 60.0),
    ];
    for frame in bad_frames {
        assert_eq!(
            v.position_from_frame(frame, THUMB),
            Position::IDENTITY,
            "{frame:?} accepted"
        );
    }
}
