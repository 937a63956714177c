//! Kinematics shared by players and falling bombs.
//!
//! Movement is resolved one axis at a time against a flat list of candidate
//! rectangles. Each pass moves the body first and then pushes it out of
//! whatever it now overlaps, in candidate order. Overlapping candidates are
//! not resolved exactly: on the vertical pass the first hit zeroes the
//! velocity and ends resolution, on the horizontal pass the last hit wins.

use bomber_core::geometry::Rect;

/// Outcome of a vertical pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VerticalResolution {
    pub rect: Rect,
    pub velocity_y: f32,
    /// Set when a downward move was stopped by a candidate's top edge.
    pub grounded: bool,
}

/// Euler step for vertical velocity. No terminal velocity.
pub fn apply_gravity(velocity_y: f32, gravity: f32, dt: f32) -> f32 {
    velocity_y + gravity * dt
}

/// Move `body` by `velocity_y * dt` along Y, then snap out of overlapping
/// candidates.
///
/// Falling bodies land on the candidate's top edge and become grounded;
/// rising bodies bump their head on its bottom edge. Either way the velocity
/// is zeroed, so later overlapping candidates in the same pass are left alone.
pub fn resolve_vertical<'a>(
    body: Rect,
    velocity_y: f32,
    dt: f32,
    candidates: impl IntoIterator<Item = &'a Rect>,
) -> VerticalResolution {
    let mut rect = body.translated(0.0, velocity_y * dt);
    let mut velocity_y = velocity_y;
    let mut grounded = false;

    for candidate in candidates {
        if !rect.intersects(candidate) {
            continue;
        }
        if velocity_y > 0.0 {
            rect = rect.with_bottom(candidate.top());
            velocity_y = 0.0;
            grounded = true;
        } else if velocity_y < 0.0 {
            rect = rect.with_top(candidate.bottom());
            velocity_y = 0.0;
        }
    }

    VerticalResolution {
        rect,
        velocity_y,
        grounded,
    }
}

/// Move `body` by `dx` along X, then snap out of every overlapping candidate.
pub fn resolve_horizontal<'a>(
    body: Rect,
    dx: f32,
    candidates: impl IntoIterator<Item = &'a Rect>,
) -> Rect {
    let mut rect = body.translated(dx, 0.0);

    for candidate in candidates {
        if !rect.intersects(candidate) {
            continue;
        }
        if dx > 0.0 {
            rect = rect.with_right(candidate.left());
        } else if dx < 0.0 {
            rect = rect.with_left(candidate.right());
        }
    }

    rect
}

/// Clamp a body horizontally into `[0, field_width - body.width]`.
pub fn clamp_to_field(body: Rect, field_width: f32) -> Rect {
    let max_x = (field_width - body.width).max(0.0);
    body.with_left(body.x.clamp(0.0, max_x))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLATFORM: Rect = Rect::new(0.0, 100.0, 200.0, 20.0);
    const NOTHING: [Rect; 0] = [];

    #[test]
    fn gravity_adds_acceleration() {
        assert_eq!(apply_gravity(0.0, 0.9, 1.0), 0.9);
        assert_eq!(apply_gravity(-15.0, 1.0, 0.5), -14.5);
    }

    #[test]
    fn free_fall_matches_closed_form() {
        let g = 0.5;
        let mut vy = 2.0;
        let mut body = Rect::new(0.0, 0.0, 10.0, 10.0);
        let mut expected_y = 0.0;
        for t in 1..=20 {
            let prev_vy = vy;
            vy = apply_gravity(vy, g, 1.0);
            assert!(vy > prev_vy, "velocity must strictly increase");
            assert_eq!(vy, 2.0 + g * t as f32);
            let res = resolve_vertical(body, vy, 1.0, &NOTHING);
            expected_y += vy;
            assert_eq!(res.velocity_y, vy);
            assert!(!res.grounded);
            body = res.rect;
            assert!((body.y - expected_y).abs() < 1e-3);
        }
    }

    #[test]
    fn falling_body_lands_on_top() {
        let body = Rect::new(50.0, 60.0, 30.0, 30.0);
        let res = resolve_vertical(body, 15.0, 1.0, &[PLATFORM]);
        assert_eq!(res.rect.bottom(), PLATFORM.top());
        assert_eq!(res.velocity_y, 0.0);
        assert!(res.grounded);
    }

    #[test]
    fn rising_body_bumps_head() {
        let body = Rect::new(50.0, 125.0, 30.0, 30.0);
        let res = resolve_vertical(body, -10.0, 1.0, &[PLATFORM]);
        assert_eq!(res.rect.top(), PLATFORM.bottom());
        assert_eq!(res.velocity_y, 0.0);
        assert!(!res.grounded);
    }

    #[test]
    fn resting_on_edge_is_not_a_collision() {
        // Bottom exactly on the platform top with zero velocity: no overlap,
        // so the body is not grounded by this pass.
        let body = Rect::new(50.0, 70.0, 30.0, 30.0);
        let res = resolve_vertical(body, 0.0, 1.0, &[PLATFORM]);
        assert_eq!(res.rect, body);
        assert!(!res.grounded);
    }

    #[test]
    fn first_overlap_wins_vertically() {
        let upper = Rect::new(0.0, 100.0, 100.0, 10.0);
        let lower = Rect::new(0.0, 105.0, 100.0, 10.0);
        let body = Rect::new(10.0, 70.0, 20.0, 20.0);
        let res = resolve_vertical(body, 30.0, 1.0, &[lower, upper]);
        assert_eq!(res.rect.bottom(), lower.top());
    }

    #[test]
    fn dt_scales_displacement() {
        let body = Rect::new(0.0, 0.0, 10.0, 10.0);
        let res = resolve_vertical(body, 8.0, 0.5, &NOTHING);
        assert_eq!(res.rect.y, 4.0);
    }

    #[test]
    fn horizontal_snaps_to_wall() {
        let wall = Rect::new(100.0, 0.0, 20.0, 100.0);
        let body = Rect::new(60.0, 10.0, 30.0, 30.0);
        let right = resolve_horizontal(body, 15.0, &[wall]);
        assert_eq!(right.right(), wall.left());

        let body = Rect::new(125.0, 10.0, 30.0, 30.0);
        let left = resolve_horizontal(body, -10.0, &[wall]);
        assert_eq!(left.left(), wall.right());
    }

    #[test]
    fn horizontal_ignores_floor_contact() {
        // Standing on a platform: bottom == top, no strict overlap.
        let body = Rect::new(50.0, 70.0, 30.0, 30.0);
        let moved = resolve_horizontal(body, 4.0, &[PLATFORM]);
        assert_eq!(moved, body.translated(4.0, 0.0));
    }

    #[test]
    fn clamp_keeps_body_in_field() {
        let body = Rect::new(-5.0, 0.0, 50.0, 50.0);
        assert_eq!(clamp_to_field(body, 1000.0).x, 0.0);
        let body = Rect::new(990.0, 0.0, 50.0, 50.0);
        assert_eq!(clamp_to_field(body, 1000.0).x, 950.0);
        let body = Rect::new(300.0, 0.0, 50.0, 50.0);
        assert_eq!(clamp_to_field(body, 1000.0), body);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        const TILE: f32 = 20.0;

        fn tile_set() -> impl Strategy<Value = Vec<Rect>> {
            proptest::collection::vec(proptest::bool::ANY, 100).prop_map(|cells| {
                cells
                    .iter()
                    .enumerate()
                    .filter(|(_, solid)| **solid)
                    .map(|(i, _)| {
                        Rect::new((i % 10) as f32 * TILE, (i / 10) as f32 * TILE, TILE, TILE)
                    })
                    .collect()
            })
        }

        // Quarter-pixel values keep every edge sum exact in f32.
        fn quarter(range: std::ops::Range<i32>) -> impl Strategy<Value = f32> {
            range.prop_map(|q| q as f32 * 0.25)
        }

        fn body() -> impl Strategy<Value = (f32, f32, f32, f32)> {
            (quarter(0..720), quarter(0..720), quarter(20..160), quarter(20..160))
        }

        proptest! {
            // A body that starts clear of a tile grid and moves less than one
            // tile per pass never ends a pass inside a tile.
            #[test]
            fn vertical_pass_leaves_no_overlap(
                tiles in tile_set(),
                (x, y, w, h) in body(),
                vy in quarter(-78..78),
            ) {
                let body = Rect::new(x, y, w, h);
                prop_assume!(tiles.iter().all(|t| !body.intersects(t)));
                let res = resolve_vertical(body, vy, 1.0, &tiles);
                prop_assert!(tiles.iter().all(|t| !res.rect.intersects(t)));
                prop_assert_eq!(res.rect.x, body.x);
                if res.grounded {
                    prop_assert_eq!(res.velocity_y, 0.0);
                }
            }

            // Any start gap closed within one tick lands exactly on the top.
            #[test]
            fn falling_body_snaps_onto_platform_top(
                w in quarter(20..160),
                h in quarter(20..160),
                gap in quarter(0..80),
                vy in quarter(1..80),
            ) {
                prop_assume!(vy > gap);
                let platform = Rect::new(0.0, 200.0, 200.0, 100.0);
                let body = Rect::new(40.0, platform.top() - gap - h, w, h);
                let res = resolve_vertical(body, vy, 1.0, &[platform]);
                prop_assert!(res.grounded);
                prop_assert_eq!(res.rect.bottom(), platform.top());
                prop_assert_eq!(res.velocity_y, 0.0);
            }

            #[test]
            fn horizontal_pass_leaves_no_overlap(
                tiles in tile_set(),
                (x, y, w, h) in body(),
                dx in quarter(-78..78),
            ) {
                let body = Rect::new(x, y, w, h);
                prop_assume!(tiles.iter().all(|t| !body.intersects(t)));
                let moved = resolve_horizontal(body, dx, &tiles);
                prop_assert!(tiles.iter().all(|t| !moved.intersects(t)));
                prop_assert_eq!(moved.y, body.y);
            }
        }
    }
}
