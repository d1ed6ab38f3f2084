//! Tests for the wrapped angular difference

use sim::angle_diff;
use std::f32::consts::PI;

#[test]
fn stays_within_half_turn_for_all_operands() {
    let mut target = -10.0f32;
    while target < 10.0 {
        let mut current = -10.0f32;
        while current < 10.0 {
            let d = angle_diff(target, current);
            assert!(
                d >= -PI && d <= PI,
                "angle_diff({target}, {current}) = {d} out of range"
            );
            current += 0.37;
        }
        target += 0.41;
    }
}

#[test]
fn zero_for_equal_angles() {
    for a in [-3.0f32, -0.5, 0.0, 1.25, 3.0] {
        let d = angle_diff(a, a);
        assert!(d.abs() < 1e-6, "angle_diff({a}, {a}) = {d}");
    }
}

#[test]
fn antisymmetric_away_from_the_seam() {
    for (a, b) in [(0.3f32, -1.2f32), (2.0, 1.0), (-2.5, 0.7)] {
        let forward = angle_diff(a, b);
        let reverse = angle_diff(b, a);
        assert!(
            (forward + reverse).abs() < 1e-5,
            "angle_diff({a}, {b}) = {forward}, angle_diff({b}, {a}) = {reverse}"
        );
    }
}

#[test]
fn half_turn_lands_on_the_seam() {
    // a difference of exactly pi wraps onto the seam with magnitude pi
    let d = angle_diff(PI, 0.0);
    assert!((d.abs() - PI).abs() < 1e-6, "got {d}");
}

#[test]
fn negative_operands_wrap_forward() {
    // target - current = -3pi/2, which wraps to +pi/2
    let d = angle_diff(-PI, PI / 2.0);
    assert!((d - PI / 2.0).abs() < 1e-5, "got {d}");

    // a difference beyond a full turn comes back into range
    let d = angle_diff(-7.0, 2.0);
    assert!(d >= -PI && d <= PI, "got {d}");
}
