// Reflection law on a line mirror, expressed with plain angles.
// Angles are radians counter-clockwise from +x, screen y pointing down.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

/// Wrap any finite angle into `[0, 2π)`.
pub fn normalize_angle(angle: f64) -> f64 {
    let r = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negatives; +0.0 drops a -0.0 sign
    if r >= TAU { 0.0 } else { r + 0.0 }
}

/// Send the ray straight back where it came from.
pub fn reverse(angle: f64) -> f64 {
    normalize_angle(angle + PI)
}

/// Which half-plane of the mirror line the ray arrives from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    /// Incidence outside `(ts, tb)`.
    A,
    /// Incidence strictly inside `(ts, tb)`.
    B,
}

impl Side {
    fn of(incidence: f64, ts: f64, tb: f64) -> Self {
        if ts < incidence && incidence < tb { Side::B } else { Side::A }
    }

    /// Normal of the mirror on this side.
    fn normal(self, tb: f64) -> f64 {
        match self {
            Side::A => normalize_angle(tb - FRAC_PI_2),
            Side::B => normalize_angle(tb + FRAC_PI_2),
        }
    }

    /// Lay an angle out in this side's ordering. Side A's interval wraps past
    /// 2π, so anything before `ts` is moved one full turn forward.
    fn local(self, angle: f64, ts: f64) -> f64 {
        match self {
            Side::A if angle < ts => angle + TAU,
            _ => angle,
        }
    }
}

/// Outgoing angle for a ray at `incidence` hitting a mirror whose tangent
/// points along `surface` (either of its two directions).
pub fn reflect(incidence: f64, surface: f64) -> f64 {
    let incidence = normalize_angle(incidence);
    let ts = surface.rem_euclid(PI);
    let tb = ts + PI;

    let side = Side::of(incidence, ts, tb);
    let d = side.local(incidence, ts);
    let s = side.local(side.normal(tb), ts);
    let delta = (d - s).abs();

    let turned = if d < s {
        incidence + PI + 2.0 * delta
    } else {
        incidence + PI - 2.0 * delta
    };
    normalize_angle(turned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::FRAC_PI_4;

    /// Distance between two angles on the circle.
    fn circ(a: f64, b: f64) -> f64 {
        let d = normalize_angle(a - b);
        d.min(TAU - d)
    }

    #[test]
    fn normalize_lands_in_range_and_is_idempotent() {
        let samples = [
            0.0, -0.0, 1.0, -1.0, PI, -PI, TAU, -TAU, 3.0 * TAU + 0.5, -7.25 * TAU,
            -1e-17, 1e-17, TAU - 1e-17, 1234.5678, -98765.4321,
        ];
        for theta in samples {
            let n = normalize_angle(theta);
            assert!((0.0..TAU).contains(&n), "{theta} -> {n}");
            assert!(n.is_sign_positive());
            assert_eq!(normalize_angle(n), n);
        }
    }

    #[test]
    fn head_on_vertical_mirror_sends_ray_back() {
        assert_abs_diff_eq!(reflect(0.0, FRAC_PI_2), PI, epsilon = 1e-12);
        // 0 and 2π are the same direction; compare on the circle
        assert!(circ(reflect(PI, FRAC_PI_2), 0.0) < 1e-12);
    }

    #[test]
    fn horizontal_mirror_flips_vertical_component() {
        assert_abs_diff_eq!(reflect(FRAC_PI_4, 0.0), 7.0 * FRAC_PI_4, epsilon = 1e-12);
        assert_abs_diff_eq!(reflect(7.0 * FRAC_PI_4, 0.0), FRAC_PI_4, epsilon = 1e-12);
        assert_abs_diff_eq!(reflect(3.0 * FRAC_PI_4, PI), 5.0 * FRAC_PI_4, epsilon = 1e-12);
    }

    #[test]
    fn matches_mirror_law_for_every_side() {
        // Reflecting direction d across a line at angle t gives 2t - d.
        for i in 0..24 {
            let surface = i as f64 * TAU / 24.0 + 0.01;
            for j in 0..36 {
                let incidence = j as f64 * TAU / 36.0 + 0.003;
                let got = reflect(incidence, surface);
                let want = normalize_angle(2.0 * surface - incidence);
                assert!(circ(got, want) < 1e-9, "d={incidence} t={surface}: {got} vs {want}");
                assert!((0.0..TAU).contains(&got));
            }
        }
    }

    #[test]
    fn surface_direction_does_not_matter() {
        let a = reflect(1.1, 0.4);
        let b = reflect(1.1, 0.4 + PI);
        assert!(circ(a, b) < 1e-12);
    }

    #[test]
    fn reverse_is_half_turn() {
        assert_abs_diff_eq!(reverse(FRAC_PI_4), 5.0 * FRAC_PI_4, epsilon = 1e-12);
        assert_abs_diff_eq!(reverse(3.0 * FRAC_PI_2), FRAC_PI_2, epsilon = 1e-12);
    }
}
