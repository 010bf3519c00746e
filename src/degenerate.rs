// Catches reflections the line-mirror model gets wrong and replaces them with
// a direct reading of the ink around the ray.

use crate::canvas::Canvas;
use crate::marcher::step_pixel;
use crate::reflect::{normalize_angle, reverse};
use crate::stroke::StrokeStore;
use crate::types::Pixel;

/// Everything known about one strike.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Strike {
    /// Where the run that produced this strike started.
    pub origin: Pixel,
    /// Pixel the ray sat on when it struck.
    pub position: Pixel,
    /// Ink pixel that was struck.
    pub mirror: Pixel,
    /// Direction the ray arrived with.
    pub incidence: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Failure {
    /// The reflected ray's first pixel is ink again.
    Restrike,
    /// Origin, next pixel, mirror and its trail neighbor close a unit square:
    /// the ray is stuck in a concave pixel corner.
    UnitSquare,
}

/// The four orthogonal neighbors and the pull each exerts on the ray when it
/// is free of ink. `pull` is (horizontal sign, vertical sign) in math
/// orientation (+y up), so a free pixel above pulls the ray upward.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Neighbor {
    Right,
    Down,
    Left,
    Up,
}

impl Neighbor {
    pub const ALL: [Neighbor; 4] = [Neighbor::Right, Neighbor::Down, Neighbor::Left, Neighbor::Up];

    /// Screen offset (+y down).
    pub fn offset(self) -> (i32, i32) {
        match self {
            Neighbor::Right => (1, 0),
            Neighbor::Down => (0, 1),
            Neighbor::Left => (-1, 0),
            Neighbor::Up => (0, -1),
        }
    }

    fn pull(self) -> (i32, i32) {
        match self {
            Neighbor::Right => (1, 0),
            Neighbor::Down => (0, -1),
            Neighbor::Left => (-1, 0),
            Neighbor::Up => (0, 1),
        }
    }
}

/// True when the four pixels are the distinct corners of a 1x1 square.
pub fn is_unit_square(points: [Pixel; 4]) -> bool {
    for i in 0..4 {
        for j in i + 1..4 {
            if points[i] == points[j] {
                return false;
            }
        }
    }
    let min_x = points.iter().map(|p| p.x).min().unwrap_or(0);
    let max_x = points.iter().map(|p| p.x).max().unwrap_or(0);
    let min_y = points.iter().map(|p| p.y).min().unwrap_or(0);
    let max_y = points.iter().map(|p| p.y).max().unwrap_or(0);
    // Four distinct pixels inside a 2x2 box can only be its four corners.
    max_x - min_x == 1 && max_y - min_y == 1
}

/// Why the reflection `reflected` at `strike` cannot be trusted, if it can't.
pub fn check(canvas: &Canvas, strokes: &StrokeStore, strike: &Strike, reflected: f64) -> Option<Failure> {
    let next = step_pixel(strike.position, reflected, 1);
    if canvas.is_ink(next) {
        return Some(Failure::Restrike);
    }

    let neighbor = canvas
        .primary_stroke(strike.mirror)
        .and_then(|id| strokes.get(id))
        .and_then(|s| s.neighbor_of(strike.mirror))?;
    if is_unit_square([strike.origin, next, strike.mirror, neighbor]) {
        return Some(Failure::UnitSquare);
    }
    None
}

/// Steer the incidence direction toward the free orthogonal neighbors of
/// `position`. A free neighbor on one side only forces the matching
/// component to point at it; free (or blocked) neighbors on both sides leave
/// that component alone. With no effective change the ray is sent back.
pub fn corner_correction(canvas: &Canvas, position: Pixel, incidence: f64) -> f64 {
    let (mut pull_x, mut pull_y) = (0, 0);
    for n in Neighbor::ALL {
        let (dx, dy) = n.offset();
        let p = position.offset(dx, dy);
        if canvas.contains(p) && !canvas.is_ink(p) {
            let (px, py) = n.pull();
            pull_x += px;
            pull_y += py;
        }
    }

    let (sin, cos) = incidence.sin_cos();
    let cos = match pull_x.signum() {
        1 => cos.abs(),
        -1 => -cos.abs(),
        _ => cos,
    };
    let sin = match pull_y.signum() {
        1 => sin.abs(),
        -1 => -sin.abs(),
        _ => sin,
    };
    let corrected = normalize_angle(sin.atan2(cos));

    if (corrected - normalize_angle(incidence)).abs() < 1e-12 {
        reverse(incidence)
    } else {
        corrected
    }
}

/// Final outgoing angle for `strike`: `reflected` when it holds up, the
/// corner correction otherwise.
pub fn resolve(canvas: &Canvas, strokes: &StrokeStore, strike: &Strike, reflected: f64) -> (f64, Option<Failure>) {
    match check(canvas, strokes, strike, reflected) {
        None => (reflected, None),
        Some(failure) => {
            let corrected = corner_correction(canvas, strike.position, strike.incidence);
            log::debug!(
                "reflection at {:?} failed ({failure:?}); {:.3} rad replaced by {:.3} rad",
                strike.position,
                reflected,
                corrected
            );
            (corrected, Some(failure))
        }
    }
}
