// Walks the laser one pixel at a time until it leaves the canvas or meets ink.
// Visual: every pixel the ray crosses turns red in the laser buffer.

use crate::canvas::Canvas;
use crate::types::{FrameBuffer, LASER_COLOR, Pixel};

/// Components smaller than this count as zero when deciding whether the ray
/// travels diagonally.
const AXIS_EPSILON: f64 = 1e-9;

/// How a straight run of the laser ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The next pixel would be off the canvas.
    ExitedBounds,
    /// The next pixel is ink.
    DirectStrike { mirror: Pixel },
    /// A diagonal ray squeezed between two ink pixels of a thin stroke.
    /// `mirror` is the vertical one of the pair.
    TunnelStrike { mirror: Pixel },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct March {
    /// Last pixel the ray occupied.
    pub position: Pixel,
    pub outcome: Outcome,
    /// Pixels advanced (the step that stopped the ray not included).
    pub steps: u32,
}

/// Pixel reached after `n` unit steps from `origin` along `angle`.
#[inline]
pub fn step_pixel(origin: Pixel, angle: f64, n: u32) -> Pixel {
    let n = n as f64;
    Pixel::new(
        (origin.x as f64 + n * angle.cos()).round() as i32,
        (origin.y as f64 - n * angle.sin()).round() as i32,
    )
}

/// The two orthogonal neighbors a diagonal ray could slip between.
/// Quadrant sign table:
///   cos > 0 -> step right, cos < 0 -> step left,
///   sin > 0 -> step up (row - 1), sin < 0 -> step down (row + 1).
fn diagonal_neighbors(current: Pixel, cos: f64, sin: f64) -> Option<(Pixel, Pixel)> {
    if cos.abs() <= AXIS_EPSILON || sin.abs() <= AXIS_EPSILON {
        return None;
    }
    let dx = if cos > 0.0 { 1 } else { -1 };
    let dy = if -sin > 0.0 { 1 } else { -1 };
    Some((current.offset(dx, 0), current.offset(0, dy)))
}

/// March from `origin` along `angle`, marking traversed pixels in `laser`.
pub fn march(canvas: &Canvas, origin: Pixel, angle: f64, laser: &mut FrameBuffer) -> March {
    if !angle.is_finite() {
        log::warn!("refusing to march along non-finite angle {angle}");
        return March { position: origin, outcome: Outcome::ExitedBounds, steps: 0 };
    }
    let (sin, cos) = angle.sin_cos();
    let mut current = origin;
    let mut n = 1;

    loop {
        let next = step_pixel(origin, angle, n);

        if !canvas.contains(next) {
            return March { position: current, outcome: Outcome::ExitedBounds, steps: n - 1 };
        }

        if canvas.is_ink(next) {
            return March {
                position: current,
                outcome: Outcome::DirectStrike { mirror: next },
                steps: n - 1,
            };
        }

        if let Some((horizontal, vertical)) = diagonal_neighbors(current, cos, sin) {
            if canvas.is_ink(horizontal) && canvas.is_ink(vertical) {
                return March {
                    position: current,
                    outcome: Outcome::TunnelStrike { mirror: vertical },
                    steps: n - 1,
                };
            }
        }

        laser.put(next, LASER_COLOR);
        current = next;
        n += 1;
    }
}
