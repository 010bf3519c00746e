// Local mirror orientation from the stroke's pixel trail.
// A freehand trail is jagged at pixel scale, so the tangent at a strike point
// is a least-squares fit over a few neighboring trail points.

use std::borrow::Cow;
use std::f64::consts::{FRAC_PI_2, PI};

use crate::canvas::Canvas;
use crate::reflect::normalize_angle;
use crate::stroke::{Stroke, StrokeStore};
use crate::types::Pixel;

/// Points in the smoothing (coarse) fit.
pub const COARSE_WINDOW: usize = 7;
/// Points in the curvature-following (fine) fit.
pub const FINE_WINDOW: usize = 3;
/// Coarse and fine surface angles further apart than this mean the coarse
/// fit is smearing over a bend; the fine one is used instead.
pub const WINDOW_TOLERANCE: f64 = PI / 12.0;

/// What the fit does with trail points whose pixels were erased.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ErasedPoints {
    /// Keep the full drawn history; erased pixels still shape the tangent.
    #[default]
    Retain,
    /// Fit only over trail points that are still ink on this stroke.
    Discard,
}

/// Parameters of the two-window estimate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FitParams {
    pub coarse_window: usize,
    pub fine_window: usize,
    pub tolerance: f64,
    pub erased_points: ErasedPoints,
}

impl Default for FitParams {
    fn default() -> Self {
        Self {
            coarse_window: COARSE_WINDOW,
            fine_window: FINE_WINDOW,
            tolerance: WINDOW_TOLERANCE,
            erased_points: ErasedPoints::Retain,
        }
    }
}

/// Ordinary least-squares slope dy/dx. `NaN` when every x is equal
/// (vertical trail) or there are no points.
pub fn linear_regression(points: &[Pixel]) -> f64 {
    let n = points.len() as f64;
    let (mut sx, mut sy, mut sxy, mut sxx) = (0.0, 0.0, 0.0, 0.0);
    for p in points {
        let (x, y) = (p.x as f64, p.y as f64);
        sx += x;
        sy += y;
        sxy += x * y;
        sxx += x * x;
    }
    let denom = n * sxx - sx * sx;
    if denom == 0.0 {
        return f64::NAN;
    }
    (n * sxy - sx * sy) / denom
}

/// Slope of `points` around `strike`, fitted over `window` consecutive trail
/// points centered on the first occurrence of `strike` (clamped at the ends
/// of the trail). Short trails are fitted whole. `None` if `strike` is not on
/// the trail.
pub fn estimate_tangent(points: &[Pixel], strike: Pixel, window: usize) -> Option<f64> {
    let at = points.iter().position(|&p| p == strike)?;
    if points.len() <= window {
        return Some(linear_regression(points));
    }
    let start = at.saturating_sub(window / 2).min(points.len() - window);
    Some(linear_regression(&points[start..start + window]))
}

/// Direction of the mirror line for a screen-space slope, in `[0, 2π)`.
/// Screen y grows downward, hence the sign flip; `NaN` is a vertical line.
pub fn surface_angle(slope: f64) -> f64 {
    if slope.is_nan() {
        FRAC_PI_2
    } else {
        normalize_angle((-slope).atan())
    }
}

/// Angle between two undirected lines, in `[0, π/2]`.
///
/// Used instead of the plain `|a - b|` of the two surface angles: a line at
/// 80° and one at -88° differ by 168° as raw angles but only 12° as mirrors.
pub fn line_angle_difference(a: f64, b: f64) -> f64 {
    let d = (a - b).rem_euclid(PI);
    d.min(PI - d)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceEstimate {
    pub coarse: f64,
    pub fine: f64,
    /// The one the reflection uses.
    pub angle: f64,
    pub used_fine: bool,
}

fn trail<'a>(canvas: &Canvas, stroke: &'a Stroke, policy: ErasedPoints) -> Cow<'a, [Pixel]> {
    match policy {
        ErasedPoints::Retain => Cow::Borrowed(stroke.points()),
        ErasedPoints::Discard => Cow::Owned(
            stroke
                .points()
                .iter()
                .copied()
                .filter(|&p| canvas.has_stroke(p, stroke.id()))
                .collect(),
        ),
    }
}

/// Surface angle at the ink pixel `mirror`, from the stroke that first
/// painted it. `None` when the pixel belongs to no stroke trail.
pub fn estimate_surface(
    canvas: &Canvas,
    strokes: &StrokeStore,
    mirror: Pixel,
    params: &FitParams,
) -> Option<SurfaceEstimate> {
    let stroke = strokes.get(canvas.primary_stroke(mirror)?)?;
    let points = trail(canvas, stroke, params.erased_points);

    let coarse = surface_angle(estimate_tangent(&points, mirror, params.coarse_window)?);
    let fine = surface_angle(estimate_tangent(&points, mirror, params.fine_window)?);
    let used_fine = line_angle_difference(coarse, fine) > params.tolerance;

    Some(SurfaceEstimate {
        coarse,
        fine,
        angle: if used_fine { fine } else { coarse },
        used_fine,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recorder::StrokeRecorder;
    use approx::assert_relative_eq;

    fn px(points: &[(i32, i32)]) -> Vec<Pixel> {
        points.iter().copied().map(Pixel::from).collect()
    }

    #[test]
    fn regression_recovers_exact_slope() {
        let line: Vec<Pixel> = (0..20).map(|i| Pixel::new(i, 3 + 2 * i)).collect();
        for window in 2..=line.len() {
            for &strike in &[line[0], line[9], line[19]] {
                let m = estimate_tangent(&line, strike, window).unwrap();
                assert_relative_eq!(m, 2.0, epsilon = 1e-9);
            }
        }

        let falling: Vec<Pixel> = (0..12).map(|i| Pixel::new(3 * i, 40 - i)).collect();
        let m = estimate_tangent(&falling, falling[6], 7).unwrap();
        assert_relative_eq!(m, -1.0 / 3.0, epsilon = 1e-9);
    }

    #[test]
    fn vertical_trail_is_nan_and_maps_to_right_angle() {
        let line: Vec<Pixel> = (0..10).map(|y| Pixel::new(4, y)).collect();
        let m = estimate_tangent(&line, Pixel::new(4, 5), 7).unwrap();
        assert!(m.is_nan());
        assert_relative_eq!(surface_angle(m), FRAC_PI_2);
        assert!(linear_regression(&[]).is_nan());
        assert!(linear_regression(&[Pixel::new(1, 1)]).is_nan());
    }

    #[test]
    fn window_is_centered_on_first_occurrence() {
        // Flat run, then a steep run. A window centered on (5, 0) only sees
        // the flat part; one centered on the corner sees both.
        let mut pts: Vec<Pixel> = (0..10).map(|x| Pixel::new(x, 0)).collect();
        pts.extend((1..10).map(|y| Pixel::new(9, y)));
        assert_relative_eq!(estimate_tangent(&pts, Pixel::new(5, 0), 7).unwrap(), 0.0);
        assert_relative_eq!(estimate_tangent(&pts, Pixel::new(5, 0), 3).unwrap(), 0.0);
        assert!(estimate_tangent(&pts, Pixel::new(9, 5), 3).unwrap().is_nan());
        assert!(estimate_tangent(&pts, Pixel::new(9, 0), 7).unwrap() > 0.0);

        // Near the start the window clamps instead of shrinking.
        assert_relative_eq!(estimate_tangent(&pts, Pixel::new(0, 0), 7).unwrap(), 0.0);

        // A repeated pixel resolves to its first occurrence.
        let looped = px(&[(0, 0), (1, 0), (2, 0), (3, 0), (4, 0), (4, 1), (4, 2), (4, 3), (4, 4), (1, 0)]);
        assert_relative_eq!(estimate_tangent(&looped, Pixel::new(1, 0), 3).unwrap(), 0.0);
    }

    #[test]
    fn missing_point_gives_none() {
        let pts = px(&[(0, 0), (1, 1)]);
        assert_eq!(estimate_tangent(&pts, Pixel::new(7, 7), 3), None);
    }

    #[test]
    fn surface_angle_sign_follows_screen_axes() {
        // Going right and up on screen means y decreases: slope -1 is 45°.
        assert_relative_eq!(surface_angle(-1.0), PI / 4.0, epsilon = 1e-12);
        assert_relative_eq!(surface_angle(1.0), 7.0 * PI / 4.0, epsilon = 1e-12);
        assert_eq!(surface_angle(0.0), 0.0);
        assert_eq!(surface_angle(-0.0), 0.0);
    }

    #[test]
    fn nearly_vertical_lines_are_close() {
        assert!(line_angle_difference(FRAC_PI_2 - 0.01, 3.0 * FRAC_PI_2 + 0.01) < 0.03);
        assert_relative_eq!(line_angle_difference(0.0, FRAC_PI_2), FRAC_PI_2);
    }

    #[test]
    fn steep_fits_on_opposite_sides_are_the_same_mirror() {
        let (coarse, fine) = (80f64.to_radians(), (-88f64).to_radians());
        assert!((coarse - fine).abs() > WINDOW_TOLERANCE);
        assert_relative_eq!(line_angle_difference(coarse, fine), 12f64.to_radians(), epsilon = 1e-12);
        assert!(line_angle_difference(coarse, fine) < WINDOW_TOLERANCE);
        // Order and normalization do not matter.
        assert_relative_eq!(
            line_angle_difference(normalize_angle(fine), coarse),
            12f64.to_radians(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn fine_fit_takes_over_at_a_corner() {
        let mut rec = StrokeRecorder::new(40, 40);
        rec.begin_stroke();
        rec.extend(Pixel::new(5, 20));
        rec.extend(Pixel::new(20, 20));
        rec.extend(Pixel::new(20, 5));
        rec.end_stroke();

        let params = FitParams::default();
        let flat = estimate_surface(rec.canvas(), rec.strokes(), Pixel::new(12, 20), &params).unwrap();
        assert!(!flat.used_fine);
        assert_relative_eq!(flat.angle, 0.0);

        // One pixel before the corner the 7-wide window already bends (about
        // 15.3 degrees), the 3-wide one is still flat.
        let near = estimate_surface(rec.canvas(), rec.strokes(), Pixel::new(19, 20), &params).unwrap();
        assert!(near.used_fine);
        assert_relative_eq!(near.angle, 0.0);
    }

    #[test]
    fn erased_points_policy_controls_ghost_history() {
        let mut rec = StrokeRecorder::new(40, 40);
        rec.begin_stroke();
        rec.extend(Pixel::new(5, 20));
        rec.extend(Pixel::new(20, 20));
        rec.extend(Pixel::new(20, 5));
        rec.end_stroke();
        // Remove the flat arm except its last three pixels.
        rec.erase(Pixel::new(10, 20), 7);

        let strike = Pixel::new(19, 20);
        let retain = FitParams::default();
        let discard = FitParams { erased_points: ErasedPoints::Discard, ..retain };

        let ghost = estimate_surface(rec.canvas(), rec.strokes(), strike, &retain).unwrap();
        let live = estimate_surface(rec.canvas(), rec.strokes(), strike, &discard).unwrap();
        assert_ne!(ghost.coarse, live.coarse);
        assert!(ghost.coarse < live.coarse || ghost.coarse > 3.0 * FRAC_PI_2);
    }

    #[test]
    fn unclaimed_pixel_has_no_surface() {
        let rec = StrokeRecorder::new(10, 10);
        let est = estimate_surface(rec.canvas(), rec.strokes(), Pixel::new(3, 3), &FitParams::default());
        assert_eq!(est, None);
    }
}
