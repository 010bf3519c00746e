// One full laser run: march, bounce, repeat until the ray leaves the canvas
// or the bounce budget is spent.
// Visual: the returned laser buffer is the red zig-zag drawn over the mirrors.

use std::f64::consts::PI;

use crate::canvas::Canvas;
use crate::degenerate::{self, Failure, Strike};
use crate::marcher::{Outcome, march};
use crate::reflect::{normalize_angle, reflect, reverse};
use crate::stroke::StrokeStore;
use crate::surface::{FitParams, estimate_surface};
use crate::types::{BOUNCE_COLOR, CLEAR, FrameBuffer, Pixel};

pub const DEFAULT_BOUNCE_LIMIT: u32 = 100;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TraceSettings {
    pub origin: Pixel,
    /// Radians, counter-clockwise from +x.
    pub angle: f64,
    pub bounce_limit: u32,
    pub fit: FitParams,
}

impl TraceSettings {
    /// Laser entering from the middle of the left edge, heading right.
    pub fn from_left_edge(height: usize) -> Self {
        Self {
            origin: Pixel::new(0, (height / 2) as i32),
            angle: 0.0,
            bounce_limit: DEFAULT_BOUNCE_LIMIT,
            fit: FitParams::default(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Termination {
    Exited,
    BounceLimitReached,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BounceKind {
    Direct,
    Tunnel,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounce {
    pub position: Pixel,
    pub mirror: Pixel,
    pub kind: BounceKind,
    pub incidence: f64,
    pub outgoing: f64,
    pub failure: Option<Failure>,
}

#[derive(Clone, Debug)]
pub struct TraceReport {
    pub termination: Termination,
    pub bounces: u32,
    pub path: Vec<Bounce>,
    /// Pixels the laser crossed; `CLEAR` elsewhere.
    pub laser: FrameBuffer,
}

/// Outgoing angle straight from the reflection law, before any degenerate
/// check. Tunnel strikes and pixels without a usable trail bounce straight back.
fn reflected_angle(
    canvas: &Canvas,
    strokes: &StrokeStore,
    mirror: Pixel,
    kind: BounceKind,
    incidence: f64,
    fit: &FitParams,
) -> f64 {
    if kind == BounceKind::Tunnel {
        return reverse(incidence);
    }
    match estimate_surface(canvas, strokes, mirror, fit) {
        Some(surface) => {
            log::trace!(
                "surface at {mirror:?}: coarse {:.1}°, fine {:.1}°, using {}",
                surface.coarse * 180.0 / PI,
                surface.fine * 180.0 / PI,
                if surface.used_fine { "fine" } else { "coarse" }
            );
            reflect(incidence, surface.angle)
        }
        None => {
            log::debug!("ink at {mirror:?} has no trail; reversing");
            reverse(incidence)
        }
    }
}

/// Trace the laser over the current mirrors.
pub fn trace(canvas: &Canvas, strokes: &StrokeStore, settings: &TraceSettings) -> TraceReport {
    let mut laser = FrameBuffer::new(canvas.width(), canvas.height(), CLEAR);
    let mut path = Vec::new();
    let mut origin = settings.origin;
    let mut angle = normalize_angle(settings.angle);
    let mut bounces = 0;

    let termination = loop {
        let run = march(canvas, origin, angle, &mut laser);
        let (mirror, kind) = match run.outcome {
            Outcome::ExitedBounds => break Termination::Exited,
            Outcome::DirectStrike { mirror } => (mirror, BounceKind::Direct),
            Outcome::TunnelStrike { mirror } => (mirror, BounceKind::Tunnel),
        };
        laser.put(run.position, BOUNCE_COLOR);

        let reflected = reflected_angle(canvas, strokes, mirror, kind, angle, &settings.fit);
        let strike = Strike { origin, position: run.position, mirror, incidence: angle };
        let (outgoing, failure) = degenerate::resolve(canvas, strokes, &strike, reflected);

        log::debug!(
            "bounce {}: {kind:?} at {:?} off {mirror:?}, {:.1}° -> {:.1}°",
            bounces + 1,
            run.position,
            angle * 180.0 / PI,
            outgoing * 180.0 / PI
        );
        path.push(Bounce { position: run.position, mirror, kind, incidence: angle, outgoing, failure });

        bounces += 1;
        if bounces >= settings.bounce_limit {
            break Termination::BounceLimitReached;
        }
        origin = run.position;
        angle = outgoing;
    };

    log::info!("laser traced: {termination:?} after {bounces} bounces");
    TraceReport { termination, bounces, path, laser }
}
