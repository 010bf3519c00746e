// Turns pointer samples into mirror pixels.
// Visual expectation: while you hold the draw button a continuous white line
// follows the pointer, even when the mouse moves several pixels per frame;
// the erase button punches a square hole into whatever is under the pointer.

use crate::canvas::Canvas;
use crate::stroke::{StrokeId, StrokeStore};
use crate::types::{BACKGROUND, FrameBuffer, INK_COLOR, Pixel};

/// Sole writer of the canvas, the stroke store and the ink color buffer.
pub struct StrokeRecorder {
    canvas: Canvas,
    strokes: StrokeStore,
    ink: FrameBuffer,           // what the window shows under the laser
    active: Option<StrokeId>,   // stroke receiving samples, if a draw gesture is live
}

impl StrokeRecorder {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            canvas: Canvas::new(width, height),
            strokes: StrokeStore::new(),
            ink: FrameBuffer::new(width, height, BACKGROUND),
            active: None,
        }
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn strokes(&self) -> &StrokeStore {
        &self.strokes
    }

    pub fn ink(&self) -> &FrameBuffer {
        &self.ink
    }

    pub fn active(&self) -> Option<StrokeId> {
        self.active
    }

    /// Start a new (empty) stroke and route future samples into it.
    pub fn begin_stroke(&mut self) -> StrokeId {
        if let Some(open) = self.active {
            log::debug!("stroke {} still open; closing it", open.0);
        }
        let id = self.strokes.create();
        self.active = Some(id);
        log::debug!("stroke {} started", id.0);
        id
    }

    /// Add a pointer sample to the active stroke, filling the gap from the
    /// previous sample so the trail has no holes.
    pub fn extend(&mut self, point: Pixel) {
        let Some(id) = self.active else { return };
        if !self.canvas.contains(point) {
            return;
        }
        let last = self.strokes.get(id).and_then(|s| s.last());
        match last {
            None => self.plot(id, point),
            Some(from) => {
                for p in segment(from, point) {
                    self.plot(id, p);
                }
            }
        }
    }

    /// Close the active stroke. It stays in the store for later geometry queries.
    pub fn end_stroke(&mut self) -> Option<StrokeId> {
        let id = self.active.take()?;
        let len = self.strokes.get(id).map_or(0, |s| s.points().len());
        log::debug!("stroke {} finished with {len} points", id.0);
        Some(id)
    }

    /// Clear ink and stroke membership in the square of half-size `radius`
    /// around `center`. Stroke trails keep their points.
    pub fn erase(&mut self, center: Pixel, radius: i32) {
        if radius < 0 {
            return;
        }
        let w = self.canvas.width() as i32;
        let h = self.canvas.height() as i32;
        let (x0, x1) = (center.x.saturating_sub(radius).max(0), center.x.saturating_add(radius).min(w - 1));
        let (y0, y1) = (center.y.saturating_sub(radius).max(0), center.y.saturating_add(radius).min(h - 1));
        for y in y0..=y1 {
            for x in x0..=x1 {
                let p = Pixel::new(x, y);
                if self.canvas.clear(p) {
                    self.ink.put(p, BACKGROUND);
                }
            }
        }
    }

    fn plot(&mut self, id: StrokeId, p: Pixel) {
        if !self.canvas.paint(p, id) {
            return;
        }
        if let Some(stroke) = self.strokes.get_mut(id) {
            stroke.push(p);
        }
        self.ink.put(p, INK_COLOR);
    }
}

/// Pixels from `from` (exclusive) to `to` (inclusive) in equal steps along the
/// major axis, so consecutive pixels are 8-connected.
fn segment(from: Pixel, to: Pixel) -> impl Iterator<Item = Pixel> {
    let dx = (to.x - from.x) as f64;
    let dy = (to.y - from.y) as f64;
    let steps = (to.x - from.x).abs().max((to.y - from.y).abs());
    (1..=steps).map(move |i| {
        let t = i as f64 / steps as f64;
        Pixel::new(
            from.x + (dx * t).round() as i32,
            from.y + (dy * t).round() as i32,
        )
    })
}
