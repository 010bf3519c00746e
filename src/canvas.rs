// The mirror raster: per-pixel ink flag plus the strokes painting that pixel.
// Only the recorder writes here; the tracer borrows it read-only.

use smallvec::SmallVec;

use crate::stroke::StrokeId;
use crate::types::Pixel;

/// Strokes covering one cell, in the order they first painted it.
pub type StrokeIds = SmallVec<[StrokeId; 2]>;

#[derive(Clone, Debug, Default)]
pub struct Cell {
    pub ink: bool,
    pub strokes: StrokeIds,
}

#[derive(Clone, Debug)]
pub struct Canvas {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, cells: vec![Cell::default(); width * height] }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn index(&self, p: Pixel) -> Option<usize> {
        if p.x < 0 || p.y < 0 {
            return None;
        }
        let (x, y) = (p.x as usize, p.y as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y * self.width + x)
    }

    #[inline]
    pub fn contains(&self, p: Pixel) -> bool {
        self.index(p).is_some()
    }

    pub fn cell(&self, p: Pixel) -> Option<&Cell> {
        self.index(p).map(|i| &self.cells[i])
    }

    /// True when `p` is on the canvas and holds mirror material.
    #[inline]
    pub fn is_ink(&self, p: Pixel) -> bool {
        self.cell(p).is_some_and(|c| c.ink)
    }

    /// The first stroke that painted `p`, if any.
    pub fn primary_stroke(&self, p: Pixel) -> Option<StrokeId> {
        self.cell(p).and_then(|c| c.strokes.first().copied())
    }

    pub fn has_stroke(&self, p: Pixel, id: StrokeId) -> bool {
        self.cell(p).is_some_and(|c| c.strokes.contains(&id))
    }

    /// Mark `p` as ink owned (also) by `id`. Returns false off the canvas.
    pub(crate) fn paint(&mut self, p: Pixel, id: StrokeId) -> bool {
        let Some(i) = self.index(p) else { return false };
        let cell = &mut self.cells[i];
        cell.ink = true;
        if !cell.strokes.contains(&id) {
            cell.strokes.push(id);
        }
        true
    }

    /// Back to background: no ink, no strokes. Returns false off the canvas.
    pub(crate) fn clear(&mut self, p: Pixel) -> bool {
        let Some(i) = self.index(p) else { return false };
        let cell = &mut self.cells[i];
        cell.ink = false;
        cell.strokes.clear();
        true
    }

    pub fn ink_count(&self) -> usize {
        self.cells.iter().filter(|c| c.ink).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookups_off_canvas_are_background() {
        let canvas = Canvas::new(3, 2);
        for p in [Pixel::new(-1, 0), Pixel::new(0, -1), Pixel::new(3, 0), Pixel::new(0, 2)] {
            assert!(!canvas.contains(p));
            assert!(!canvas.is_ink(p));
            assert_eq!(canvas.primary_stroke(p), None);
        }
    }

    #[test]
    fn membership_is_a_set() {
        let mut canvas = Canvas::new(3, 3);
        let p = Pixel::new(1, 1);
        assert!(canvas.paint(p, StrokeId(4)));
        assert!(canvas.paint(p, StrokeId(2)));
        assert!(canvas.paint(p, StrokeId(4)));
        assert_eq!(canvas.cell(p).unwrap().strokes.as_slice(), &[StrokeId(4), StrokeId(2)]);
        assert_eq!(canvas.primary_stroke(p), Some(StrokeId(4)));

        assert!(canvas.clear(p));
        assert!(!canvas.is_ink(p));
        assert!(canvas.cell(p).unwrap().strokes.is_empty());
    }

    #[test]
    fn paint_off_canvas_is_refused() {
        let mut canvas = Canvas::new(2, 2);
        assert!(!canvas.paint(Pixel::new(2, 2), StrokeId(0)));
        assert_eq!(canvas.ink_count(), 0);
    }
}
