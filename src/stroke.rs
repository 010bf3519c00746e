// Strokes: one freehand gesture's pixel trail, kept in an append-only arena.

use crate::types::Pixel;

/// Stable identifier of a stroke; also its index in the store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StrokeId(pub u32);

#[derive(Clone, Debug)]
pub struct Stroke {
    id: StrokeId,
    points: Vec<Pixel>, // drawing order, may repeat pixels when a gesture crosses itself
}

impl Stroke {
    fn new(id: StrokeId) -> Self {
        Self { id, points: Vec::new() }
    }

    pub fn id(&self) -> StrokeId {
        self.id
    }

    pub fn points(&self) -> &[Pixel] {
        &self.points
    }

    pub fn last(&self) -> Option<Pixel> {
        self.points.last().copied()
    }

    /// Index of the first occurrence of `p` on the trail.
    pub fn index_of(&self, p: Pixel) -> Option<usize> {
        self.points.iter().position(|&q| q == p)
    }

    /// The trail point drawn right after `p`, or right before it when `p` is
    /// the last one.
    pub fn neighbor_of(&self, p: Pixel) -> Option<Pixel> {
        let i = self.index_of(p)?;
        self.points
            .get(i + 1)
            .or_else(|| i.checked_sub(1).and_then(|j| self.points.get(j)))
            .copied()
    }

    pub(crate) fn push(&mut self, p: Pixel) {
        self.points.push(p);
    }
}

/// All strokes ever drawn in this session. Strokes are never removed, so an
/// id handed out once stays valid.
#[derive(Clone, Debug, Default)]
pub struct StrokeStore {
    strokes: Vec<Stroke>,
}

impl StrokeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a new, empty stroke and return its id.
    pub fn create(&mut self) -> StrokeId {
        let id = StrokeId(self.strokes.len() as u32);
        self.strokes.push(Stroke::new(id));
        id
    }

    pub fn get(&self, id: StrokeId) -> Option<&Stroke> {
        self.strokes.get(id.0 as usize)
    }

    pub(crate) fn get_mut(&mut self, id: StrokeId) -> Option<&mut Stroke> {
        self.strokes.get_mut(id.0 as usize)
    }

    pub fn len(&self) -> usize {
        self.strokes.len()
    }
}
