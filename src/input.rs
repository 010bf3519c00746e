// Turns "is the button down right now" into gesture edges.
// The window only reports levels; strokes begin on a press and the laser is
// re-traced on a release.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Edge {
    Idle,
    Pressed,
    Held,
    Released,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct ButtonEdge {
    was_down: bool,
}

impl ButtonEdge {
    /// Feed this frame's level; must be called once per frame.
    pub fn update(&mut self, down: bool) -> Edge {
        let edge = match (self.was_down, down) {
            (false, false) => Edge::Idle,
            (false, true) => Edge::Pressed,
            (true, true) => Edge::Held,
            (true, false) => Edge::Released,
        };
        self.was_down = down;
        edge
    }
}
