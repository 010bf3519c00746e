// Core types shared by the canvas, the recorder and the tracer.

/// Background of the ink buffer: no mirror here.
pub const BACKGROUND: u32 = 0x00_00_00_00;
/// Color of drawn mirror pixels.
pub const INK_COLOR: u32 = 0x00_FF_FF_FF;
/// Color of the laser path.
pub const LASER_COLOR: u32 = 0x00_FF_20_20;
/// Color of the pixel the laser sat on when it bounced.
pub const BOUNCE_COLOR: u32 = 0x00_DB_70_93;
/// Transparent cell in the laser buffer (skipped when compositing).
pub const CLEAR: u32 = 0;

/// Integer pixel coordinate. Signed so off-canvas candidates can be
/// represented and then rejected by a bounds check.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Pixel {
    pub x: i32,
    pub y: i32,
}

impl Pixel {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

impl From<(i32, i32)> for Pixel {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// A color buffer the window can display directly.
#[derive(Clone, Debug)]
pub struct FrameBuffer {
    pub width: usize,      // pixels per row
    pub height: usize,     // rows
    pub pixels: Vec<u32>,  // each entry is 0x00RRGGBB for minifb
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize, fill: u32) -> Self {
        Self { width, height, pixels: vec![fill; width * height] }
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

    /// Color at `p`, or `None` off the buffer.
    #[cfg(test)]
    pub fn get(&self, p: Pixel) -> Option<u32> {
        self.index(p).map(|i| self.pixels[i])
    }

    /// Set `p` to `color`; writes outside the buffer are dropped.
    #[inline]
    pub fn put(&mut self, p: Pixel, color: u32) {
        if let Some(i) = self.index(p) {
            self.pixels[i] = color;
        }
    }

    /// Draw `top` over this buffer, skipping its `CLEAR` cells.
    /// Both buffers must share dimensions; extra cells are ignored.
    pub fn overlay(&mut self, top: &FrameBuffer) {
        for (dst, &src) in self.pixels.iter_mut().zip(&top.pixels) {
            if src != CLEAR {
                *dst = src;
            }
        }
    }
}
