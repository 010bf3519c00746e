// Writes the composited frame (mirrors + laser) to a PNG.
// Visual: the file looks exactly like the window did when you pressed S,
// minus the crosshair and status line.

use std::path::{Path, PathBuf};

use image::{Rgb, RgbImage};

use crate::error::Error;
use crate::types::FrameBuffer;

/// Unpack 0x00RRGGBB pixels into an RGB image.
pub fn to_image(fb: &FrameBuffer) -> RgbImage {
    RgbImage::from_fn(fb.width as u32, fb.height as u32, |x, y| {
        let px = fb.pixels[y as usize * fb.width + x as usize];
        Rgb([(px >> 16) as u8, (px >> 8) as u8, px as u8])
    })
}

/// `dir/laser-sketch-NNN.png`
pub fn snapshot_path(dir: &Path, index: u32) -> PathBuf {
    dir.join(format!("laser-sketch-{index:03}.png"))
}

/// Save `fb` as a PNG at `path`.
pub fn save_png(fb: &FrameBuffer, path: &Path) -> Result<(), Error> {
    to_image(fb).save(path)?;
    log::info!("snapshot written to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{LASER_COLOR, Pixel};

    #[test]
    fn channels_unpack_in_order() {
        let mut fb = FrameBuffer::new(3, 2, 0);
        fb.put(Pixel::new(2, 1), 0x00_12_34_56);
        fb.put(Pixel::new(0, 0), LASER_COLOR);
        let img = to_image(&fb);
        assert_eq!(img.dimensions(), (3, 2));
        assert_eq!(img.get_pixel(2, 1), &Rgb([0x12, 0x34, 0x56]));
        assert_eq!(img.get_pixel(0, 0), &Rgb([0xFF, 0x20, 0x20]));
        assert_eq!(img.get_pixel(1, 1), &Rgb([0, 0, 0]));
    }

    #[test]
    fn paths_are_numbered() {
        let p = snapshot_path(Path::new("shots"), 7);
        assert_eq!(p, Path::new("shots").join("laser-sketch-007.png"));
    }

    #[test]
    fn png_round_trips_through_disk() {
        let dir = std::env::temp_dir().join(format!("laser-sketch-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = snapshot_path(&dir, 1);

        let mut fb = FrameBuffer::new(4, 4, 0);
        fb.put(Pixel::new(1, 2), LASER_COLOR);
        save_png(&fb, &path).unwrap();

        let back = image::open(&path).unwrap().to_rgb8();
        assert_eq!(back, to_image(&fb));
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
