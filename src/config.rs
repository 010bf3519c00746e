// Command line configuration. The canvas size is fixed for the whole session;
// the rest tunes the laser and the brush.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::error::Error;
use crate::surface::{ErasedPoints, FitParams};
use crate::trace::{DEFAULT_BOUNCE_LIMIT, TraceSettings};
use crate::types::Pixel;

#[derive(Parser, Debug, Clone)]
#[command(name = "laser-sketch")]
#[command(about = "Draw mirrors with the mouse and watch a laser bounce off them", long_about = None)]
pub struct Config {
    /// Canvas width in pixels
    #[arg(long, default_value_t = 1000)]
    pub width: usize,

    /// Canvas height in pixels
    #[arg(long, default_value_t = 600)]
    pub height: usize,

    /// Column the laser starts from
    #[arg(long, default_value_t = 0)]
    pub origin_x: i32,

    /// Row the laser starts from (default: middle of the canvas)
    #[arg(long)]
    pub origin_y: Option<i32>,

    /// Initial laser direction in degrees, counter-clockwise from "right"
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub angle: f64,

    /// Half-size of the square eraser brush
    #[arg(long, default_value_t = 10, allow_negative_numbers = true)]
    pub erase_radius: i32,

    /// Reflections before the laser is cut off
    #[arg(long, default_value_t = DEFAULT_BOUNCE_LIMIT, value_parser = clap::value_parser!(u32).range(1..))]
    pub bounce_limit: u32,

    /// Whether erased parts of a stroke still shape its surface estimate
    #[arg(long, value_enum, default_value_t = ErasedPointsFlag::Retain)]
    pub erased_points: ErasedPointsFlag,

    /// Directory PNG snapshots are written to
    #[arg(long, default_value = ".")]
    pub snapshot_dir: PathBuf,

    /// Log filter, `env_logger` syntax (falls back to RUST_LOG)
    #[arg(long)]
    pub log: Option<String>,
}

/// `--erased-points` values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ErasedPointsFlag {
    /// Erased pixels still shape the surface estimate
    Retain,
    /// Only pixels still on the canvas are fitted
    Discard,
}

impl From<ErasedPointsFlag> for ErasedPoints {
    fn from(flag: ErasedPointsFlag) -> Self {
        match flag {
            ErasedPointsFlag::Retain => ErasedPoints::Retain,
            ErasedPointsFlag::Discard => ErasedPoints::Discard,
        }
    }
}

impl Config {
    pub fn origin(&self) -> Pixel {
        let edge = TraceSettings::from_left_edge(self.height).origin;
        Pixel::new(self.origin_x, self.origin_y.unwrap_or(edge.y))
    }

    /// Reject settings that leave nothing to draw on or start the laser off
    /// the canvas.
    pub fn validate(&self) -> Result<(), Error> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::InvalidConfig(format!(
                "canvas must be at least 1x1, got {}x{}",
                self.width, self.height
            )));
        }
        let o = self.origin();
        if o.x < 0 || o.y < 0 || o.x as usize >= self.width || o.y as usize >= self.height {
            return Err(Error::InvalidConfig(format!(
                "laser origin ({}, {}) is outside the {}x{} canvas",
                o.x, o.y, self.width, self.height
            )));
        }
        if !self.angle.is_finite() {
            return Err(Error::InvalidConfig(format!("laser angle {} is not a number", self.angle)));
        }
        if self.erase_radius < 0 {
            return Err(Error::InvalidConfig(format!("erase radius {} is negative", self.erase_radius)));
        }
        Ok(())
    }

    pub fn trace_settings(&self) -> TraceSettings {
        let base = TraceSettings::from_left_edge(self.height);
        TraceSettings {
            origin: self.origin(),
            angle: self.angle.to_radians(),
            bounce_limit: self.bounce_limit,
            fit: FitParams { erased_points: self.erased_points.into(), ..base.fit },
        }
    }
}
