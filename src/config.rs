use std::f64::consts::TAU;

use serde::Deserialize;

use crate::colormap::{Colormap, Rgb};
use crate::error::{Result, WalkError};

/// Largest raster side we are willing to allocate, in pixels.
pub const MAX_RASTER_SIDE: u32 = 8192;

/// Shape of the walk: how many points and where it starts.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct WalkConfig {
    /// Total number of points, start point included.
    pub point_count: usize,
    pub start_point: (f64, f64),
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            point_count: 5000,
            start_point: (0.0, 0.0),
        }
    }
}

impl WalkConfig {
    pub fn new(point_count: usize, start_point: (f64, f64)) -> Self {
        Self {
            point_count,
            start_point,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.point_count < 1 {
            return Err(WalkError::invalid("point_count must be at least 1"));
        }
        let (x, y) = self.start_point;
        if !x.is_finite() || !y.is_finite() {
            return Err(WalkError::invalid("start_point must be finite"));
        }
        Ok(())
    }
}

/// Closed interval `[min, max]`. `min == max` is a valid, degenerate interval.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(from = "(f64, f64)")]
pub struct Interval {
    pub min: f64,
    pub max: f64,
}

impl Interval {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn validate(&self, name: &str) -> Result<()> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(WalkError::invalid(format!(
                "{} bounds must be finite, got [{}, {}]",
                name, self.min, self.max
            )));
        }
        if self.min > self.max {
            return Err(WalkError::invalid(format!(
                "{} min {} exceeds max {}",
                name, self.min, self.max
            )));
        }
        Ok(())
    }
}

impl From<(f64, f64)> for Interval {
    fn from((min, max): (f64, f64)) -> Self {
        Self { min, max }
    }
}

/// Sampling ranges for step radius and step angle (radians).
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Distributions {
    pub radius: Interval,
    pub angle: Interval,
}

impl Default for Distributions {
    fn default() -> Self {
        Self {
            radius: Interval::new(0.0, 10.0),
            angle: Interval::new(0.0, TAU),
        }
    }
}

impl Distributions {
    pub fn new(radius: impl Into<Interval>, angle: impl Into<Interval>) -> Self {
        Self {
            radius: radius.into(),
            angle: angle.into(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.radius.validate("radius")?;
        self.angle.validate("angle")
    }
}

/// Everything that controls how a walk is drawn.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Palette for the points, indexed by position along the walk.
    pub color_map: Colormap,
    /// Marker area in pt², matplotlib convention.
    pub point_size: f64,
    pub alpha: f64,
    pub show_color_bar: bool,
    /// Draw the start -> finish segment and put the distance in the title.
    pub show_direct_path: bool,
    pub path_color: Rgb,
    /// Width and height in inches.
    pub figure_size: (f64, f64),
    pub dpi: f64,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            color_map: Colormap::RdPu,
            point_size: 1.0,
            alpha: 0.5,
            show_color_bar: true,
            show_direct_path: false,
            path_color: Rgb::BLACK,
            figure_size: (10.0, 6.0),
            dpi: 100.0,
        }
    }
}

impl RenderOptions {
    pub fn validate(&self) -> Result<()> {
        if !self.point_size.is_finite() || self.point_size <= 0.0 {
            return Err(WalkError::invalid(format!(
                "point_size must be positive, got {}",
                self.point_size
            )));
        }
        if !(0.0..=1.0).contains(&self.alpha) {
            return Err(WalkError::invalid(format!(
                "alpha must be in [0, 1], got {}",
                self.alpha
            )));
        }
        if !self.dpi.is_finite() || self.dpi <= 0.0 {
            return Err(WalkError::invalid(format!("dpi must be positive, got {}", self.dpi)));
        }
        let (w, h) = self.figure_size;
        if !w.is_finite() || !h.is_finite() || w <= 0.0 || h <= 0.0 {
            return Err(WalkError::invalid(format!(
                "figure_size must be positive, got ({}, {})",
                w, h
            )));
        }
        let (pw, ph) = self.pixel_size_unchecked();
        if pw < 1.0 || ph < 1.0 || pw > MAX_RASTER_SIDE as f64 || ph > MAX_RASTER_SIDE as f64 {
            return Err(WalkError::invalid(format!(
                "raster of {}x{} px is outside 1..={} per side",
                pw, ph, MAX_RASTER_SIDE
            )));
        }
        Ok(())
    }

    /// Raster dimensions in pixels. Only meaningful after `validate`.
    pub fn pixel_size(&self) -> (u32, u32) {
        let (w, h) = self.pixel_size_unchecked();
        (w as u32, h as u32)
    }

    fn pixel_size_unchecked(&self) -> (f64, f64) {
        (
            (self.figure_size.0 * self.dpi).round(),
            (self.figure_size.1 * self.dpi).round(),
        )
    }

    /// Marker radius in pixels for a marker of area `area` pt².
    pub fn marker_radius(&self, area: f64) -> f64 {
        (area.sqrt() / 2.0 * self.dpi / 72.0).max(0.5)
    }
}
