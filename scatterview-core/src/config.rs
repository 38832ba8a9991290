//! Viewer configuration

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Fragment shape used to rasterize each point sprite.
///
/// Only `Disc` is implemented. Further signed-distance shapes (ring, square,
/// diamond, cross, arrow, bars, three-lobed clover) plug in as new variants
/// with their own WGSL distance function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PointShape {
    #[default]
    Disc,
}

/// Configuration for the scatter viewer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Orbit radius at construction
    pub initial_distance: f32,
    /// Lower bound on the orbit radius
    pub min_distance: f32,
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Animation timer rate in ticks per second
    pub timer_hz: f32,
    /// Auto-rotation speeds in degrees per tick
    pub azimuth_speed: f32,
    pub elevation_speed: f32,
    pub linewidth: f32,
    pub antialias: f32,
    pub clear_color: [f64; 4],
    pub foreground_color: [f32; 4],
    /// Per-channel range of the random background color
    pub background_range: [f32; 2],
    /// Canvas size used until the host reports a real one
    pub canvas_size: [u32; 2],
    pub point_shape: PointShape,
    pub enable_depth_test: bool,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            initial_distance: 20.0,
            min_distance: 2.0,
            fov_degrees: 45.0,
            near: 1.0,
            far: 1000.0,
            timer_hz: 60.0,
            azimuth_speed: 0.0,
            elevation_speed: 0.0,
            linewidth: 1.0,
            antialias: 1.0,
            clear_color: [1.0, 1.0, 1.0, 1.0],
            foreground_color: crate::point::DEFAULT_FOREGROUND,
            background_range: [0.85, 1.0],
            canvas_size: [600, 400],
            point_shape: PointShape::Disc,
            enable_depth_test: true,
        }
    }
}

impl ViewerConfig {
    /// Timer interval in seconds
    pub fn timer_interval(&self) -> f32 {
        1.0 / self.timer_hz
    }

    /// Check the configuration for values the viewer cannot work with
    pub fn validate(&self) -> Result<()> {
        if !(self.min_distance > 0.0) {
            return Err(Error::Visualization(format!(
                "min_distance must be positive, got {}",
                self.min_distance
            )));
        }
        if self.initial_distance < self.min_distance {
            return Err(Error::Visualization(format!(
                "initial_distance {} is below min_distance {}",
                self.initial_distance, self.min_distance
            )));
        }
        if !(self.near > 0.0 && self.far > self.near) {
            return Err(Error::Visualization(format!(
                "invalid clip planes near={} far={}",
                self.near, self.far
            )));
        }
        if !(self.fov_degrees > 0.0 && self.fov_degrees < 180.0) {
            return Err(Error::Visualization(format!(
                "fov_degrees must be in (0, 180), got {}",
                self.fov_degrees
            )));
        }
        if !(self.timer_hz > 0.0) {
            return Err(Error::Visualization("timer_hz must be positive".to_string()));
        }
        let [lo, hi] = self.background_range;
        if !(0.0..=1.0).contains(&lo) || !(0.0..=1.0).contains(&hi) || lo > hi {
            return Err(Error::Visualization(format!(
                "background_range [{}, {}] must be an ordered range within [0, 1]",
                lo, hi
            )));
        }
        Ok(())
    }
}
