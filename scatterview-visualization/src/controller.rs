//! Mouse, wheel and timer handling for the orbit camera

use crate::camera::CameraState;
use scatterview_core::ViewerConfig;

/// Translates drag, scroll, timer and resize events into camera updates.
///
/// Each handler returns whether the scene changed and needs a redraw.
#[derive(Debug, Clone)]
pub struct OrbitController {
    camera: CameraState,
    dragging: bool,
    last_cursor: (f32, f32),
    clock: f32,
    last_interaction: f32,
    azimuth_speed: f32,
    elevation_speed: f32,
}

impl OrbitController {
    pub fn new(config: &ViewerConfig) -> Self {
        Self {
            camera: CameraState::new(config),
            dragging: false,
            last_cursor: (0.0, 0.0),
            clock: 0.0,
            last_interaction: 0.0,
            azimuth_speed: config.azimuth_speed,
            elevation_speed: config.elevation_speed,
        }
    }

    /// Record the drag origin
    pub fn on_drag_start(&mut self, x: f32, y: f32) {
        self.last_cursor = (x, y);
        self.dragging = true;
    }

    /// Rotate by the cursor delta, scaled by the cursor position.
    ///
    /// `azimuth += dy / y * 180` and `elevation += dx / x * 180`. A zero cursor
    /// coordinate contributes no rotation on that axis.
    pub fn on_drag_move(&mut self, x: f32, y: f32) -> bool {
        if !self.dragging {
            return false;
        }
        let dx = x - self.last_cursor.0;
        let dy = y - self.last_cursor.1;
        let d_azimuth = if y != 0.0 { dy / y * 180.0 } else { 0.0 };
        let d_elevation = if x != 0.0 { dx / x * 180.0 } else { 0.0 };

        self.camera.rotate_by(d_azimuth, d_elevation);
        self.last_cursor = (x, y);
        self.last_interaction = self.clock;
        log::debug!(
            "drag to ({}, {}): azimuth={} elevation={}",
            x,
            y,
            self.camera.azimuth(),
            self.camera.elevation()
        );
        true
    }

    pub fn on_drag_end(&mut self) {
        self.dragging = false;
    }

    /// Move the camera in by `delta`, never closer than the minimum distance
    pub fn on_scroll(&mut self, delta: f32) -> bool {
        self.camera.zoom_by(delta);
        log::debug!("scroll {}: distance={}", delta, self.camera.distance());
        true
    }

    /// Advance the clock and apply the auto-rotation speeds
    pub fn on_timer_tick(&mut self, dt: f32) -> bool {
        self.clock += dt;
        if self.azimuth_speed != 0.0 || self.elevation_speed != 0.0 {
            self.camera.rotate_by(self.azimuth_speed, self.elevation_speed);
        }
        true
    }

    /// Recompute the projection; `false` if the viewport is degenerate
    pub fn on_resize(&mut self, width: u32, height: u32) -> bool {
        let applied = self.camera.set_viewport(width, height);
        if !applied {
            log::warn!("skipping projection for degenerate viewport {}x{}", width, height);
        }
        applied
    }

    /// Auto-rotation speeds in degrees per tick
    pub fn set_rotation_speed(&mut self, azimuth: f32, elevation: f32) {
        self.azimuth_speed = azimuth;
        self.elevation_speed = elevation;
    }

    pub fn rotation_speed(&self) -> (f32, f32) {
        (self.azimuth_speed, self.elevation_speed)
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn camera(&self) -> &CameraState {
        &self.camera
    }

    /// Seconds accumulated from timer ticks
    pub fn clock(&self) -> f32 {
        self.clock
    }

    /// Clock value at the last drag rotation
    pub fn last_interaction(&self) -> f32 {
        self.last_interaction
    }
}
