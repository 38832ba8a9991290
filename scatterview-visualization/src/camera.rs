//! Orbit camera state for the scatter viewer

use nalgebra::{Matrix4, Vector3};
use scatterview_core::{Transform3D, ViewerConfig};

/// Fixed parameters of the perspective projection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionParams {
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for ProjectionParams {
    fn default() -> Self {
        Self {
            fov_degrees: 45.0,
            near: 1.0,
            far: 1000.0,
        }
    }
}

/// The three matrices consumed by the renderer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraMatrices {
    pub model: Matrix4<f32>,
    pub view: Matrix4<f32>,
    pub projection: Matrix4<f32>,
}

impl CameraMatrices {
    /// Derive all three matrices from the orbit parameters.
    ///
    /// The projection is identity until a non-degenerate viewport is known.
    pub fn recompute(
        azimuth: f32,
        elevation: f32,
        distance: f32,
        viewport: Option<(u32, u32)>,
        params: &ProjectionParams,
    ) -> Self {
        Self {
            model: model_matrix(azimuth, elevation),
            view: view_matrix(distance),
            projection: viewport
                .and_then(|(w, h)| projection_matrix(w, h, params))
                .unwrap_or_else(Matrix4::identity),
        }
    }
}

/// Rotation by `azimuth` degrees about Z followed by `elevation` degrees about Y
pub fn model_matrix(azimuth: f32, elevation: f32) -> Matrix4<f32> {
    let elevation = Transform3D::rotation_degrees(elevation, Vector3::y());
    let azimuth = Transform3D::rotation_degrees(azimuth, Vector3::z());
    (elevation * azimuth).matrix
}

/// Pull the scene back along -Z by `distance`
pub fn view_matrix(distance: f32) -> Matrix4<f32> {
    Transform3D::translation(Vector3::new(0.0, 0.0, -distance)).matrix
}

/// Perspective projection for a `width` x `height` viewport, `None` if either is zero
pub fn projection_matrix(width: u32, height: u32, params: &ProjectionParams) -> Option<Matrix4<f32>> {
    if width == 0 || height == 0 {
        return None;
    }
    let aspect = width as f32 / height as f32;
    Transform3D::perspective(params.fov_degrees, aspect, params.near, params.far)
        .filter(Transform3D::is_finite)
        .map(|t| t.matrix)
}

/// Orbit parameters and the matrices derived from them
#[derive(Debug, Clone)]
pub struct CameraState {
    azimuth: f32,
    elevation: f32,
    distance: f32,
    min_distance: f32,
    viewport: Option<(u32, u32)>,
    params: ProjectionParams,
    matrices: CameraMatrices,
}

impl CameraState {
    /// Create a camera at the configured distance with identity rotation
    pub fn new(config: &ViewerConfig) -> Self {
        let params = ProjectionParams {
            fov_degrees: config.fov_degrees,
            near: config.near,
            far: config.far,
        };
        let distance = config.initial_distance.max(config.min_distance);
        Self {
            azimuth: 0.0,
            elevation: 0.0,
            distance,
            min_distance: config.min_distance,
            viewport: None,
            params,
            matrices: CameraMatrices::recompute(0.0, 0.0, distance, None, &params),
        }
    }

    fn recompute(&mut self) {
        self.matrices = CameraMatrices::recompute(
            self.azimuth,
            self.elevation,
            self.distance,
            self.viewport,
            &self.params,
        );
    }

    /// Add angle deltas in degrees
    pub fn rotate_by(&mut self, d_azimuth: f32, d_elevation: f32) {
        self.azimuth += d_azimuth;
        self.elevation += d_elevation;
        self.recompute();
    }

    /// Move the camera in by `delta`, clamped at the minimum distance
    pub fn zoom_by(&mut self, delta: f32) {
        self.distance = (self.distance - delta).max(self.min_distance);
        self.recompute();
    }

    /// Update the viewport; returns `false` and keeps the previous projection
    /// if either dimension is zero
    pub fn set_viewport(&mut self, width: u32, height: u32) -> bool {
        if projection_matrix(width, height, &self.params).is_none() {
            return false;
        }
        self.viewport = Some((width, height));
        self.recompute();
        true
    }

    pub fn azimuth(&self) -> f32 {
        self.azimuth
    }

    pub fn elevation(&self) -> f32 {
        self.elevation
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn viewport(&self) -> Option<(u32, u32)> {
        self.viewport
    }

    pub fn matrices(&self) -> &CameraMatrices {
        &self.matrices
    }

    /// Point-size uniform: points shrink as the camera recedes
    pub fn point_scale(&self) -> f32 {
        5.0 / self.distance
    }
}
