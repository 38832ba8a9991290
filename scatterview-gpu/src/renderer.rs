use crate::backend::RenderBackend;
use crate::shaders::point_shader_source;
use bytemuck::{Pod, Zeroable};
use nalgebra::Matrix4;
use scatterview_core::{Error, PointRecord, PointShape, Result, ViewerConfig};

/// Uniform data shared by the vertex and fragment stages
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct SceneUniforms {
    pub model: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    pub linewidth: f32,
    pub antialias: f32,
    pub size: f32,
    pub _padding0: f32,
    pub viewport: [f32; 2],
    pub _padding1: [f32; 2],
}

impl SceneUniforms {
    fn new(config: &ViewerConfig) -> Self {
        let identity: [[f32; 4]; 4] = Matrix4::<f32>::identity().into();
        Self {
            model: identity,
            view: identity,
            projection: identity,
            linewidth: config.linewidth,
            antialias: config.antialias,
            size: 5.0 / config.initial_distance,
            _padding0: 0.0,
            viewport: [config.canvas_size[0] as f32, config.canvas_size[1] as f32],
            _padding1: [0.0; 2],
        }
    }
}

/// Lifecycle of the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RendererState {
    Uninitialized,
    Ready,
    Disposed,
}

/// Owns the point-sprite program, its uniforms and the bound point buffer
pub struct Renderer<B: RenderBackend> {
    backend: B,
    state: RendererState,
    uniforms: SceneUniforms,
    bound_points: Option<u32>,
    clear_color: [f64; 4],
    shape: PointShape,
}

impl<B: RenderBackend> Renderer<B> {
    /// Create an uninitialized renderer over `backend`
    pub fn new(backend: B, config: &ViewerConfig) -> Self {
        Self {
            backend,
            state: RendererState::Uninitialized,
            uniforms: SceneUniforms::new(config),
            bound_points: None,
            clear_color: config.clear_color,
            shape: config.point_shape,
        }
    }

    /// Compile the program and upload the initial uniforms.
    ///
    /// A compile failure leaves the renderer `Uninitialized` and is returned
    /// to the caller; it is never retried.
    pub fn initialize(&mut self) -> Result<()> {
        if self.state != RendererState::Uninitialized {
            return Err(Error::InvalidState(format!(
                "cannot initialize a renderer in state {:?}",
                self.state
            )));
        }

        let source = point_shader_source(self.shape);
        if let Err(e) = self.backend.compile_program(&source) {
            log::error!("point program failed to compile: {}", e);
            return Err(e);
        }

        let [width, height] = self.uniforms.viewport;
        self.backend.set_viewport(width as u32, height as u32);
        self.backend.write_uniforms(&self.uniforms);
        self.state = RendererState::Ready;
        log::info!("renderer ready ({:?} points, {}x{})", self.shape, width, height);
        Ok(())
    }

    fn ensure_ready(&self, operation: &str) -> Result<()> {
        match self.state {
            RendererState::Ready => Ok(()),
            state => Err(Error::InvalidState(format!(
                "cannot {} while renderer is {:?}",
                operation, state
            ))),
        }
    }

    /// Replace the bound point buffer.
    ///
    /// If the upload fails the previous buffer stays bound.
    pub fn bind_points(&mut self, points: &[PointRecord]) -> Result<()> {
        self.ensure_ready("bind points")?;
        let count = u32::try_from(points.len())
            .map_err(|_| Error::Gpu(format!("{} points exceed the draw range", points.len())))?;
        self.backend.upload_points(points)?;
        self.bound_points = Some(count);
        log::info!("bound {} points", count);
        Ok(())
    }

    pub fn set_model(&mut self, model: &Matrix4<f32>) {
        self.uniforms.model = (*model).into();
    }

    pub fn set_view(&mut self, view: &Matrix4<f32>) {
        self.uniforms.view = (*view).into();
    }

    pub fn set_projection(&mut self, projection: &Matrix4<f32>) {
        self.uniforms.projection = (*projection).into();
    }

    /// Scale applied to every per-point size
    pub fn set_point_scale(&mut self, size: f32) {
        self.uniforms.size = size;
    }

    /// Resize the viewport; zero-sized viewports are ignored
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            log::warn!("ignoring resize to {}x{}", width, height);
            return;
        }
        self.uniforms.viewport = [width as f32, height as f32];
        if self.state == RendererState::Ready {
            self.backend.set_viewport(width, height);
        }
    }

    /// Clear and draw the complete bound point set.
    ///
    /// Without a bound buffer this only clears.
    pub fn draw(&mut self) -> Result<()> {
        self.ensure_ready("draw")?;
        self.backend.write_uniforms(&self.uniforms);
        self.backend.draw(self.clear_color, self.bound_points.unwrap_or(0))
    }

    /// Release GPU resources; the renderer cannot be used afterwards
    pub fn dispose(&mut self) {
        if self.state == RendererState::Disposed {
            return;
        }
        self.backend.release();
        self.bound_points = None;
        self.state = RendererState::Disposed;
        log::info!("renderer disposed");
    }

    pub fn state(&self) -> RendererState {
        self.state
    }

    pub fn uniforms(&self) -> &SceneUniforms {
        &self.uniforms
    }

    /// Number of points in the bound buffer, if one is bound
    pub fn bound_point_count(&self) -> Option<u32> {
        self.bound_points
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }
}

impl<B: RenderBackend> Drop for Renderer<B> {
    fn drop(&mut self) {
        self.dispose();
    }
}
