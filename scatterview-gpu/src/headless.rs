//! A backend that records renderer calls instead of issuing them to a GPU

use crate::backend::RenderBackend;
use crate::renderer::SceneUniforms;
use crate::shaders::validate_wgsl;
use scatterview_core::{Error, PointRecord, Result};

/// One recorded clear-and-draw call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCall {
    pub clear_color: [f64; 4],
    pub point_count: u32,
    pub uniforms: SceneUniforms,
}

/// Records uploads and draws; shader source is still validated with naga.
///
/// Used for tests and for hosts that drive the viewer without a surface.
#[derive(Debug, Default)]
pub struct HeadlessBackend {
    program_source: Option<String>,
    compile_failure: Option<String>,
    points: Vec<PointRecord>,
    uploads: usize,
    uniforms: Option<SceneUniforms>,
    viewport: Option<(u32, u32)>,
    draws: Vec<DrawCall>,
    released: bool,
}

impl HeadlessBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend whose program compilation always fails with `message`
    pub fn failing_compile(message: impl Into<String>) -> Self {
        Self {
            compile_failure: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn program_source(&self) -> Option<&str> {
        self.program_source.as_deref()
    }

    /// The currently bound points
    pub fn points(&self) -> &[PointRecord] {
        &self.points
    }

    /// Number of successful point uploads
    pub fn upload_count(&self) -> usize {
        self.uploads
    }

    /// The most recently written uniforms
    pub fn uniforms(&self) -> Option<&SceneUniforms> {
        self.uniforms.as_ref()
    }

    pub fn viewport(&self) -> Option<(u32, u32)> {
        self.viewport
    }

    pub fn draws(&self) -> &[DrawCall] {
        &self.draws
    }

    pub fn is_released(&self) -> bool {
        self.released
    }
}

impl RenderBackend for HeadlessBackend {
    fn compile_program(&mut self, source: &str) -> Result<()> {
        if let Some(message) = &self.compile_failure {
            return Err(Error::ShaderCompilation(message.clone()));
        }
        validate_wgsl(source)?;
        self.program_source = Some(source.to_string());
        Ok(())
    }

    fn upload_points(&mut self, points: &[PointRecord]) -> Result<()> {
        self.points = points.to_vec();
        self.uploads += 1;
        Ok(())
    }

    fn write_uniforms(&mut self, uniforms: &SceneUniforms) {
        self.uniforms = Some(*uniforms);
    }

    fn set_viewport(&mut self, width: u32, height: u32) {
        self.viewport = Some((width, height));
    }

    fn draw(&mut self, clear_color: [f64; 4], point_count: u32) -> Result<()> {
        if point_count as usize > self.points.len() {
            return Err(Error::Gpu(format!(
                "draw of {} points exceeds bound buffer of {}",
                point_count,
                self.points.len()
            )));
        }
        let uniforms = self
            .uniforms
            .ok_or_else(|| Error::InvalidState("draw before uniforms were written".to_string()))?;
        self.draws.push(DrawCall {
            clear_color,
            point_count,
            uniforms,
        });
        Ok(())
    }

    fn release(&mut self) {
        self.points.clear();
        self.released = true;
    }
}
