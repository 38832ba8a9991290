//! The seam between the renderer and the GPU abstraction

use crate::renderer::SceneUniforms;
use scatterview_core::{PointRecord, Result};

/// Operations the [`Renderer`](crate::Renderer) needs from a GPU backend.
///
/// All calls happen on the host's event thread, in delivery order.
pub trait RenderBackend {
    /// Compile the point-sprite program from WGSL source.
    ///
    /// Failure is fatal for the renderer and is reported as
    /// [`Error::ShaderCompilation`](scatterview_core::Error::ShaderCompilation).
    fn compile_program(&mut self, source: &str) -> Result<()>;

    /// Replace the bound vertex buffer with `points`.
    ///
    /// On error the previously bound buffer must stay in place.
    fn upload_points(&mut self, points: &[PointRecord]) -> Result<()>;

    /// Upload the uniforms used by the next draw
    fn write_uniforms(&mut self, uniforms: &SceneUniforms);

    /// Configure the viewport; both dimensions are non-zero
    fn set_viewport(&mut self, width: u32, height: u32);

    /// Clear color and depth, then draw `point_count` sprites from the bound
    /// buffer. A count of zero clears only.
    fn draw(&mut self, clear_color: [f64; 4], point_count: u32) -> Result<()>;

    /// Release GPU resources
    fn release(&mut self);
}
