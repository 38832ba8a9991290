//! # scatterview GPU
//!
//! Point-sprite rendering for the scatter viewer.
//!
//! The [`Renderer`] owns the shader program lifecycle and the per-frame
//! uniforms, and talks to the GPU through the [`RenderBackend`] trait.
//! [`WgpuBackend`] renders into a wgpu surface; [`HeadlessBackend`] records
//! calls without touching a device.
//!
//! ## Example Usage
//!
//! ```rust
//! use scatterview_core::{PointRecord, ViewerConfig};
//! use scatterview_gpu::{HeadlessBackend, Renderer};
//!
//! let mut renderer = Renderer::new(HeadlessBackend::new(), &ViewerConfig::default());
//! renderer.initialize()?;
//! renderer.bind_points(&[PointRecord::new([0.0, 0.0, 0.0], 1.0)])?;
//! renderer.draw()?;
//! # Ok::<(), scatterview_core::Error>(())
//! ```

pub mod backend;
pub mod device;
pub mod headless;
pub mod renderer;
pub mod shaders;
pub mod wgpu_backend;

// Re-export commonly used items
pub use backend::RenderBackend;
pub use device::GpuContext;
pub use headless::{DrawCall, HeadlessBackend};
pub use renderer::{Renderer, RendererState, SceneUniforms};
pub use shaders::{point_shader_source, validate_wgsl};
pub use wgpu_backend::WgpuBackend;
