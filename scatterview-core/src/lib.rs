//! Core data structures for scatterview
//!
//! This crate provides the data side of the scatter viewer: the GPU-ready
//! point record, the columnar dataset model, the binder that turns four
//! selected columns into a point buffer, and the matrix helpers shared by the
//! camera and the renderer.

pub mod point;
pub mod dataset;
pub mod binder;
pub mod transform;
pub mod config;
pub mod error;

pub use point::*;
pub use dataset::*;
pub use binder::*;
pub use transform::*;
pub use config::*;
pub use error::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Matrix4, Point3, Vector3};
