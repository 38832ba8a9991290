//! Point record types and related functionality

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// Opaque black, the fixed foreground color of every point
pub const DEFAULT_FOREGROUND: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

/// Per-point vertex data uploaded to the GPU, one record per data row
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct PointRecord {
    pub position: [f32; 3],
    pub size: f32,
    pub fg_color: [f32; 4],
    pub bg_color: [f32; 4],
}

impl PointRecord {
    /// Create a record with the default foreground and a white background
    pub fn new(position: [f32; 3], size: f32) -> Self {
        Self {
            position,
            size,
            fg_color: DEFAULT_FOREGROUND,
            bg_color: [1.0, 1.0, 1.0, 1.0],
        }
    }
}

impl Default for PointRecord {
    fn default() -> Self {
        Self::new([0.0, 0.0, 0.0], 0.0)
    }
}

/// Map a raw size-column value to a point size.
///
/// The cube root keeps values spanning several orders of magnitude within a
/// visually reasonable range. Callers must reject negative input first.
pub fn point_size(value: f64) -> f32 {
    (5.0 * value.cbrt() / 10.0) as f32
}
