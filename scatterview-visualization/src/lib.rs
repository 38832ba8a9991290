//! Interactive 3D scatter plot viewer
//!
//! This crate provides the interactive side of scatterview:
//! - Orbit camera with azimuth, elevation and distance
//! - Drag, wheel, timer and resize handling
//! - An embeddable widget driven by explicit events
//! - A standalone winit window for quick viewing

pub mod camera;
pub mod controller;
pub mod event;
pub mod interactive_viewer;
pub mod picker;
pub mod stats;
pub mod widget;

pub use camera::*;
pub use controller::*;
pub use event::*;
pub use interactive_viewer::*;
pub use picker::*;
pub use stats::*;
pub use widget::*;

use scatterview_core::{ColumnSelection, Dataset, Result, ViewerConfig};

/// Show `dataset` in a window, mapping the selected columns to x, y, z and size
pub fn show_scatter(dataset: Box<dyn Dataset>, selection: ColumnSelection) -> Result<()> {
    let mut viewer = InteractiveViewer::new(ViewerConfig::default())?;
    viewer.set_dataset(dataset);
    viewer.set_columns(selection);
    viewer.run()
}
