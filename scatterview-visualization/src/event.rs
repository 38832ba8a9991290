//! Events delivered to the widget by its host

/// A host event, dispatched through [`ScatterWidget::update`](crate::ScatterWidget::update).
///
/// Cursor positions are in physical pixels relative to the widget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewerEvent {
    DragStart { x: f32, y: f32 },
    DragMove { x: f32, y: f32 },
    DragEnd,
    /// Positive values move the camera closer
    Scroll { delta: f32 },
    /// Animation tick with elapsed seconds
    Timer { dt: f32 },
    Resize { width: u32, height: u32 },
    Draw,
}
