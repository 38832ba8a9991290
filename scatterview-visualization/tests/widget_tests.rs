//! Integration tests for the scatter widget
//!
//! These drive the widget through host events against the headless backend,
//! checking what reaches the renderer.

use approx::assert_relative_eq;
use scatterview_core::{ColumnSelection, ConfigError, DataTable, Error, ViewerConfig};
use scatterview_gpu::{HeadlessBackend, RendererState};
use scatterview_visualization::{ColumnPicker, ComponentPicker, ScatterWidget, ViewerEvent};

type TestWidget = ScatterWidget<HeadlessBackend, ColumnPicker>;

fn widget() -> TestWidget {
    ScatterWidget::new(HeadlessBackend::new(), ColumnPicker::new(), ViewerConfig::default())
        .unwrap()
}

/// Three points along x with masses 1, 8 and 27
fn mass_table() -> DataTable {
    DataTable::new("stars")
        .with_column("x", vec![0.0, 1.0, 2.0])
        .with_column("y", vec![0.0, 0.0, 0.0])
        .with_column("z", vec![0.0, 0.0, 0.0])
        .with_column("mass", vec![1.0, 8.0, 27.0])
}

fn other_table() -> DataTable {
    DataTable::new("galaxies")
        .with_column("x", vec![5.0, 6.0])
        .with_column("y", vec![1.0, 1.0])
        .with_column("z", vec![2.0, 2.0])
        .with_column("mass", vec![64.0, 125.0])
}

fn mass_selection() -> ColumnSelection {
    ColumnSelection::new("x", "y", "z", "mass")
}

fn positions_and_sizes(widget: &TestWidget) -> Vec<([f32; 3], f32)> {
    widget
        .renderer()
        .backend()
        .points()
        .iter()
        .map(|r| (r.position, r.size))
        .collect()
}

#[test]
fn test_attach_dataset_binds_default_selection() {
    let mut widget = widget();
    widget.set_data(Some(Box::new(mass_table()))).unwrap();

    assert_eq!(
        widget.picker().labels(),
        &["x".to_string(), "y".to_string(), "z".to_string(), "mass".to_string()]
    );
    assert_eq!(widget.picker().current_selection(), Some(mass_selection()));

    let bound = positions_and_sizes(&widget);
    assert_eq!(bound.len(), 3);
    assert_eq!(bound[0].0, [0.0, 0.0, 0.0]);
    assert_eq!(bound[1].0, [1.0, 0.0, 0.0]);
    assert_eq!(bound[2].0, [2.0, 0.0, 0.0]);
    for ((_, size), expected) in bound.iter().zip([0.5, 1.0, 1.5]) {
        assert_relative_eq!(*size, expected, epsilon = 1e-6);
    }
    assert_eq!(widget.renderer().bound_point_count(), Some(3));
    assert!(widget.is_timer_active());
    assert!(widget.take_redraw_request());
}

#[test]
fn test_draw_renders_whole_buffer() {
    let mut widget = widget();
    widget.update(ViewerEvent::Draw).unwrap();
    widget.set_data(Some(Box::new(mass_table()))).unwrap();
    widget.update(ViewerEvent::Draw).unwrap();

    let draws = widget.renderer().backend().draws();
    assert_eq!(draws.len(), 2);
    assert_eq!(draws[0].point_count, 0);
    assert_eq!(draws[1].point_count, 3);
    assert_eq!(draws[1].clear_color, [1.0, 1.0, 1.0, 1.0]);
    assert_eq!(draws[1].uniforms.linewidth, 1.0);
    assert_eq!(draws[1].uniforms.antialias, 1.0);
    assert_eq!(widget.frame_stats().frames(), 2);
}

#[test]
fn test_scroll_sequence_reaches_uniforms() {
    let mut widget = widget();
    for expected in [15.0f32, 10.0, 5.0] {
        widget.update(ViewerEvent::Scroll { delta: 5.0 }).unwrap();
        widget.update(ViewerEvent::Draw).unwrap();

        assert_eq!(widget.controller().camera().distance(), expected);
        let uniforms = widget.renderer().backend().uniforms().unwrap();
        assert_relative_eq!(uniforms.view[3][2], -expected);
        assert_relative_eq!(uniforms.size, 5.0 / expected);
    }

    for _ in 0..5 {
        widget.update(ViewerEvent::Scroll { delta: 5.0 }).unwrap();
    }
    assert_eq!(widget.controller().camera().distance(), 2.0);
}

#[test]
fn test_drag_rotation_reaches_model_uniform() {
    let mut widget = widget();
    widget.update(ViewerEvent::DragStart { x: 100.0, y: 50.0 }).unwrap();
    widget.update(ViewerEvent::DragMove { x: 200.0, y: 100.0 }).unwrap();
    widget.update(ViewerEvent::DragEnd).unwrap();
    widget.update(ViewerEvent::DragMove { x: 300.0, y: 300.0 }).unwrap();

    let camera = widget.controller().camera();
    assert_relative_eq!(camera.azimuth(), 90.0);
    assert_relative_eq!(camera.elevation(), 90.0);

    let expected_model = camera.matrices().model;

    widget.update(ViewerEvent::Draw).unwrap();
    let model: nalgebra::Matrix4<f32> = widget.renderer().backend().uniforms().unwrap().model.into();
    assert_relative_eq!(model, expected_model);
}

#[test]
fn test_bad_selection_keeps_previous_buffer() {
    let mut widget = widget();
    widget.set_data(Some(Box::new(mass_table()))).unwrap();
    let before = widget.renderer().backend().points().to_vec();

    let err = widget
        .set_columns(ColumnSelection::new("x", "y", "velocity", "mass"))
        .unwrap_err();
    assert!(matches!(err, Error::Config(ConfigError::MissingColumn { .. })));
    assert!(matches!(
        widget.last_config_error(),
        Some(ConfigError::MissingColumn { .. })
    ));
    assert_eq!(widget.renderer().backend().points(), before.as_slice());
    assert_eq!(widget.renderer().backend().upload_count(), 1);

    widget.set_columns(mass_selection()).unwrap();
    assert!(widget.last_config_error().is_none());
}

#[test]
fn test_negative_size_is_rejected() {
    let mut widget = widget();
    let table = mass_table().with_column("mass", vec![1.0, -8.0, 27.0]);
    let err = widget.set_data(Some(Box::new(table))).unwrap_err();
    assert!(matches!(err, Error::Config(ConfigError::NegativeSize { row: 1, .. })));
    assert!(widget.buffer().is_none());
    assert!(!widget.is_timer_active());
}

#[test]
fn test_rebinding_reproduces_positions_and_sizes() {
    let mut widget = widget();
    widget.set_data(Some(Box::new(mass_table()))).unwrap();
    let first = positions_and_sizes(&widget);

    widget.set_data(Some(Box::new(other_table()))).unwrap();
    assert_eq!(positions_and_sizes(&widget).len(), 2);

    widget.set_data(Some(Box::new(mass_table()))).unwrap();
    widget.set_columns(mass_selection()).unwrap();
    assert_eq!(positions_and_sizes(&widget), first);
}

#[test]
fn test_detaching_dataset_keeps_last_frame() {
    let mut widget = widget();
    widget.set_data(Some(Box::new(mass_table()))).unwrap();
    widget.set_data(None).unwrap();
    assert_eq!(widget.renderer().bound_point_count(), Some(3));
    assert!(matches!(widget.refresh(), Err(Error::Config(ConfigError::NoDataset))));
}

#[test]
fn test_resize_updates_projection_and_ignores_zero() {
    let mut widget = widget();
    widget.update(ViewerEvent::Resize { width: 800, height: 600 }).unwrap();
    let projection = widget.controller().camera().matrices().projection;
    assert!(projection.iter().all(|v| v.is_finite()));
    assert_eq!(widget.renderer().backend().viewport(), Some((800, 600)));

    widget.update(ViewerEvent::Resize { width: 800, height: 0 }).unwrap();
    assert_eq!(widget.controller().camera().matrices().projection, projection);
    assert_eq!(widget.renderer().backend().viewport(), Some((800, 600)));

    widget.update(ViewerEvent::Draw).unwrap();
    let uniforms = widget.renderer().backend().uniforms().unwrap();
    assert!(uniforms.projection.iter().flatten().all(|v| v.is_finite()));
}

#[test]
fn test_timer_only_runs_while_active() {
    let mut widget = widget();
    widget.set_rotation_speed(2.0, 1.0);
    widget.update(ViewerEvent::Timer { dt: 1.0 / 60.0 }).unwrap();
    assert_eq!(widget.controller().camera().azimuth(), 0.0);

    widget.set_data(Some(Box::new(mass_table()))).unwrap();
    widget.update(ViewerEvent::Timer { dt: 1.0 / 60.0 }).unwrap();
    assert_relative_eq!(widget.controller().camera().azimuth(), 2.0);
    assert_relative_eq!(widget.controller().camera().elevation(), 1.0);

    widget.stop_timer();
    widget.update(ViewerEvent::Timer { dt: 1.0 / 60.0 }).unwrap();
    assert_relative_eq!(widget.controller().camera().azimuth(), 2.0);
}

#[test]
fn test_compile_failure_prevents_construction() {
    let result = ScatterWidget::new(
        HeadlessBackend::failing_compile("adapter lost"),
        ColumnPicker::new(),
        ViewerConfig::default(),
    );
    assert!(matches!(result, Err(Error::ShaderCompilation(_))));
}

#[test]
fn test_invalid_config_prevents_construction() {
    let config = ViewerConfig {
        min_distance: 0.0,
        ..Default::default()
    };
    let result = ScatterWidget::new(HeadlessBackend::new(), ColumnPicker::new(), config);
    assert!(matches!(result, Err(Error::Visualization(_))));
}

#[test]
fn test_selection_before_attach_binds_once() {
    let mut widget = widget();
    widget.picker_mut().select(ColumnSelection::new("z", "y", "x", "mass"));
    widget.set_data(Some(Box::new(mass_table()))).unwrap();

    assert_eq!(widget.renderer().backend().upload_count(), 1);
    assert_eq!(
        widget.picker().current_selection(),
        Some(ColumnSelection::new("z", "y", "x", "mass"))
    );
    assert_eq!(widget.renderer().backend().points()[2].position, [0.0, 0.0, 2.0]);
}

#[test]
fn test_dispose_stops_drawing() {
    let mut widget = widget();
    assert!(!widget.is_disposed());
    widget.dispose();
    assert!(widget.is_disposed());
    assert_eq!(widget.renderer().state(), RendererState::Disposed);
    assert!(!widget.is_timer_active());
    assert!(widget.update(ViewerEvent::Draw).is_err());
}
