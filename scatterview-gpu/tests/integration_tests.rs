//! Integration tests for scatterview-gpu
//!
//! These bind real datasets through the core binder and render them on the
//! headless backend, checking that the compiled program, the uploaded
//! records and the uniforms agree.

use approx::assert_relative_eq;
use nalgebra::{Matrix4, Vector3};
use scatterview_core::{
    ColumnSelection, DataTable, Error, PointDatasetBinder, PointShape, Transform3D, ViewerConfig,
};
use scatterview_gpu::{
    point_shader_source, validate_wgsl, HeadlessBackend, RenderBackend, Renderer, RendererState,
};

fn cube_corners() -> DataTable {
    let mut x = Vec::new();
    let mut y = Vec::new();
    let mut z = Vec::new();
    for i in 0..8 {
        x.push(if i & 1 == 0 { -1.0 } else { 1.0 });
        y.push(if i & 2 == 0 { -1.0 } else { 1.0 });
        z.push(if i & 4 == 0 { -1.0 } else { 1.0 });
    }
    DataTable::new("cube")
        .with_column("x", x)
        .with_column("y", y)
        .with_column("z", z)
        .with_column("weight", vec![8.0; 8])
}

fn ready_renderer() -> Renderer<HeadlessBackend> {
    let mut renderer = Renderer::new(HeadlessBackend::new(), &ViewerConfig::default());
    renderer.initialize().unwrap();
    renderer
}

#[test]
fn test_point_program_validates() {
    let source = point_shader_source(PointShape::Disc);
    assert!(source.contains("fn vs_main"));
    assert!(source.contains("fn fs_main"));
    validate_wgsl(&source).unwrap();
}

#[test]
fn test_invalid_program_is_a_compile_error() {
    let err = validate_wgsl("fn broken( -> {").unwrap_err();
    assert!(matches!(err, Error::ShaderCompilation(_)));
}

#[test]
fn test_bound_dataset_reaches_backend() {
    let table = cube_corners();
    let mut binder = PointDatasetBinder::with_seed(3);
    let buffer = binder
        .bind(&table, &ColumnSelection::new("x", "y", "z", "weight"))
        .unwrap();

    let mut renderer = ready_renderer();
    renderer.bind_points(&buffer.records).unwrap();
    renderer.draw().unwrap();

    let backend = renderer.backend();
    assert_eq!(backend.points().len(), 8);
    assert_eq!(backend.points()[7].position, [1.0, 1.0, 1.0]);
    for record in backend.points() {
        assert_relative_eq!(record.size, 1.0, epsilon = 1e-6);
        assert!(record.bg_color.iter().all(|c| (0.85..=1.0).contains(c)));
    }

    let draw = backend.draws().last().unwrap();
    assert_eq!(draw.point_count, 8);
    assert_eq!(draw.uniforms.viewport, [600.0, 400.0]);
}

#[test]
fn test_transforms_are_written_on_draw() {
    let mut renderer = ready_renderer();
    let model = Transform3D::rotation_degrees(30.0, Vector3::z())
        .compose(Transform3D::rotation_degrees(45.0, Vector3::y()));
    let view = Transform3D::translation(Vector3::new(0.0, 0.0, -20.0));

    renderer.set_model(&model.matrix);
    renderer.set_view(&view.matrix);
    renderer.set_point_scale(0.25);

    // Nothing reaches the backend until the next draw.
    assert_eq!(renderer.backend().uniforms().unwrap().size, 5.0 / 20.0);
    let identity: [[f32; 4]; 4] = Matrix4::<f32>::identity().into();
    assert_eq!(renderer.backend().uniforms().unwrap().model, identity);

    renderer.draw().unwrap();
    let uniforms = renderer.backend().uniforms().unwrap();
    let written_model: Matrix4<f32> = uniforms.model.into();
    assert_relative_eq!(written_model, model.matrix);
    assert_relative_eq!(uniforms.view[3][2], -20.0);
    assert_relative_eq!(uniforms.size, 0.25);
}

#[test]
fn test_rebinding_replaces_buffer() {
    let table = cube_corners().with_column("w", vec![27.0; 8]);
    let mut binder = PointDatasetBinder::with_seed(1);
    let mut renderer = ready_renderer();

    let first = binder.bind(&table, &ColumnSelection::new("x", "y", "z", "weight")).unwrap();
    renderer.bind_points(&first.records).unwrap();
    let second = binder.bind(&table, &ColumnSelection::new("z", "y", "x", "w")).unwrap();
    renderer.bind_points(&second.records).unwrap();

    assert_eq!(renderer.backend().upload_count(), 2);
    assert_eq!(renderer.bound_point_count(), Some(8));
    assert_eq!(renderer.backend().points()[1].position, [-1.0, -1.0, 1.0]);
    assert_relative_eq!(renderer.backend().points()[0].size, 1.5, epsilon = 1e-6);
}

#[test]
fn test_empty_dataset_draws_clear_only() {
    let table = DataTable::new("empty")
        .with_column("x", Vec::new())
        .with_column("y", Vec::new())
        .with_column("z", Vec::new())
        .with_column("s", Vec::new());
    let buffer = PointDatasetBinder::with_seed(0)
        .bind(&table, &ColumnSelection::new("x", "y", "z", "s"))
        .unwrap();
    assert!(buffer.is_empty());

    let mut renderer = ready_renderer();
    renderer.bind_points(&buffer.records).unwrap();
    renderer.draw().unwrap();
    assert_eq!(renderer.backend().draws()[0].point_count, 0);
}

#[test]
fn test_lifecycle_transitions() {
    let mut renderer = Renderer::new(HeadlessBackend::new(), &ViewerConfig::default());
    assert_eq!(renderer.state(), RendererState::Uninitialized);
    assert!(matches!(renderer.draw(), Err(Error::InvalidState(_))));

    renderer.initialize().unwrap();
    assert_eq!(renderer.state(), RendererState::Ready);
    assert!(renderer.backend().program_source().is_some());
    assert!(matches!(renderer.initialize(), Err(Error::InvalidState(_))));

    renderer.dispose();
    renderer.dispose();
    assert_eq!(renderer.state(), RendererState::Disposed);
    assert!(renderer.backend().is_released());
    assert!(renderer.bind_points(&[]).is_err());
}

#[test]
fn test_backend_rejects_overdraw() {
    let mut backend = HeadlessBackend::new();
    let renderer = ready_renderer();
    backend.write_uniforms(renderer.uniforms());
    assert!(matches!(backend.draw([0.0; 4], 1), Err(Error::Gpu(_))));
}
