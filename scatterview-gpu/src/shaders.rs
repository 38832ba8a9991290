//! WGSL source for the point-sprite program

use scatterview_core::{Error, PointShape, Result};

/// Shared vertex and fragment stages
const POINT_PROGRAM: &str = include_str!("shaders/scatter_points.wgsl");

/// Filled disc of diameter `v_size` centered in the sprite
const DISC_DISTANCE: &str = r#"
fn shape_distance(coord: vec2<f32>, sprite_size: f32, v_size: f32) -> f32 {
    let r = length((coord - vec2<f32>(0.5, 0.5)) * sprite_size);
    return r - v_size / 2.0;
}
"#;

/// Signed-distance function for `shape`, in WGSL
pub fn shape_distance_source(shape: PointShape) -> &'static str {
    match shape {
        PointShape::Disc => DISC_DISTANCE,
    }
}

/// Complete program source for `shape`
pub fn point_shader_source(shape: PointShape) -> String {
    let mut source = String::with_capacity(POINT_PROGRAM.len() + 256);
    source.push_str(POINT_PROGRAM);
    source.push_str(shape_distance_source(shape));
    source
}

/// Parse and validate WGSL source without a device
pub fn validate_wgsl(source: &str) -> Result<()> {
    let module = naga::front::wgsl::parse_str(source)
        .map_err(|e| Error::ShaderCompilation(e.emit_to_string(source)))?;

    naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::empty(),
    )
    .validate(&module)
    .map_err(|e| Error::ShaderCompilation(e.emit_to_string(source)))?;

    Ok(())
}
