use glam::{Mat4, Vec3};

/// World-space position from a column-major 4x4 world matrix, as stored in
/// three.js `Object3D.matrixWorld.elements`.
///
/// Returns `None` for short or non-finite input.
pub fn world_position_from_elements(elements: &[f32]) -> Option<Vec3> {
    let cols: [f32; 16] = elements.get(..16)?.try_into().ok()?;
    let translation = Mat4::from_cols_array(&cols).w_axis.truncate();
    translation.is_finite().then_some(translation)
}
