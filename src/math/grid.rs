use glam::{IVec3, Vec3};

/// Floor conversion from world space to lattice coordinates.
///
/// No clamping: positions outside the lattice give negative or past-the-end
/// indices.
pub fn world_to_cell(pos: Vec3, bounds_min: Vec3, cell_size: Vec3) -> IVec3 {
    let rel_pos = pos - bounds_min;
    (rel_pos / cell_size).floor().as_ivec3()
}
