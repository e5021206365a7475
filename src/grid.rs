use glam::{UVec3, Vec3};
use thiserror::Error;

use crate::math::{world_to_cell, Axis, AABB};

/// Reasons a grid definition is rejected.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GridError {
    #[error("invalid grid configuration: resolution {resolution} has a zero component")]
    InvalidConfiguration { resolution: UVec3 },

    #[error("degenerate grid: size {size} must be finite and positive on every axis")]
    DegenerateGrid { size: Vec3 },
}

/// Per-cell state.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CellState {
    local_position: Vec3,
    intersected: bool,
}

impl CellState {
    /// Minimum corner relative to the grid's `bounds_min`.
    pub fn local_position(&self) -> Vec3 {
        self.local_position
    }

    pub fn is_intersected(&self) -> bool {
        self.intersected
    }

    pub(crate) fn mark(&mut self) {
        self.intersected = true;
    }
}

/// Axis-aligned region split into `nx * ny * nz` cells.
///
/// Storage is flattened with x varying fastest, then y, then z.
#[derive(Clone, Debug)]
pub struct Grid {
    bounds_min: Vec3,
    size: Vec3,
    resolution: UVec3,
    cell_size: Vec3,
    cells: Vec<CellState>,
}

fn validate(size: Vec3, resolution: UVec3) -> Result<(), GridError> {
    if resolution.cmpeq(UVec3::ZERO).any() {
        return Err(GridError::InvalidConfiguration { resolution });
    }
    if !size.is_finite() || size.cmple(Vec3::ZERO).any() {
        return Err(GridError::DegenerateGrid { size });
    }
    Ok(())
}

fn build_cells(resolution: UVec3, cell_size: Vec3) -> Vec<CellState> {
    let total_cells = resolution.x as usize * resolution.y as usize * resolution.z as usize;
    let mut cells = Vec::with_capacity(total_cells);
    for z in 0..resolution.z {
        for y in 0..resolution.y {
            for x in 0..resolution.x {
                cells.push(CellState {
                    local_position: UVec3::new(x, y, z).as_vec3() * cell_size,
                    intersected: false,
                });
            }
        }
    }
    cells
}

impl Grid {
    pub fn new(
        bounds_min: Vec3,
        size: Vec3,
        resolution: (u32, u32, u32),
    ) -> Result<Self, GridError> {
        let resolution = UVec3::from(resolution);
        validate(size, resolution)?;

        let cell_size = size / resolution.as_vec3();
        Ok(Self {
            bounds_min,
            size,
            resolution,
            cell_size,
            cells: build_cells(resolution, cell_size),
        })
    }

    /// Replaces bounds and resolution, reallocating every cell.
    ///
    /// On error the grid keeps its previous definition.
    pub fn reconfigure(
        &mut self,
        bounds_min: Vec3,
        size: Vec3,
        resolution: (u32, u32, u32),
    ) -> Result<(), GridError> {
        *self = Self::new(bounds_min, size, resolution)?;
        Ok(())
    }

    pub fn bounds_min(&self) -> Vec3 {
        self.bounds_min
    }

    pub fn size(&self) -> Vec3 {
        self.size
    }

    pub fn bounds(&self) -> AABB {
        AABB::from_min_size(self.bounds_min, self.size)
    }

    pub fn resolution(&self) -> UVec3 {
        self.resolution
    }

    pub fn cell_size(&self) -> Vec3 {
        self.cell_size
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Number of cells along `axis`.
    pub fn axis_len(&self, axis: Axis) -> i32 {
        self.resolution[axis.index()] as i32
    }

    fn flat_index(&self, ix: i32, iy: i32, iz: i32) -> Option<usize> {
        let in_range = |i: i32, n: u32| i >= 0 && (i as u32) < n;
        if !(in_range(ix, self.resolution.x)
            && in_range(iy, self.resolution.y)
            && in_range(iz, self.resolution.z))
        {
            return None;
        }
        let (nx, ny) = (self.resolution.x as usize, self.resolution.y as usize);
        Some(ix as usize + iy as usize * nx + iz as usize * nx * ny)
    }

    pub fn cell_at(&self, ix: i32, iy: i32, iz: i32) -> Option<&CellState> {
        self.flat_index(ix, iy, iz).map(|idx| &self.cells[idx])
    }

    pub(crate) fn cell_at_mut(&mut self, ix: i32, iy: i32, iz: i32) -> Option<&mut CellState> {
        self.flat_index(ix, iy, iz).map(move |idx| &mut self.cells[idx])
    }

    /// Index of the cell containing `world_pos` along `axis`, saturated to
    /// `[0, n - 1]`.
    pub fn world_to_cell_index(&self, world_pos: Vec3, axis: Axis) -> i32 {
        let a = axis.index();
        let rel = world_pos[a] - self.bounds_min[a];
        let index = (rel / self.cell_size[a]).floor() as i32;
        index.clamp(0, self.axis_len(axis) - 1)
    }

    /// Cell containing `world_pos`, or `None` outside the grid.
    pub fn world_to_cell(&self, world_pos: Vec3) -> Option<UVec3> {
        let cell = world_to_cell(world_pos, self.bounds_min, self.cell_size);
        self.flat_index(cell.x, cell.y, cell.z)?;
        Some(cell.as_uvec3())
    }

    /// World coordinate of the boundary plane in front of cell `index`.
    /// `index == n` is the far face of the grid.
    pub fn cell_boundary_world(&self, index: i32, axis: Axis) -> f32 {
        let a = axis.index();
        index as f32 * self.cell_size[a] + self.bounds_min[a]
    }

    pub fn cell_world_min(&self, ix: i32, iy: i32, iz: i32) -> Option<Vec3> {
        self.cell_at(ix, iy, iz)
            .map(|cell| cell.local_position + self.bounds_min)
    }

    pub fn cell_world_center(&self, ix: i32, iy: i32, iz: i32) -> Option<Vec3> {
        self.cell_world_min(ix, iy, iz)
            .map(|min| min + self.cell_size * 0.5)
    }

    /// Every cell with its lattice index, in storage order.
    pub fn iterate_cells(&self) -> impl Iterator<Item = (UVec3, &CellState)> + '_ {
        let (nx, ny) = (self.resolution.x, self.resolution.y);
        self.cells.iter().enumerate().map(move |(i, cell)| {
            let i = i as u32;
            (UVec3::new(i % nx, (i / nx) % ny, i / (nx * ny)), cell)
        })
    }

    pub fn marked_cells(&self) -> impl Iterator<Item = UVec3> + '_ {
        self.iterate_cells()
            .filter(|(_, cell)| cell.intersected)
            .map(|(index, _)| index)
    }

    pub fn marked_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.intersected).count()
    }

    pub fn reset_all(&mut self) {
        self.cells.iter_mut().for_each(|cell| cell.intersected = false);
    }
}
