//! Incremental grid traversal (3D DDA) after Amanatides & Woo,
//! "A Fast Voxel Traversal Algorithm for Ray Tracing".
//!
//! The walk keeps, per axis, the ray parameter at which the next boundary
//! plane is crossed (`t_max`) and the parameter span of one full cell
//! (`t_delta`). Each step advances the axis with the smallest `t_max`, so
//! every cell costs a couple of comparisons and one addition.

use std::iter::FusedIterator;

use glam::{IVec3, UVec3, Vec3};
use log::{debug, trace};

use crate::grid::Grid;
use crate::math::{Axis, Ray};

/// Stand-in for a zero or positive-tiny direction component, so an axis the
/// ray runs parallel to gets a huge `t_max` instead of a division by zero.
pub const DIRECTION_EPSILON: f32 = 1e-6;

/// Why a walk stopped.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Termination {
    /// The index on this axis reached its exit sentinel.
    ExitedGrid(Axis),
    /// The next cell would be entered beyond `Ray::max_distance`.
    DistanceBudget,
    /// Visit cap of `nx + ny + nz` hit.
    StepLimit,
}

/// One visited cell.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TraversalStep {
    pub cell: UVec3,
    /// Ray parameter at which the cell was entered; 0 for the seed cell.
    pub t_entry: f32,
}

/// Outcome of [`Traversal::run`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TraversalSummary {
    pub seed: UVec3,
    pub cells_marked: usize,
    pub termination: Termination,
}

/// Iterator over the cells a ray passes through, in order.
///
/// Holds no borrow of the grid: everything it needs is captured at
/// construction, so the grid can be mutated while walking.
#[derive(Clone, Debug)]
pub struct DdaWalk {
    cell: IVec3,
    step: IVec3,
    exit: IVec3,
    t_max: Vec3,
    t_delta: Vec3,
    max_distance: f32,
    emit_seed: bool,
    visits: u32,
    max_visits: u32,
    termination: Option<Termination>,
}

impl DdaWalk {
    pub fn new(grid: &Grid, ray: &Ray) -> Self {
        let cell_size = grid.cell_size();
        let mut cell = IVec3::ZERO;
        let mut step = IVec3::ZERO;
        let mut exit = IVec3::ZERO;
        let mut t_max = Vec3::ZERO;
        let mut t_delta = Vec3::ZERO;

        for axis in Axis::ALL {
            let a = axis.index();
            let start = grid.world_to_cell_index(ray.origin, axis);
            let dir = ray.direction[a];
            cell[a] = start;

            if dir >= 0.0 {
                let dir = dir.max(DIRECTION_EPSILON);
                step[a] = 1;
                t_max[a] = (grid.cell_boundary_world(start + 1, axis) - ray.origin[a]) / dir;
                t_delta[a] = cell_size[a] / dir;
                exit[a] = grid.axis_len(axis);
            } else {
                step[a] = -1;
                t_max[a] = (grid.cell_boundary_world(start, axis) - ray.origin[a]) / dir;
                t_delta[a] = -cell_size[a] / dir;
                exit[a] = -1;
            }
        }

        let res = grid.resolution();
        let max_visits = res.x.saturating_add(res.y).saturating_add(res.z);

        debug!(
            "DDA setup: seed {:?} step {:?} t_max {:?} t_delta {:?} budget {}",
            cell, step, t_max, t_delta, ray.max_distance
        );

        Self {
            cell,
            step,
            exit,
            t_max,
            t_delta,
            max_distance: ray.max_distance,
            emit_seed: true,
            visits: 0,
            max_visits,
            termination: None,
        }
    }

    /// Set once the iterator has returned `None`.
    pub fn termination(&self) -> Option<Termination> {
        self.termination
    }

    /// Axis with the nearest boundary. Ties go X, then Z, then Y.
    fn next_axis(&self) -> Axis {
        let t = self.t_max;
        if t.x <= t.y && t.x <= t.z {
            Axis::X
        } else if t.y < t.z {
            Axis::Y
        } else {
            Axis::Z
        }
    }

    fn finish(&mut self, reason: Termination) -> Option<TraversalStep> {
        trace!("DDA stop after {} cells: {:?}", self.visits, reason);
        self.termination = Some(reason);
        None
    }
}

impl Iterator for DdaWalk {
    type Item = TraversalStep;

    fn next(&mut self) -> Option<TraversalStep> {
        if self.termination.is_some() {
            return None;
        }

        if self.emit_seed {
            self.emit_seed = false;
            self.visits = 1;
            return Some(TraversalStep {
                cell: self.cell.as_uvec3(),
                t_entry: 0.0,
            });
        }

        if self.visits >= self.max_visits {
            return self.finish(Termination::StepLimit);
        }

        let axis = self.next_axis();
        let a = axis.index();
        let t_entry = self.t_max[a];

        self.cell[a] += self.step[a];
        if self.cell[a] == self.exit[a] {
            return self.finish(Termination::ExitedGrid(axis));
        }
        self.t_max[a] += self.t_delta[a];

        if t_entry > self.max_distance {
            return self.finish(Termination::DistanceBudget);
        }

        self.visits += 1;
        trace!("DDA step {} along {}: cell {:?} at t={}", self.visits, axis, self.cell, t_entry);
        Some(TraversalStep {
            cell: self.cell.as_uvec3(),
            t_entry,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.termination.is_some() {
            return (0, Some(0));
        }
        let remaining = self.max_visits.saturating_sub(self.visits) as usize;
        (usize::from(self.emit_seed), Some(remaining))
    }
}

impl FusedIterator for DdaWalk {}

/// Entry points for running a traversal against a [`Grid`].
pub struct Traversal;

impl Traversal {
    pub fn walk(grid: &Grid, ray: Ray) -> DdaWalk {
        DdaWalk::new(grid, &ray)
    }

    /// Ordered list of visited cells; leaves cell state untouched.
    pub fn cells(grid: &Grid, ray: Ray) -> Vec<UVec3> {
        Self::walk(grid, ray).map(|step| step.cell).collect()
    }

    /// Clears every cell, then marks each cell the ray passes through.
    pub fn run(grid: &mut Grid, ray: Ray) -> TraversalSummary {
        let mut walk = DdaWalk::new(grid, &ray);
        grid.reset_all();

        let mut seed = None;
        let mut cells_marked = 0;
        for step in walk.by_ref() {
            seed.get_or_insert(step.cell);
            let c = step.cell.as_ivec3();
            if let Some(cell) = grid.cell_at_mut(c.x, c.y, c.z) {
                cell.mark();
                cells_marked += 1;
            }
        }

        let summary = TraversalSummary {
            seed: seed.unwrap_or(UVec3::ZERO),
            cells_marked,
            // The walk always records a reason before returning `None`.
            termination: walk.termination().unwrap_or(Termination::StepLimit),
        };
        debug!("Traversal done: {:?}", summary);
        summary
    }
}
