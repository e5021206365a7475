use approx::assert_relative_eq;
use glam::{UVec3, Vec3};
use voxel_dda::grid::{Grid, GridError};
use voxel_dda::math::Axis;

fn unit_grid() -> Grid {
    Grid::new(Vec3::ZERO, Vec3::splat(4.0), (4, 4, 4)).unwrap()
}

#[cfg(test)]
mod construction_tests {
    use super::*;

    #[test]
    fn test_grid_creation_allocates_every_cell() {
        let grid = Grid::new(Vec3::new(-1.0, 0.0, 2.0), Vec3::new(6.0, 4.0, 2.0), (3, 4, 5)).unwrap();

        assert_eq!(grid.cell_count(), 60);
        assert_eq!(grid.resolution(), UVec3::new(3, 4, 5));
        assert_relative_eq!(grid.cell_size().x, 2.0);
        assert_relative_eq!(grid.cell_size().y, 1.0);
        assert_relative_eq!(grid.cell_size().z, 0.4);
        assert_eq!(grid.marked_count(), 0);
    }

    #[test]
    fn test_zero_resolution_is_invalid_configuration() {
        for resolution in [(0, 4, 4), (4, 0, 4), (4, 4, 0)] {
            let err = Grid::new(Vec3::ZERO, Vec3::ONE, resolution).unwrap_err();
            assert!(
                matches!(err, GridError::InvalidConfiguration { .. }),
                "resolution {:?} should be rejected, got {:?}", resolution, err
            );
        }
    }

    #[test]
    fn test_non_positive_size_is_degenerate() {
        for size in [Vec3::new(0.0, 1.0, 1.0), Vec3::new(1.0, -1.0, 1.0), Vec3::new(1.0, 1.0, 0.0)] {
            let err = Grid::new(Vec3::ZERO, size, (2, 2, 2)).unwrap_err();
            assert_eq!(err, GridError::DegenerateGrid { size });
        }
    }

    #[test]
    fn test_local_positions_follow_index_formula() {
        let grid = Grid::new(Vec3::splat(10.0), Vec3::new(4.0, 3.0, 1.0), (2, 3, 4)).unwrap();
        let cs = grid.cell_size();

        for (index, cell) in grid.iterate_cells() {
            let expected = index.as_vec3() * cs;
            assert_relative_eq!(cell.local_position().x, expected.x);
            assert_relative_eq!(cell.local_position().y, expected.y);
            assert_relative_eq!(cell.local_position().z, expected.z);
        }
    }

    #[test]
    fn test_reconfigure_rebuilds_cells() {
        let mut grid = unit_grid();
        grid.reconfigure(Vec3::ONE, Vec3::new(2.0, 2.0, 8.0), (2, 1, 8)).unwrap();

        assert_eq!(grid.cell_count(), 16);
        assert_eq!(grid.bounds_min(), Vec3::ONE);
        assert_eq!(grid.cell_size(), Vec3::new(1.0, 2.0, 1.0));
        let cell = grid.cell_at(1, 0, 7).unwrap();
        assert_eq!(cell.local_position(), Vec3::new(1.0, 0.0, 7.0));
        assert!(grid.cell_at(0, 1, 0).is_none());
    }

    #[test]
    fn test_failed_reconfigure_keeps_previous_grid() {
        let mut grid = unit_grid();
        let err = grid.reconfigure(Vec3::ZERO, Vec3::ONE, (0, 1, 1)).unwrap_err();

        assert!(matches!(err, GridError::InvalidConfiguration { .. }));
        assert_eq!(grid.resolution(), UVec3::splat(4));
        assert_eq!(grid.cell_count(), 64);
    }
}

#[cfg(test)]
mod lookup_tests {
    use super::*;

    #[test]
    fn test_cell_at_rejects_out_of_range() {
        let grid = unit_grid();
        assert!(grid.cell_at(0, 0, 0).is_some());
        assert!(grid.cell_at(3, 3, 3).is_some());
        assert!(grid.cell_at(4, 0, 0).is_none());
        assert!(grid.cell_at(0, 4, 0).is_none());
        assert!(grid.cell_at(0, 0, 4).is_none());
        assert!(grid.cell_at(-1, 0, 0).is_none());
        assert!(grid.cell_at(i32::MIN, i32::MAX, 0).is_none());
    }

    #[test]
    fn test_world_to_cell_index_clamps() {
        let grid = unit_grid();
        assert_eq!(grid.world_to_cell_index(Vec3::new(2.5, 0.0, 0.0), Axis::X), 2);
        assert_eq!(grid.world_to_cell_index(Vec3::new(-7.0, 0.0, 0.0), Axis::X), 0);
        assert_eq!(grid.world_to_cell_index(Vec3::new(0.0, 99.0, 0.0), Axis::Y), 3);
        // The far face belongs to no cell; it saturates to the last one.
        assert_eq!(grid.world_to_cell_index(Vec3::new(0.0, 0.0, 4.0), Axis::Z), 3);
    }

    #[test]
    fn test_world_to_cell_unclamped() {
        let grid = Grid::new(Vec3::splat(-2.0), Vec3::splat(4.0), (2, 2, 2)).unwrap();
        assert_eq!(grid.world_to_cell(Vec3::new(-1.0, 1.0, 0.5)), Some(UVec3::new(0, 1, 1)));
        assert_eq!(grid.world_to_cell(Vec3::new(-2.5, 0.0, 0.0)), None);
        assert_eq!(grid.world_to_cell(Vec3::new(0.0, 2.0, 0.0)), None);
    }

    #[test]
    fn test_cell_boundary_world() {
        let grid = Grid::new(Vec3::new(-4.0, 1.0, 0.0), Vec3::new(8.0, 2.0, 3.0), (4, 4, 3)).unwrap();
        assert_relative_eq!(grid.cell_boundary_world(0, Axis::X), -4.0);
        assert_relative_eq!(grid.cell_boundary_world(3, Axis::X), 2.0);
        assert_relative_eq!(grid.cell_boundary_world(4, Axis::X), 4.0);
        assert_relative_eq!(grid.cell_boundary_world(2, Axis::Y), 2.0);
        assert_relative_eq!(grid.cell_boundary_world(3, Axis::Z), 3.0);
    }

    #[test]
    fn test_cell_world_min_and_center() {
        let grid = Grid::new(Vec3::new(-4.0, 0.0, 0.0), Vec3::splat(8.0), (4, 4, 4)).unwrap();
        assert_eq!(grid.cell_world_min(1, 2, 3), Some(Vec3::new(-2.0, 4.0, 6.0)));
        assert_eq!(grid.cell_world_center(1, 2, 3), Some(Vec3::new(-1.0, 5.0, 7.0)));
        assert_eq!(grid.cell_world_center(4, 0, 0), None);
    }

    #[test]
    fn test_bounds_match_definition() {
        let grid = Grid::new(Vec3::new(1.0, 2.0, 3.0), Vec3::new(4.0, 5.0, 6.0), (1, 1, 1)).unwrap();
        let bounds = grid.bounds();
        assert_eq!(bounds.min, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(bounds.max, Vec3::new(5.0, 7.0, 9.0));
    }
}

#[cfg(test)]
mod iteration_tests {
    use super::*;

    #[test]
    fn test_iterate_cells_order_x_fastest() {
        let grid = Grid::new(Vec3::ZERO, Vec3::ONE, (2, 2, 2)).unwrap();
        let indices: Vec<UVec3> = grid.iterate_cells().map(|(i, _)| i).collect();

        assert_eq!(
            indices,
            vec![
                UVec3::new(0, 0, 0),
                UVec3::new(1, 0, 0),
                UVec3::new(0, 1, 0),
                UVec3::new(1, 1, 0),
                UVec3::new(0, 0, 1),
                UVec3::new(1, 0, 1),
                UVec3::new(0, 1, 1),
                UVec3::new(1, 1, 1),
            ]
        );
    }

    #[test]
    fn test_iterate_cells_is_restartable() {
        let grid = unit_grid();
        assert_eq!(grid.iterate_cells().count(), 64);
        assert_eq!(grid.iterate_cells().count(), 64);
    }

    #[test]
    fn test_reset_without_traversal_leaves_all_clear() {
        let mut grid = unit_grid();
        grid.reset_all();
        assert!(grid.iterate_cells().all(|(_, cell)| !cell.is_intersected()));
        assert_eq!(grid.marked_cells().count(), 0);
    }
}
