// display.rs - Text output of the grid state
use std::fmt::Write;

use crate::grid::Grid;

const MARKED: char = '#';
const UNMARKED: char = '.';

/// One block per z layer, rows with y descending so +y points up.
pub fn render_layers(grid: &Grid, show_unmarked: bool) -> String {
    let res = grid.resolution();
    let blank = if show_unmarked { UNMARKED } else { ' ' };
    let mut out = String::new();

    for z in 0..res.z as i32 {
        let _ = writeln!(out, "z = {}", z);
        for y in (0..res.y as i32).rev() {
            let row: String = (0..res.x as i32)
                .map(|x| match grid.cell_at(x, y, z) {
                    Some(cell) if cell.is_intersected() => MARKED,
                    _ => blank,
                })
                .collect();
            let _ = writeln!(out, "{}", row.trim_end());
        }
    }
    out
}

/// Marked cells with their world-space centers, one per line.
pub fn describe_cells(grid: &Grid) -> String {
    let mut out = String::new();
    for index in grid.marked_cells() {
        let c = index.as_ivec3();
        if let Some(center) = grid.cell_world_center(c.x, c.y, c.z) {
            let _ = writeln!(
                out,
                "({}, {}, {}) center ({:.3}, {:.3}, {:.3})",
                index.x, index.y, index.z, center.x, center.y, center.z
            );
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Ray;
    use crate::traversal::Traversal;
    use glam::Vec3;

    #[test]
    fn test_render_single_row() {
        let mut grid = Grid::new(Vec3::ZERO, Vec3::new(4.0, 2.0, 1.0), (4, 2, 1)).unwrap();
        Traversal::run(&mut grid, Ray::unbounded(Vec3::new(0.5, 0.5, 0.5), Vec3::X));

        assert_eq!(render_layers(&grid, true), "z = 0\n....\n####\n");
        assert_eq!(render_layers(&grid, false), "z = 0\n\n####\n");
    }

    #[test]
    fn test_describe_cells_lists_centers() {
        let mut grid = Grid::new(Vec3::splat(-1.0), Vec3::splat(2.0), (2, 1, 1)).unwrap();
        Traversal::run(&mut grid, Ray::unbounded(Vec3::new(-0.5, 0.0, 0.0), Vec3::X));

        let text = describe_cells(&grid);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "(0, 0, 0) center (-0.500, 0.000, 0.000)");
        assert_eq!(lines[1], "(1, 0, 0) center (0.500, 0.000, 0.000)");
    }
}
