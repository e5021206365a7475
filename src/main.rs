use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use serde::Serialize;

use voxel_dda::cli::Cli;
use voxel_dda::config::SceneConfig;
use voxel_dda::display::{describe_cells, render_layers};
use voxel_dda::traversal::{Termination, Traversal};

/// JSON output: cells in visiting order plus why the walk stopped.
#[derive(Serialize)]
struct Report {
    cells: Vec<[u32; 3]>,
    termination: String,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => SceneConfig::load(path)?,
        None => SceneConfig::default(),
    };
    cli.apply(&mut config);

    if let Some(path) = &cli.write_config {
        config.save(path)?;
        info!("Wrote effective config to {:?}", path);
    }

    let mut grid = config.build_grid().context("Invalid grid configuration")?;
    let ray = config.ray();
    info!(
        "Grid {:?} cells of {:?}, ray {:?} -> {:?} (max {})",
        grid.resolution(),
        grid.cell_size(),
        ray.origin,
        ray.direction,
        ray.max_distance
    );

    if !grid.bounds().contains(ray.origin) {
        warn!("Ray origin {:?} is outside the grid; traversal starts from the nearest cell", ray.origin);
    }

    let order = Traversal::cells(&grid, ray);
    let summary = Traversal::run(&mut grid, ray);
    info!(
        "Marked {} of {} cells, stopped by {:?}",
        summary.cells_marked,
        grid.cell_count(),
        summary.termination
    );

    if cli.json {
        let report = Report {
            cells: order.iter().map(|c| c.to_array()).collect(),
            termination: match summary.termination {
                Termination::ExitedGrid(axis) => format!("exited grid along {}", axis),
                Termination::DistanceBudget => "distance budget".to_string(),
                Termination::StepLimit => "step limit".to_string(),
            },
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_layers(&grid, config.show_unmarked));
        println!();
        print!("{}", describe_cells(&grid));
    }

    Ok(())
}
