// config.rs - Scene configuration loaded from JSON
use std::path::Path;

use anyhow::{Context, Result};
use glam::Vec3;
use log::info;
use serde::{Deserialize, Serialize};

use crate::grid::{Grid, GridError};
use crate::math::Ray;

/// Grid definition: bounds and per-axis cell counts.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct GridConfig {
    pub bounds_min: [f32; 3],
    pub size: [f32; 3],
    pub resolution: [u32; 3],
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            bounds_min: [0.0, 0.0, 0.0],
            size: [16.0, 16.0, 16.0],
            resolution: [16, 16, 16],
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct RayConfig {
    pub origin: [f32; 3],
    pub direction: [f32; 3],
    pub max_distance: f32,
}

impl Default for RayConfig {
    fn default() -> Self {
        Self {
            origin: [0.0, 0.0, 0.0],
            direction: [0.0, 0.0, 1.0],
            max_distance: 100.0,
        }
    }
}

/// Everything one invocation needs: the grid, the ray and how to print.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct SceneConfig {
    pub grid: GridConfig,
    pub ray: RayConfig,
    /// Also draw cells the ray missed.
    pub show_unmarked: bool,
}

impl SceneConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        let config = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;
        info!("Loaded scene config from {:?}", path);
        Ok(config)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let contents = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, contents)
            .with_context(|| format!("Failed to write config file: {:?}", path))?;
        Ok(())
    }

    pub fn build_grid(&self) -> Result<Grid, GridError> {
        let [nx, ny, nz] = self.grid.resolution;
        Grid::new(
            Vec3::from_array(self.grid.bounds_min),
            Vec3::from_array(self.grid.size),
            (nx, ny, nz),
        )
    }

    pub fn ray(&self) -> Ray {
        Ray::new(
            Vec3::from_array(self.ray.origin),
            Vec3::from_array(self.ray.direction),
            self.ray.max_distance,
        )
    }
}
