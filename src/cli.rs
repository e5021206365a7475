// cli.rs - Command-line interface configuration
use std::path::PathBuf;
use std::str::FromStr;

use clap::Parser;

use crate::config::SceneConfig;

#[derive(Parser, Debug, Clone)]
#[command(name = "voxel-dda")]
#[command(about = "Lists the grid cells a ray passes through", long_about = None)]
pub struct Cli {
    /// JSON scene config; defaults are used when omitted
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Ray origin as x,y,z
    #[arg(long, value_parser = parse_triple::<f32>, allow_hyphen_values = true)]
    pub origin: Option<[f32; 3]>,

    /// Ray direction as x,y,z
    #[arg(long, value_parser = parse_triple::<f32>, allow_hyphen_values = true)]
    pub direction: Option<[f32; 3]>,

    /// Stop once the ray has travelled this far
    #[arg(long)]
    pub max_distance: Option<f32>,

    /// Cells per axis as nx,ny,nz
    #[arg(long, value_parser = parse_triple::<u32>)]
    pub resolution: Option<[u32; 3]>,

    /// Draw cells the ray missed too
    #[arg(long, default_value = "false")]
    pub show_unmarked: bool,

    /// Print the ordered cell list as JSON instead of layer drawings
    #[arg(long, default_value = "false")]
    pub json: bool,

    /// Write the effective config to this file
    #[arg(long)]
    pub write_config: Option<PathBuf>,
}

/// Parses `x,y,z` into three components.
fn parse_triple<T>(s: &str) -> Result<[T; 3], String>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    let [x, y, z] = parts.as_slice() else {
        return Err(format!("expected three comma-separated values, got {:?}", s));
    };
    let parse = |v: &str| v.parse::<T>().map_err(|e| format!("{:?}: {}", v, e));
    Ok([parse(*x)?, parse(*y)?, parse(*z)?])
}

impl Cli {
    /// Applies command-line overrides on top of `config`.
    pub fn apply(&self, config: &mut SceneConfig) {
        if let Some(origin) = self.origin {
            config.ray.origin = origin;
        }
        if let Some(direction) = self.direction {
            config.ray.direction = direction;
        }
        if let Some(max_distance) = self.max_distance {
            config.ray.max_distance = max_distance;
        }
        if let Some(resolution) = self.resolution {
            config.grid.resolution = resolution;
        }
        config.show_unmarked |= self.show_unmarked;
    }
}
