//! One full run: fetch → rank → draw both maps → stamp the status file.
//!
//! The stamp is written on every exit path, including a missing API key or
//! a failed client build. The error is still returned afterwards.

use log::{error, info, warn};
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::Result;
use crate::http::CongestionFetcher;
use crate::places::PLACES;
use crate::render::MapRenderer;
use crate::stamp::stamp_status_file;
use crate::{rank_by_congestion, select_extremes, TOP_N};

pub const HOT_MAP_FILE: &str = "seoul_hot.png";
pub const CHILL_MAP_FILE: &str = "seoul_chill.png";
pub const STATUS_FILE: &str = "README.md";

/// Where a run writes its maps and stamp.
#[derive(Debug, Clone)]
pub struct OutputPaths {
    pub hot_map: PathBuf,
    pub chill_map: PathBuf,
    pub status_file: PathBuf,
}

impl OutputPaths {
    /// Standard file names inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            hot_map: dir.join(HOT_MAP_FILE),
            chill_map: dir.join(CHILL_MAP_FILE),
            status_file: dir.join(STATUS_FILE),
        }
    }
}

/// Load keys from the environment, then [`run`]. Stamps even if loading fails.
pub async fn run_from_env(paths: &OutputPaths) -> Result<()> {
    match Config::from_env() {
        Ok(config) => run(&config, paths).await,
        Err(e) => {
            stamp_or_warn(&paths.status_file);
            Err(e)
        }
    }
}

/// Fetch every place, draw both maps and stamp the status file.
///
/// Map failures are logged and do not fail the run.
pub async fn run(config: &Config, paths: &OutputPaths) -> Result<()> {
    let outcome = render_maps(config, paths).await;
    stamp_or_warn(&paths.status_file);
    outcome
}

async fn render_maps(config: &Config, paths: &OutputPaths) -> Result<()> {
    let fetcher = CongestionFetcher::new(config)?;
    let renderer = MapRenderer::new(config)?;

    info!("Collecting congestion data for {} places", PLACES.len());
    let mut readings = fetcher.fetch_all(PLACES).await;
    info!("Collected {} places", readings.len());

    if readings.is_empty() {
        warn!("No congestion data collected, maps left unchanged");
        return Ok(());
    }

    rank_by_congestion(&mut readings);
    let extremes = select_extremes(&readings, TOP_N);

    let maps = [
        (extremes.most_crowded, &paths.hot_map, true),
        (extremes.least_crowded, &paths.chill_map, false),
    ];
    for (subset, path, is_hot) in maps {
        if let Err(e) = renderer.render(subset, path, is_hot).await {
            error!("Map generation failed for {}: {}", path.display(), e);
        }
    }

    Ok(())
}

fn stamp_or_warn(path: &Path) {
    if let Err(e) = stamp_status_file(path) {
        warn!("Could not stamp {}: {}", path.display(), e);
    }
}
