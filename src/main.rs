//! Fetch live congestion for every monitored area, draw the hot and chill
//! maps, then stamp the README.

use anyhow::{Context, Result};
use std::path::Path;

use seoul_crowd_map::pipeline::{run_from_env, OutputPaths};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    run_from_env(&OutputPaths::in_dir(Path::new(".")))
        .await
        .context("crowd map run failed")
}
