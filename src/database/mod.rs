pub mod models;
pub mod repositories;
pub mod seed;

pub use repositories::{InMemoryPoolRepository, PoolRepository};

use crate::config::DataConfig;
use anyhow::Result;
use log::info;

/// Build the pool repository from the configured seed file, or the built-in records
pub fn init_repository(config: &DataConfig) -> Result<InMemoryPoolRepository> {
    let records = match &config.seed_file {
        Some(path) => seed::load_from_file(path)?,
        None => {
            info!("No seed file configured, using built-in pool records");
            seed::default_records()
        }
    };
    InMemoryPoolRepository::new(records)
}
