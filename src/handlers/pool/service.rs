use log::debug;

use crate::database::{
    models::{PoolDetail, PoolSummary},
    PoolRepository,
};

/// Outcome of a detail lookup that reached the store
#[derive(Debug, Clone, PartialEq)]
pub enum DetailLookup {
    Found(PoolDetail),
    NotFound,
    MissingData,
}

/// Service layer for pool-related business logic
pub struct PoolService;

impl PoolService {
    /// Get all pools with their details stripped
    ///
    /// # Returns
    /// * `Ok(Vec<PoolSummary>)` - Summaries in storage order
    /// * `Err(anyhow::Error)` - Error if the store cannot be read
    pub fn list_summaries(repo: &dyn PoolRepository) -> anyhow::Result<Vec<PoolSummary>> {
        debug!("Fetching all pool summaries");

        let summaries: Vec<PoolSummary> = repo
            .find_all()?
            .into_iter()
            .map(|record| record.summary)
            .collect();

        debug!("Retrieved {} pool summaries", summaries.len());
        Ok(summaries)
    }

    /// Get the detail sub-record of one pool
    ///
    /// # Arguments
    /// * `repo` - Pool repository
    /// * `id` - Pool identifier
    ///
    /// # Returns
    /// * `Ok(DetailLookup)` - Found, unknown id, or record without details
    /// * `Err(anyhow::Error)` - Error if the store cannot be read
    pub fn get_detail(repo: &dyn PoolRepository, id: &str) -> anyhow::Result<DetailLookup> {
        debug!("Fetching details for pool {}", id);

        let lookup = match repo.find_by_id(id)? {
            None => DetailLookup::NotFound,
            Some(record) => match record.details {
                Some(details) => DetailLookup::Found(details),
                None => DetailLookup::MissingData,
            },
        };

        Ok(lookup)
    }
}
