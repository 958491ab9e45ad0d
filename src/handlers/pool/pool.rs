use actix_web::{web, HttpResponse};
use log::{error, info, warn};

use crate::{
    database::PoolRepository,
    errors::ApiError,
    handlers::pool::service::{DetailLookup, PoolService},
};

/// GET /mining-pools - Returns all pools without their details
///
/// # Returns
/// JSON array of PoolSummary objects in storage order
pub async fn get_mining_pools_handler(
    repo: web::Data<dyn PoolRepository>,
) -> Result<HttpResponse, ApiError> {
    info!("Handling GET /mining-pools request");

    match PoolService::list_summaries(repo.get_ref()) {
        Ok(pools) => {
            info!("Successfully retrieved {} mining pools", pools.len());
            Ok(HttpResponse::Ok().json(pools))
        }
        Err(e) => {
            error!("Failed to retrieve mining pools: {}", e);
            Err(ApiError::PoolsUnavailable)
        }
    }
}

/// GET /mining-pools/{id} - Returns the details of one pool
///
/// # Arguments
/// * `repo` - Pool repository
/// * `path` - Path parameters containing the pool id
///
/// # Returns
/// JSON object of PoolDetail
pub async fn get_mining_pool_details_handler(
    repo: web::Data<dyn PoolRepository>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    info!("Handling GET /mining-pools/{} request", id);

    match PoolService::get_detail(repo.get_ref(), &id) {
        Ok(DetailLookup::Found(details)) => {
            info!("Successfully retrieved details for pool {}", id);
            Ok(HttpResponse::Ok().json(details))
        }
        Ok(DetailLookup::NotFound) => {
            info!("Mining pool {} not found", id);
            Err(ApiError::pool_not_found(&id))
        }
        Ok(DetailLookup::MissingData) => {
            warn!("Mining pool {} has no details", id);
            Err(ApiError::details_missing(&id))
        }
        Err(e) => {
            error!("Failed to retrieve details for pool {}: {}", id, e);
            Err(ApiError::InternalError(
                "Failed to fetch pool details.".to_string(),
            ))
        }
    }
}

/// Fallback for any unmatched route or method
pub async fn not_found_handler() -> Result<HttpResponse, ApiError> {
    Err(ApiError::resource_not_found())
}
