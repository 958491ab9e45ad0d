use actix_web::web;

use crate::handlers::pool::{
    get_mining_pool_details_handler, get_mining_pools_handler, not_found_handler,
};

pub fn configure_pool_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/mining-pools")
            .route(web::get().to(get_mining_pools_handler))
            .default_service(web::to(not_found_handler)),
    )
    .service(
        web::resource("/mining-pools/{id}")
            .route(web::get().to(get_mining_pool_details_handler))
            .default_service(web::to(not_found_handler)),
    );
}
