use actix_web::web;

use crate::handlers::pool::not_found_handler;
use crate::routes::pool::configure_pool_routes;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/api").configure(configure_pool_routes))
        .default_service(web::to(not_found_handler));
}
