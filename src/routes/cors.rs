use actix_cors::Cors;
use actix_web::http::Method;

use crate::config::CorsConfig;

/// Build the CORS middleware from config. `"*"` in the origin list allows any origin.
pub fn build_cors(config: &CorsConfig) -> Cors {
    let cors = if config.allows_any_origin() {
        Cors::default().allow_any_origin()
    } else {
        config
            .allowed_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
    };

    let methods: Vec<Method> = config
        .allowed_methods
        .iter()
        .filter_map(|m| m.parse().ok())
        .collect();

    cors.allowed_methods(methods)
        .allow_any_header()
        .max_age(config.max_age)
}
