pub mod cors;
pub mod pool;
pub mod routes;

pub use cors::build_cors;
pub use routes::*;
