pub mod pool;
pub mod service;

pub use pool::{get_mining_pool_details_handler, get_mining_pools_handler, not_found_handler};
