pub mod pool;

pub use pool::{InMemoryPoolRepository, PoolRepository};
