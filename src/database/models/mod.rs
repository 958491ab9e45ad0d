pub mod pool;

pub use pool::{PoolDetail, PoolRecord, PoolStatus, PoolSummary};
