pub mod api;
pub mod render;
pub mod view;

pub use api::{ClientError, MiningPoolsApi, PoolDetailResponse, PoolDirectory, DEFAULT_API_BASE_URL};
pub use view::{filter_and_sort, DetailState, PoolTableView, SortColumn, SortDirection, SortState};
