use log::{debug, error};
use std::cmp::Ordering;
use std::str::FromStr;

use crate::client::api::{ClientError, PoolDetailResponse, PoolDirectory};
use crate::database::models::PoolSummary;

/// Table columns that can be sorted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortColumn {
    Name,
    Hashrate,
    ActiveWorkers,
    RejectRate,
}

impl SortColumn {
    /// Compare two rows on this column. Numeric columns compare numerically.
    pub fn compare(self, a: &PoolSummary, b: &PoolSummary) -> Ordering {
        match self {
            SortColumn::Name => a.name.cmp(&b.name),
            SortColumn::Hashrate => compare_f64(a.hashrate_ths, b.hashrate_ths),
            SortColumn::ActiveWorkers => a.active_workers.cmp(&b.active_workers),
            SortColumn::RejectRate => compare_f64(a.reject_rate, b.reject_rate),
        }
    }
}

impl FromStr for SortColumn {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "name" => Ok(SortColumn::Name),
            "hashrate" | "hashrateths" => Ok(SortColumn::Hashrate),
            "workers" | "active-workers" | "activeworkers" => Ok(SortColumn::ActiveWorkers),
            "reject-rate" | "rejectrate" => Ok(SortColumn::RejectRate),
            other => Err(format!(
                "unknown sort column \"{}\" (expected name, hashrate, workers or reject-rate)",
                other
            )),
        }
    }
}

// Incomparable values (NaN) count as equal so the stable sort keeps their order.
fn compare_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

/// Active sort column, if any, and its direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortState {
    pub column: Option<SortColumn>,
    pub direction: SortDirection,
}

impl SortState {
    /// Header click: the active ascending column flips to descending, anything
    /// else becomes the active column in ascending order.
    pub fn select(&mut self, column: SortColumn) {
        let is_ascending =
            self.column == Some(column) && self.direction == SortDirection::Ascending;
        self.column = Some(column);
        self.direction = if is_ascending {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        };
    }
}

/// Rows whose name contains `filter` (case-insensitive), ordered by `sort`.
///
/// Recomputed from the full row set on every call; ties keep fetch order.
pub fn filter_and_sort<'a>(
    rows: &'a [PoolSummary],
    filter: &str,
    sort: &SortState,
) -> Vec<&'a PoolSummary> {
    let needle = filter.to_lowercase();
    let mut visible: Vec<&PoolSummary> = rows
        .iter()
        .filter(|row| row.name.to_lowercase().contains(&needle))
        .collect();

    if let Some(column) = sort.column {
        visible.sort_by(|a, b| {
            let ordering = column.compare(a, b);
            match sort.direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });
    }

    visible
}

/// Message shown when the summary list cannot be loaded
pub fn load_error_message(err: &ClientError) -> String {
    if let Some(message) = err.server_message() {
        return message.to_string();
    }
    let message = err.to_string();
    if message.is_empty() {
        "Unknown error".to_string()
    } else {
        message
    }
}

/// What the table area currently shows
#[derive(Debug, PartialEq)]
pub enum TableState<'a> {
    Loading,
    Error(&'a str),
    Ready(Vec<&'a PoolSummary>),
}

/// What the detail surface currently shows
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DetailState {
    #[default]
    Idle,
    Loading,
    Shown(PoolDetailResponse),
    Failed,
}

/// Tag of one detail request. Only the latest ticket's completion is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailTicket {
    seq: u64,
    pool_id: String,
}

/// View model of the mining pool table and its detail surface
#[derive(Debug)]
pub struct PoolTableView {
    pools: Vec<PoolSummary>,
    loading: bool,
    error: Option<String>,
    filter: String,
    sort: SortState,
    selected_id: Option<String>,
    detail: DetailState,
    last_ticket: u64,
}

impl Default for PoolTableView {
    fn default() -> Self {
        Self::new()
    }
}

impl PoolTableView {
    pub fn new() -> Self {
        Self {
            pools: Vec::new(),
            loading: true,
            error: None,
            filter: String::new(),
            sort: SortState::default(),
            selected_id: None,
            detail: DetailState::Idle,
            last_ticket: 0,
        }
    }

    /// Fetch the summary list once
    pub async fn load(&mut self, directory: &dyn PoolDirectory) {
        self.apply_load(directory.list_summaries().await);
    }

    fn apply_load(&mut self, result: Result<Vec<PoolSummary>, ClientError>) {
        match result {
            Ok(pools) => {
                debug!("Loaded {} mining pools", pools.len());
                self.pools = pools;
                self.error = None;
            }
            Err(e) => {
                error!("Failed to load mining pools: {}", e);
                self.error = Some(load_error_message(&e));
            }
        }
        self.loading = false;
    }

    pub fn set_filter(&mut self, filter: impl Into<String>) {
        self.filter = filter.into();
    }

    pub fn select_sort(&mut self, column: SortColumn) {
        self.sort.select(column);
    }

    pub fn table(&self) -> TableState<'_> {
        if self.loading {
            return TableState::Loading;
        }
        if let Some(error) = &self.error {
            return TableState::Error(error);
        }
        TableState::Ready(filter_and_sort(&self.pools, &self.filter, &self.sort))
    }

    /// Select a row and start a detail request for it
    pub fn request_detail(&mut self, pool_id: &str) -> DetailTicket {
        self.last_ticket += 1;
        self.selected_id = Some(pool_id.to_string());
        self.detail = DetailState::Loading;
        DetailTicket {
            seq: self.last_ticket,
            pool_id: pool_id.to_string(),
        }
    }

    /// Apply a finished detail request. Returns false when a newer request
    /// has superseded it and the result was discarded.
    pub fn complete_detail(
        &mut self,
        ticket: DetailTicket,
        result: Result<PoolDetailResponse, ClientError>,
    ) -> bool {
        if let Err(e) = &result {
            error!("Failed to fetch pool details for {}: {}", ticket.pool_id, e);
        }

        if ticket.seq != self.last_ticket {
            debug!(
                "Discarding stale detail response for {} (request {}, latest {})",
                ticket.pool_id, ticket.seq, self.last_ticket
            );
            return false;
        }

        self.detail = match result {
            Ok(detail) => DetailState::Shown(detail),
            Err(_) => DetailState::Failed,
        };
        true
    }

    /// Request one pool's detail and wait for it
    pub async fn open_details(&mut self, directory: &dyn PoolDirectory, pool_id: &str) {
        let ticket = self.request_detail(pool_id);
        let result = directory.get_detail(pool_id).await;
        self.complete_detail(ticket, result);
    }

    /// Hide the detail surface. The row stays selected.
    pub fn close_details(&mut self) {
        self.detail = DetailState::Idle;
    }

    pub fn detail(&self) -> &DetailState {
        &self.detail
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected_id.as_deref()
    }

    pub fn selected_pool(&self) -> Option<&PoolSummary> {
        let id = self.selected_id.as_deref()?;
        self.pools.iter().find(|pool| pool.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::PoolStatus;
    use async_trait::async_trait;
    use std::collections::HashMap;

    fn row(id: &str, name: &str, hashrate: f64, workers: u64, reject: f64) -> PoolSummary {
        PoolSummary {
            id: id.to_string(),
            name: name.to_string(),
            hashrate_ths: hashrate,
            active_workers: workers,
            reject_rate: reject,
            status: PoolStatus::Online,
        }
    }

    fn rows() -> Vec<PoolSummary> {
        vec![
            row("pool-1", "Test Pool A", 500.0, 800, 0.01),
            row("pool-2", "Test Pool B", 300.0, 600, 0.02),
            row("pool-3", "alpha hash", 900.0, 600, 0.005),
            row("pool-4", "Bravo", 300.0, 1200, 0.02),
        ]
    }

    fn ids(visible: &[&PoolSummary]) -> Vec<String> {
        visible.iter().map(|r| r.id.clone()).collect()
    }

    struct FakeDirectory {
        pools: Result<Vec<PoolSummary>, u16>,
        details: HashMap<String, PoolDetailResponse>,
    }

    #[async_trait]
    impl PoolDirectory for FakeDirectory {
        async fn list_summaries(&self) -> Result<Vec<PoolSummary>, ClientError> {
            self.pools.clone().map_err(|status| ClientError::Api {
                status,
                error: Some("Failed to fetch mining pools.".to_string()),
                message: None,
            })
        }

        async fn get_detail(&self, id: &str) -> Result<PoolDetailResponse, ClientError> {
            self.details.get(id).cloned().ok_or_else(|| ClientError::Api {
                status: 404,
                error: Some("Not Found".to_string()),
                message: Some(format!("Mining pool with id \"{}\" does not exist.", id)),
            })
        }
    }

    fn scenario_directory() -> FakeDirectory {
        let mut details = HashMap::new();
        details.insert(
            "pool-1".to_string(),
            PoolDetailResponse {
                location: Some("Test Location".to_string()),
                last24h_revenue_btc: Some(0.03),
                uptime_percent: Some(99.5),
                fee_percent: Some(1.2),
            },
        );
        FakeDirectory {
            pools: Ok(rows()[..2].to_vec()),
            details,
        }
    }

    #[test]
    fn test_filter_is_case_insensitive_substring() {
        let rows = rows();
        for filter in ["", "b", "B", "pool", "ALPHA", "zzz", " a"] {
            let visible = filter_and_sort(&rows, filter, &SortState::default());
            let needle = filter.to_lowercase();
            assert!(visible
                .iter()
                .all(|r| r.name.to_lowercase().contains(&needle)));
            if filter.is_empty() {
                assert_eq!(visible.len(), rows.len());
            }
        }
        let visible = filter_and_sort(&rows, "B", &SortState::default());
        assert_eq!(ids(&visible), vec!["pool-2", "pool-4"]);
    }

    #[test]
    fn test_no_sort_keeps_fetch_order() {
        let rows = rows();
        let visible = filter_and_sort(&rows, "", &SortState::default());
        assert_eq!(ids(&visible), vec!["pool-1", "pool-2", "pool-3", "pool-4"]);
    }

    #[test]
    fn test_sorted_columns_are_ordered() {
        let rows = rows();
        let columns = [
            SortColumn::Name,
            SortColumn::Hashrate,
            SortColumn::ActiveWorkers,
            SortColumn::RejectRate,
        ];
        for column in columns {
            for direction in [SortDirection::Ascending, SortDirection::Descending] {
                let sort = SortState {
                    column: Some(column),
                    direction,
                };
                let visible = filter_and_sort(&rows, "", &sort);
                for pair in visible.windows(2) {
                    let ordering = column.compare(pair[0], pair[1]);
                    match direction {
                        SortDirection::Ascending => assert_ne!(ordering, Ordering::Greater),
                        SortDirection::Descending => assert_ne!(ordering, Ordering::Less),
                    }
                }
            }
        }
    }

    #[test]
    fn test_sort_is_numeric_and_stable() {
        let rows = vec![
            row("a", "A", 1000.0, 9, 0.1),
            row("b", "B", 99.0, 10, 0.1),
            row("c", "C", 1000.0, 100, 0.1),
        ];
        let sort = SortState {
            column: Some(SortColumn::Hashrate),
            direction: SortDirection::Ascending,
        };
        assert_eq!(ids(&filter_and_sort(&rows, "", &sort)), vec!["b", "a", "c"]);

        let sort = SortState {
            column: Some(SortColumn::ActiveWorkers),
            direction: SortDirection::Descending,
        };
        assert_eq!(ids(&filter_and_sort(&rows, "", &sort)), vec!["c", "b", "a"]);

        let sort = SortState {
            column: Some(SortColumn::RejectRate),
            direction: SortDirection::Descending,
        };
        assert_eq!(ids(&filter_and_sort(&rows, "", &sort)), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_filter_then_sort_is_idempotent() {
        let rows = rows();
        let sort = SortState {
            column: Some(SortColumn::Hashrate),
            direction: SortDirection::Descending,
        };
        let first = ids(&filter_and_sort(&rows, "pool", &sort));
        let second = ids(&filter_and_sort(&rows, "pool", &sort));
        assert_eq!(first, vec!["pool-1", "pool-2"]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_sort_toggle() {
        let mut sort = SortState::default();
        assert_eq!(sort.column, None);

        sort.select(SortColumn::Hashrate);
        assert_eq!(sort.column, Some(SortColumn::Hashrate));
        assert_eq!(sort.direction, SortDirection::Ascending);

        sort.select(SortColumn::Hashrate);
        assert_eq!(sort.direction, SortDirection::Descending);

        sort.select(SortColumn::Hashrate);
        assert_eq!(sort.direction, SortDirection::Ascending);

        sort.select(SortColumn::Hashrate);
        sort.select(SortColumn::Name);
        assert_eq!(sort.column, Some(SortColumn::Name));
        assert_eq!(sort.direction, SortDirection::Ascending);
    }

    #[test]
    fn test_sort_column_from_str() {
        assert_eq!("hashrate".parse::<SortColumn>(), Ok(SortColumn::Hashrate));
        assert_eq!("Workers".parse::<SortColumn>(), Ok(SortColumn::ActiveWorkers));
        assert_eq!("reject-rate".parse::<SortColumn>(), Ok(SortColumn::RejectRate));
        assert!("status".parse::<SortColumn>().is_err());
    }

    #[test]
    fn test_load_error_message_preference() {
        let with_message = ClientError::Api {
            status: 404,
            error: Some("Not Found".to_string()),
            message: Some("gone".to_string()),
        };
        assert_eq!(load_error_message(&with_message), "gone");

        let without_message = ClientError::Api {
            status: 500,
            error: Some("Failed to fetch mining pools.".to_string()),
            message: None,
        };
        assert_eq!(
            load_error_message(&without_message),
            "Request failed with status code 500"
        );
    }

    #[tokio::test]
    async fn test_scenario_filter_and_detail() {
        let directory = scenario_directory();
        let mut view = PoolTableView::new();
        assert_eq!(view.table(), TableState::Loading);

        view.load(&directory).await;
        view.set_filter("B");
        match view.table() {
            TableState::Ready(visible) => assert_eq!(ids(&visible), vec!["pool-2"]),
            other => panic!("unexpected table state: {:?}", other),
        }

        view.open_details(&directory, "pool-1").await;
        assert_eq!(view.selected_id(), Some("pool-1"));
        assert_eq!(view.selected_pool().unwrap().name, "Test Pool A");
        match view.detail() {
            DetailState::Shown(detail) => {
                assert_eq!(detail.location.as_deref(), Some("Test Location"));
                assert_eq!(detail.last24h_revenue_btc, Some(0.03));
                assert_eq!(detail.uptime_percent, Some(99.5));
                assert_eq!(detail.fee_percent, Some(1.2));
            }
            other => panic!("unexpected detail state: {:?}", other),
        }

        view.close_details();
        assert_eq!(view.detail(), &DetailState::Idle);
        assert_eq!(view.selected_id(), Some("pool-1"));
    }

    #[tokio::test]
    async fn test_failed_detail_keeps_selection() {
        let directory = scenario_directory();
        let mut view = PoolTableView::new();
        view.load(&directory).await;

        view.open_details(&directory, "pool-2").await;
        assert_eq!(view.detail(), &DetailState::Failed);
        assert_eq!(view.selected_id(), Some("pool-2"));
    }

    #[tokio::test]
    async fn test_load_failure_shows_error_state() {
        let directory = FakeDirectory {
            pools: Err(500),
            details: HashMap::new(),
        };
        let mut view = PoolTableView::new();
        view.load(&directory).await;
        assert_eq!(
            view.table(),
            TableState::Error("Request failed with status code 500")
        );
    }

    #[tokio::test]
    async fn test_successful_reload_clears_previous_error() {
        let mut view = PoolTableView::new();
        view.load(&FakeDirectory {
            pools: Err(500),
            details: HashMap::new(),
        })
        .await;
        assert!(matches!(view.table(), TableState::Error(_)));

        view.load(&scenario_directory()).await;
        assert!(matches!(view.table(), TableState::Ready(_)));
    }

    #[test]
    fn test_stale_detail_response_is_discarded() {
        let mut view = PoolTableView::new();
        let first = view.request_detail("pool-1");
        let second = view.request_detail("pool-2");
        assert_eq!(second.pool_id, "pool-2");

        let late = PoolDetailResponse {
            location: Some("Late".to_string()),
            ..Default::default()
        };
        let current = PoolDetailResponse {
            location: Some("Current".to_string()),
            ..Default::default()
        };

        assert!(view.complete_detail(second, Ok(current.clone())));
        assert!(!view.complete_detail(first, Ok(late)));
        assert_eq!(view.detail(), &DetailState::Shown(current));
        assert_eq!(view.selected_id(), Some("pool-2"));
    }

    #[test]
    fn test_stale_failure_does_not_override_loading() {
        let mut view = PoolTableView::new();
        let first = view.request_detail("pool-1");
        let _second = view.request_detail("pool-2");

        let failure = ClientError::Api {
            status: 500,
            error: None,
            message: None,
        };
        assert!(!view.complete_detail(first, Err(failure)));
        assert_eq!(view.detail(), &DetailState::Loading);
    }
}
