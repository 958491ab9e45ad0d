use std::fmt;

use crate::client::api::PoolDetailResponse;
use crate::client::view::{DetailState, PoolTableView, TableState};
use crate::database::models::{PoolStatus, PoolSummary};

pub const DETAIL_FAILURE_MESSAGE: &str = "Failed to load detailed information for this pool.";
pub const NOT_AVAILABLE: &str = "N/A";

const TABLE_HEADERS: [&str; 5] = [
    "Name",
    "Hashrate (TH/s)",
    "Active Workers",
    "Reject Rate",
    "Status",
];

/// Display category of a status label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCategory {
    Success,
    Warning,
    Error,
    Default,
}

impl From<&PoolStatus> for StatusCategory {
    fn from(status: &PoolStatus) -> Self {
        match status {
            PoolStatus::Online => StatusCategory::Success,
            PoolStatus::Degraded => StatusCategory::Warning,
            PoolStatus::Offline => StatusCategory::Error,
            PoolStatus::Unknown(_) => StatusCategory::Default,
        }
    }
}

impl fmt::Display for StatusCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StatusCategory::Success => "success",
            StatusCategory::Warning => "warning",
            StatusCategory::Error => "error",
            StatusCategory::Default => "default",
        };
        f.write_str(name)
    }
}

/// `0.015` renders as `1.50%`
pub fn format_reject_rate(rate: f64) -> String {
    format!("{}%", to_fixed_2(rate * 100.0))
}

/// Two decimals, rounding an exact tie (`50.625`) away from zero.
///
/// `{:.2}` rounds ties to even, so a tie is moved one ulp up before formatting.
fn to_fixed_2(value: f64) -> String {
    let magnitude = value.abs();
    let expanded = format!("{:.64}", magnitude);
    let is_tie = expanded
        .split_once('.')
        .and_then(|(_, fraction)| fraction.get(2..))
        .map_or(false, |tail| {
            tail.starts_with('5') && tail[1..].bytes().all(|digit| digit == b'0')
        });
    let magnitude = if is_tie {
        f64::from_bits(magnitude.to_bits() + 1)
    } else {
        magnitude
    };
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{}{:.2}", sign, magnitude)
}

/// Raw status text with its display category; unrecognised values stay verbatim
pub fn status_label(status: &PoolStatus) -> String {
    format!("{} [{}]", status.as_str(), StatusCategory::from(status))
}

/// Labelled detail fields, absent values as `N/A`
pub fn detail_fields(detail: &PoolDetailResponse) -> Vec<(&'static str, String)> {
    fn or_na<T: ToString>(value: &Option<T>) -> String {
        value
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_else(|| NOT_AVAILABLE.to_string())
    }

    vec![
        ("Location", or_na(&detail.location)),
        ("Last 24h Revenue (BTC)", or_na(&detail.last24h_revenue_btc)),
        ("Uptime %", or_na(&detail.uptime_percent)),
        ("Fee %", or_na(&detail.fee_percent)),
    ]
}

fn table_cells(row: &PoolSummary) -> [String; 5] {
    [
        row.name.clone(),
        row.hashrate_ths.to_string(),
        row.active_workers.to_string(),
        format_reject_rate(row.reject_rate),
        status_label(&row.status),
    ]
}

/// Plain text table, one line per row, columns padded to the widest cell
pub fn render_table(rows: &[&PoolSummary]) -> String {
    let cells: Vec<[String; 5]> = rows.iter().map(|row| table_cells(row)).collect();

    let mut widths = TABLE_HEADERS.map(|header| header.chars().count());
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let format_line = |values: &[&str]| -> String {
        values
            .iter()
            .zip(widths.iter())
            .map(|(value, width)| format!("{:<width$}", value, width = width))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let rule = widths.map(|width| "-".repeat(width));
    let rule: Vec<&str> = rule.iter().map(String::as_str).collect();

    let mut lines = vec![format_line(&TABLE_HEADERS[..]), format_line(&rule[..])];
    for row in &cells {
        let values: Vec<&str> = row.iter().map(String::as_str).collect();
        lines.push(format_line(&values[..]));
    }
    lines.join("\n")
}

/// The detail surface, or `None` while it is closed
pub fn render_detail(view: &PoolTableView) -> Option<String> {
    let name = view
        .selected_pool()
        .map(|pool| pool.name.as_str())
        .or(view.selected_id())
        .unwrap_or_default();
    let title = format!("Pool Details: {}", name);

    let body = match view.detail() {
        DetailState::Idle => return None,
        DetailState::Loading => "Loading...".to_string(),
        DetailState::Failed => DETAIL_FAILURE_MESSAGE.to_string(),
        DetailState::Shown(detail) => detail_fields(detail)
            .into_iter()
            .map(|(label, value)| format!("{}: {}", label, value))
            .collect::<Vec<_>>()
            .join("\n"),
    };

    Some(format!("{}\n{}", title, body))
}

/// The table area: spinner text, error banner, or the filtered and sorted rows
pub fn render_view(view: &PoolTableView) -> String {
    match view.table() {
        TableState::Loading => "Loading...".to_string(),
        TableState::Error(message) => format!("Failed to load data: {}", message),
        TableState::Ready(rows) => render_table(&rows),
    }
}
