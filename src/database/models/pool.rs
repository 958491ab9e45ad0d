use serde::{Deserialize, Serialize};

/// Operational state reported for a pool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PoolStatus {
    Online,
    Degraded,
    Offline,
    /// Any status string outside the three known values, kept verbatim
    Unknown(String),
}

impl PoolStatus {
    pub fn as_str(&self) -> &str {
        match self {
            PoolStatus::Online => "online",
            PoolStatus::Degraded => "degraded",
            PoolStatus::Offline => "offline",
            PoolStatus::Unknown(raw) => raw,
        }
    }
}

impl From<String> for PoolStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "online" => PoolStatus::Online,
            "degraded" => PoolStatus::Degraded,
            "offline" => PoolStatus::Offline,
            _ => PoolStatus::Unknown(raw),
        }
    }
}

impl From<PoolStatus> for String {
    fn from(status: PoolStatus) -> Self {
        match status {
            PoolStatus::Unknown(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

/// List projection of a pool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolSummary {
    pub id: String,
    pub name: String,
    #[serde(rename = "hashrateTHs")]
    pub hashrate_ths: f64,
    pub active_workers: u64,
    pub reject_rate: f64,
    pub status: PoolStatus,
}

/// Extended projection of a pool, fetched by identifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolDetail {
    pub location: String,
    #[serde(rename = "last24hRevenueBTC")]
    pub last24h_revenue_btc: f64,
    pub uptime_percent: f64,
    pub fee_percent: f64,
}

/// Storage shape: a summary with its optional detail sub-record, flat on the wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolRecord {
    #[serde(flatten)]
    pub summary: PoolSummary,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<PoolDetail>,
}

impl PoolRecord {
    pub fn new(summary: PoolSummary, details: Option<PoolDetail>) -> Self {
        Self { summary, details }
    }

    pub fn id(&self) -> &str {
        &self.summary.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_summary_uses_wire_names() {
        let summary = PoolSummary {
            id: "pool-1".to_string(),
            name: "Test Pool A".to_string(),
            hashrate_ths: 500.0,
            active_workers: 800,
            reject_rate: 0.01,
            status: PoolStatus::Online,
        };
        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "pool-1",
                "name": "Test Pool A",
                "hashrateTHs": 500.0,
                "activeWorkers": 800,
                "rejectRate": 0.01,
                "status": "online"
            })
        );
    }

    #[test]
    fn test_record_reads_flat_mock_data() {
        let record: PoolRecord = serde_json::from_value(json!({
            "id": "pool-1",
            "name": "Test Pool A",
            "hashrateTHs": 500,
            "activeWorkers": 800,
            "rejectRate": 0.01,
            "status": "degraded",
            "details": {
                "location": "Test Location",
                "last24hRevenueBTC": 0.03,
                "uptimePercent": 99.5,
                "feePercent": 1.2
            }
        }))
        .unwrap();
        assert_eq!(record.id(), "pool-1");
        assert_eq!(record.summary.status, PoolStatus::Degraded);
        assert_eq!(record.details.unwrap().location, "Test Location");
    }

    #[test]
    fn test_record_without_details() {
        let record: PoolRecord = serde_json::from_value(json!({
            "id": "pool-3",
            "name": "Bare",
            "hashrateTHs": 1,
            "activeWorkers": 1,
            "rejectRate": 0.0,
            "status": "offline"
        }))
        .unwrap();
        assert!(record.details.is_none());
        let value = serde_json::to_value(&record).unwrap();
        assert!(value.get("details").is_none());
    }

    #[test]
    fn test_unrecognised_status_keeps_raw_value() {
        let status: PoolStatus = serde_json::from_value(json!("maintenance")).unwrap();
        assert_eq!(status, PoolStatus::Unknown("maintenance".to_string()));
        assert_eq!(status.as_str(), "maintenance");
        assert_eq!(serde_json::to_value(&status).unwrap(), json!("maintenance"));
        assert_eq!(
            serde_json::to_value(PoolStatus::Degraded).unwrap(),
            json!("degraded")
        );
    }
}
