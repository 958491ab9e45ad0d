use crate::database::models::{PoolRecord, PoolStatus};
use anyhow::{anyhow, Result};
use log::{debug, info};
use std::collections::HashMap;

/// Read-only access to pool records
pub trait PoolRepository: Send + Sync {
    /// All records in storage order
    fn find_all(&self) -> Result<Vec<PoolRecord>>;

    /// A single record by identifier
    fn find_by_id(&self, id: &str) -> Result<Option<PoolRecord>>;
}

/// Pool repository backed by a fixed, in-memory record set
#[derive(Debug, Clone)]
pub struct InMemoryPoolRepository {
    records: Vec<PoolRecord>,
    by_id: HashMap<String, usize>,
}

impl InMemoryPoolRepository {
    /// Create a new InMemoryPoolRepository, validating every record
    pub fn new(records: Vec<PoolRecord>) -> Result<Self> {
        let mut by_id = HashMap::with_capacity(records.len());

        for (index, record) in records.iter().enumerate() {
            validate_record(record)?;
            if by_id.insert(record.id().to_string(), index).is_some() {
                return Err(anyhow!("Duplicate pool id \"{}\"", record.id()));
            }
        }

        let incomplete = records.iter().filter(|r| r.details.is_none()).count();
        if incomplete > 0 {
            info!("{} pool record(s) have no details", incomplete);
        }
        debug!("Indexed {} pool records", records.len());

        Ok(Self { records, by_id })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl PoolRepository for InMemoryPoolRepository {
    fn find_all(&self) -> Result<Vec<PoolRecord>> {
        Ok(self.records.clone())
    }

    fn find_by_id(&self, id: &str) -> Result<Option<PoolRecord>> {
        Ok(self
            .by_id
            .get(id)
            .and_then(|&index| self.records.get(index))
            .cloned())
    }
}

fn is_non_negative(value: f64) -> bool {
    value >= 0.0
}

fn validate_record(record: &PoolRecord) -> Result<()> {
    let summary = &record.summary;
    if summary.id.is_empty() {
        return Err(anyhow!("Pool \"{}\" has an empty id", summary.name));
    }
    if !is_non_negative(summary.hashrate_ths) {
        return Err(anyhow!("Pool \"{}\" has a negative hashrate", summary.id));
    }
    if let PoolStatus::Unknown(raw) = &summary.status {
        return Err(anyhow!(
            "Pool \"{}\" has unrecognised status \"{}\"",
            summary.id,
            raw
        ));
    }
    if !(0.0..=1.0).contains(&summary.reject_rate) {
        return Err(anyhow!(
            "Pool \"{}\" has reject rate {} outside [0, 1]",
            summary.id,
            summary.reject_rate
        ));
    }

    if let Some(details) = &record.details {
        if !is_non_negative(details.last24h_revenue_btc) {
            return Err(anyhow!("Pool \"{}\" has negative revenue", summary.id));
        }
        if !(0.0..=100.0).contains(&details.uptime_percent) {
            return Err(anyhow!(
                "Pool \"{}\" has uptime {} outside [0, 100]",
                summary.id,
                details.uptime_percent
            ));
        }
        if !is_non_negative(details.fee_percent) {
            return Err(anyhow!("Pool \"{}\" has a negative fee", summary.id));
        }
    }

    Ok(())
}
