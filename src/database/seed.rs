use crate::database::models::{PoolDetail, PoolRecord, PoolStatus, PoolSummary};
use anyhow::{Context, Result};
use log::info;
use std::fs;
use std::path::Path;

/// Read pool records from a JSON array on disk
pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<PoolRecord>> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read seed file {}", path.display()))?;
    let records: Vec<PoolRecord> = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse seed file {}", path.display()))?;
    info!("Loaded {} pool records from {}", records.len(), path.display());
    Ok(records)
}

fn pool(
    id: &str,
    name: &str,
    hashrate_ths: f64,
    active_workers: u64,
    reject_rate: f64,
    status: PoolStatus,
    details: (&str, f64, f64, f64),
) -> PoolRecord {
    let (location, last24h_revenue_btc, uptime_percent, fee_percent) = details;
    PoolRecord::new(
        PoolSummary {
            id: id.to_string(),
            name: name.to_string(),
            hashrate_ths,
            active_workers,
            reject_rate,
            status,
        },
        Some(PoolDetail {
            location: location.to_string(),
            last24h_revenue_btc,
            uptime_percent,
            fee_percent,
        }),
    )
}

/// Built-in mock data served when no seed file is configured
pub fn default_records() -> Vec<PoolRecord> {
    vec![
        pool(
            "pool-1",
            "Alpha Hash",
            1250.4,
            3120,
            0.012,
            PoolStatus::Online,
            ("Reykjavik, Iceland", 0.842, 99.98, 1.0),
        ),
        pool(
            "pool-2",
            "Beta Miners",
            870.2,
            2048,
            0.021,
            PoolStatus::Degraded,
            ("Frankfurt, Germany", 0.513, 97.4, 1.5),
        ),
        pool(
            "pool-3",
            "Gamma Pool",
            430.75,
            964,
            0.035,
            PoolStatus::Offline,
            ("Toronto, Canada", 0.0, 82.1, 2.0),
        ),
        pool(
            "pool-4",
            "Delta Digital",
            2210.0,
            5400,
            0.008,
            PoolStatus::Online,
            ("Austin, USA", 1.462, 99.9, 0.9),
        ),
        pool(
            "pool-5",
            "Epsilon Hashworks",
            615.5,
            1310,
            0.015,
            PoolStatus::Online,
            ("Almaty, Kazakhstan", 0.371, 98.7, 1.2),
        ),
        pool(
            "pool-6",
            "Zeta Collective",
            98.3,
            210,
            0.047,
            PoolStatus::Degraded,
            ("Oslo, Norway", 0.052, 93.25, 2.5),
        ),
    ]
}
