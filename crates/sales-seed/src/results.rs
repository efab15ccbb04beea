use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::data::datasets::SaleRow;
use crate::error::SeedResult;

pub const REPORT_SCHEMA_VERSION: u32 = 1;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SeedContext {
    pub created_at: DateTime<Utc>,
    pub host: String,
    pub table: String,
    pub seed: u64,
    pub rows: usize,
    pub anchor: DateTime<Utc>,
    pub window_days: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_path: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SeedReport {
    pub schema_version: u32,
    pub context: SeedContext,
    pub inserted_rows: u64,
    /// SHA-256 over the JSON lines encoding of the batch.
    pub fingerprint: String,
}

pub fn batch_fingerprint(rows: &[SaleRow]) -> SeedResult<String> {
    let mut hasher = Sha256::new();
    for row in rows {
        hasher.update(serde_json::to_vec(row)?);
        hasher.update(b"\n");
    }
    Ok(format!("{:x}", hasher.finalize()))
}

pub fn write_report(path: &Path, report: &SeedReport) -> SeedResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serde_json::to_vec_pretty(report)?)?;
    Ok(())
}
