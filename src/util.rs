use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset, SecondsFormat, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;
use sha2::{Digest, Sha256};

// The event-side display offset is pinned to UTC-4, like the original sheet.
const DISPLAY_OFFSET_SECONDS: i32 = 4 * 3600;

pub fn now_utc_string() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

pub fn utc_compact_string(ts: DateTime<Utc>) -> String {
    ts.format("%Y%m%dT%H%M%SZ").to_string()
}

pub fn display_timestamp(ts: DateTime<Utc>) -> String {
    match FixedOffset::west_opt(DISPLAY_OFFSET_SECONDS) {
        Some(offset) => ts
            .with_timezone(&offset)
            .format("%m/%d/%Y %I:%M:%S %p")
            .to_string(),
        None => ts.format("%m/%d/%Y %I:%M:%S %p").to_string(),
    }
}

pub fn now_display_string() -> String {
    display_timestamp(Utc::now())
}

pub fn ensure_directory(path: &Path) -> Result<()> {
    fs::create_dir_all(path)
        .with_context(|| format!("failed to create directory: {}", path.display()))
}

pub fn sha256_file(path: &Path) -> Result<String> {
    let mut file = File::open(path)
        .with_context(|| format!("failed to open file for hashing: {}", path.display()))?;

    let mut hasher = Sha256::new();
    let mut buf = [0_u8; 8192];

    loop {
        let count = file
            .read(&mut buf)
            .with_context(|| format!("failed to read file for hashing: {}", path.display()))?;
        if count == 0 {
            break;
        }
        hasher.update(&buf[..count]);
    }

    Ok(format!("{:x}", hasher.finalize()))
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_slice(&raw).with_context(|| format!("failed to parse {}", path.display()))
}

pub fn write_json_pretty<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_directory(parent)?;
    }

    let data = serde_json::to_vec_pretty(value)
        .with_context(|| format!("failed to serialize json: {}", path.display()))?;

    let mut file = File::create(path)
        .with_context(|| format!("failed to create json file: {}", path.display()))?;
    file.write_all(&data)
        .with_context(|| format!("failed to write json file: {}", path.display()))?;
    file.write_all(b"\n")
        .with_context(|| format!("failed to finalize json file: {}", path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn display_timestamp_applies_fixed_offset() {
        let ts = Utc.with_ymd_and_hms(2025, 4, 5, 14, 30, 15).unwrap();
        assert_eq!(display_timestamp(ts), "04/05/2025 10:30:15 AM");
    }

    #[test]
    fn compact_timestamp_is_sortable() {
        let ts = Utc.with_ymd_and_hms(2025, 4, 5, 14, 30, 15).unwrap();
        assert_eq!(utc_compact_string(ts), "20250405T143015Z");
    }
}
