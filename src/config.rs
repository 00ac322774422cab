//! Where the region table lives.
//!
//! One explicit path (CLI flag or `IDCARD_REGIONS`) wins; otherwise the
//! conventional `region_codes.json` in the platform config directory is
//! tried, and the builtin table covers the rest.

use crate::region::RegionSource;
use std::path::PathBuf;

/// Environment variable naming the region table
pub const REGIONS_ENV: &str = "IDCARD_REGIONS";

/// File name looked up in the config directory
pub const REGION_TABLE_FILE: &str = "region_codes.json";

/// Default region table path
pub fn default_region_table_path() -> PathBuf {
    directories::ProjectDirs::from("org", "idcard", "idcard-inspector")
        .map(|d| d.config_dir().join(REGION_TABLE_FILE))
        .unwrap_or_else(|| PathBuf::from(REGION_TABLE_FILE))
}

/// Pick the region table source from an optional explicit path
pub fn region_source(explicit: Option<PathBuf>) -> RegionSource {
    match explicit {
        Some(path) => RegionSource::Explicit(path),
        None => RegionSource::Default(default_region_table_path()),
    }
}
