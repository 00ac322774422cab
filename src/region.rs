// 📍 Region Directory - 6-digit administrative codes → display names
// Read-only after loading. The strict `contains` check drives validation;
// `resolve` degrades through coarser tiers for display and never fails.

use anyhow::{Context as AnyhowContext, Result};
use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Suffix when only the city-level entry (XXXX00) is known
pub const COUNTY_UNKNOWN: &str = "（具体区县未知）";

/// Suffix when only the province-level entry (XX0000) is known
pub const CITY_UNKNOWN: &str = "（具体市县未知）";

/// Built-in table used when no region file is available
const DEFAULT_REGIONS: &[(&str, &str)] = &[
    ("110000", "北京市"),
    ("110100", "北京市市辖区"),
    ("110101", "北京市东城区"),
    ("120000", "天津市"),
    ("310000", "上海市"),
    ("440000", "广东省"),
];

// ============================================================================
// RESOLUTION
// ============================================================================

/// Which lookup tier produced a display name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionMatch {
    Exact,
    City,
    Province,
    Unknown,
}

/// Display name for a region code plus the tier it came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedRegion {
    pub code: String,
    pub name: String,
    pub matched: RegionMatch,
}

// ============================================================================
// REGION DIRECTORY
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct RegionDirectory {
    names: HashMap<String, String>,
}

impl RegionDirectory {
    /// Build from any iterator of (code, name) pairs.
    ///
    /// Codes that are not six ASCII digits are dropped.
    pub fn from_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut names = HashMap::new();
        let mut skipped = 0usize;

        for (code, name) in entries {
            let code = code.into();
            if is_region_code(&code) {
                names.insert(code, name.into());
            } else {
                skipped += 1;
            }
        }

        if skipped > 0 {
            tracing::warn!("Skipped {} region entries with malformed codes", skipped);
        }

        RegionDirectory { names }
    }

    /// The embedded fallback table
    pub fn builtin() -> Self {
        Self::from_entries(DEFAULT_REGIONS.iter().copied())
    }

    /// Parse a JSON object of `"code": "name"` pairs
    pub fn from_json_str(content: &str) -> Result<Self> {
        let raw: HashMap<String, String> = serde_json::from_str(content)
            .context("Failed to parse region table JSON (expected an object of \"code\": \"name\")")?;

        Ok(Self::from_entries(raw))
    }

    /// Load a JSON region table from disk
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read region table: {:?}", path.as_ref()))?;

        let directory = Self::from_json_str(&content)
            .with_context(|| format!("Invalid region table: {:?}", path.as_ref()))?;

        tracing::info!("Loaded {} region codes from {:?}", directory.len(), path.as_ref());
        Ok(directory)
    }

    /// Strict membership: the exact 6-digit code is a key
    pub fn contains(&self, code: &str) -> bool {
        self.names.contains_key(code)
    }

    /// Exact lookup, no fallback
    pub fn get(&self, code: &str) -> Option<&str> {
        self.names.get(code).map(String::as_str)
    }

    /// Tiered lookup: exact code, then XXXX00, then XX0000, then a synthetic label
    pub fn resolve(&self, code: &str) -> ResolvedRegion {
        let resolved = |name: String, matched: RegionMatch| ResolvedRegion {
            code: code.to_string(),
            name,
            matched,
        };

        if let Some(name) = self.get(code) {
            return resolved(name.to_string(), RegionMatch::Exact);
        }

        // Prefix tiers only make sense for ASCII input long enough to slice
        if code.len() >= 4 && code.is_ascii() {
            let city = format!("{}00", &code[..4]);
            if let Some(name) = self.get(&city) {
                return resolved(format!("{}{}", name, COUNTY_UNKNOWN), RegionMatch::City);
            }
        }

        if code.len() >= 2 && code.is_ascii() {
            let province = format!("{}0000", &code[..2]);
            if let Some(name) = self.get(&province) {
                return resolved(format!("{}{}", name, CITY_UNKNOWN), RegionMatch::Province);
            }
        }

        resolved(format!("未知地区（代码: {}）", code), RegionMatch::Unknown)
    }

    /// Display name from `resolve`
    pub fn display_name(&self, code: &str) -> String {
        self.resolve(code).name
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Six ASCII digits
pub fn is_region_code(code: &str) -> bool {
    code.len() == 6 && code.bytes().all(|b| b.is_ascii_digit())
}

// ============================================================================
// LOADER
// ============================================================================

/// Where the region table came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegionSource {
    /// Path given explicitly (flag or env var): failures are fatal
    Explicit(std::path::PathBuf),
    /// Conventional default path: a missing or broken file falls back to the builtin table
    Default(std::path::PathBuf),
}

/// Load the region table once at startup.
///
/// Never returns an empty directory: if the loaded file has no usable
/// entries the builtin table is used instead.
pub fn load_region_table(source: &RegionSource) -> Result<RegionDirectory> {
    let directory = match source {
        RegionSource::Explicit(path) => RegionDirectory::from_file(path)?,
        RegionSource::Default(path) => {
            if !path.exists() {
                tracing::warn!("No region table at {:?}, using builtin table", path);
                return Ok(RegionDirectory::builtin());
            }
            match RegionDirectory::from_file(path) {
                Ok(directory) => directory,
                Err(e) => {
                    tracing::warn!("{:#}, using builtin table", e);
                    return Ok(RegionDirectory::builtin());
                }
            }
        }
    };

    if directory.is_empty() {
        tracing::warn!("Region table has no usable entries, using builtin table");
        return Ok(RegionDirectory::builtin());
    }

    Ok(directory)
}

// ============================================================================
// TESTS
// ============================================================================
