// ✅ ID Validator - ordered checks, first failure wins
//
//   normalize → length → digit body → check char shape
//             → checksum value → region code → birthdate → Valid
//
// The cheap structural checks come first so garbage input fails fast.

use crate::birthdate::current_year;
use crate::error::InvalidReason;
use crate::identifier::IdNumber;
use crate::region::RegionDirectory;
use serde::Serialize;

// ============================================================================
// VERDICT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum Verdict {
    Valid,
    Invalid(InvalidReason),
}

impl Verdict {
    pub fn is_valid(&self) -> bool {
        matches!(self, Verdict::Valid)
    }

    pub fn reason(&self) -> Option<&InvalidReason> {
        match self {
            Verdict::Valid => None,
            Verdict::Invalid(reason) => Some(reason),
        }
    }

    /// Human-readable one-liner
    pub fn message(&self) -> String {
        match self {
            Verdict::Valid => "身份证号码有效".to_string(),
            Verdict::Invalid(reason) => reason.to_string(),
        }
    }
}

impl From<Result<IdNumber, InvalidReason>> for Verdict {
    fn from(result: Result<IdNumber, InvalidReason>) -> Self {
        match result {
            Ok(_) => Verdict::Valid,
            Err(reason) => Verdict::Invalid(reason),
        }
    }
}

// ============================================================================
// VALIDATION
// ============================================================================

/// Validate an ID number against the region table, using the local clock's year
pub fn validate(input: &str, regions: &RegionDirectory) -> Verdict {
    validate_as_of(input, regions, current_year())
}

/// Validate with an explicit current year (the upper bound for birth years)
pub fn validate_as_of(input: &str, regions: &RegionDirectory, current_year: i32) -> Verdict {
    check_id(input, regions, current_year).into()
}

/// Run every check and hand back the parsed number when all of them pass
pub fn check_id(input: &str, regions: &RegionDirectory, current_year: i32) -> Result<IdNumber, InvalidReason> {
    let result = run_checks(input, regions, current_year);

    match &result {
        Ok(id) => tracing::trace!(id = %id, "valid"),
        Err(reason) => tracing::debug!(input, category = reason.category(), "rejected: {}", reason),
    }

    result
}

fn run_checks(input: &str, regions: &RegionDirectory, current_year: i32) -> Result<IdNumber, InvalidReason> {
    // Normalize, length, digit body, check char shape
    let id = IdNumber::parse_shape(input)?;

    let expected = id.expected_check_char();
    if expected != id.check_char() {
        return Err(InvalidReason::ChecksumMismatch { expected });
    }

    // Strict: the exact code must be in the table, fallback tiers don't count
    if !regions.contains(id.region_code()) {
        return Err(InvalidReason::InvalidRegionCode {
            code: id.region_code().to_string(),
        });
    }

    id.birthdate_as_of(current_year)?;

    Ok(id)
}

// ============================================================================
// TESTS
// ============================================================================
