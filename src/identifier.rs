// 🪪 ID Number - the parsed 18-character identifier and everything derived from it
//
// Layout (0-indexed):
//   0..6   region code
//   6..14  birthdate YYYYMMDD
//   14..17 sequence number (position 16 carries gender)
//   17     check character (digit or X)

use crate::attributes::{approximate_age, Constellation, Gender, Zodiac};
use crate::birthdate::{current_year, validate_birthdate_as_of, Birthdate};
use crate::checksum::{compute_check_char, is_valid_body};
use crate::error::{BirthdateError, CompletionError, InvalidReason};
use crate::region::{RegionDirectory, ResolvedRegion};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Characters in a full ID number
pub const ID_LEN: usize = 18;

// ============================================================================
// ID NUMBER
// ============================================================================

/// A normalized ID number with a well-formed shape.
///
/// Holding one guarantees 17 ASCII digits followed by a digit or `X`. It
/// does NOT guarantee the checksum, region or birthdate are valid; that is
/// the validator's job.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct IdNumber {
    raw: String,
}

impl IdNumber {
    /// Normalize (trim, uppercase) and check length and character classes.
    ///
    /// Runs the structural checks in order: length, digit body, check
    /// character shape.
    pub fn parse_shape(input: &str) -> Result<Self, InvalidReason> {
        let normalized = input.trim().to_uppercase();

        let len = normalized.chars().count();
        if len != ID_LEN {
            return Err(InvalidReason::BadLength { len });
        }

        // Exactly 18 chars; the body check below rejects any multi-byte char
        let body: String = normalized.chars().take(17).collect();
        if !is_valid_body(&body) {
            return Err(InvalidReason::NonDigitPrefix);
        }

        match normalized.chars().last() {
            Some(c) if c.is_ascii_digit() || c == 'X' => {}
            _ => return Err(InvalidReason::BadChecksumChar),
        }

        Ok(IdNumber { raw: normalized })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// First 17 digits
    pub fn body(&self) -> &str {
        &self.raw[..17]
    }

    pub fn region_code(&self) -> &str {
        &self.raw[0..6]
    }

    /// Raw YYYYMMDD field
    pub fn birthdate_field(&self) -> &str {
        &self.raw[6..14]
    }

    pub fn sequence(&self) -> &str {
        &self.raw[14..17]
    }

    pub fn check_char(&self) -> char {
        char::from(self.raw.as_bytes()[17])
    }

    /// Check character the body calls for
    pub fn expected_check_char(&self) -> char {
        // body() is 17 ASCII digits by construction
        compute_check_char(self.body()).unwrap_or('?')
    }

    pub fn gender(&self) -> Gender {
        Gender::from_digit(char::from(self.raw.as_bytes()[16]))
    }

    pub fn birthdate_as_of(&self, current_year: i32) -> Result<Birthdate, BirthdateError> {
        validate_birthdate_as_of(self.birthdate_field(), current_year)
    }

    /// Decode everything displayable, using the local clock for the year
    pub fn info(&self, regions: &RegionDirectory) -> IdInfo {
        self.info_as_of(regions, current_year())
    }

    pub fn info_as_of(&self, regions: &RegionDirectory, current_year: i32) -> IdInfo {
        let (birthdate, birthdate_error) = match self.birthdate_as_of(current_year) {
            Ok(date) => (Some(date), None),
            Err(e) => (None, Some(e)),
        };

        IdInfo {
            number: self.raw.clone(),
            region: regions.resolve(self.region_code()),
            birthdate,
            birthdate_error,
            gender: self.gender(),
            zodiac: birthdate.map(|d| Zodiac::from_year(d.year)),
            constellation: birthdate.map(|d| Constellation::from_month_day(d.month, d.day)),
            age: birthdate.map(|d| approximate_age(d.year, current_year)),
            sequence: self.sequence().to_string(),
            check_char: self.check_char(),
        }
    }
}

impl FromStr for IdNumber {
    type Err = InvalidReason;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        IdNumber::parse_shape(s)
    }
}

impl fmt::Display for IdNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

// ============================================================================
// DERIVED INFO
// ============================================================================

/// Everything decoded from an ID number, computed on demand for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdInfo {
    pub number: String,
    pub region: ResolvedRegion,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birthdate: Option<Birthdate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birthdate_error: Option<BirthdateError>,
    pub gender: Gender,
    /// Only when the birthdate is valid
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zodiac: Option<Zodiac>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constellation: Option<Constellation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<i32>,
    pub sequence: String,
    pub check_char: char,
}

// ============================================================================
// COMPLETION
// ============================================================================

/// A full ID number assembled from a 17-digit prefix
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Completion {
    pub check_char: char,
    pub full: String,
    pub info: IdInfo,
}

/// Append the check character to a 17-digit prefix and decode the result
pub fn complete(prefix: &str, regions: &RegionDirectory) -> Result<Completion, CompletionError> {
    complete_as_of(prefix, regions, current_year())
}

/// Same as [`complete`] with an explicit current year.
///
/// The assembled number is not validated against the region table or
/// calendar; those show up in `info` instead.
pub fn complete_as_of(
    prefix: &str,
    regions: &RegionDirectory,
    current_year: i32,
) -> Result<Completion, CompletionError> {
    let prefix = prefix.trim();
    let check_char = compute_check_char(prefix)?;

    let full = format!("{}{}", prefix, check_char);
    let id = IdNumber::parse_shape(&full).map_err(|_| CompletionError::InvalidPrefix)?;

    Ok(Completion {
        check_char,
        full,
        info: id.info_as_of(regions, current_year),
    })
}

// ============================================================================
// TESTS
// ============================================================================
