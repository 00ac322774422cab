// ❗ Error Types - every way an ID number can be rejected
// Engine failures are values, never panics. The CLI prints them and keeps going.

use serde::Serialize;
use thiserror::Error;

// ============================================================================
// BIRTHDATE ERRORS
// ============================================================================

/// Why the 8-digit birthdate field (YYYYMMDD) was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BirthdateError {
    #[error("日期格式无效")]
    MalformedDate,

    #[error("年份超出范围 (1900-{current_year})")]
    YearOutOfRange { current_year: i32 },

    #[error("月份无效 (1-12)")]
    InvalidMonth,

    /// Day outside 1..=31, or past the 30th in a 30-day month
    #[error("{}", day_message(.month))]
    InvalidDay { month: u32 },

    #[error("{}", february_message(.year, .leap))]
    InvalidFebruaryDay { year: i32, leap: bool },

    #[error("无效的日期: 无法构造日历日期")]
    CalendarConstructionFailed,
}

fn day_message(month: &u32) -> String {
    match *month {
        4 | 6 | 9 | 11 => format!("{}月最多30天", month),
        _ => "日期无效 (1-31)".to_string(),
    }
}

fn february_message(year: &i32, leap: &bool) -> String {
    if *leap {
        format!("{}年是闰年，2月最多29天", year)
    } else {
        format!("{}年不是闰年，2月最多28天", year)
    }
}

// ============================================================================
// VALIDATION FAILURES
// ============================================================================

/// The reason an ID number failed validation.
///
/// Variants are listed in the order the validator checks them; the first
/// failing check is the one reported.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InvalidReason {
    #[error("身份证号码长度不正确（必须是18位，实际{len}位）")]
    BadLength { len: usize },

    #[error("前17位必须为数字")]
    NonDigitPrefix,

    #[error("第18位必须是数字或X")]
    BadChecksumChar,

    #[error("校验码错误，应为'{expected}'")]
    ChecksumMismatch { expected: char },

    #[error("无效的地区代码: {code}")]
    InvalidRegionCode { code: String },

    #[error("无效的出生日期: {reason}")]
    InvalidBirthdate { reason: BirthdateError },
}

impl InvalidReason {
    /// Stable machine-readable category name
    pub fn category(&self) -> &'static str {
        match self {
            InvalidReason::BadLength { .. } => "BadLength",
            InvalidReason::NonDigitPrefix => "NonDigitPrefix",
            InvalidReason::BadChecksumChar => "BadChecksumChar",
            InvalidReason::ChecksumMismatch { .. } => "ChecksumMismatch",
            InvalidReason::InvalidRegionCode { .. } => "InvalidRegionCode",
            InvalidReason::InvalidBirthdate { .. } => "InvalidBirthdate",
        }
    }
}

impl From<BirthdateError> for InvalidReason {
    fn from(err: BirthdateError) -> Self {
        InvalidReason::InvalidBirthdate { reason: err }
    }
}

// ============================================================================
// INPUT ERRORS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChecksumError {
    /// The checksum is only defined over exactly 17 ASCII digits
    #[error("输入无效: 需要17位数字")]
    InvalidInput,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompletionError {
    #[error("前17位必须是17位数字")]
    InvalidPrefix,
}

impl From<ChecksumError> for CompletionError {
    fn from(_: ChecksumError) -> Self {
        CompletionError::InvalidPrefix
    }
}
