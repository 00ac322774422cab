// ID Card Inspector - Core Library
// Validation and decoding engine for 18-character Chinese resident ID numbers.
// Every entry point takes the region table explicitly; there is no global state.

pub mod error;
pub mod checksum;       // GB 11643 modulus-11 check character
pub mod region;         // Region directory + tiered resolver + loader
pub mod birthdate;      // YYYYMMDD calendar validation
pub mod attributes;     // Gender, zodiac, constellation, age
pub mod identifier;     // Parsed ID number, info bundle, completion
pub mod validator;      // Ordered validation checks
pub mod batch;          // Sequential batch validation
pub mod config;         // Region table path resolution
pub mod menu;           // Interactive menu over any reader/writer

// Re-export commonly used types
pub use error::{BirthdateError, ChecksumError, CompletionError, InvalidReason};
pub use checksum::compute_check_char;
pub use region::{RegionDirectory, RegionMatch, RegionSource, ResolvedRegion, load_region_table};
pub use birthdate::{Birthdate, is_leap_year, validate_birthdate, validate_birthdate_as_of};
pub use attributes::{Constellation, Gender, Zodiac, approximate_age};
pub use identifier::{Completion, IdInfo, IdNumber, complete, complete_as_of};
pub use validator::{Verdict, check_id, validate, validate_as_of};
pub use batch::{BatchEntry, BatchReport, validate_batch, validate_batch_as_of};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
