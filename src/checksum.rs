// 🧮 Check Character - GB 11643 modulus-11 checksum
// The 18th character is fully determined by the first 17 digits.

use crate::error::ChecksumError;

/// Positional weights, index 0 aligned to the first digit
pub const WEIGHTS: [u32; 17] = [7, 9, 10, 5, 8, 4, 2, 1, 6, 3, 7, 9, 10, 5, 8, 4, 2];

/// Check character indexed by `weighted_sum % 11`
pub const CHECK_CHARS: [char; 11] = ['1', '0', 'X', '9', '8', '7', '6', '5', '4', '3', '2'];

/// Length of the digit body the checksum is computed over
pub const BODY_LEN: usize = 17;

/// True when `s` is exactly 17 ASCII digits
pub fn is_valid_body(s: &str) -> bool {
    s.len() == BODY_LEN && s.bytes().all(|b| b.is_ascii_digit())
}

/// Compute the check character for a 17-digit body.
///
/// # Returns
/// * `Ok(char)` - one of `0-9` or `X`
/// * `Err(ChecksumError::InvalidInput)` - input is not exactly 17 ASCII digits
pub fn compute_check_char(body: &str) -> Result<char, ChecksumError> {
    if !is_valid_body(body) {
        return Err(ChecksumError::InvalidInput);
    }

    let total: u32 = body
        .bytes()
        .zip(WEIGHTS.iter())
        .map(|(b, w)| u32::from(b - b'0') * w)
        .sum();

    Ok(CHECK_CHARS[(total % 11) as usize])
}

// ============================================================================
// TESTS
// ============================================================================
