//! Security-token verification.

use subtle::ConstantTimeEq;

/// Compares a presented token against the configured security token
/// without short-circuiting on the first mismatching byte, so the time
/// to a decision does not leak where the mismatch is.
#[must_use]
pub fn token_matches(presented: &str, expected: &str) -> bool {
    presented.as_bytes().ct_eq(expected.as_bytes()).into()
}
