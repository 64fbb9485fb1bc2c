//! Password Hashing and Verification
//!
//! Thin wrapper around bcrypt:
//! - Salted, adaptive hashing with a configurable cost factor
//! - Verification never panics or errors on malformed stored hashes
//!
//! Password *policy* (length, character classes) is a domain concern and
//! lives with the domain value objects, not here.

use thiserror::Error;

/// Default bcrypt cost factor (2^12 rounds).
pub const DEFAULT_COST: u32 = 12;

/// Password hashing errors
#[derive(Debug, Error)]
pub enum PasswordHashError {
    /// Hashing operation failed (invalid cost, RNG failure)
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),
}

/// Hash a plaintext password with bcrypt at the given cost factor.
///
/// The salt is generated internally from the OS CSPRNG and embedded in the
/// returned hash string.
pub fn hash_password(plaintext: &str, cost: u32) -> Result<String, PasswordHashError> {
    bcrypt::hash(plaintext, cost).map_err(|e| PasswordHashError::HashingFailed(e.to_string()))
}

/// Verify a plaintext password against a stored bcrypt hash.
///
/// Returns `false` for a malformed or non-bcrypt stored hash instead of
/// erroring; a corrupt hash must read as "does not match", never as a
/// server failure visible to the caller.
pub fn verify_password(plaintext: &str, stored_hash: &str) -> bool {
    bcrypt::verify(plaintext, stored_hash).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Cost 4 is the bcrypt minimum; keeps the test suite fast.
    const TEST_COST: u32 = 4;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("TestPassword1", TEST_COST).unwrap();
        assert!(verify_password("TestPassword1", &hash));
        assert!(!verify_password("WrongPassword1", &hash));
    }

    #[test]
    fn test_hashes_are_salted() {
        let a = hash_password("TestPassword1", TEST_COST).unwrap();
        let b = hash_password("TestPassword1", TEST_COST).unwrap();
        assert_ne!(a, b, "two hashes of the same password must differ by salt");
    }

    #[test]
    fn test_verify_malformed_hash_returns_false() {
        assert!(!verify_password("TestPassword1", "not-a-bcrypt-hash"));
        assert!(!verify_password("TestPassword1", ""));
        assert!(!verify_password("TestPassword1", "$argon2id$v=19$..."));
    }

    #[test]
    fn test_invalid_cost_rejected() {
        let result = hash_password("TestPassword1", 2);
        assert!(matches!(result, Err(PasswordHashError::HashingFailed(_))));
    }
}
