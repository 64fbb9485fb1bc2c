//! One-Time-Code Generation
//!
//! Cryptographically secure generation of numeric one-time passcodes and
//! uppercase reference codes. Every symbol is drawn uniformly and
//! independently from the OS CSPRNG.

use rand::Rng;
use rand::rngs::OsRng;

/// Default OTP code length (digits).
pub const DEFAULT_CODE_LENGTH: usize = 6;

/// Default reference code length (uppercase letters).
pub const DEFAULT_REFERENCE_LENGTH: usize = 6;

const DIGITS: &[u8] = b"0123456789";
const UPPERCASE: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Sample `length` symbols uniformly from `alphabet`.
fn sample(alphabet: &[u8], length: usize) -> String {
    let mut rng = OsRng;
    (0..length)
        .map(|_| alphabet[rng.gen_range(0..alphabet.len())] as char)
        .collect()
}

/// Generate a numeric one-time passcode.
pub fn generate_code(length: usize) -> String {
    sample(DIGITS, length)
}

/// Generate an uppercase reference code.
///
/// The reference is a correlation handle returned to the caller alongside an
/// OTP request; it never grants access by itself.
pub fn generate_reference(length: usize) -> String {
    sample(UPPERCASE, length)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_length_and_charset() {
        let code = generate_code(DEFAULT_CODE_LENGTH);
        assert_eq!(code.len(), 6);
        assert!(code.chars().all(|c| c.is_ascii_digit()));

        let code = generate_code(8);
        assert_eq!(code.len(), 8);
    }

    #[test]
    fn test_reference_length_and_charset() {
        let reference = generate_reference(DEFAULT_REFERENCE_LENGTH);
        assert_eq!(reference.len(), 6);
        assert!(reference.chars().all(|c| c.is_ascii_uppercase()));
    }

    #[test]
    fn test_codes_are_independent() {
        // Statistically, 32 independent 6-digit codes will not all collide.
        let codes: Vec<String> = (0..32).map(|_| generate_code(6)).collect();
        let first = &codes[0];
        assert!(codes.iter().any(|c| c != first));
    }

    #[test]
    fn test_zero_length() {
        assert_eq!(generate_code(0), "");
        assert_eq!(generate_reference(0), "");
    }
}
