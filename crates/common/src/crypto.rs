//! Cryptographic utilities shared across ClubHub crates
//!
//! Provides password hashing and verification using SHA-256 with random
//! salts and constant-time comparison to prevent timing attacks.

use rand::RngCore;
use sha2::{Digest, Sha256};

/// Hash a password with a fresh random salt.
///
/// The stored hash format is `hex(salt):hex(sha256(password || salt))`.
pub fn hash_password(password: &str) -> String {
    let mut salt = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut salt);

    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    hasher.update(salt);
    let hash = hasher.finalize();

    format!("{}:{}", hex::encode(salt), hex::encode(hash))
}

/// Verify a password against a stored hash using constant-time comparison.
pub fn verify_password(candidate: &str, stored_hash: &str) -> bool {
    // Parse stored hash: salt:hash
    let parts: Vec<&str> = stored_hash.split(':').collect();
    if parts.len() != 2 {
        return false;
    }

    let salt = match hex::decode(parts[0]) {
        Ok(salt) => salt,
        Err(_) => return false,
    };

    let hash = match hex::decode(parts[1]) {
        Ok(hash) => hash,
        Err(_) => return false,
    };

    // Compute hash of candidate password with stored salt
    let mut hasher = Sha256::new();
    hasher.update(candidate.as_bytes());
    hasher.update(&salt);
    let candidate_hash = hasher.finalize();

    // Constant-time comparison to prevent timing attacks
    if hash.len() != candidate_hash.len() {
        return false;
    }

    let mut result = 0u8;
    for (a, b) in hash.iter().zip(candidate_hash.iter()) {
        result |= a ^ b;
    }
    result == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_then_verify_roundtrip() {
        let stored = hash_password("correct horse battery staple");
        assert!(verify_password("correct horse battery staple", &stored));
        assert!(!verify_password("wrong password", &stored));
    }

    #[test]
    fn test_hash_is_salted() {
        // Two hashes of the same password must differ
        let a = hash_password("same-password");
        let b = hash_password("same-password");
        assert_ne!(a, b);
        assert!(verify_password("same-password", &a));
        assert!(verify_password("same-password", &b));
    }

    #[test]
    fn test_verify_malformed_no_colon() {
        assert!(!verify_password("pw", "nocolonshere"));
    }

    #[test]
    fn test_verify_malformed_invalid_hex_salt() {
        assert!(!verify_password("pw", "zzzz:abcd"));
    }

    #[test]
    fn test_verify_malformed_invalid_hex_hash() {
        assert!(!verify_password("pw", "abcd:zzzz"));
    }

    #[test]
    fn test_verify_empty_password() {
        let stored = hash_password("");
        assert!(verify_password("", &stored));
        assert!(!verify_password("notempty", &stored));
    }
}
