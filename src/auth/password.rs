use super::AuthError;

/// Work factor shared with hashes provisioned before this service existed.
pub const HASH_COST: u32 = 10;

pub fn hash_password(password: &str) -> Result<String, AuthError> {
    Ok(bcrypt::hash(password, HASH_COST)?)
}

/// A malformed stored hash counts as a mismatch.
pub fn verify_password(password: &str, hash: &str) -> bool {
    bcrypt::verify(password, hash).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_salted_and_verifies() {
        let a = hash_password("Naina@32145").unwrap();
        let b = hash_password("Naina@32145").unwrap();
        assert_ne!(a, b);
        assert!(a.starts_with("$2b$10$"));
        assert!(verify_password("Naina@32145", &a));
        assert!(!verify_password("naina@32145", &a));
    }

    #[test]
    fn malformed_hash_never_matches() {
        assert!(!verify_password("anything", "plaintext"));
    }
}
