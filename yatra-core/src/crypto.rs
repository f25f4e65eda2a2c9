//! Password hashing for account credentials

/// bcrypt work factor
pub const BCRYPT_COST: u32 = 12;

/// Hash a password for storage in the accounts document
pub fn hash_password(password: &str) -> Result<String, bcrypt::BcryptError> {
    bcrypt::hash(password, BCRYPT_COST)
}

/// Check a login password against a stored hash
pub fn verify_password(password: &str, hash: &str) -> Result<bool, bcrypt::BcryptError> {
    bcrypt::verify(password, hash)
}
