use crate::error::AppError;
use bcrypt::{hash, verify};

/// bcrypt work factor. Fixed, not configurable.
pub const HASH_COST: u32 = 12;

lazy_static::lazy_static! {
    // Verified against when a login names an unknown email, so both failure paths
    // cost one bcrypt computation.
    static ref DUMMY_HASH: Option<String> = hash("timing-equalizer", HASH_COST).ok();
}

/// Hashes a plaintext password with a fresh random salt.
///
/// CPU-bound; async callers run it through `web::block`.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password, HASH_COST)
        .map_err(|e| AppError::InternalServerError(format!("Failed to hash password: {}", e)))
}

/// Checks a plaintext password against a stored bcrypt hash.
///
/// The comparison is bcrypt's own constant-time check.
pub fn verify_password(password: &str, hashed_password: &str) -> Result<bool, AppError> {
    verify(password, hashed_password)
        .map_err(|e| AppError::InternalServerError(format!("Failed to verify password: {}", e)))
}

/// Computes the dummy hash now instead of on the first unknown-email login.
///
/// Call once at startup.
pub fn warm_up_dummy_hash() {
    lazy_static::initialize(&DUMMY_HASH);
}

/// Spends the same work as `verify_password` without a real credential.
pub fn verify_against_dummy(password: &str) {
    if let Some(dummy) = DUMMY_HASH.as_deref() {
        let _ = verify(password, dummy);
    }
}
