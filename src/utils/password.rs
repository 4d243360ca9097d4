use bcrypt::{DEFAULT_COST, hash, verify};

use crate::utils::errors::AppError;

/// A structurally valid bcrypt hash used to equalize the cost of a login
/// attempt against an unknown email with one against a known email. The
/// result of verifying against it is always discarded.
pub const DUMMY_HASH: &str = "$2a$12$R9h/cIPz0gi.URNNX3kh2OPST9/PgBkqquzi.Ss7KIUgO2t0jWMUW";

pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password, DEFAULT_COST)
        .map_err(|e| AppError::internal_error(format!("Failed to hash password: {}", e)))
}

/// Verify a plaintext password against a stored bcrypt hash. The salt is
/// embedded in the hash and the comparison is constant-time inside bcrypt.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    verify(password, hash)
        .map_err(|e| AppError::internal_error(format!("Failed to verify password: {}", e)))
}

/// Burn one bcrypt verification without caring about the outcome, so a
/// lookup miss takes comparable time to a password mismatch.
pub fn dummy_verify(password: &str) {
    let _ = verify(password, DUMMY_HASH);
}
