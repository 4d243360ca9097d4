use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

// JWT Claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // normalized email
    pub jti: String,
    pub token_type: String, // "access" | "refresh"
    pub is_admin: bool,
    pub exp: usize,
    pub iat: usize,
}

/// Special characters accepted by the password policy.
const PASSWORD_SPECIAL_CHARS: &str = "!@#$%^&*(),.?\":{}|<>";

/// Password policy: at least 8 characters, one uppercase letter, one
/// digit and one special character. Every violated rule is reported,
/// not just the first.
fn validate_password_strength(password: &str) -> Result<(), ValidationError> {
    let mut violations: Vec<&str> = Vec::new();

    if password.chars().count() < 8 {
        violations.push("must be at least 8 characters long");
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        violations.push("must contain at least one uppercase character");
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        violations.push("must contain at least one digit");
    }
    if !password.chars().any(|c| PASSWORD_SPECIAL_CHARS.contains(c)) {
        violations.push("must contain at least one special character");
    }

    if violations.is_empty() {
        Ok(())
    } else {
        let mut error = ValidationError::new("password_strength");
        error.message = Some(format!("Password {}", violations.join(" & ")).into());
        Err(error)
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "first_name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "last_name is required"))]
    pub last_name: String,
    pub description: Option<String>,
    #[validate(email(message = "email must be a valid email address"))]
    pub email: String,
    #[validate(custom(function = validate_password_strength))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email(message = "email must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct VerifyOtpRequest {
    #[validate(email(message = "email must be a valid email address"))]
    pub email: String,
    #[validate(length(equal = 6, message = "code must be 6 digits"))]
    pub code: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

/// Returned by a successful OTP verification: the token pair plus the
/// original login acknowledgement message.
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub message: String,
    pub tokens: TokenPair,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RefreshResponse {
    pub access_token: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    fn register_request(password: &str) -> RegisterRequest {
        RegisterRequest {
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            description: None,
            email: "test@example.com".to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn test_password_policy_accepts_strong_password() {
        assert!(register_request("LongEnough1!").validate().is_ok());
    }

    #[test]
    fn test_password_policy_rejects_short_password() {
        let err = register_request("short1!").validate().unwrap_err();
        let message = format!("{}", err);
        assert!(message.contains("at least 8 characters"));
    }

    #[test]
    fn test_password_policy_rejects_missing_special_char() {
        let err = register_request("longenough1").validate().unwrap_err();
        let message = format!("{}", err);
        assert!(message.contains("special character"));
    }

    #[test]
    fn test_password_policy_reports_all_violations() {
        let err = register_request("abc").validate().unwrap_err();
        let message = format!("{}", err);
        assert!(message.contains("at least 8 characters"));
        assert!(message.contains("uppercase"));
        assert!(message.contains("digit"));
        assert!(message.contains("special character"));
    }

    #[test]
    fn test_password_policy_rejects_missing_uppercase() {
        assert!(register_request("longenough1!").validate().is_err());
    }

    #[test]
    fn test_password_policy_rejects_missing_digit() {
        assert!(register_request("LongEnough!!").validate().is_err());
    }

    #[test]
    fn test_register_request_rejects_invalid_email() {
        let mut request = register_request("LongEnough1!");
        request.email = "not-an-email".to_string();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_claims_round_trip() {
        let claims = Claims {
            sub: "user@example.com".to_string(),
            jti: "some-jti".to_string(),
            token_type: "access".to_string(),
            is_admin: false,
            exp: 2000000000,
            iat: 1000000000,
        };

        let json = serde_json::to_string(&claims).unwrap();
        let parsed: Claims = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.sub, claims.sub);
        assert_eq!(parsed.jti, claims.jti);
        assert_eq!(parsed.token_type, "access");
        assert!(!parsed.is_admin);
    }
}
