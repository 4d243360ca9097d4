use std::env;

/// Authentication policy configuration.
///
/// The administrator is a single configured identity: tokens issued for
/// it carry `is_admin: true`, everyone else gets `false`. The OTP TTL
/// bounds how long an emailed code stays verifiable.
#[derive(Clone, Debug)]
pub struct AuthConfig {
    pub admin_email: String,
    pub otp_ttl_secs: u64,
}

impl AuthConfig {
    pub fn from_env() -> Self {
        Self {
            admin_email: env::var("ADMIN_EMAIL")
                .unwrap_or_else(|_| "admin@authgate.dev".to_string())
                .to_lowercase(),
            otp_ttl_secs: env::var("OTP_TTL_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(300), // 5 minutes
        }
    }

    pub fn is_admin(&self, email: &str) -> bool {
        email.eq_ignore_ascii_case(&self.admin_email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_admin_case_insensitive() {
        let config = AuthConfig {
            admin_email: "admin@authgate.dev".to_string(),
            otp_ttl_secs: 300,
        };

        assert!(config.is_admin("admin@authgate.dev"));
        assert!(config.is_admin("Admin@Authgate.Dev"));
        assert!(!config.is_admin("user@authgate.dev"));
    }
}
