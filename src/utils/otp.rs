use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::RwLock;
use rand::Rng as _;
use subtle::ConstantTimeEq;

/// A pending one-time passcode for a single identity.
#[derive(Debug)]
struct OtpChallenge {
    code: String,
    issued_at: Instant,
}

/// In-memory store of pending OTP challenges keyed by normalized email.
///
/// At most one unconsumed challenge exists per key: issuing a new code
/// replaces any pending one, invalidating it. Challenges are single-use
/// and expire after the configured TTL; expired entries are dropped
/// lazily on verification and swept on issue.
#[derive(Clone, Debug)]
pub struct OtpStore {
    ttl: Duration,
    challenges: Arc<RwLock<HashMap<String, OtpChallenge>>>,
}

impl OtpStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            challenges: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Generate a 6-digit code for the given identity and store it,
    /// replacing any pending challenge. Returns the code for out-of-band
    /// delivery; it is never stored anywhere else.
    pub fn issue(&self, email: &str) -> String {
        let code = rand::thread_rng().gen_range(100_000..=999_999).to_string();

        let mut challenges = self.challenges.write();
        challenges.retain(|_, challenge| challenge.issued_at.elapsed() < self.ttl);
        challenges.insert(
            email.to_string(),
            OtpChallenge {
                code: code.clone(),
                issued_at: Instant::now(),
            },
        );

        code
    }

    /// Check a submitted code against the pending challenge for the
    /// identity. Returns false if no challenge exists, the challenge has
    /// expired, or the code does not match. A successful match consumes
    /// the challenge; a failed one leaves it pending.
    pub fn verify(&self, email: &str, submitted: &str) -> bool {
        let mut challenges = self.challenges.write();

        let Some(challenge) = challenges.get(email) else {
            return false;
        };

        if challenge.issued_at.elapsed() >= self.ttl {
            challenges.remove(email);
            return false;
        }

        let matches: bool = challenge
            .code
            .as_bytes()
            .ct_eq(submitted.as_bytes())
            .into();

        if matches {
            challenges.remove(email);
        }

        matches
    }

    /// Read the pending code for an identity without consuming it. Test
    /// harness hook; OTP codes leave the process only via email delivery.
    #[cfg(any(test, feature = "test-utils"))]
    pub fn pending_code(&self, email: &str) -> Option<String> {
        self.challenges
            .read()
            .get(email)
            .map(|challenge| challenge.code.clone())
    }
}
