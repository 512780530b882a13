//! Pending invitation entity - an issued, not-yet-consumed workspace invite

use chrono::{DateTime, Duration, Utc};

use crate::value_objects::Snowflake;

/// Pending invitation
///
/// The token is an opaque random string; the email association lives only
/// inside the registry and is never encoded into the token itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingInvitation {
    pub email: String,
    pub token: String,
    pub invited_by: Snowflake,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl PendingInvitation {
    /// Create a new invitation expiring `ttl_secs` after issue
    pub fn new(email: String, token: String, invited_by: Snowflake, ttl_secs: i64) -> Self {
        let issued_at = Utc::now();
        Self {
            email,
            token,
            invited_by,
            issued_at,
            expires_at: issued_at + Duration::seconds(ttl_secs),
        }
    }

    /// Check if the invitation has expired at `now`
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    /// Check if the invitation has expired
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Join link handed to the invited person
    #[must_use]
    pub fn join_url(&self, base_url: &str) -> String {
        format!("{}/join/{}", base_url.trim_end_matches('/'), self.token)
    }
}

/// Generate a cryptographically random invitation token.
///
/// 24 alphanumeric characters drawn from the OS RNG; the token carries no
/// information about the invited email.
pub fn generate_invite_token() -> String {
    use rand::Rng;

    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
    const TOKEN_LEN: usize = 24;

    let mut rng = rand::rngs::OsRng;
    (0..TOKEN_LEN)
        .map(|_| CHARSET[rng.gen_range(0..CHARSET.len())] as char)
        .collect()
}
