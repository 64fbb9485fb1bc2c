use chrono::Duration;
use rand::RngCore;
use rand::rngs::OsRng;

/// Tunables for the whole auth surface.
///
/// Defaults match the operational values the service ships with; an
/// operator overrides individual knobs through the environment at
/// startup, never per request.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// HS256 signing key shared by access and refresh tokens.
    pub token_secret: Vec<u8>,
    pub access_ttl_minutes: i64,
    pub refresh_ttl_minutes: i64,
    pub password_min_length: usize,
    pub bcrypt_cost: u32,
    pub max_login_attempts: u32,
    pub lockout_minutes: i64,
    pub otp_ttl_minutes: i64,
    pub otp_resend_cooldown_secs: i64,
}

impl AuthConfig {
    pub fn new(token_secret: Vec<u8>) -> Self {
        Self {
            token_secret,
            access_ttl_minutes: 60,
            refresh_ttl_minutes: 43_200,
            password_min_length: 8,
            bcrypt_cost: platform::password::DEFAULT_COST,
            max_login_attempts: 5,
            lockout_minutes: 15,
            otp_ttl_minutes: 5,
            otp_resend_cooldown_secs: 60,
        }
    }

    /// Local-development config with a throwaway random secret. Tokens
    /// do not survive a restart, which is fine for development.
    pub fn development() -> Self {
        let mut secret = vec![0u8; 32];
        OsRng.fill_bytes(&mut secret);
        Self::new(secret)
    }

    pub fn access_ttl(&self) -> Duration {
        Duration::minutes(self.access_ttl_minutes)
    }

    pub fn refresh_ttl(&self) -> Duration {
        Duration::minutes(self.refresh_ttl_minutes)
    }

    pub fn otp_ttl(&self) -> Duration {
        Duration::minutes(self.otp_ttl_minutes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_the_shipped_values() {
        let config = AuthConfig::new(b"secret".to_vec());
        assert_eq!(config.access_ttl(), Duration::minutes(60));
        assert_eq!(config.refresh_ttl(), Duration::days(30));
        assert_eq!(config.password_min_length, 8);
        assert_eq!(config.bcrypt_cost, 12);
        assert_eq!(config.max_login_attempts, 5);
        assert_eq!(config.lockout_minutes, 15);
        assert_eq!(config.otp_ttl(), Duration::minutes(5));
        assert_eq!(config.otp_resend_cooldown_secs, 60);
    }

    #[test]
    fn development_secret_is_random() {
        let a = AuthConfig::development();
        let b = AuthConfig::development();
        assert_eq!(a.token_secret.len(), 32);
        assert_ne!(a.token_secret, b.token_secret);
    }
}
