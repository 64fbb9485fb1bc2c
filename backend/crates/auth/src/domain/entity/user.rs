use chrono::{DateTime, Utc};

use crate::domain::value_object::Email;

/// An account holder.
///
/// `password_hash` stays inside the domain and infra layers; the
/// presentation layer builds its own view that omits it.
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub email: Email,
    pub password_hash: String,
    pub full_name: String,
    pub national_id: String,
    pub is_active: bool,
    pub email_verified: bool,
    pub login_attempts: i32,
    pub locked_until: Option<DateTime<Utc>>,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// True while a lockout window set by failed logins is still open.
    pub fn is_locked_at(&self, now: DateTime<Utc>) -> bool {
        self.locked_until.is_some_and(|until| until > now)
    }
}

/// Insert payload for a freshly registered account.
///
/// New accounts start active, unverified and with a clean attempt
/// counter; the store fills in those defaults.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: Email,
    pub password_hash: String,
    pub full_name: String,
    pub national_id: String,
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn user_with_lock(locked_until: Option<DateTime<Utc>>) -> User {
        let now = Utc::now();
        User {
            id: 1,
            email: Email::new("alice@example.com").unwrap(),
            password_hash: "$2b$04$abcdefghijklmnopqrstuv".into(),
            full_name: "Alice Example".into(),
            national_id: "1234567890".into(),
            is_active: true,
            email_verified: false,
            login_attempts: 0,
            locked_until,
            last_login: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn lock_window_in_future_locks() {
        let now = Utc::now();
        let user = user_with_lock(Some(now + Duration::minutes(10)));
        assert!(user.is_locked_at(now));
    }

    #[test]
    fn elapsed_or_absent_lock_does_not() {
        let now = Utc::now();
        assert!(!user_with_lock(Some(now - Duration::seconds(1))).is_locked_at(now));
        assert!(!user_with_lock(None).is_locked_at(now));
    }
}
