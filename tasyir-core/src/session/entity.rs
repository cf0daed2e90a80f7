use chrono::{DateTime, Utc};

use tasyir_types::primitives::{SessionId, UserId};

/// A bearer session. Unlike the ledger entities this is plain row state;
/// there is no value in replaying how often someone touched a token.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Session {
    pub id: SessionId,
    pub user_id: UserId,
    pub token: String,
    pub inactivity_timeout_secs: i32,
    pub created_at: DateTime<Utc>,
    pub last_seen_at: DateTime<Utc>,
}

impl Session {
    /// A session expires once the gap since the last request exceeds the
    /// owner's inactivity timeout.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        let idle = now.signed_duration_since(self.last_seen_at);
        idle.num_seconds() > i64::from(self.inactivity_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn session(timeout_secs: i32, last_seen_at: DateTime<Utc>) -> Session {
        Session {
            id: SessionId::new(),
            user_id: UserId::new(),
            token: "token".to_string(),
            inactivity_timeout_secs: timeout_secs,
            created_at: last_seen_at,
            last_seen_at,
        }
    }

    #[test]
    fn expires_after_idle_timeout() {
        let now = Utc::now();
        let session = session(300, now - Duration::seconds(301));
        assert!(session.is_expired(now));
    }

    #[test]
    fn survives_within_idle_timeout() {
        let now = Utc::now();
        let session = session(300, now - Duration::seconds(299));
        assert!(!session.is_expired(now));
    }

    #[test]
    fn boundary_is_not_yet_expired() {
        let now = Utc::now();
        let session = session(300, now - Duration::seconds(300));
        assert!(!session.is_expired(now));
    }
}
