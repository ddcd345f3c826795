use ::serde::{Deserialize, Serialize};

use super::atom::UtcDateTime;
use super::user::{CurrentUser, UserProfile};

/// Persisted sign-in state. The ID token is what the interview API expects as bearer.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthToken {
    pub id_token: Option<String>,
    pub refresh_token: Option<String>,
    pub uid: Option<String>,
    pub email: Option<String>,
    pub expires_at: Option<UtcDateTime>,
    pub profile: Option<UserProfile>,
}

impl AuthToken {
    pub fn revoke(&mut self) {
        *self = Self::default();
    }

    pub fn is_present(&self) -> bool {
        self.id_token.is_some() && self.uid.is_some()
    }

    /// Tokens without a known expiry are treated as still valid.
    pub fn is_expired(&self, now: UtcDateTime) -> bool {
        self.expires_at.map_or(false, |t| t <= now)
    }

    pub fn current_user(&self) -> Option<CurrentUser> {
        self.uid.as_ref().map(|uid| CurrentUser {
            uid: uid.to_owned(),
            email: self.email.clone(),
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    #[test]
    fn expiry() {
        let now = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        let mut token = AuthToken {
            id_token: Some("id".to_owned()),
            uid: Some("u1".to_owned()),
            expires_at: Some(now + Duration::seconds(3600)),
            ..Default::default()
        };
        assert!(token.is_present());
        assert!(!token.is_expired(now));
        assert!(token.is_expired(now + Duration::seconds(3600)));

        token.expires_at = None;
        assert!(!token.is_expired(now));

        token.revoke();
        assert!(!token.is_present());
        assert_eq!(token.current_user(), None);
    }
}
