use std::path::PathBuf;

use async_trait::async_trait;
use chrono::Utc;
use codeiv_core::action;
use codeiv_core::auth::{Access, AuthSession, Requirement};
use codeiv_core::storage::AuthTokenFile;
use codeiv_webclient::{
    AuthToken, Authenticator, CredFieldKind, CredFieldMeta, CredMap, CurrentUser, Result, Role,
    UserProfile, UtcDateTime,
};
use rand::Rng as _;

const FIELDS: &[CredFieldMeta] = &[CredFieldMeta {
    name: "email",
    kind: CredFieldKind::Text,
}];

/// Signs in whoever asks; the role comes from the constructor.
struct FakeAuth {
    role: Role,
    token: AuthToken,
}

impl FakeAuth {
    fn boxed(role: Role) -> Box<dyn Authenticator> {
        Box::new(Self {
            role,
            token: AuthToken::default(),
        })
    }
}

#[async_trait]
impl Authenticator for FakeAuth {
    fn credential_fields(&self) -> &'static [CredFieldMeta] {
        FIELDS
    }

    fn registration_fields(&self) -> &'static [CredFieldMeta] {
        FIELDS
    }

    fn is_logged_in(&self) -> bool {
        self.token.is_present()
    }

    fn current_user(&self) -> Option<CurrentUser> {
        self.token.current_user()
    }

    fn current_profile(&self) -> Option<&UserProfile> {
        self.token.profile.as_ref()
    }

    async fn login(&mut self, _cred: CredMap) -> Result<()> {
        unreachable!("interactive")
    }

    async fn register(&mut self, _cred: CredMap) -> Result<()> {
        unreachable!("interactive")
    }

    async fn login_with_google(&mut self, google_id_token: &str) -> Result<()> {
        self.token = AuthToken {
            id_token: Some(format!("id-for-{}", google_id_token)),
            refresh_token: Some("refresh".to_owned()),
            uid: Some("u-1".to_owned()),
            email: Some("alice@example.com".to_owned()),
            expires_at: None,
            profile: Some(UserProfile {
                uid: "u-1".to_owned(),
                email: "alice@example.com".to_owned(),
                display_name: "Alice".to_owned(),
                role: self.role,
                created_at: Utc::now(),
            }),
        };
        Ok(())
    }

    async fn logout(&mut self) -> Result<()> {
        self.token.revoke();
        Ok(())
    }

    async fn refresh_if_expired(&mut self, _now: UtcDateTime) -> Result<bool> {
        Ok(false)
    }

    fn export_authtoken(&self) -> AuthToken {
        self.token.clone()
    }

    fn load_authtoken(&mut self, token: AuthToken) {
        self.token = token;
    }
}

fn scratch_dir() -> PathBuf {
    let n: u64 = rand::thread_rng().gen();
    std::env::temp_dir().join(format!("codeiv-auth-session-test-{:x}", n))
}

#[tokio::test]
async fn token_survives_restart_until_logout() {
    let dir = scratch_dir();

    let mut session = AuthSession::new(FakeAuth::boxed(Role::Candidate), &dir);
    assert_eq!(session.check(Requirement::SignedIn), Access::RedirectToLogin);
    assert!(action::ensure_access(&session, Requirement::SignedIn).is_err());

    action::login_with_google(&mut session, "g-token").await.unwrap();
    assert!(action::login_with_google(&mut session, "again").await.is_err());

    // a new process picks the token up from disk
    let mut session = AuthSession::new(FakeAuth::boxed(Role::Candidate), &dir);
    assert!(session.is_logged_in());
    assert_eq!(session.token().id_token.as_deref(), Some("id-for-g-token"));
    assert_eq!(session.check(Requirement::SignedIn), Access::Granted);
    assert_eq!(session.check(Requirement::Admin), Access::RedirectToDashboard);

    action::logout(&mut session).await.unwrap();
    assert!(!session.is_logged_in());
    assert_eq!(AuthTokenFile::in_dir(&dir).load().unwrap(), None);

    let session = AuthSession::new(FakeAuth::boxed(Role::Candidate), &dir);
    assert!(!session.is_logged_in());

    let _ = std::fs::remove_dir_all(dir);
}

#[tokio::test]
async fn admin_profile_opens_admin_commands() {
    let dir = scratch_dir();
    let mut session = AuthSession::new(FakeAuth::boxed(Role::Admin), &dir);
    action::login_with_google(&mut session, "g").await.unwrap();
    assert!(action::ensure_access(&session, Requirement::Admin).is_ok());
    let _ = std::fs::remove_dir_all(dir);
}

#[tokio::test]
async fn broken_token_file_is_ignored() {
    let dir = scratch_dir();
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join(AuthTokenFile::FILENAME), "{ not json").unwrap();

    let session = AuthSession::new(FakeAuth::boxed(Role::Candidate), &dir);
    assert!(!session.is_logged_in());
    let _ = std::fs::remove_dir_all(dir);
}
