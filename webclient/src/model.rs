pub mod atom;
pub mod auth;
pub mod credential;
pub mod question;
pub mod session;
pub mod user;

pub use atom::*;
pub use auth::*;
pub use credential::*;
pub use question::*;
pub use session::*;
pub use user::*;

use async_trait::async_trait;

use crate::error::Result;

/// Scores a solution. Any transport or HTTP failure is reported as an error;
/// callers do not distinguish subtypes.
#[async_trait]
pub trait ScoringService: Send + Sync {
    async fn submit_code(
        &self,
        question_id: &QuestionId,
        code: &str,
        language: &str,
    ) -> Result<ScoreReport>;
}

#[async_trait]
pub trait QuestionSource: Send + Sync {
    async fn fetch_questions(&self) -> Result<Vec<Question>>;

    async fn fetch_question(&self, id: &QuestionId) -> Result<Question>;
}

#[async_trait]
pub trait SessionArchive: Send + Sync {
    async fn fetch_user_sessions(&self, user_id: &str) -> Result<Vec<SessionRecord>>;

    async fn fetch_all_sessions(&self) -> Result<Vec<SessionRecord>>;
}

#[async_trait]
pub trait Authenticator: Send + Sync {
    fn credential_fields(&self) -> &'static [CredFieldMeta];

    fn registration_fields(&self) -> &'static [CredFieldMeta];

    fn is_logged_in(&self) -> bool;

    fn current_user(&self) -> Option<CurrentUser>;

    fn current_profile(&self) -> Option<&UserProfile>;

    async fn login(&mut self, cred: CredMap) -> Result<()>;

    async fn register(&mut self, cred: CredMap) -> Result<()>;

    async fn login_with_google(&mut self, google_id_token: &str) -> Result<()>;

    async fn logout(&mut self) -> Result<()>;

    /// Exchanges the refresh token for a new ID token if the current one expired.
    /// Returns true if the token was renewed.
    async fn refresh_if_expired(&mut self, now: UtcDateTime) -> Result<bool>;

    fn export_authtoken(&self) -> AuthToken;

    fn load_authtoken(&mut self, token: AuthToken);
}
