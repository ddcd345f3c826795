pub mod error {
    #[allow(unused_imports)]
    pub(crate) use anyhow::{anyhow, bail, ensure, Context as _};
    pub use anyhow::{Error, Result};
}
use chrono::Utc;
use codeiv_webclient::{
    firebase::FirebaseSettings, ApiClient, Authenticator, FirebaseAuth, NewQuestion, Question,
    QuestionId, QuestionPatch, QuestionSource, SessionArchive, SessionRecord,
};
use error::*;

use crate::auth::{Access, AuthSession, Requirement};
use crate::config::ApiConfig;
use crate::demo;
use crate::interactive::ask_credential;
use crate::notice::Notice;

/// Data that may have been replaced by built-in demo content.
#[derive(Debug, Clone, PartialEq)]
pub struct Loaded<T> {
    pub data: T,
    /// Set when `data` is demo content.
    pub notice: Option<Notice>,
}

impl<T> Loaded<T> {
    fn fresh(data: T) -> Self {
        Self { data, notice: None }
    }

    fn demo(data: T, notice: Notice) -> Self {
        Self {
            data,
            notice: Some(notice),
        }
    }

    pub fn is_demo(&self) -> bool {
        self.notice.is_some()
    }
}

pub fn new_authenticator(settings: &FirebaseSettings, api: &ApiConfig) -> Result<Box<dyn Authenticator>> {
    let auth = FirebaseAuth::new(settings.clone(), api.timeout())
        .context("Failed to set up the Firebase client")?;
    Ok(Box::new(auth))
}

pub async fn login(auth: &mut AuthSession) -> Result<()> {
    ensure!(!auth.is_logged_in(), "Already logged in");

    let cred = ask_credential(auth.credential_fields()).context("Failed to read credential")?;
    auth.login(cred).await.context("Failed to login")?;
    auth.save_authtoken_to_storage()
}

pub async fn register(auth: &mut AuthSession) -> Result<()> {
    ensure!(!auth.is_logged_in(), "Already logged in; logout first");

    let cred = ask_credential(auth.registration_fields()).context("Failed to read credential")?;
    auth.register(cred).await.context("Failed to create account")?;
    auth.save_authtoken_to_storage()
}

pub async fn login_with_google(auth: &mut AuthSession, google_id_token: &str) -> Result<()> {
    ensure!(!auth.is_logged_in(), "Already logged in");

    auth.login_with_google(google_id_token)
        .await
        .context("Failed to login with Google")?;
    auth.save_authtoken_to_storage()
}

pub async fn logout(auth: &mut AuthSession) -> Result<()> {
    ensure!(auth.is_logged_in(), "Already logged out");

    let _ = auth.remove_authtoken_from_storage();

    auth.logout().await.context("Failed to logout")
}

pub fn ensure_access(auth: &AuthSession, requirement: Requirement) -> Result<()> {
    match auth.check(requirement) {
        Access::Granted => Ok(()),
        Access::RedirectToLogin => bail!("Not logged in. Run `codeiv login` first"),
        Access::RedirectToDashboard => bail!("This command requires the admin role"),
    }
}

/// API client carrying the session's token, refreshed first if it expired.
pub async fn connect_api(auth: &mut AuthSession, cfg: &ApiConfig) -> Result<ApiClient> {
    if auth.is_logged_in() {
        match auth.refresh_if_expired(Utc::now()).await {
            Ok(true) => {
                log::info!("Refreshed expired auth token");
                auth.save_authtoken_to_storage()?;
            }
            Ok(false) => {}
            Err(e) => log::warn!("Could not refresh auth token: {}", e),
        }
    }

    let api = ApiClient::new(cfg.base_url.clone(), cfg.timeout())
        .with_context(|| format!("Invalid API base URL '{}'", cfg.base_url))?;
    Ok(api.with_auth(&auth.token()))
}

pub async fn load_question(src: &dyn QuestionSource, id: &QuestionId) -> Loaded<Question> {
    match src.fetch_question(id).await {
        Ok(q) => Loaded::fresh(q),
        Err(e) => {
            log::warn!("Failed to load question {}: {}", id, e);
            Loaded::demo(demo::question(id), Notice::question_load_failed())
        }
    }
}

pub async fn load_questions(src: &dyn QuestionSource) -> Loaded<Vec<Question>> {
    match src.fetch_questions().await {
        Ok(qs) => Loaded::fresh(qs),
        Err(e) => {
            log::warn!("Failed to load questions: {}", e);
            Loaded::demo(demo::questions(), Notice::questions_load_failed())
        }
    }
}

pub async fn load_history(archive: &dyn SessionArchive, user_id: &str) -> Loaded<Vec<SessionRecord>> {
    match archive.fetch_user_sessions(user_id).await {
        Ok(sessions) => Loaded::fresh(sessions),
        Err(e) => {
            log::warn!("Failed to load session history of {}: {}", user_id, e);
            Loaded::demo(demo::sessions(user_id), Notice::history_load_failed())
        }
    }
}

pub async fn fetch_all_sessions(archive: &dyn SessionArchive) -> Result<Vec<SessionRecord>> {
    archive
        .fetch_all_sessions()
        .await
        .context("Failed to fetch sessions")
}

pub async fn create_question(api: &ApiClient, question: &NewQuestion) -> Result<Question> {
    ensure!(!question.title.trim().is_empty(), "Question title must not be empty");
    ensure!(!question.language.is_empty(), "At least one language is required");
    api.create_question(question)
        .await
        .context("Failed to create question")
}

pub async fn update_question(api: &ApiClient, id: &QuestionId, patch: &QuestionPatch) -> Result<Question> {
    ensure!(!patch.is_empty(), "Nothing to update");
    api.update_question(id, patch)
        .await
        .with_context(|| format!("Failed to update question {}", id))
}

pub async fn delete_question(api: &ApiClient, id: &QuestionId) -> Result<()> {
    api.delete_question(id)
        .await
        .with_context(|| format!("Failed to delete question {}", id))
}

pub async fn fetch_user_stats(api: &ApiClient) -> Result<serde_json::Value> {
    api.fetch_user_stats()
        .await
        .context("Failed to fetch user stats")
}
