use ::async_trait::async_trait;
use ::std::time::Duration;

use super::urls;
use crate::{error::*, http, model::*, util};

/// Client of the interview backend (`/questions`, `/sessions`, `/stats`).
#[derive(Clone)]
pub struct ApiClient {
    http: http::Client,
}

impl ApiClient {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    pub fn new(base_url: Url, timeout: Duration) -> Result<Self> {
        Ok(Self {
            http: http::Client::new(base_url, timeout)?,
        })
    }

    pub fn with_default_base_url() -> Result<Self> {
        let base_url = util::parse_url(urls::DEFAULT_BASE_URL)?;
        Self::new(base_url, Self::DEFAULT_TIMEOUT)
    }

    pub fn with_auth(mut self, a: &AuthToken) -> Self {
        match &a.id_token {
            Some(token) => self.set_auth(token),
            None => self.revoke_auth(),
        }
        self
    }

    pub fn set_auth(&mut self, id_token: &str) {
        self.http.set_bearer_token(id_token);
    }

    pub fn revoke_auth(&mut self) {
        self.http.clear_bearer_token();
    }

    pub fn is_authorized(&self) -> bool {
        self.http.bearer_token().is_some()
    }

    pub fn base_url(&self) -> &Url {
        self.http.base_url()
    }

    /// Exposed for inspecting what would go over the wire.
    pub fn http(&self) -> &http::Client {
        &self.http
    }

    pub async fn create_question(&self, question: &NewQuestion) -> Result<Question> {
        let resp = self.http.post(&urls::QUESTIONS)?.json(question).send().await?;
        util::read_json(resp).await
    }

    pub async fn update_question(&self, id: &QuestionId, patch: &QuestionPatch) -> Result<Question> {
        let resp = self
            .http
            .put(&urls::question(id.as_str()))?
            .json(patch)
            .send()
            .await?;
        util::read_json(resp).await
    }

    pub async fn delete_question(&self, id: &QuestionId) -> Result<()> {
        let resp = self.http.delete(&urls::question(id.as_str()))?.send().await?;
        util::ensure_success(resp)?;
        Ok(())
    }

    /// The backend does not fix a schema for user stats; it is passed through as-is.
    pub async fn fetch_user_stats(&self) -> Result<serde_json::Value> {
        let resp = self.http.get(&urls::USER_STATS)?.send().await?;
        util::read_json(resp).await
    }
}

#[async_trait]
impl ScoringService for ApiClient {
    async fn submit_code(
        &self,
        question_id: &QuestionId,
        code: &str,
        language: &str,
    ) -> Result<ScoreReport> {
        let body = SubmitRequest {
            question_id,
            code,
            language,
        };
        let resp = self.http.post(&urls::SUBMIT)?.json(&body).send().await?;
        util::read_json(resp).await
    }
}

#[async_trait]
impl QuestionSource for ApiClient {
    async fn fetch_questions(&self) -> Result<Vec<Question>> {
        let resp = self.http.get(&urls::QUESTIONS)?.send().await?;
        util::read_json(resp).await
    }

    async fn fetch_question(&self, id: &QuestionId) -> Result<Question> {
        let resp = self.http.get(&urls::question(id.as_str()))?.send().await?;
        util::read_json(resp).await
    }
}

#[async_trait]
impl SessionArchive for ApiClient {
    async fn fetch_user_sessions(&self, user_id: &str) -> Result<Vec<SessionRecord>> {
        let resp = self.http.get(&urls::user_sessions(user_id))?.send().await?;
        util::read_json(resp).await
    }

    async fn fetch_all_sessions(&self) -> Result<Vec<SessionRecord>> {
        let resp = self.http.get(&urls::SESSIONS)?.send().await?;
        util::read_json(resp).await
    }
}
