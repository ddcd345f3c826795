use ::async_trait::async_trait;
use ::chrono::{Duration as ChronoDuration, Utc};
use ::reqwest::StatusCode;
use ::serde::{Deserialize, Serialize};
use ::std::time::Duration;
use ::url::Url;

use super::{document::ProfileDocument, urls::*};
use crate::{
    error::*,
    http,
    model::{credential::take_field, *},
    util,
};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FirebaseSettings {
    pub api_key: String,
    pub project_id: String,
}

/// Email/password and Google sign-in through the Firebase REST API.
/// User profiles (with role) live in the Firestore collection `users`.
pub struct FirebaseAuth {
    api_key: String,
    identity: http::Client,
    securetoken: http::Client,
    firestore: http::Client,
    token: AuthToken,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PasswordPayload<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct IdpPayload<'a> {
    post_body: String,
    request_uri: &'a str,
    return_secure_token: bool,
    return_idp_credential: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SignInResponse {
    pub id_token: String,
    pub refresh_token: String,
    /// seconds, sent as a string
    pub expires_in: String,
    pub local_id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub(crate) struct RefreshResponse {
    pub id_token: String,
    pub refresh_token: String,
    pub expires_in: String,
    pub user_id: String,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

const LOGIN_FIELDS: &[CredFieldMeta] = &[
    CredFieldMeta {
        name: "email",
        kind: CredFieldKind::Text,
    },
    CredFieldMeta {
        name: "password",
        kind: CredFieldKind::Password,
    },
];

const REGISTRATION_FIELDS: &[CredFieldMeta] = &[
    CredFieldMeta {
        name: "email",
        kind: CredFieldKind::Text,
    },
    CredFieldMeta {
        name: "password",
        kind: CredFieldKind::Password,
    },
    CredFieldMeta {
        name: "display name",
        kind: CredFieldKind::Text,
    },
];

fn expires_at(expires_in: &str, now: UtcDateTime) -> Option<UtcDateTime> {
    let secs: i64 = expires_in.trim().parse().ok()?;
    Some(now + ChronoDuration::seconds(secs))
}

/// Turns a Firebase error envelope into [`Error::Firebase`], anything else via the generic check.
async fn read_firebase_json<T: serde::de::DeserializeOwned>(resp: http::Response) -> Result<T> {
    let status = resp.status();
    if status.is_success() {
        return util::read_json(resp).await;
    }
    let requested_url = resp.url().to_string();
    let body = resp.text().await?;
    match serde_json::from_str::<ErrorEnvelope>(&body) {
        Ok(envelope) => Err(Error::Firebase {
            message: envelope.error.message,
            requested_url,
        }),
        Err(_) => Err(Error::UnexpectedResponseCode {
            got: status,
            requested_url,
        }),
    }
}

impl FirebaseAuth {
    pub fn new(settings: FirebaseSettings, timeout: Duration) -> Result<Self> {
        Self::with_endpoints(
            settings.api_key,
            util::parse_url(IDENTITY_TOOLKIT_URL)?,
            util::parse_url(SECURE_TOKEN_URL)?,
            util::parse_url(firestore_documents_url(&settings.project_id))?,
            timeout,
        )
    }

    fn with_endpoints(
        api_key: String,
        identity: Url,
        securetoken: Url,
        firestore: Url,
        timeout: Duration,
    ) -> Result<Self> {
        Ok(Self {
            api_key,
            identity: http::Client::new(identity, timeout)?,
            securetoken: http::Client::new(securetoken, timeout)?,
            firestore: http::Client::new(firestore, timeout)?,
            token: AuthToken::default(),
        })
    }

    fn key_query(&self) -> [(&'static str, &str); 1] {
        [("key", self.api_key.as_str())]
    }

    pub(crate) fn apply_sign_in(&mut self, resp: SignInResponse, now: UtcDateTime) {
        self.firestore.set_bearer_token(&resp.id_token);
        self.token = AuthToken {
            expires_at: expires_at(&resp.expires_in, now),
            id_token: Some(resp.id_token),
            refresh_token: Some(resp.refresh_token),
            uid: Some(resp.local_id),
            email: resp.email,
            profile: None,
        };
    }

    pub(crate) fn apply_refresh(&mut self, resp: RefreshResponse, now: UtcDateTime) {
        self.firestore.set_bearer_token(&resp.id_token);
        self.token.expires_at = expires_at(&resp.expires_in, now);
        self.token.id_token = Some(resp.id_token);
        self.token.refresh_token = Some(resp.refresh_token);
        self.token.uid = Some(resp.user_id);
    }

    /// Nothing is kept until [`Self::commit`]; a failed profile step leaves the user signed out.
    async fn sign_in(&self, segments: &[&str], payload: &impl Serialize) -> Result<SignInResponse> {
        let resp = self
            .identity
            .post(segments)?
            .query(&self.key_query())
            .json(payload)
            .send()
            .await?;
        read_firebase_json(resp).await
    }

    fn commit(&mut self, signed_in: SignInResponse, profile: Option<UserProfile>, now: UtcDateTime) {
        self.apply_sign_in(signed_in, now);
        self.token.profile = profile;
    }

    /// Firestore client acting as the user who just signed in.
    fn firestore_as(&self, id_token: &str) -> http::Client {
        let mut cli = self.firestore.clone();
        cli.set_bearer_token(id_token);
        cli
    }

    async fn fetch_profile(&self, id_token: &str, uid: &str) -> Result<Option<UserProfile>> {
        let resp = self
            .firestore_as(id_token)
            .get(&user_document(uid))?
            .send()
            .await?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let doc: ProfileDocument = read_firebase_json(resp).await?;
        UserProfile::try_from(doc).map(Some)
    }

    async fn save_profile(&self, id_token: &str, profile: &UserProfile) -> Result<()> {
        let doc = ProfileDocument::from(profile);
        let resp = self
            .firestore_as(id_token)
            .patch(&user_document(&profile.uid))?
            .json(&doc)
            .send()
            .await?;
        let _: serde_json::Value = read_firebase_json(resp).await?;
        Ok(())
    }

    fn new_candidate_profile(signed_in: &SignInResponse, display_name: String) -> UserProfile {
        UserProfile {
            uid: signed_in.local_id.clone(),
            email: signed_in.email.clone().unwrap_or_default(),
            display_name,
            role: Role::Candidate,
            created_at: Utc::now(),
        }
    }
}

#[async_trait]
impl Authenticator for FirebaseAuth {
    fn credential_fields(&self) -> &'static [CredFieldMeta] {
        LOGIN_FIELDS
    }

    fn registration_fields(&self) -> &'static [CredFieldMeta] {
        REGISTRATION_FIELDS
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

    async fn login(&mut self, mut cred: CredMap) -> Result<()> {
        let email = take_field(&mut cred, "email")?;
        let password = take_field(&mut cred, "password")?;
        let payload = PasswordPayload {
            email: &email,
            password: &password,
            return_secure_token: true,
        };
        let now = Utc::now();
        let signed_in = self.sign_in(&SIGN_IN_WITH_PASSWORD, &payload).await?;
        let profile = self
            .fetch_profile(&signed_in.id_token, &signed_in.local_id)
            .await?;
        if profile.is_none() {
            log::warn!("No profile document for user {}", signed_in.local_id);
        }
        self.commit(signed_in, profile, now);
        Ok(())
    }

    async fn register(&mut self, mut cred: CredMap) -> Result<()> {
        let email = take_field(&mut cred, "email")?;
        let password = take_field(&mut cred, "password")?;
        let display_name = take_field(&mut cred, "display name")?;
        let payload = PasswordPayload {
            email: &email,
            password: &password,
            return_secure_token: true,
        };
        let now = Utc::now();
        let signed_in = self.sign_in(&SIGN_UP, &payload).await?;
        let profile = Self::new_candidate_profile(&signed_in, display_name);
        self.save_profile(&signed_in.id_token, &profile).await?;
        self.commit(signed_in, Some(profile), now);
        Ok(())
    }

    async fn login_with_google(&mut self, google_id_token: &str) -> Result<()> {
        let payload = IdpPayload {
            post_body: format!(
                "id_token={}&providerId={}",
                google_id_token, GOOGLE_PROVIDER_ID
            ),
            request_uri: IDP_REQUEST_URI,
            return_secure_token: true,
            return_idp_credential: true,
        };
        let now = Utc::now();
        let signed_in = self.sign_in(&SIGN_IN_WITH_IDP, &payload).await?;
        let profile = match self
            .fetch_profile(&signed_in.id_token, &signed_in.local_id)
            .await?
        {
            Some(profile) => profile,
            None => {
                let name = signed_in
                    .display_name
                    .clone()
                    .unwrap_or_else(|| "User".to_owned());
                let profile = Self::new_candidate_profile(&signed_in, name);
                self.save_profile(&signed_in.id_token, &profile).await?;
                profile
            }
        };
        self.commit(signed_in, Some(profile), now);
        Ok(())
    }

    async fn logout(&mut self) -> Result<()> {
        // Firebase sign-out is purely local: forget the tokens.
        self.token.revoke();
        self.firestore.clear_bearer_token();
        Ok(())
    }

    async fn refresh_if_expired(&mut self, now: UtcDateTime) -> Result<bool> {
        if !self.token.is_expired(now) {
            return Ok(false);
        }
        let Some(refresh_token) = self.token.refresh_token.clone() else {
            return Err(Error::NeedLogin {
                requested_url: SECURE_TOKEN_URL.to_owned(),
            });
        };
        let form = [
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token.as_str()),
        ];
        let resp = self
            .securetoken
            .post(&REFRESH_TOKEN)?
            .query(&self.key_query())
            .form(&form)
            .send()
            .await?;
        let refreshed: RefreshResponse = read_firebase_json(resp).await?;
        self.apply_refresh(refreshed, now);
        Ok(true)
    }

    fn export_authtoken(&self) -> AuthToken {
        self.token.clone()
    }

    fn load_authtoken(&mut self, token: AuthToken) {
        match &token.id_token {
            Some(id_token) => self.firestore.set_bearer_token(id_token),
            None => self.firestore.clear_bearer_token(),
        }
        self.token = token;
    }
}
