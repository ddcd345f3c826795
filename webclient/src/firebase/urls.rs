pub const IDENTITY_TOOLKIT_URL: &str = "https://identitytoolkit.googleapis.com/v1";
pub const SECURE_TOKEN_URL: &str = "https://securetoken.googleapis.com/v1";

pub const SIGN_IN_WITH_PASSWORD: [&str; 1] = ["accounts:signInWithPassword"];
pub const SIGN_UP: [&str; 1] = ["accounts:signUp"];
pub const SIGN_IN_WITH_IDP: [&str; 1] = ["accounts:signInWithIdp"];
pub const REFRESH_TOKEN: [&str; 1] = ["token"];

/// Where `signInWithIdp` pretends the OAuth redirect came from.
pub const IDP_REQUEST_URI: &str = "http://localhost";
pub const GOOGLE_PROVIDER_ID: &str = "google.com";

pub fn firestore_documents_url(project_id: &str) -> String {
    format!(
        "https://firestore.googleapis.com/v1/projects/{}/databases/(default)/documents",
        project_id
    )
}

pub fn user_document(uid: &str) -> [&str; 2] {
    ["users", uid]
}
