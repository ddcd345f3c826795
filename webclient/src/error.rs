use reqwest::StatusCode;

pub type Result<T> = ::std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Need login while accessing to {requested_url}")]
    NeedLogin { requested_url: String },

    #[error("Missing credential field '{0}'")]
    MissingCredential(&'static str),

    #[error("Failed to parse as URL '{url}'")]
    InvalidSyntaxUrl {
        url: String,

        #[source]
        source: url::ParseError,
    },

    #[error("URL cannot be used as a base of API endpoints: '{0}'")]
    CannotBeABase(String),

    #[error("Unexpected response code '{got}' while requesting to {requested_url}")]
    UnexpectedResponseCode {
        got: StatusCode,
        requested_url: String,
    },

    #[error("Firebase rejected the request to {requested_url}: {message}")]
    Firebase {
        message: String,
        requested_url: String,
    },

    #[error("Malformed user profile document: {0}")]
    MalformedProfile(String),

    #[error("Http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

