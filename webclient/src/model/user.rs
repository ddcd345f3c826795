use serde::{Deserialize, Serialize};

use super::atom::UtcDateTime;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    strum::Display,
    strum::EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    #[default]
    Candidate,
    Admin,
}

#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub uid: String,
    pub email: String,
    pub display_name: String,
    pub role: Role,
    pub created_at: UtcDateTime,
}

/// The signed-in account, independent of whether a profile document exists.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct CurrentUser {
    pub uid: String,
    pub email: Option<String>,
}
