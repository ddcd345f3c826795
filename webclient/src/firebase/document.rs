//! Firestore REST encodes every field as a typed value, e.g. `{"stringValue": "admin"}`.

use std::str::FromStr as _;

use serde::{Deserialize, Serialize};

use crate::{error::*, model::*};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StringValue {
    #[serde(rename = "stringValue")]
    pub string_value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimestampValue {
    #[serde(rename = "timestampValue")]
    pub timestamp_value: UtcDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileFields {
    pub uid: StringValue,
    pub email: StringValue,
    pub display_name: StringValue,
    pub role: StringValue,
    pub created_at: TimestampValue,
}

/// `users/{uid}` document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileDocument {
    pub fields: ProfileFields,
}

fn string(s: &str) -> StringValue {
    StringValue {
        string_value: s.to_owned(),
    }
}

impl From<&UserProfile> for ProfileDocument {
    fn from(p: &UserProfile) -> Self {
        Self {
            fields: ProfileFields {
                uid: string(&p.uid),
                email: string(&p.email),
                display_name: string(&p.display_name),
                role: string(&p.role.to_string()),
                created_at: TimestampValue {
                    timestamp_value: p.created_at,
                },
            },
        }
    }
}

impl TryFrom<ProfileDocument> for UserProfile {
    type Error = Error;

    fn try_from(doc: ProfileDocument) -> Result<Self> {
        let f = doc.fields;
        let role = Role::from_str(&f.role.string_value)
            .map_err(|_| Error::MalformedProfile(format!("unknown role '{}'", f.role.string_value)))?;
        Ok(UserProfile {
            uid: f.uid.string_value,
            email: f.email.string_value,
            display_name: f.display_name.string_value,
            role,
            created_at: f.created_at.timestamp_value,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const ADMIN_DOC: &str = r#"{
        "name": "projects/demo/databases/(default)/documents/users/u-1",
        "fields": {
            "uid": { "stringValue": "u-1" },
            "email": { "stringValue": "alice@example.com" },
            "displayName": { "stringValue": "Alice" },
            "role": { "stringValue": "admin" },
            "createdAt": { "timestampValue": "2024-01-15T10:30:00Z" }
        },
        "createTime": "2024-01-15T10:30:00.000000Z",
        "updateTime": "2024-01-15T10:30:00.000000Z"
    }"#;

    #[test]
    fn parse_profile_document() {
        let doc: ProfileDocument = serde_json::from_str(ADMIN_DOC).unwrap();
        let profile = UserProfile::try_from(doc).unwrap();
        assert_eq!(profile.uid, "u-1");
        assert_eq!(profile.display_name, "Alice");
        assert_eq!(profile.role, Role::Admin);
        assert_eq!(profile.created_at.to_rfc3339(), "2024-01-15T10:30:00+00:00");
    }

    #[test]
    fn unknown_role_is_rejected() {
        let json = ADMIN_DOC.replace(r#""admin""#, r#""superuser""#);
        let doc: ProfileDocument = serde_json::from_str(&json).unwrap();
        assert!(matches!(
            UserProfile::try_from(doc),
            Err(Error::MalformedProfile(_))
        ));
    }

    #[test]
    fn profile_is_written_with_typed_fields() {
        let doc: ProfileDocument = serde_json::from_str(ADMIN_DOC).unwrap();
        let profile = UserProfile::try_from(doc).unwrap();
        let v = serde_json::to_value(ProfileDocument::from(&profile)).unwrap();
        assert_eq!(v["fields"]["role"]["stringValue"], "admin");
        assert_eq!(v["fields"]["displayName"]["stringValue"], "Alice");
        assert!(v["fields"]["createdAt"]["timestampValue"].is_string());
    }
}
