use serde::{Deserialize, Serialize};

use super::atom::UtcDateTime;
use super::question::QuestionId;

/// Result of scoring one submission: `{ score, feedback }`.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct ScoreReport {
    /// 0..=100
    pub score: u8,
    pub feedback: String,
}

/// Request body of `POST /sessions/submit`.
#[derive(Debug, PartialEq, Eq, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRequest<'a> {
    pub question_id: &'a QuestionId,
    pub code: &'a str,
    pub language: &'a str,
}

/// A completed interview attempt, as stored by the backend.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub id: String,
    pub user_id: String,
    pub question_id: QuestionId,
    pub code: String,
    pub language: String,
    pub score: u8,
    pub feedback: String,
    pub timestamp: UtcDateTime,
    /// in minutes
    pub duration: u32,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn submit_request_body() {
        let id = QuestionId::new("1");
        let body = SubmitRequest {
            question_id: &id,
            code: "print(1)",
            language: "python",
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({ "questionId": "1", "code": "print(1)", "language": "python" })
        );
    }

    #[test]
    fn session_record_from_backend_json() {
        let json = r#"{
            "id": "2",
            "userId": "u-123",
            "questionId": "2",
            "code": "function binaryTreeTraversal(root) {}",
            "language": "javascript",
            "score": 92,
            "feedback": "Excellent implementation with good edge case handling.",
            "timestamp": "2024-01-14T14:20:00Z",
            "duration": 35
        }"#;
        let s: SessionRecord = serde_json::from_str(json).unwrap();
        assert_eq!(s.user_id, "u-123");
        assert_eq!(s.score, 92);
        assert_eq!(s.duration, 35);
        assert_eq!(s.timestamp.to_rfc3339(), "2024-01-14T14:20:00+00:00");
    }
}
