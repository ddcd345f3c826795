use async_trait::async_trait;
use codeiv_core::action::{self, Loaded};
use codeiv_core::notice::{Notice, NoticeKind};
use codeiv_webclient::{
    Difficulty, Error, Question, QuestionId, QuestionSource, Result, SessionArchive, SessionRecord,
};

/// A backend that is down.
struct Offline;

fn offline_error() -> Error {
    Error::NeedLogin {
        requested_url: "http://localhost:5000/questions".to_owned(),
    }
}

#[async_trait]
impl QuestionSource for Offline {
    async fn fetch_questions(&self) -> Result<Vec<Question>> {
        Err(offline_error())
    }

    async fn fetch_question(&self, _id: &QuestionId) -> Result<Question> {
        Err(offline_error())
    }
}

#[async_trait]
impl SessionArchive for Offline {
    async fn fetch_user_sessions(&self, _user_id: &str) -> Result<Vec<SessionRecord>> {
        Err(offline_error())
    }

    async fn fetch_all_sessions(&self) -> Result<Vec<SessionRecord>> {
        Err(offline_error())
    }
}

struct Online(Question);

#[async_trait]
impl QuestionSource for Online {
    async fn fetch_questions(&self) -> Result<Vec<Question>> {
        Ok(vec![self.0.clone()])
    }

    async fn fetch_question(&self, _id: &QuestionId) -> Result<Question> {
        Ok(self.0.clone())
    }
}

fn fizzbuzz() -> Question {
    Question {
        id: QuestionId::new("7"),
        title: "FizzBuzz".to_owned(),
        description: "Print 1..n".to_owned(),
        difficulty: Difficulty::Easy,
        language: vec!["cpp".to_owned()],
        test_cases: vec![],
    }
}

#[tokio::test]
async fn question_falls_back_to_two_sum() {
    let Loaded { data, notice } = action::load_question(&Offline, &QuestionId::new("9")).await;
    assert_eq!(data.id, QuestionId::new("9"));
    assert_eq!(data.title, "Two Sum Problem");
    assert_eq!(data.test_cases.len(), 2);

    let notice = notice.unwrap();
    assert_eq!(notice.kind, NoticeKind::Destructive);
    assert_eq!(notice, Notice::question_load_failed());
}

#[tokio::test]
async fn question_list_falls_back_to_three_demos() {
    let loaded = action::load_questions(&Offline).await;
    assert!(loaded.is_demo());
    assert_eq!(
        loaded.data.iter().map(|q| q.title.as_str()).collect::<Vec<_>>(),
        vec![
            "Two Sum Problem",
            "Binary Tree Traversal",
            "Dynamic Programming Challenge"
        ]
    );
    assert_eq!(loaded.notice, Some(Notice::questions_load_failed()));
}

#[tokio::test]
async fn history_falls_back_to_demo_sessions() {
    let loaded = action::load_history(&Offline, "u-123").await;
    assert_eq!(loaded.notice, Some(Notice::history_load_failed()));
    assert_eq!(loaded.data.len(), 2);
    assert!(loaded.data.iter().all(|s| s.user_id == "u-123"));
}

#[tokio::test]
async fn live_data_is_used_when_available() {
    let src = Online(fizzbuzz());
    let one = action::load_question(&src, &QuestionId::new("7")).await;
    assert!(!one.is_demo());
    assert_eq!(one.data, fizzbuzz());

    let all = action::load_questions(&src).await;
    assert_eq!(all.data, vec![fizzbuzz()]);
    assert_eq!(all.notice, None);
}

#[tokio::test]
async fn admin_listing_does_not_fall_back() {
    assert!(action::fetch_all_sessions(&Offline).await.is_err());
}
