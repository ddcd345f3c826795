//! Transient user-facing messages ("toasts").

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Destructive,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub description: String,
}

impl Notice {
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn error(description: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Destructive,
            title: "Error".to_owned(),
            description: description.into(),
        }
    }

    pub fn submitted() -> Self {
        Self::info("Code submitted!", "Your solution has been evaluated.")
    }

    pub fn time_up() -> Self {
        Self::info("Time's up!", "Your interview session has ended.")
    }

    pub fn question_load_failed() -> Self {
        Self::error("Failed to load question")
    }

    pub fn questions_load_failed() -> Self {
        Self::error("Failed to load questions")
    }

    pub fn history_load_failed() -> Self {
        Self::error("Failed to load session history")
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.description)
    }
}
