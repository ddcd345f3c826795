//! Endpoint catalog of the interview API, as path segments relative to the base URL.

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

pub const QUESTIONS: [&str; 1] = ["questions"];
pub const SUBMIT: [&str; 2] = ["sessions", "submit"];
pub const SESSIONS: [&str; 1] = ["sessions"];
pub const USER_STATS: [&str; 2] = ["stats", "users"];

pub fn question(id: &str) -> [&str; 2] {
    ["questions", id]
}

pub fn user_sessions(user_id: &str) -> [&str; 3] {
    ["sessions", "user", user_id]
}
