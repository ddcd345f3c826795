pub use reqwest::Url;

pub type UtcDateTime = chrono::DateTime<chrono::Utc>;
