pub mod action;
pub mod auth;
pub mod config;
pub mod demo;
pub mod interactive;
pub mod interview;
pub mod notice;
pub mod storage;
pub mod style;
pub mod theme;
pub mod timer;

pub use crate::config::Config;
pub use crate::theme::ThemeSettings;
