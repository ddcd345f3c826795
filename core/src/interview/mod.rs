//! Timed submission flow: controller state machine, its async driver, and the
//! policies it relies on (starter templates, offline scoring fallback).

pub mod controller;
pub mod fallback;
pub mod session;
pub mod starter;

pub use controller::*;
pub use session::*;
pub use starter::starter_code;
