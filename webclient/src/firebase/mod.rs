pub mod client;
pub mod document;
pub mod urls;

pub use client::*;
