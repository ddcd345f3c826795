// exported modules
pub mod error;
pub mod http;
pub mod model;

// client impls
pub mod api;
pub mod firebase;

// re-exports
pub use api::ApiClient;
pub use error::*;
pub use firebase::FirebaseAuth;
pub use model::*;

// internal modules
mod util;
