pub mod authtoken;
pub mod error;
pub mod solution;

pub use authtoken::*;
pub use error::*;
pub use solution::*;

pub(crate) mod util;
