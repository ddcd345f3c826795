pub mod cmd;
pub mod context;
pub mod util;
