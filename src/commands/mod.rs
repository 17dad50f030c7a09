pub mod classify;
pub mod config;
pub mod rewrite;
pub mod validate;

pub use classify::*;
pub use config::*;
pub use rewrite::*;
pub use validate::*;
