//! Handlers 模块

pub mod advisor;
pub mod auth;
pub mod clients;
pub mod companies;
pub mod dashboard;
pub mod reports;
pub mod session_nav;

pub use advisor::*;
pub use auth::*;
pub use clients::*;
pub use companies::*;
pub use dashboard::*;
pub use reports::*;
pub use session_nav::*;
