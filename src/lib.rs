pub mod config;
pub mod cors;
pub mod error;
pub mod providers;
pub mod proxy;
pub mod server;

pub use config::Config;
pub use error::{ProxyError, Result};
pub use server::{build_router, AppState};
