pub mod api;
pub mod config;
pub mod database;
pub mod error;
pub mod server;
pub mod webhooks;

pub use error::FeedError;
