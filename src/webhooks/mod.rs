pub mod github;
pub mod normalizer;
pub mod pull_request;
pub mod push;
pub mod timestamp;

pub use normalizer::{normalize, WebhookEvent};
