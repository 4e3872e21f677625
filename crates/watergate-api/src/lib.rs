// watergate-api: Async Rust client for the Watergate Sonic local HTTP API

mod auto_shut_off;
mod client;
mod control;
mod device;
pub mod error;
pub mod media_type;
pub mod models;
pub mod transport;

pub use client::LocalClient;
pub use error::{Error, Operation};
pub use models::webhook::WebhookEvent;
pub use transport::{RetryPolicy, TransportConfig};
