//! Chaster API Client Library
//!
//! An async Rust client for the Chaster REST API. Typed method calls build
//! the HTTP request (route, query, JSON body or multipart form), send it with
//! a bearer token, check the documented status code and hand back a response
//! envelope whose JSON body is decoded lazily and cached.
//!
//! # Features
//!
//! - **Resource wrappers**: conversations, locks, keyholder, shared locks,
//!   files, community events, users
//! - **Typed bodies**: lock history, shared lock settings, keyholder search,
//!   file uploads
//! - **Typed errors**: invalid arguments are rejected before any I/O;
//!   transport failures and unexpected statuses are distinct variants
//! - **Shareable**: calls return their response, so one client can serve
//!   many tasks
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use chaster_client::ChasterClient;
//! use chaster_client::types::LockListStatus;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ChasterClient::builder()
//!         .token("your_developer_token")
//!         .build()?;
//!
//!     let locks = client.locks().list(LockListStatus::Active).await?;
//!     for lock in locks.body_as_object()?.as_array().into_iter().flatten() {
//!         println!("{}", lock["_id"]);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Handling Errors
//!
//! ```rust,no_run
//! use chaster_client::{ChasterClient, ChasterError};
//!
//! # async fn run(client: ChasterClient) {
//! match client.users().profile_by_id("user-id").await {
//!     Ok(profile) => println!("{:?}", profile.body_as_map()),
//!     Err(ChasterError::UnexpectedStatus { actual, envelope, .. }) => {
//!         eprintln!("status {}: {:?}", actual, envelope.body_as_object());
//!     }
//!     Err(e) => eprintln!("{}", e),
//! }
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod auth;
pub mod client;
pub mod config;
pub mod errors;
pub mod observability;
pub mod options;
pub mod request;
pub mod response;
pub mod routing;
pub mod services;
pub mod transport;
pub mod types;

// Re-exports for convenience
pub use client::{ChasterClient, ChasterClientBuilder};
pub use config::ChasterConfig;
pub use errors::{ChasterError, ChasterResult};
pub use options::{MultipartField, QueryValue, RequestOptions};
pub use request::{path_segment, require_non_empty, validate_status, RequestCore};
pub use response::{Respondable, ResponseEnvelope};
pub use routing::compose_route;
pub use transport::{HttpTransport, TransportClient, TransportError};

/// Mock implementations for testing.
#[cfg(any(test, feature = "mocks"))]
pub mod mocks;

#[cfg(test)]
mod tests;
