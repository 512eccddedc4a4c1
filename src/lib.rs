//! # BH Investment
//!
//! Terminal client for the BH Investment property buying business.
//!
//! ## Features
//! - Landing page with "how it works", FAQ and a contact form
//! - "Get your offer" form in a modal, also reachable from a property page
//! - Property portfolio and property detail pages
//! - Toast notifications for submission results
//!
//! ## Architecture
//! Actor-based with channels:
//! - UI Layer (Ratatui) - synchronous
//! - App Layer (State machine)
//! - Network Layer (Tokio runtime)

pub mod app;
pub mod config;
pub mod constants;
pub mod content;
pub mod error;
pub mod messages;
pub mod models;
pub mod network;
pub mod ui;

// Re-export commonly used types
pub use models::{ContactSubmission, Property};
pub use error::ApiError;
pub use config::Config;
pub use messages::{UiEvent, NetworkCommand, NetworkResponse, RenderState};
pub use app::{AppState, AppActor};
pub use network::{ApiClient, NetworkActor};
