//! # Starboard TUI
//!
//! A terminal dashboard with two views:
//! - Popular repositories per language, from the GitHub search API
//! - A friends list with local add/remove/toggle and a bulk reset
//!
//! ## Architecture
//! Actor-based with channels:
//! - UI Layer (Ratatui) - synchronous
//! - App Layer (State machine)
//! - Network Layer (Tokio runtime, cancellable fetches)

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod pulse;
pub mod ui;
pub mod messages;
pub mod app;
pub mod network;

// Re-export commonly used types
pub use config::Config;
pub use error::FetchError;
pub use models::{Friend, Language, Repository, View};
pub use messages::{UiEvent, NetworkCommand, NetworkResponse, RenderState};
pub use app::{AppState, AppActor};
pub use network::{CancellableFetch, NetworkActor};
