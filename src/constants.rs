//! Application constants
//!
//! Centralized location for endpoints, timings and other defaults.

use std::time::Duration;

/// Base URL of the repository search API
pub const DEFAULT_SEARCH_BASE_URL: &str = "https://api.github.com";

/// Mock data host serving the friends list as `{ "data": [...] }`
pub const DEFAULT_FRIENDS_URL: &str = "https://my-json-server.typicode.com/starboard-tui/mock/db";

/// Upper bound on a repository search request
pub const DEFAULT_SEARCH_TIMEOUT_SECS: u64 = 10;

/// Loading indicator tick
pub const LOADING_TICK: Duration = Duration::from_millis(300);

/// Period of the decorative progress bar
pub const PROGRESS_PERIOD: Duration = Duration::from_secs(3);

/// Dots appended to "Loading" before the text resets
pub const LOADING_MAX_DOTS: u32 = 3;

pub const LOADING_TEXT: &str = "Loading";

/// Reason attached when a language switch supersedes a search
pub const CANCEL_LANGUAGE_SWITCH: &str = "Cancelled by new language selection";

/// Reason attached when a reset supersedes a friends fetch
pub const CANCEL_RESET: &str = "Cancelled by reset";

/// Reason attached when a view is mounted again with a fetch in flight
pub const CANCEL_REMOUNT: &str = "Cancelled by view remount";

/// Reason attached when a view is deactivated with a fetch in flight
pub const CANCEL_DEACTIVATE: &str = "Cancelled by view deactivation";

/// Log file written in the working directory
pub const LOG_FILE: &str = "starboard.log";

/// Application name
pub const APP_NAME: &str = "Starboard";

/// Sent with every request; the search API rejects anonymous agents
pub const USER_AGENT: &str = concat!("starboard-tui/", env!("CARGO_PKG_VERSION"));
