//! App layer - central state management and command processing
//!
//! The App actor receives UI events and network settlements,
//! updates state, and emits network commands and render state.

pub mod state;
pub mod actor;
pub mod commands;
pub mod repos;
pub mod friends;
pub mod ticker;

pub use state::AppState;
pub use actor::AppActor;
