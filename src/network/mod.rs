//! Network layer - cancellable fetches against the search API and mock host
//!
//! The Network actor receives fetch commands and sends back settlements.

pub mod actor;
pub mod cancellable;
pub mod client;

pub use actor::NetworkActor;
pub use cancellable::{CancellableFetch, Canceller, Settlement};
