//! HTTP session layer
//!
//! [`ApiContext`] owns everything a scenario configures about its requests:
//! base URL, default headers, auth token and the value stash. It builds a
//! [`Transport`] lazily and returns buffered [`ApiResponse`]s.

mod context;
mod response;
pub mod stash;
mod transport;

pub use context::ApiContext;
pub use response::ApiResponse;
pub use stash::{Stash, StashKey, AUTH_TOKEN};
pub use transport::{Transport, TransportOptions};
