//! Step handlers
//!
//! The functions behind the scenario sentences. They are plain async/sync
//! functions over an [`ApiContext`](crate::session::ApiContext) and an
//! [`ExecutionRecord`], so any BDD runner (or a test) can bind them to step
//! text.

pub mod assertions;
pub mod context;
pub mod dispatch;
pub mod json;
pub mod login;
mod record;
pub mod table;

pub use dispatch::{replace_variables, send_request, HttpMethod, RequestOptions};
pub use login::{login_fixture, LoginCache, LoginOutcome};
pub use record::ExecutionRecord;
