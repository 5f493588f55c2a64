//! Axum extractors for request handling
//!
//! Custom extractors for caller identity, validation, and the message limit.

mod caller;
mod limit;
mod validated;

pub use caller::{CallerName, CALLER_HEADER};
pub use limit::MessageLimitQuery;
pub use validated::ValidatedJson;
