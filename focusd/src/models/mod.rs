//! Data models for focusd entities.

mod session;

pub use session::{Session, DEFAULT_DURATION_MINUTES, DEFAULT_ENVIRONMENT, DEFAULT_SESSION_TYPE};
