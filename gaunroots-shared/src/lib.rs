#![cfg_attr(not(test), forbid(unsafe_code))]

//! Shared building blocks for the Gaun Roots clients: the wire models, the
//! session repository contract, phone validation, configuration, and the
//! REST gateway every front end talks through.

pub mod api;
pub mod config;
pub mod models;
pub mod session;
pub mod validation;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use api::{ApiError, ApiResult, GaunRootsClient};
pub use models::{RecordId, SessionRecord, UserKind};
pub use session::{MemorySessionStore, SESSION_STORAGE_KEY, SessionError, SessionRepository};
