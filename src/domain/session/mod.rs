//! Session module - time-bounded assistant session handles.
//!
//! A v2 assistant only answers inside a session it created. Sessions go
//! stale on the provider side after a period of inactivity, so the handle is
//! renewed once it is older than the idle timeout. The timer restarts on
//! renewal only; using a session does not extend it.

mod manager;

pub use manager::{SessionHandle, SessionManager, DEFAULT_IDLE_TIMEOUT_SECS};
