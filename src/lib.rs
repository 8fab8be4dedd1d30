//! Concierge - chat backend for NLU-driven assistants
//!
//! Routes each utterance through a primary assistant with a confidence-gated
//! fallback, then answers weather questions (over several turns when needed),
//! tells jokes, or falls back to an encyclopedia snippet.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
