//! Real-time room synchronization library.
//!
//! Provides the backend for a collaborative code editor: rooms holding a
//! shared code buffer, chat, presence, and signed room-access tokens.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

// shared library
pub mod common;
