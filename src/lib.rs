//! Intelligence Dashboard Core Library
//!
//! In-memory state for the intelligence dashboard: session, feeds, alerts,
//! filters, saved views, setup wizard and connected apps. The demo binary is
//! in `src/main.rs`.

pub mod auth;
pub mod config;
pub mod error;
pub mod fixtures;
pub mod notify;
/// Application state management
///
/// Handles the state record, typed actions, domain models and identity persistence.
pub mod state;
pub mod store;

pub use error::AppError;
pub use store::{AppStore, StoreServices};
