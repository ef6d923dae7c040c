//! In-memory storage for the student registry service.
//!
//! Provides the student record model, a thread-safe keyed store,
//! and service configuration.

pub mod config;
pub mod error;
pub mod model;
pub mod store;

pub use config::RegistryConfig;
pub use error::StoreError;
pub use model::Student;
pub use store::StudentStore;
