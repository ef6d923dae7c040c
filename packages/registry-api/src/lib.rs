//! HTTP API for the student registry.
//!
//! Provides request routing, endpoint handlers for the student
//! collection, and the hyper server loop.

pub mod handlers;
pub mod router;
pub mod server;
