//! Core types and operations for the Skillbook backend.
//!
//! This crate is deliberately free of HTTP and database dependencies. Storage
//! backends implement [`repository::Repository`]; the HTTP layer calls the
//! operations in [`progress`] and [`notification`].

pub mod error;
pub mod notification;
pub mod progress;
pub mod query;
pub mod repository;
pub mod timestamp;
pub mod validate;

pub use error::{Error, Result};
