//! Core types and trait definitions for the rolo contact backend.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

pub mod contact;
pub mod error;
pub mod service;
pub mod store;

pub use error::{Error, Result};
