//! # Showbill Common Library
//!
//! Shared code for the Showbill booking directory:
//! - Database schema and record models
//! - Genre list encoding for the delimited-text column
//! - Configuration loading
//! - Error types
//! - Timestamp utilities

pub mod config;
pub mod db;
pub mod error;
pub mod genres;
pub mod time;

pub use error::{Error, Result};
