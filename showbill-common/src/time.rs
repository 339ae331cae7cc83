//! Timestamp utilities
//!
//! Handlers evaluate "now" exactly once per request and pass it down to the
//! query layer so every past/upcoming classification within one response uses
//! the same instant.

use chrono::{DateTime, Utc};

/// Get current UTC timestamp
pub fn now() -> DateTime<Utc> {
    Utc::now()
}
