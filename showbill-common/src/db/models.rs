//! Database record models
//!
//! Raw rows as stored; view models derived from these live next to the
//! queries that shape them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A venue record. `genres` holds the delimited column text; use
/// [`crate::genres::decode`] to get the list form.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Venue {
    pub guid: String,
    pub name: String,
    pub city: Option<String>,
    pub state: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub description: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
    pub website: Option<String>,
    pub genres: Option<String>,
}

/// An artist record. `genres` is NOT NULL for artists.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Artist {
    pub guid: String,
    pub name: String,
    pub city: Option<String>,
    pub state: Option<String>,
    pub phone: Option<String>,
    pub genres: String,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

/// A show: one artist at one venue at one point in time
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Show {
    pub guid: String,
    pub artist_id: String,
    pub venue_id: String,
    pub start_time: DateTime<Utc>,
}
