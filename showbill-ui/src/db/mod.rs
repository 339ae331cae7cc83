//! Query and aggregation layer
//!
//! Shapes relational rows into the view models the pages render: area
//! grouping, name search, past/upcoming partitions, and the flattened show
//! listing. Functions take the pool plus, where classification depends on
//! time, a `now` instant the handler evaluated once for the whole request.

pub mod artists;
pub mod shows;
pub mod venues;

use serde::Serialize;

/// One name-search hit with its upcoming-show count
#[derive(Debug, Serialize)]
pub struct SearchHit {
    pub id: String,
    pub name: String,
    pub num_upcoming_shows: i64,
}

/// Name-search response: total count plus per-hit data
#[derive(Debug, Serialize)]
pub struct SearchResults {
    pub count: i64,
    pub data: Vec<SearchHit>,
}

/// Build a LIKE pattern matching the term as a literal substring anywhere in
/// the name. LIKE metacharacters in the term are escaped; the empty term
/// yields `%%`, which matches every name.
fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}
