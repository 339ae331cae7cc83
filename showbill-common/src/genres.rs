//! Genre list encoding
//!
//! Genres are stored as a single comma-delimited TEXT column. Encoding trims
//! whitespace and drops empty entries; decoding is the inverse, so a round
//! trip through the column normalizes the list.

/// Delimiter used in the stored column
const SEPARATOR: char = ',';

/// Encode a genre list into the delimited column representation
pub fn encode(genres: &[String]) -> String {
    genres
        .iter()
        .map(|g| g.trim())
        .filter(|g| !g.is_empty())
        .collect::<Vec<_>>()
        .join(&SEPARATOR.to_string())
}

/// Decode the delimited column representation into a genre list
pub fn decode(raw: &str) -> Vec<String> {
    raw.split(SEPARATOR)
        .map(|g| g.trim())
        .filter(|g| !g.is_empty())
        .map(|g| g.to_string())
        .collect()
}

/// Validate a submitted genre list, returning the normalized entries.
///
/// `required` enforces the non-empty rule (artists must carry at least one
/// genre; venues may have none).
pub fn validate(genres: &[String], required: bool) -> crate::Result<Vec<String>> {
    let normalized: Vec<String> = genres
        .iter()
        .map(|g| g.trim().to_string())
        .filter(|g| !g.is_empty())
        .collect();

    if required && normalized.is_empty() {
        return Err(crate::Error::InvalidInput(
            "at least one genre is required".to_string(),
        ));
    }

    Ok(normalized)
}
