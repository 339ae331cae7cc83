//! Show queries and view models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use showbill_common::db::models::Show;
use showbill_common::{Error, Result};

/// One row of the flattened show listing: the show joined to both of its
/// endpoints
#[derive(Debug, Serialize)]
pub struct ShowListing {
    pub venue_id: String,
    pub venue_name: String,
    pub artist_id: String,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
}

/// Fields accepted by the show creation form
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ShowForm {
    #[serde(default)]
    pub artist_id: String,
    #[serde(default)]
    pub venue_id: String,
    /// RFC 3339 timestamp
    #[serde(default)]
    pub start_time: String,
}

/// List every show joined with its artist and venue, ordered by start time
/// then id. No filtering, no pagination.
pub async fn list_all(db: &SqlitePool) -> Result<Vec<ShowListing>> {
    let rows = sqlx::query(
        r#"
        SELECT s.venue_id, v.name AS venue_name,
               s.artist_id, a.name AS artist_name, a.image_link AS artist_image_link,
               s.start_time
        FROM shows s
        JOIN artists a ON s.artist_id = a.guid
        JOIN venues v ON s.venue_id = v.guid
        ORDER BY s.start_time, s.guid
        "#,
    )
    .fetch_all(db)
    .await?;

    Ok(rows
        .iter()
        .map(|row| ShowListing {
            venue_id: row.get("venue_id"),
            venue_name: row.get("venue_name"),
            artist_id: row.get("artist_id"),
            artist_name: row.get("artist_name"),
            artist_image_link: row.get("artist_image_link"),
            start_time: row.get("start_time"),
        })
        .collect())
}

/// Create a show from submitted form values, returning the inserted record
///
/// Both referenced rows are verified inside the transaction before the
/// insert; a missing reference rejects the submission and nothing is
/// persisted. The FK constraints back this up at the store level.
pub async fn create(db: &SqlitePool, form: &ShowForm) -> Result<Show> {
    let start_time = parse_start_time(&form.start_time)?;

    let mut tx = db.begin().await?;

    let artist_exists: bool =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM artists WHERE guid = ?)")
            .bind(&form.artist_id)
            .fetch_one(&mut *tx)
            .await?;
    if !artist_exists {
        return Err(Error::InvalidInput(format!(
            "unknown artist_id: {}",
            form.artist_id
        )));
    }

    let venue_exists: bool =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM venues WHERE guid = ?)")
            .bind(&form.venue_id)
            .fetch_one(&mut *tx)
            .await?;
    if !venue_exists {
        return Err(Error::InvalidInput(format!(
            "unknown venue_id: {}",
            form.venue_id
        )));
    }

    let show = Show {
        guid: Uuid::new_v4().to_string(),
        artist_id: form.artist_id.clone(),
        venue_id: form.venue_id.clone(),
        start_time,
    };
    sqlx::query("INSERT INTO shows (guid, artist_id, venue_id, start_time) VALUES (?, ?, ?, ?)")
        .bind(&show.guid)
        .bind(&show.artist_id)
        .bind(&show.venue_id)
        .bind(show.start_time)
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;

    Ok(show)
}

fn parse_start_time(raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| {
            Error::InvalidInput(format!("start_time must be an RFC 3339 timestamp: {:?}", raw))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::testutil;
    use chrono::{Duration, Utc};

    #[tokio::test]
    async fn test_list_flattens_both_joins() {
        let pool = testutil::pool().await;
        let now = Utc::now();
        testutil::insert_venue(&pool, "v1", "The Musical Hop", "San Francisco", "CA").await;
        testutil::insert_artist(&pool, "a1", "Guns N Petals").await;
        testutil::insert_show(&pool, "s1", "a1", "v1", now + Duration::days(1)).await;

        let listing = list_all(&pool).await.unwrap();
        assert_eq!(listing.len(), 1);
        assert_eq!(listing[0].venue_name, "The Musical Hop");
        assert_eq!(listing[0].artist_name, "Guns N Petals");
        assert_eq!(
            listing[0].artist_image_link.as_deref(),
            Some("https://img.example/a.png")
        );
    }

    #[tokio::test]
    async fn test_list_ordered_by_start_time() {
        let pool = testutil::pool().await;
        let now = Utc::now();
        testutil::insert_venue(&pool, "v1", "The Musical Hop", "San Francisco", "CA").await;
        testutil::insert_artist(&pool, "a1", "Guns N Petals").await;
        testutil::insert_show(&pool, "s1", "a1", "v1", now + Duration::days(5)).await;
        testutil::insert_show(&pool, "s2", "a1", "v1", now - Duration::days(5)).await;

        let listing = list_all(&pool).await.unwrap();
        assert_eq!(listing.len(), 2);
        assert!(listing[0].start_time < listing[1].start_time);
    }

    #[tokio::test]
    async fn test_create_then_listed() {
        let pool = testutil::pool().await;
        testutil::insert_venue(&pool, "v1", "The Musical Hop", "San Francisco", "CA").await;
        testutil::insert_artist(&pool, "a1", "Guns N Petals").await;

        let form = ShowForm {
            artist_id: "a1".to_string(),
            venue_id: "v1".to_string(),
            start_time: "2035-06-15T20:00:00Z".to_string(),
        };
        create(&pool, &form).await.unwrap();

        let listing = list_all(&pool).await.unwrap();
        assert_eq!(listing.len(), 1);
        assert_eq!(listing[0].start_time.to_rfc3339(), "2035-06-15T20:00:00+00:00");
    }

    #[tokio::test]
    async fn test_create_rejects_unknown_artist() {
        let pool = testutil::pool().await;
        testutil::insert_venue(&pool, "v1", "The Musical Hop", "San Francisco", "CA").await;

        let form = ShowForm {
            artist_id: "ghost".to_string(),
            venue_id: "v1".to_string(),
            start_time: "2035-06-15T20:00:00Z".to_string(),
        };
        let err = create(&pool, &form).await.unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));

        // Store unchanged: no partial row
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM shows")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn test_create_rejects_unknown_venue() {
        let pool = testutil::pool().await;
        testutil::insert_artist(&pool, "a1", "Guns N Petals").await;

        let form = ShowForm {
            artist_id: "a1".to_string(),
            venue_id: "ghost".to_string(),
            start_time: "2035-06-15T20:00:00Z".to_string(),
        };
        let err = create(&pool, &form).await.unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_create_rejects_malformed_start_time() {
        let pool = testutil::pool().await;
        testutil::insert_venue(&pool, "v1", "The Musical Hop", "San Francisco", "CA").await;
        testutil::insert_artist(&pool, "a1", "Guns N Petals").await;

        let form = ShowForm {
            artist_id: "a1".to_string(),
            venue_id: "v1".to_string(),
            start_time: "next tuesday".to_string(),
        };
        let err = create(&pool, &form).await.unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }
}
