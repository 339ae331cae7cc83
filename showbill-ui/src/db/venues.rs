//! Venue queries and view models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use showbill_common::db::models::Venue;
use showbill_common::{genres, Error, Result};

use super::{like_pattern, SearchHit, SearchResults};

/// Venue entry within an area group
#[derive(Debug, Serialize)]
pub struct VenueSummary {
    pub id: String,
    pub name: String,
    pub num_upcoming_shows: i64,
}

/// Venues grouped under one (city, state) area
#[derive(Debug, Serialize)]
pub struct AreaVenues {
    pub city: String,
    pub state: String,
    pub venues: Vec<VenueSummary>,
}

/// A show on the venue detail page, enriched with the performing artist
#[derive(Debug, Serialize)]
pub struct VenueShowEntry {
    pub artist_id: String,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
}

/// Full venue record plus the past/upcoming show partition
#[derive(Debug, Serialize)]
pub struct VenueDetail {
    pub id: String,
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
    pub genres: Vec<String>,
    pub past_shows: Vec<VenueShowEntry>,
    pub upcoming_shows: Vec<VenueShowEntry>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

/// The statically declared editable field set for a venue.
///
/// Create and edit submissions carry exactly these fields; edit overwrites
/// all of them (full replace, not patch). An absent seeking_talent field
/// deserializes to false.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct VenueForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub image_link: Option<String>,
    #[serde(default)]
    pub facebook_link: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub seeking_talent: bool,
    #[serde(default)]
    pub seeking_description: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
}

/// List every venue, grouped by distinct (city, state) area
///
/// Groups are ordered by (city, state) and venues within a group by name,
/// so the result is stable across identical stores. Each venue carries the
/// count of its shows strictly after `now`; a venue without shows counts 0.
pub async fn list_by_area(db: &SqlitePool, now: DateTime<Utc>) -> Result<Vec<AreaVenues>> {
    let rows = sqlx::query(
        r#"
        SELECT v.guid, v.name,
               COALESCE(v.city, '') AS city,
               COALESCE(v.state, '') AS state,
               (SELECT COUNT(*) FROM shows s
                 WHERE s.venue_id = v.guid AND s.start_time > ?) AS num_upcoming_shows
        FROM venues v
        ORDER BY city, state, v.name, v.guid
        "#,
    )
    .bind(now)
    .fetch_all(db)
    .await?;

    // Rows arrive sorted by area, so grouping is a single pass over
    // consecutive runs.
    let mut areas: Vec<AreaVenues> = Vec::new();
    for row in &rows {
        let city: String = row.get("city");
        let state: String = row.get("state");
        let venue = VenueSummary {
            id: row.get("guid"),
            name: row.get("name"),
            num_upcoming_shows: row.get("num_upcoming_shows"),
        };
        match areas.last_mut() {
            Some(area) if area.city == city && area.state == state => area.venues.push(venue),
            _ => areas.push(AreaVenues {
                city,
                state,
                venues: vec![venue],
            }),
        }
    }

    Ok(areas)
}

/// Case-insensitive substring search over venue names
///
/// The empty term matches every venue. Results are ordered by name then id.
pub async fn search(db: &SqlitePool, term: &str, now: DateTime<Utc>) -> Result<SearchResults> {
    let rows = sqlx::query(
        r#"
        SELECT v.guid, v.name,
               (SELECT COUNT(*) FROM shows s
                 WHERE s.venue_id = v.guid AND s.start_time > ?) AS num_upcoming_shows
        FROM venues v
        WHERE v.name LIKE ? ESCAPE '\'
        ORDER BY v.name, v.guid
        "#,
    )
    .bind(now)
    .bind(like_pattern(term))
    .fetch_all(db)
    .await?;

    let data: Vec<SearchHit> = rows
        .iter()
        .map(|row| SearchHit {
            id: row.get("guid"),
            name: row.get("name"),
            num_upcoming_shows: row.get("num_upcoming_shows"),
        })
        .collect();

    Ok(SearchResults {
        count: data.len() as i64,
        data,
    })
}

/// Fetch one venue with its shows partitioned into past and upcoming
///
/// The same `now` classifies every show, so the partition is consistent
/// within one response: disjoint lists whose lengths sum to the venue's
/// total show count.
pub async fn get_detail(db: &SqlitePool, venue_id: &str, now: DateTime<Utc>) -> Result<VenueDetail> {
    let venue = fetch_venue(db, venue_id).await?;

    let rows = sqlx::query(
        r#"
        SELECT s.artist_id, a.name AS artist_name, a.image_link AS artist_image_link,
               s.start_time
        FROM shows s
        JOIN artists a ON s.artist_id = a.guid
        WHERE s.venue_id = ?
        ORDER BY s.start_time, s.guid
        "#,
    )
    .bind(venue_id)
    .fetch_all(db)
    .await?;

    let mut past_shows = Vec::new();
    let mut upcoming_shows = Vec::new();
    for row in &rows {
        let entry = VenueShowEntry {
            artist_id: row.get("artist_id"),
            artist_name: row.get("artist_name"),
            artist_image_link: row.get("artist_image_link"),
            start_time: row.get("start_time"),
        };
        if entry.start_time > now {
            upcoming_shows.push(entry);
        } else {
            past_shows.push(entry);
        }
    }

    Ok(VenueDetail {
        id: venue.guid,
        name: venue.name,
        city: venue.city,
        state: venue.state,
        address: venue.address,
        phone: venue.phone,
        image_link: venue.image_link,
        facebook_link: venue.facebook_link,
        description: venue.description,
        seeking_talent: venue.seeking_talent,
        seeking_description: venue.seeking_description,
        website: venue.website,
        genres: venue.genres.as_deref().map(genres::decode).unwrap_or_default(),
        past_shows_count: past_shows.len(),
        upcoming_shows_count: upcoming_shows.len(),
        past_shows,
        upcoming_shows,
    })
}

/// Fetch one venue as editable form values (for the edit form)
pub async fn get_form(db: &SqlitePool, venue_id: &str) -> Result<VenueForm> {
    let venue = fetch_venue(db, venue_id).await?;

    Ok(VenueForm {
        name: venue.name,
        city: venue.city,
        state: venue.state,
        address: venue.address,
        phone: venue.phone,
        image_link: venue.image_link,
        facebook_link: venue.facebook_link,
        description: venue.description,
        seeking_talent: venue.seeking_talent,
        seeking_description: venue.seeking_description,
        website: venue.website,
        genres: venue.genres.as_deref().map(genres::decode).unwrap_or_default(),
    })
}

/// Create a venue from submitted form values, returning the new id
pub async fn create(db: &SqlitePool, form: &VenueForm) -> Result<String> {
    let name = validated_name(form)?;
    let genre_list = genres::validate(&form.genres, false)?;

    let guid = Uuid::new_v4().to_string();
    let mut tx = db.begin().await?;
    sqlx::query(
        r#"
        INSERT INTO venues (guid, name, city, state, address, phone, image_link,
                            facebook_link, description, seeking_talent,
                            seeking_description, website, genres)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&guid)
    .bind(name)
    .bind(&form.city)
    .bind(&form.state)
    .bind(&form.address)
    .bind(&form.phone)
    .bind(&form.image_link)
    .bind(&form.facebook_link)
    .bind(&form.description)
    .bind(form.seeking_talent)
    .bind(&form.seeking_description)
    .bind(&form.website)
    .bind(genres::encode(&genre_list))
    .execute(&mut *tx)
    .await?;
    tx.commit().await?;

    Ok(guid)
}

/// Overwrite every editable field of an existing venue (full replace)
pub async fn update(db: &SqlitePool, venue_id: &str, form: &VenueForm) -> Result<()> {
    let name = validated_name(form)?;
    let genre_list = genres::validate(&form.genres, false)?;

    let mut tx = db.begin().await?;
    let updated = sqlx::query(
        r#"
        UPDATE venues
        SET name = ?, city = ?, state = ?, address = ?, phone = ?, image_link = ?,
            facebook_link = ?, description = ?, seeking_talent = ?,
            seeking_description = ?, website = ?, genres = ?,
            updated_at = CURRENT_TIMESTAMP
        WHERE guid = ?
        "#,
    )
    .bind(name)
    .bind(&form.city)
    .bind(&form.state)
    .bind(&form.address)
    .bind(&form.phone)
    .bind(&form.image_link)
    .bind(&form.facebook_link)
    .bind(&form.description)
    .bind(form.seeking_talent)
    .bind(&form.seeking_description)
    .bind(&form.website)
    .bind(genres::encode(&genre_list))
    .bind(venue_id)
    .execute(&mut *tx)
    .await?
    .rows_affected();

    if updated == 0 {
        // Uncommitted transaction rolls back on drop
        return Err(Error::NotFound(format!("venue {}", venue_id)));
    }
    tx.commit().await?;

    Ok(())
}

/// Delete a venue; its shows are removed by the FK cascade
pub async fn delete(db: &SqlitePool, venue_id: &str) -> Result<()> {
    let mut tx = db.begin().await?;
    let deleted = sqlx::query("DELETE FROM venues WHERE guid = ?")
        .bind(venue_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    if deleted == 0 {
        return Err(Error::NotFound(format!("venue {}", venue_id)));
    }
    tx.commit().await?;

    Ok(())
}

async fn fetch_venue(db: &SqlitePool, venue_id: &str) -> Result<Venue> {
    sqlx::query_as::<_, Venue>("SELECT * FROM venues WHERE guid = ?")
        .bind(venue_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| Error::NotFound(format!("venue {}", venue_id)))
}

fn validated_name(form: &VenueForm) -> Result<&str> {
    let name = form.name.trim();
    if name.is_empty() {
        return Err(Error::InvalidInput("venue name is required".to_string()));
    }
    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::testutil;
    use chrono::{Duration, Utc};

    #[tokio::test]
    async fn test_area_grouping_covers_distinct_pairs() {
        let pool = testutil::pool().await;
        testutil::insert_venue(&pool, "v1", "The Musical Hop", "San Francisco", "CA").await;
        testutil::insert_venue(&pool, "v2", "Park Square Live Music & Coffee", "San Francisco", "CA").await;
        testutil::insert_venue(&pool, "v3", "The Dueling Pianos Bar", "New York", "NY").await;

        let areas = list_by_area(&pool, Utc::now()).await.unwrap();

        let pairs: Vec<(&str, &str)> = areas
            .iter()
            .map(|a| (a.city.as_str(), a.state.as_str()))
            .collect();
        assert_eq!(pairs, vec![("New York", "NY"), ("San Francisco", "CA")]);

        assert_eq!(areas[0].venues.len(), 1);
        assert_eq!(areas[1].venues.len(), 2);
        // Within a group, venues are ordered by name
        assert_eq!(areas[1].venues[0].name, "Park Square Live Music & Coffee");
        assert_eq!(areas[1].venues[1].name, "The Musical Hop");
    }

    #[tokio::test]
    async fn test_upcoming_counts_only_future_shows() {
        let pool = testutil::pool().await;
        let now = Utc::now();
        testutil::insert_venue(&pool, "v1", "The Musical Hop", "San Francisco", "CA").await;
        testutil::insert_venue(&pool, "v2", "Park Square Live Music & Coffee", "San Francisco", "CA").await;
        testutil::insert_artist(&pool, "a1", "Guns N Petals").await;
        testutil::insert_show(&pool, "s1", "a1", "v1", now - Duration::days(30)).await;
        testutil::insert_show(&pool, "s2", "a1", "v1", now + Duration::days(30)).await;
        testutil::insert_show(&pool, "s3", "a1", "v1", now + Duration::days(60)).await;

        let areas = list_by_area(&pool, now).await.unwrap();
        assert_eq!(areas.len(), 1);

        let by_name: Vec<(&str, i64)> = areas[0]
            .venues
            .iter()
            .map(|v| (v.name.as_str(), v.num_upcoming_shows))
            .collect();
        assert_eq!(
            by_name,
            vec![
                ("Park Square Live Music & Coffee", 0),
                ("The Musical Hop", 2),
            ]
        );
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive_substring() {
        let pool = testutil::pool().await;
        testutil::insert_venue(&pool, "v1", "The Musical Hop", "San Francisco", "CA").await;
        testutil::insert_venue(&pool, "v2", "Park Square Live Music & Coffee", "San Francisco", "CA").await;

        let results = search(&pool, "hop", Utc::now()).await.unwrap();
        assert_eq!(results.count, 1);
        assert_eq!(results.data[0].name, "The Musical Hop");

        let results = search(&pool, "Music", Utc::now()).await.unwrap();
        assert_eq!(results.count, 2);

        let results = search(&pool, "", Utc::now()).await.unwrap();
        assert_eq!(results.count, 2);
    }

    #[tokio::test]
    async fn test_search_treats_wildcards_literally() {
        let pool = testutil::pool().await;
        testutil::insert_venue(&pool, "v1", "100% Live", "Austin", "TX").await;
        testutil::insert_venue(&pool, "v2", "The Musical Hop", "San Francisco", "CA").await;

        let results = search(&pool, "100%", Utc::now()).await.unwrap();
        assert_eq!(results.count, 1);
        assert_eq!(results.data[0].name, "100% Live");

        // A bare % is not a match-everything wildcard
        let results = search(&pool, "%", Utc::now()).await.unwrap();
        assert_eq!(results.count, 1);
    }

    #[tokio::test]
    async fn test_detail_partition_is_complete_and_disjoint() {
        let pool = testutil::pool().await;
        let now = Utc::now();
        testutil::insert_venue(&pool, "v1", "The Musical Hop", "San Francisco", "CA").await;
        testutil::insert_artist(&pool, "a1", "Guns N Petals").await;
        testutil::insert_show(&pool, "s1", "a1", "v1", now - Duration::days(7)).await;
        testutil::insert_show(&pool, "s2", "a1", "v1", now - Duration::days(1)).await;
        testutil::insert_show(&pool, "s3", "a1", "v1", now + Duration::days(7)).await;

        let detail = get_detail(&pool, "v1", now).await.unwrap();

        assert_eq!(detail.past_shows_count, 2);
        assert_eq!(detail.upcoming_shows_count, 1);
        assert_eq!(detail.past_shows.len() + detail.upcoming_shows.len(), 3);
        assert!(detail.past_shows.iter().all(|s| s.start_time <= now));
        assert!(detail.upcoming_shows.iter().all(|s| s.start_time > now));
        assert_eq!(detail.upcoming_shows[0].artist_name, "Guns N Petals");
        assert_eq!(
            detail.upcoming_shows[0].artist_image_link.as_deref(),
            Some("https://img.example/a.png")
        );
    }

    #[tokio::test]
    async fn test_detail_missing_venue_is_not_found() {
        let pool = testutil::pool().await;
        let err = get_detail(&pool, "nope", Utc::now()).await.unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[tokio::test]
    async fn test_create_then_fetch_round_trip() {
        let pool = testutil::pool().await;
        let form = VenueForm {
            name: "The Musical Hop".to_string(),
            city: Some("San Francisco".to_string()),
            state: Some("CA".to_string()),
            genres: vec!["Jazz".to_string(), "Folk".to_string()],
            seeking_talent: true,
            seeking_description: Some("Looking for local artists".to_string()),
            ..Default::default()
        };

        let id = create(&pool, &form).await.unwrap();
        let detail = get_detail(&pool, &id, Utc::now()).await.unwrap();

        assert_eq!(detail.name, "The Musical Hop");
        assert_eq!(detail.genres, vec!["Jazz".to_string(), "Folk".to_string()]);
        assert!(detail.seeking_talent);
        assert_eq!(detail.past_shows_count, 0);
        assert_eq!(detail.upcoming_shows_count, 0);
    }

    #[tokio::test]
    async fn test_create_requires_name() {
        let pool = testutil::pool().await;
        let err = create(&pool, &VenueForm::default()).await.unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_update_is_full_replace() {
        let pool = testutil::pool().await;
        let form = VenueForm {
            name: "The Musical Hop".to_string(),
            city: Some("San Francisco".to_string()),
            state: Some("CA".to_string()),
            phone: Some("123-123-1234".to_string()),
            genres: vec!["Jazz".to_string()],
            seeking_talent: true,
            ..Default::default()
        };
        let id = create(&pool, &form).await.unwrap();

        // Replacement omits phone and seeking_talent: both must be overwritten
        let replacement = VenueForm {
            name: "The Musical Hop (renamed)".to_string(),
            city: Some("Oakland".to_string()),
            state: Some("CA".to_string()),
            genres: vec!["Blues".to_string()],
            ..Default::default()
        };
        update(&pool, &id, &replacement).await.unwrap();

        let detail = get_detail(&pool, &id, Utc::now()).await.unwrap();
        assert_eq!(detail.name, "The Musical Hop (renamed)");
        assert_eq!(detail.city.as_deref(), Some("Oakland"));
        assert_eq!(detail.phone, None);
        assert!(!detail.seeking_talent);
        assert_eq!(detail.genres, vec!["Blues".to_string()]);
    }

    #[tokio::test]
    async fn test_update_missing_venue_is_not_found() {
        let pool = testutil::pool().await;
        let form = VenueForm {
            name: "Anything".to_string(),
            ..Default::default()
        };
        let err = update(&pool, "nope", &form).await.unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_cascades_to_shows() {
        let pool = testutil::pool().await;
        let now = Utc::now();
        testutil::insert_venue(&pool, "v1", "The Musical Hop", "San Francisco", "CA").await;
        testutil::insert_artist(&pool, "a1", "Guns N Petals").await;
        testutil::insert_show(&pool, "s1", "a1", "v1", now + Duration::days(7)).await;

        delete(&pool, "v1").await.unwrap();

        let err = get_detail(&pool, "v1", now).await.unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));

        let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM shows")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(remaining, 0);
    }

    #[tokio::test]
    async fn test_delete_missing_venue_is_not_found() {
        let pool = testutil::pool().await;
        let err = delete(&pool, "nope").await.unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }
}
