//! Artist queries and view models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use showbill_common::db::models::Artist;
use showbill_common::{genres, Error, Result};

use super::{like_pattern, SearchHit, SearchResults};

/// Artist entry in the flat listing
#[derive(Debug, Serialize)]
pub struct ArtistRef {
    pub id: String,
    pub name: String,
}

/// A show on the artist detail page, enriched with the hosting venue
#[derive(Debug, Serialize)]
pub struct ArtistShowEntry {
    pub venue_id: String,
    pub venue_name: String,
    pub venue_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
}

/// Full artist record plus the past/upcoming show partition
#[derive(Debug, Serialize)]
pub struct ArtistDetail {
    pub id: String,
    pub name: String,
    pub city: Option<String>,
    pub state: Option<String>,
    pub phone: Option<String>,
    pub genres: Vec<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
    pub past_shows: Vec<ArtistShowEntry>,
    pub upcoming_shows: Vec<ArtistShowEntry>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

/// The statically declared editable field set for an artist.
///
/// Genres must be non-empty; the seeking flag reflects the submitted value
/// and defaults to false when absent.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ArtistForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub image_link: Option<String>,
    #[serde(default)]
    pub facebook_link: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub seeking_venue: bool,
    #[serde(default)]
    pub seeking_description: Option<String>,
}

/// List every artist as `{id, name}`, ordered by name then id
pub async fn list(db: &SqlitePool) -> Result<Vec<ArtistRef>> {
    let rows = sqlx::query("SELECT guid, name FROM artists ORDER BY name, guid")
        .fetch_all(db)
        .await?;

    Ok(rows
        .iter()
        .map(|row| ArtistRef {
            id: row.get("guid"),
            name: row.get("name"),
        })
        .collect())
}

/// Case-insensitive substring search over artist names
pub async fn search(db: &SqlitePool, term: &str, now: DateTime<Utc>) -> Result<SearchResults> {
    let rows = sqlx::query(
        r#"
        SELECT a.guid, a.name,
               (SELECT COUNT(*) FROM shows s
                 WHERE s.artist_id = a.guid AND s.start_time > ?) AS num_upcoming_shows
        FROM artists a
        WHERE a.name LIKE ? ESCAPE '\'
        ORDER BY a.name, a.guid
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

/// Fetch one artist with shows partitioned into past and upcoming
pub async fn get_detail(
    db: &SqlitePool,
    artist_id: &str,
    now: DateTime<Utc>,
) -> Result<ArtistDetail> {
    let artist = fetch_artist(db, artist_id).await?;

    let rows = sqlx::query(
        r#"
        SELECT s.venue_id, v.name AS venue_name, v.image_link AS venue_image_link,
               s.start_time
        FROM shows s
        JOIN venues v ON s.venue_id = v.guid
        WHERE s.artist_id = ?
        ORDER BY s.start_time, s.guid
        "#,
    )
    .bind(artist_id)
    .fetch_all(db)
    .await?;

    let mut past_shows = Vec::new();
    let mut upcoming_shows = Vec::new();
    for row in &rows {
        let entry = ArtistShowEntry {
            venue_id: row.get("venue_id"),
            venue_name: row.get("venue_name"),
            venue_image_link: row.get("venue_image_link"),
            start_time: row.get("start_time"),
        };
        if entry.start_time > now {
            upcoming_shows.push(entry);
        } else {
            past_shows.push(entry);
        }
    }

    Ok(ArtistDetail {
        id: artist.guid,
        name: artist.name,
        city: artist.city,
        state: artist.state,
        phone: artist.phone,
        genres: genres::decode(&artist.genres),
        image_link: artist.image_link,
        facebook_link: artist.facebook_link,
        website: artist.website,
        seeking_venue: artist.seeking_venue,
        seeking_description: artist.seeking_description,
        past_shows_count: past_shows.len(),
        upcoming_shows_count: upcoming_shows.len(),
        past_shows,
        upcoming_shows,
    })
}

/// Fetch one artist as editable form values (for the edit form)
pub async fn get_form(db: &SqlitePool, artist_id: &str) -> Result<ArtistForm> {
    let artist = fetch_artist(db, artist_id).await?;

    Ok(ArtistForm {
        name: artist.name,
        city: artist.city,
        state: artist.state,
        phone: artist.phone,
        genres: genres::decode(&artist.genres),
        image_link: artist.image_link,
        facebook_link: artist.facebook_link,
        website: artist.website,
        seeking_venue: artist.seeking_venue,
        seeking_description: artist.seeking_description,
    })
}

/// Create an artist from submitted form values, returning the new id
pub async fn create(db: &SqlitePool, form: &ArtistForm) -> Result<String> {
    let name = validated_name(form)?;
    let genre_list = genres::validate(&form.genres, true)?;

    let guid = Uuid::new_v4().to_string();
    let mut tx = db.begin().await?;
    sqlx::query(
        r#"
        INSERT INTO artists (guid, name, city, state, phone, genres, image_link,
                             facebook_link, website, seeking_venue, seeking_description)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&guid)
    .bind(name)
    .bind(&form.city)
    .bind(&form.state)
    .bind(&form.phone)
    .bind(genres::encode(&genre_list))
    .bind(&form.image_link)
    .bind(&form.facebook_link)
    .bind(&form.website)
    .bind(form.seeking_venue)
    .bind(&form.seeking_description)
    .execute(&mut *tx)
    .await?;
    tx.commit().await?;

    Ok(guid)
}

/// Overwrite every editable field of an existing artist (full replace)
pub async fn update(db: &SqlitePool, artist_id: &str, form: &ArtistForm) -> Result<()> {
    let name = validated_name(form)?;
    let genre_list = genres::validate(&form.genres, true)?;

    let mut tx = db.begin().await?;
    let updated = sqlx::query(
        r#"
        UPDATE artists
        SET name = ?, city = ?, state = ?, phone = ?, genres = ?, image_link = ?,
            facebook_link = ?, website = ?, seeking_venue = ?, seeking_description = ?,
            updated_at = CURRENT_TIMESTAMP
        WHERE guid = ?
        "#,
    )
    .bind(name)
    .bind(&form.city)
    .bind(&form.state)
    .bind(&form.phone)
    .bind(genres::encode(&genre_list))
    .bind(&form.image_link)
    .bind(&form.facebook_link)
    .bind(&form.website)
    .bind(form.seeking_venue)
    .bind(&form.seeking_description)
    .bind(artist_id)
    .execute(&mut *tx)
    .await?
    .rows_affected();

    if updated == 0 {
        return Err(Error::NotFound(format!("artist {}", artist_id)));
    }
    tx.commit().await?;

    Ok(())
}

async fn fetch_artist(db: &SqlitePool, artist_id: &str) -> Result<Artist> {
    sqlx::query_as::<_, Artist>("SELECT * FROM artists WHERE guid = ?")
        .bind(artist_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| Error::NotFound(format!("artist {}", artist_id)))
}

fn validated_name(form: &ArtistForm) -> Result<&str> {
    let name = form.name.trim();
    if name.is_empty() {
        return Err(Error::InvalidInput("artist name is required".to_string()));
    }
    Ok(name)
}
