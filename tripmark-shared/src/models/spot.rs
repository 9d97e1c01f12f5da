/// Spot model and database operations
///
/// A spot is a named geographic location owned by exactly one user. City,
/// comment and both coordinates are optional; lat and lng are nullable
/// independently of each other, so a spot may carry only one of them.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE spots (
///     id INTEGER PRIMARY KEY AUTOINCREMENT,
///     user_id INTEGER NOT NULL REFERENCES users (id),
///     name TEXT NOT NULL,
///     city TEXT,
///     comment TEXT,
///     lat REAL,
///     lng REAL
/// );
/// ```
///
/// Ownership checks do not live here. `spots::SpotService` is the only entry
/// point that enforces them; these functions are plain row operations.

use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

/// Spot model representing one saved travel location
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Spot {
    /// Unique spot ID (assigned by the database)
    pub id: i64,

    /// Owning user, assigned at creation and never transferred
    pub user_id: i64,

    /// Display name (required, non-empty)
    pub name: String,

    /// Optional city used by the listing filter
    pub city: Option<String>,

    /// Optional free-text comment
    pub comment: Option<String>,

    /// Optional latitude; stored exactly as given, no range check
    pub lat: Option<f64>,

    /// Optional longitude; stored exactly as given, no range check
    pub lng: Option<f64>,
}

/// Input for creating a new spot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSpot {
    pub user_id: i64,
    pub name: String,
    pub city: Option<String>,
    pub comment: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

/// Input for updating an existing spot
///
/// Updates overwrite every mutable column. The owner cannot change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateSpot {
    pub name: String,
    pub city: Option<String>,
    pub comment: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

impl Spot {
    /// Lists spots owned by a user, ordered by id (insertion order)
    ///
    /// A non-empty `city_filter` restricts the result to spots whose city
    /// contains the filter as a case-sensitive substring. `instr` is used
    /// instead of `LIKE` because SQLite's `LIKE` is case-insensitive for
    /// ASCII. Spots without a city never match a filter.
    pub async fn list_by_owner(
        pool: &SqlitePool,
        user_id: i64,
        city_filter: Option<&str>,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let spots = match city_filter {
            Some(fragment) if !fragment.is_empty() => {
                sqlx::query_as::<_, Spot>(
                    r#"
                    SELECT id, user_id, name, city, comment, lat, lng
                    FROM spots
                    WHERE user_id = ? AND instr(city, ?) > 0
                    ORDER BY id
                    "#,
                )
                .bind(user_id)
                .bind(fragment)
                .fetch_all(pool)
                .await?
            }
            _ => {
                sqlx::query_as::<_, Spot>(
                    r#"
                    SELECT id, user_id, name, city, comment, lat, lng
                    FROM spots
                    WHERE user_id = ?
                    ORDER BY id
                    "#,
                )
                .bind(user_id)
                .fetch_all(pool)
                .await?
            }
        };

        Ok(spots)
    }

    /// Finds a spot by ID
    pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let spot = sqlx::query_as::<_, Spot>(
            r#"
            SELECT id, user_id, name, city, comment, lat, lng
            FROM spots
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(spot)
    }

    /// Creates a new spot
    ///
    /// # Returns
    ///
    /// The newly created spot with its generated ID
    pub async fn create(pool: &SqlitePool, data: CreateSpot) -> Result<Self, sqlx::Error> {
        let spot = sqlx::query_as::<_, Spot>(
            r#"
            INSERT INTO spots (user_id, name, city, comment, lat, lng)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING id, user_id, name, city, comment, lat, lng
            "#,
        )
        .bind(data.user_id)
        .bind(data.name)
        .bind(data.city)
        .bind(data.comment)
        .bind(data.lat)
        .bind(data.lng)
        .fetch_one(pool)
        .await?;

        Ok(spot)
    }

    /// Overwrites a spot's mutable columns
    ///
    /// # Returns
    ///
    /// The updated spot, or None if no row with this id exists
    pub async fn update(
        pool: &SqlitePool,
        id: i64,
        data: UpdateSpot,
    ) -> Result<Option<Self>, sqlx::Error> {
        let spot = sqlx::query_as::<_, Spot>(
            r#"
            UPDATE spots
            SET name = ?, city = ?, comment = ?, lat = ?, lng = ?
            WHERE id = ?
            RETURNING id, user_id, name, city, comment, lat, lng
            "#,
        )
        .bind(data.name)
        .bind(data.city)
        .bind(data.comment)
        .bind(data.lat)
        .bind(data.lng)
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(spot)
    }

    /// Deletes a spot by ID
    ///
    /// # Returns
    ///
    /// True if a row was deleted, false if the spot didn't exist
    pub async fn delete(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM spots WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
