/// Spot service: ownership enforcement and input validation
///
/// All business rules for spots live here so handlers and models carry none.
/// The two rules are:
///
/// - **Ownership**: reading, updating or deleting a specific spot requires
///   that the caller owns it. The check happens once, in `authorize_owner`,
///   and every per-spot operation goes through it.
/// - **Input validation**: a spot needs a non-empty name, and coordinates
///   are accepted as text and parsed here. An empty coordinate field means
///   "no coordinate"; a malformed one is a validation failure. Parsed values
///   are stored exactly as given, with no range check on lat/lng.
///
/// # Example
///
/// ```no_run
/// use tripmark_shared::spots::{SpotInput, SpotService};
/// # use sqlx::SqlitePool;
///
/// # async fn example(pool: SqlitePool) -> Result<(), Box<dyn std::error::Error>> {
/// let spots = SpotService::new(pool);
///
/// let spot = spots
///     .create(
///         1,
///         SpotInput {
///             name: "Fushimi Inari".to_string(),
///             city: Some("Kyoto".to_string()),
///             lat: Some("34.9671".to_string()),
///             lng: Some("135.7727".to_string()),
///             ..Default::default()
///         },
///     )
///     .await?;
///
/// // Another user cannot see it
/// assert!(spots.get(2, spot.id).await.is_err());
/// # Ok(())
/// # }
/// ```

use crate::models::spot::{CreateSpot, Spot, UpdateSpot};
use sqlx::SqlitePool;

/// Error type for spot operations
#[derive(Debug, thiserror::Error)]
pub enum SpotError {
    /// Input failed validation; the message is shown to the user
    #[error("{0}")]
    Validation(String),

    /// No spot with the requested id exists
    #[error("spot not found")]
    NotFound,

    /// The spot exists but belongs to another user
    #[error("spot belongs to another user")]
    Forbidden,

    /// Database error
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Raw form input for creating or updating a spot
///
/// Coordinates arrive as the text the user typed. Parsing them is part of
/// validation, so `lat=abc` comes back as a validation message instead of a
/// server error.
#[derive(Debug, Clone, Default)]
pub struct SpotInput {
    pub name: String,
    pub city: Option<String>,
    pub comment: Option<String>,
    pub lat: Option<String>,
    pub lng: Option<String>,
}

/// Input after validation, with coordinates parsed
#[derive(Debug)]
struct ValidatedInput {
    name: String,
    city: Option<String>,
    comment: Option<String>,
    lat: Option<f64>,
    lng: Option<f64>,
}

/// Spot operations scoped to an owning user
#[derive(Clone)]
pub struct SpotService {
    db: SqlitePool,
}

impl SpotService {
    /// Creates a new service over the given pool
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Lists the user's spots, optionally filtered by city
    ///
    /// The filter is a case-sensitive substring match; an empty filter string
    /// is treated as no filter.
    pub async fn list(
        &self,
        user_id: i64,
        city_filter: Option<&str>,
    ) -> Result<Vec<Spot>, SpotError> {
        Ok(Spot::list_by_owner(&self.db, user_id, city_filter).await?)
    }

    /// Validates the input and creates a spot owned by `user_id`
    pub async fn create(&self, user_id: i64, input: SpotInput) -> Result<Spot, SpotError> {
        let valid = validate_input(input)?;

        Ok(Spot::create(
            &self.db,
            CreateSpot {
                user_id,
                name: valid.name,
                city: valid.city,
                comment: valid.comment,
                lat: valid.lat,
                lng: valid.lng,
            },
        )
        .await?)
    }

    /// Fetches one spot, enforcing ownership
    pub async fn get(&self, user_id: i64, spot_id: i64) -> Result<Spot, SpotError> {
        self.authorize_owner(user_id, spot_id).await
    }

    /// Validates the input and overwrites an owned spot
    ///
    /// Ownership is checked before the payload, so a non-owner gets
    /// `Forbidden` regardless of what they submitted.
    pub async fn update(
        &self,
        user_id: i64,
        spot_id: i64,
        input: SpotInput,
    ) -> Result<Spot, SpotError> {
        self.authorize_owner(user_id, spot_id).await?;
        let valid = validate_input(input)?;

        let updated = Spot::update(
            &self.db,
            spot_id,
            UpdateSpot {
                name: valid.name,
                city: valid.city,
                comment: valid.comment,
                lat: valid.lat,
                lng: valid.lng,
            },
        )
        .await?;

        // The row can vanish between the ownership check and the update
        updated.ok_or(SpotError::NotFound)
    }

    /// Deletes an owned spot
    ///
    /// Deleting an id that no longer exists is `NotFound`, so a repeated
    /// delete of the same spot fails the second time.
    pub async fn delete(&self, user_id: i64, spot_id: i64) -> Result<(), SpotError> {
        self.authorize_owner(user_id, spot_id).await?;

        if Spot::delete(&self.db, spot_id).await? {
            Ok(())
        } else {
            Err(SpotError::NotFound)
        }
    }

    /// The single ownership gate
    ///
    /// Every per-spot operation resolves the row through this check. Absent
    /// rows are `NotFound`; rows owned by someone else are `Forbidden`.
    async fn authorize_owner(&self, user_id: i64, spot_id: i64) -> Result<Spot, SpotError> {
        let spot = Spot::find_by_id(&self.db, spot_id)
            .await?
            .ok_or(SpotError::NotFound)?;

        if spot.user_id != user_id {
            return Err(SpotError::Forbidden);
        }

        Ok(spot)
    }
}

fn validate_input(input: SpotInput) -> Result<ValidatedInput, SpotError> {
    let name = input.name.trim().to_string();
    if name.is_empty() {
        return Err(SpotError::Validation("Name is required.".to_string()));
    }

    Ok(ValidatedInput {
        name,
        city: normalize_optional(input.city),
        comment: normalize_optional(input.comment),
        lat: parse_coordinate(input.lat.as_deref(), "Latitude")?,
        lng: parse_coordinate(input.lng.as_deref(), "Longitude")?,
    })
}

/// Empty form fields mean "not provided"
fn normalize_optional(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn parse_coordinate(raw: Option<&str>, field: &str) -> Result<Option<f64>, SpotError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => text
            .parse::<f64>()
            .map(Some)
            .map_err(|_| SpotError::Validation(format!("{} must be a number.", field))),
    }
}
