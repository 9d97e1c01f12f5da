/// Spot endpoints
///
/// This module provides the listing, add/edit/delete flows, and the map:
///
/// - `GET /` - Spot listing, with an optional `city` substring filter
/// - `GET /add`, `POST /add` - Create a spot
/// - `GET /edit/:id`, `POST /edit/:id` - Update a spot
/// - `GET /delete/:id` - Confirmation page
/// - `POST /delete/:id` - Delete a spot
/// - `GET /map` - Map over every spot that has both coordinates
///
/// All handlers read the logged-in user from request extensions, injected
/// by the session auth middleware. Ownership itself is enforced in the spot
/// service; handlers only translate its errors into flashes, re-rendered
/// forms, or error pages.

use crate::{
    app::AppState,
    error::{AppError, AppResult},
    pages::{self, SpotFormValues},
    session::{self, CurrentUser},
};
use axum::{
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tripmark_shared::spots::{SpotError, SpotInput};

/// Query parameters for the listing
#[derive(Debug, Deserialize)]
pub struct CityQuery {
    /// Case-sensitive substring to filter cities by; empty means no filter
    pub city: Option<String>,
}

/// Form body shared by the add and edit submissions
///
/// Coordinates arrive as free text and are parsed by the spot service, so
/// a bad value can be echoed back into the form exactly as typed.
#[derive(Debug, Deserialize)]
pub struct SpotForm {
    pub name: String,
    pub city: Option<String>,
    pub comment: Option<String>,
    pub lat: Option<String>,
    pub lng: Option<String>,
}

impl SpotForm {
    fn into_input(self) -> SpotInput {
        SpotInput {
            name: self.name,
            city: self.city,
            comment: self.comment,
            lat: self.lat,
            lng: self.lng,
        }
    }
}

/// Marker payload embedded in the map page
#[derive(Debug, Serialize)]
struct MapMarker<'a> {
    name: &'a str,
    city: Option<&'a str>,
    lat: f64,
    lng: f64,
}

/// GET /
///
/// Lists the user's spots, narrowed by the `city` filter when one is given.
pub async fn index(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    session: Session,
    Query(query): Query<CityQuery>,
) -> AppResult<Response> {
    let spots = state.spots().list(user.id, query.city.as_deref()).await?;
    let flashes = session::take_flashes(&session).await?;

    Ok(Html(pages::render_index(
        &user.username,
        &flashes,
        query.city.as_deref(),
        &spots,
    ))
    .into_response())
}

/// GET /add
pub async fn add_page(
    Extension(user): Extension<CurrentUser>,
    session: Session,
) -> AppResult<Response> {
    let flashes = session::take_flashes(&session).await?;

    Ok(Html(pages::render_spot_form(
        &user.username,
        "Add spot",
        "/add",
        &SpotFormValues::default(),
        None,
        &flashes,
    ))
    .into_response())
}

/// POST /add
///
/// Creates the spot and redirects to the listing. Rejected input re-renders
/// the form with status 422 and everything the user typed still in place.
pub async fn add(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    session: Session,
    Form(form): Form<SpotForm>,
) -> AppResult<Response> {
    let input = form.into_input();

    match state.spots().create(user.id, input.clone()).await {
        Ok(spot) => {
            tracing::debug!(spot_id = spot.id, "Spot created");
            session::push_flash(&session, "Spot added.").await?;
            Ok(Redirect::to("/").into_response())
        }
        Err(SpotError::Validation(message)) => Ok((
            StatusCode::UNPROCESSABLE_ENTITY,
            Html(pages::render_spot_form(
                &user.username,
                "Add spot",
                "/add",
                &SpotFormValues::from_input(&input),
                Some(&message),
                &[],
            )),
        )
            .into_response()),
        Err(err) => Err(err.into()),
    }
}

/// GET /edit/:id
///
/// Prefills the form from the stored spot. Someone else's spot flashes a
/// notice and goes back to the listing; a missing id is a plain 404.
pub async fn edit_page(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    session: Session,
    Path(id): Path<i64>,
) -> AppResult<Response> {
    match state.spots().get(user.id, id).await {
        Ok(spot) => {
            let flashes = session::take_flashes(&session).await?;
            Ok(Html(pages::render_spot_form(
                &user.username,
                "Edit spot",
                &format!("/edit/{id}"),
                &SpotFormValues::from_spot(&spot),
                None,
                &flashes,
            ))
            .into_response())
        }
        Err(SpotError::Forbidden) => {
            session::push_flash(&session, "You do not have permission to edit this spot.")
                .await?;
            Ok(Redirect::to("/").into_response())
        }
        Err(err) => Err(err.into()),
    }
}

/// POST /edit/:id
pub async fn edit(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    session: Session,
    Path(id): Path<i64>,
    Form(form): Form<SpotForm>,
) -> AppResult<Response> {
    let input = form.into_input();

    match state.spots().update(user.id, id, input.clone()).await {
        Ok(spot) => {
            tracing::debug!(spot_id = spot.id, "Spot updated");
            session::push_flash(&session, "Spot updated.").await?;
            Ok(Redirect::to("/").into_response())
        }
        Err(SpotError::Validation(message)) => Ok((
            StatusCode::UNPROCESSABLE_ENTITY,
            Html(pages::render_spot_form(
                &user.username,
                "Edit spot",
                &format!("/edit/{id}"),
                &SpotFormValues::from_input(&input),
                Some(&message),
                &[],
            )),
        )
            .into_response()),
        Err(SpotError::Forbidden) => {
            session::push_flash(&session, "You do not have permission to edit this spot.")
                .await?;
            Ok(Redirect::to("/").into_response())
        }
        Err(err) => Err(err.into()),
    }
}

/// GET /delete/:id
///
/// Shows the confirmation page; the actual deletion only happens on POST.
pub async fn delete_page(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    session: Session,
    Path(id): Path<i64>,
) -> AppResult<Response> {
    match state.spots().get(user.id, id).await {
        Ok(spot) => {
            let flashes = session::take_flashes(&session).await?;
            Ok(Html(pages::render_delete_confirm(&user.username, &spot, &flashes)).into_response())
        }
        Err(SpotError::Forbidden) => {
            session::push_flash(&session, "You do not have permission to delete this spot.")
                .await?;
            Ok(Redirect::to("/").into_response())
        }
        Err(err) => Err(err.into()),
    }
}

/// POST /delete/:id
///
/// Deletes the spot. Deleting an already-deleted id is a 404, not a no-op.
pub async fn delete(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    session: Session,
    Path(id): Path<i64>,
) -> AppResult<Response> {
    match state.spots().delete(user.id, id).await {
        Ok(()) => {
            tracing::debug!(spot_id = id, "Spot deleted");
            session::push_flash(&session, "Spot deleted.").await?;
            Ok(Redirect::to("/").into_response())
        }
        Err(SpotError::Forbidden) => {
            session::push_flash(&session, "You do not have permission to delete this spot.")
                .await?;
            Ok(Redirect::to("/").into_response())
        }
        Err(err) => Err(err.into()),
    }
}

/// GET /map
///
/// Renders the map with one marker per spot that has both coordinates;
/// spots missing either coordinate are left off.
pub async fn map_page(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Response> {
    let spots = state.spots().list(user.id, None).await?;

    let markers: Vec<MapMarker> = spots
        .iter()
        .filter_map(|spot| match (spot.lat, spot.lng) {
            (Some(lat), Some(lng)) => Some(MapMarker {
                name: &spot.name,
                city: spot.city.as_deref(),
                lat,
                lng,
            }),
            _ => None,
        })
        .collect();

    let markers_json = serde_json::to_string(&markers)
        .map_err(|e| AppError::Internal(format!("Marker serialization failed: {}", e)))?;

    Ok(Html(pages::render_map(&user.username, &markers_json)).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_keeps_coordinates_as_typed() {
        let form = SpotForm {
            name: "Somewhere".to_string(),
            city: Some("Kyoto".to_string()),
            comment: None,
            lat: Some("not-a-number".to_string()),
            lng: Some("".to_string()),
        };

        let input = form.into_input();
        assert_eq!(input.name, "Somewhere");
        assert_eq!(input.lat.as_deref(), Some("not-a-number"));
        assert_eq!(input.lng.as_deref(), Some(""));
    }
}
