use axum::{
    Extension, Json,
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
};
use std::sync::Arc;

use super::auth::AuthUser;
use super::validation::{parse_gadget_id, parse_json_body, parse_status, validate_gadget_name};
use super::{
    ApiError, AppState, CreateGadgetRequest, GadgetDto, GadgetListItem, GadgetMessageResponse,
    GadgetNameQuery, ListGadgetsQuery, SelfDestructResponse, UpdateGadgetRequest,
};
use crate::domain::flair;
use crate::services::GadgetUpdate;

/// GET /gadgets?status=
///
/// An unknown `status` is rejected with 400 rather than matching nothing.
pub async fn list_gadgets(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListGadgetsQuery>,
) -> Result<Json<Vec<GadgetListItem>>, ApiError> {
    let status = parse_status(query.status.as_deref())?;
    let gadgets = state.gadget_service().list(status).await?;

    let mut rng = rand::rng();
    let items = gadgets
        .into_iter()
        .map(|gadget| GadgetListItem {
            gadget: GadgetDto::from(gadget),
            mission_success_probability: flair::mission_success_probability(&mut rng),
        })
        .collect();

    Ok(Json(items))
}

/// POST /gadgets
pub async fn create_gadget(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    body: Bytes,
) -> Result<(StatusCode, Json<GadgetDto>), ApiError> {
    let payload: CreateGadgetRequest = parse_json_body(&body)?;

    let gadget = state.gadget_service().create(payload.name).await?;
    tracing::debug!(user = user.username(), id = %gadget.id, "Gadget issued");

    Ok((StatusCode::CREATED, Json(GadgetDto::from(gadget))))
}

/// PATCH /gadgets?name=
pub async fn update_gadget(
    State(state): State<Arc<AppState>>,
    Query(query): Query<GadgetNameQuery>,
    body: Bytes,
) -> Result<Json<GadgetMessageResponse>, ApiError> {
    let name = validate_gadget_name(query.name.as_deref())?;
    let payload: UpdateGadgetRequest = parse_json_body(&body)?;

    let changes = GadgetUpdate {
        new_name: payload.new_name,
        status: parse_status(payload.status.as_deref())?,
    };

    let gadget = state
        .gadget_service()
        .update(name, changes)
        .await
        .map_err(ApiError::with_details("Error updating gadget"))?;

    Ok(Json(GadgetMessageResponse {
        message: "Gadget updated successfully".to_string(),
        gadget: gadget.into(),
    }))
}

/// DELETE /gadgets?name=
///
/// Retires the gadget; rows are never removed.
pub async fn decommission_gadget(
    State(state): State<Arc<AppState>>,
    Query(query): Query<GadgetNameQuery>,
) -> Result<Json<GadgetMessageResponse>, ApiError> {
    let name = validate_gadget_name(query.name.as_deref())?;

    let gadget = state
        .gadget_service()
        .decommission(name)
        .await
        .map_err(ApiError::with_details("Error decommissioning gadget"))?;

    Ok(Json(GadgetMessageResponse {
        message: "Gadget successfully decommissioned".to_string(),
        gadget: gadget.into(),
    }))
}

/// POST /gadgets/{id}/self-destruct
pub async fn self_destruct(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<SelfDestructResponse>, ApiError> {
    let id = parse_gadget_id(&id)?;
    let gadget = state.gadget_service().self_destruct(id).await?;

    Ok(Json(SelfDestructResponse {
        success: true,
        message: format!("Self-destruct sequence activated for {}", gadget.name),
        confirmation_code: flair::confirmation_code(&mut rand::rng()),
    }))
}
