use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
};
use std::sync::Arc;

use super::auth::{AuthUser, StaffUser};
use super::validation::parse_flag;
use super::{ApiError, AppState, CreateOptionRequest, OptionDto, OptionListQuery};

/// GET /options
pub async fn list_options(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    query: Result<Query<OptionListQuery>, QueryRejection>,
) -> Result<Json<Vec<OptionDto>>, ApiError> {
    let Query(query) = query?;
    let assigned_only = parse_flag("assigned_only", query.assigned_only.as_deref())?;

    let options = state.menu_service().list_options(assigned_only).await?;

    Ok(Json(options.into_iter().map(OptionDto::from).collect()))
}

/// POST /options
pub async fn create_option(
    State(state): State<Arc<AppState>>,
    _staff: StaffUser,
    payload: Result<Json<CreateOptionRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<OptionDto>), ApiError> {
    let Json(payload) = payload?;

    let description = payload
        .description
        .ok_or_else(|| ApiError::validation("description: This field is required"))?;

    let option = state.menu_service().create_option(&description).await?;

    Ok((StatusCode::CREATED, Json(OptionDto::from(option))))
}

/// GET /options/{id}
pub async fn get_option(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<OptionDto>, ApiError> {
    let Path(id) = path?;
    let option = state.menu_service().get_option(id).await?;
    Ok(Json(OptionDto::from(option)))
}
