use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
};
use chrono::Local;
use std::sync::Arc;

use super::auth::StaffUser;
use super::validation::parse_id_list;
use super::{ApiError, AppState, MenuDetailDto, MenuDto, MenuListQuery, MenuRequest};
use crate::models::menu::{DEFAULT_MENU_NAME, MenuChanges, MenuDraft, MenuFilter};
use crate::services::MenuError;

impl From<MenuError> for ApiError {
    fn from(err: MenuError) -> Self {
        match err {
            MenuError::MenuNotFound(id) => Self::not_found("Menu", id),
            MenuError::OptionNotFound(id) => Self::not_found("Option", id),
            MenuError::NoMenuForDate(_) => Self::NotFound(err.to_string()),
            MenuError::Validation(_) | MenuError::UnknownOptions(_) | MenuError::DateTaken(_) => {
                Self::validation(err.to_string())
            }
            MenuError::Database(msg) => Self::DatabaseError(msg),
            MenuError::Internal(msg) => Self::internal(msg),
        }
    }
}

fn required<T>(value: Option<T>, field: &str) -> Result<T, ApiError> {
    value.ok_or_else(|| ApiError::validation(format!("{field}: This field is required")))
}

/// GET /menus
/// Newest date first. `?options=1,2` keeps menus offering any of the listed
/// options.
pub async fn list_menus(
    State(state): State<Arc<AppState>>,
    query: Result<Query<MenuListQuery>, QueryRejection>,
) -> Result<Json<Vec<MenuDto>>, ApiError> {
    let Query(query) = query?;
    let filter = MenuFilter {
        option_ids: parse_id_list("options", query.options.as_deref())?,
    };

    let menus = state.menu_service().list_menus(&filter).await?;

    Ok(Json(menus.into_iter().map(MenuDto::from).collect()))
}

/// GET /menus/{id}
pub async fn get_menu(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<MenuDetailDto>, ApiError> {
    let Path(id) = path?;
    let menu = state.menu_service().get_menu(id).await?;
    Ok(Json(MenuDetailDto::from(menu)))
}

/// GET /menus/today
pub async fn get_today_menu(
    State(state): State<Arc<AppState>>,
) -> Result<Json<MenuDetailDto>, ApiError> {
    let today = Local::now().date_naive();
    let menu = state.menu_service().get_menu_for_date(today).await?;
    Ok(Json(MenuDetailDto::from(menu)))
}

/// POST /menus
pub async fn create_menu(
    State(state): State<Arc<AppState>>,
    _staff: StaffUser,
    payload: Result<Json<MenuRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MenuDto>), ApiError> {
    let Json(payload) = payload?;

    let draft = MenuDraft {
        name: payload
            .name
            .unwrap_or_else(|| DEFAULT_MENU_NAME.to_string()),
        date: required(payload.date, "date")?,
        option_ids: payload.options.unwrap_or_default(),
    };

    let menu = state.menu_service().create_menu(draft).await?;

    Ok((StatusCode::CREATED, Json(MenuDto::from(menu))))
}

/// PATCH /menus/{id}
/// Only the provided fields change; a provided `options` list replaces the
/// current set.
pub async fn patch_menu(
    State(state): State<Arc<AppState>>,
    _staff: StaffUser,
    path: Result<Path<i32>, PathRejection>,
    payload: Result<Json<MenuRequest>, JsonRejection>,
) -> Result<Json<MenuDto>, ApiError> {
    let Path(id) = path?;
    let Json(payload) = payload?;

    let changes = MenuChanges {
        name: payload.name,
        date: payload.date,
        option_ids: payload.options,
    };

    let menu = state.menu_service().update_menu(id, changes).await?;

    Ok(Json(MenuDto::from(menu)))
}

/// PUT /menus/{id}
/// Full replacement: `date` and `options` are required, an omitted `name`
/// resets to the default.
pub async fn put_menu(
    State(state): State<Arc<AppState>>,
    _staff: StaffUser,
    path: Result<Path<i32>, PathRejection>,
    payload: Result<Json<MenuRequest>, JsonRejection>,
) -> Result<Json<MenuDto>, ApiError> {
    let Path(id) = path?;
    let Json(payload) = payload?;

    let changes = MenuChanges {
        name: Some(
            payload
                .name
                .unwrap_or_else(|| DEFAULT_MENU_NAME.to_string()),
        ),
        date: Some(required(payload.date, "date")?),
        option_ids: Some(required(payload.options, "options")?),
    };

    let menu = state.menu_service().update_menu(id, changes).await?;

    Ok(Json(MenuDto::from(menu)))
}

/// DELETE /menus/{id}
pub async fn delete_menu(
    State(state): State<Arc<AppState>>,
    _staff: StaffUser,
    path: Result<Path<i32>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = path?;
    state.menu_service().delete_menu(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
