//! Book category endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{error::AppResult, models::BookCategory, patch::UpdateRequest, AppState};

use super::AuthenticatedUser;

/// List all categories
#[utoipa::path(
    get,
    path = "/categories",
    tag = "categories",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All categories", body = Vec<BookCategory>)
    )
)]
pub async fn list_categories(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
) -> AppResult<Json<Vec<BookCategory>>> {
    let categories = state.services.categories.list().await?;
    Ok(Json(categories))
}

/// Get a category by ID
#[utoipa::path(
    get,
    path = "/categories/{id}",
    tag = "categories",
    security(("bearer_auth" = [])),
    params(
        ("id" = i64, Path, description = "Category ID")
    ),
    responses(
        (status = 200, description = "Category details", body = BookCategory),
        (status = 404, description = "Category not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_category(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i64>,
) -> AppResult<Json<BookCategory>> {
    let category = state.services.categories.get_by_id(id).await?;
    Ok(Json(category))
}

/// Create a category
#[utoipa::path(
    post,
    path = "/categories",
    tag = "categories",
    security(("bearer_auth" = [])),
    request_body = BookCategory,
    responses(
        (status = 201, description = "Category created", body = BookCategory),
        (status = 400, description = "Invalid category data", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_category(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Json(category): Json<BookCategory>,
) -> AppResult<(StatusCode, Json<BookCategory>)> {
    category.validate()?;

    let created = state.services.categories.create(category).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Replace every field of a category
#[utoipa::path(
    put,
    path = "/categories/{id}",
    tag = "categories",
    security(("bearer_auth" = [])),
    params(
        ("id" = i64, Path, description = "Category ID")
    ),
    request_body = BookCategory,
    responses(
        (status = 200, description = "Category replaced", body = BookCategory),
        (status = 400, description = "Invalid category data", body = crate::error::ErrorResponse),
        (status = 404, description = "Category not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn replace_category(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i64>,
    Json(category): Json<BookCategory>,
) -> AppResult<Json<BookCategory>> {
    category.validate()?;

    let replaced = state.services.categories.replace(id, &category).await?;
    Ok(Json(replaced))
}

/// Update some fields of a category
///
/// `createdDate` takes a `YYYY-MM-DD` date. Unknown fields are ignored.
#[utoipa::path(
    patch,
    path = "/categories/{id}",
    tag = "categories",
    security(("bearer_auth" = [])),
    params(
        ("id" = i64, Path, description = "Category ID")
    ),
    request_body = UpdateRequest,
    responses(
        (status = 200, description = "Category updated", body = BookCategory),
        (status = 400, description = "Invalid field value or relation", body = crate::error::ErrorResponse),
        (status = 404, description = "Category not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn patch_category(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i64>,
    Json(request): Json<UpdateRequest>,
) -> AppResult<Json<BookCategory>> {
    let category = state.services.categories.patch(id, &request).await?;
    Ok(Json(category))
}

/// Delete a category; its books keep existing without a category
#[utoipa::path(
    delete,
    path = "/categories/{id}",
    tag = "categories",
    security(("bearer_auth" = [])),
    params(
        ("id" = i64, Path, description = "Category ID")
    ),
    responses(
        (status = 204, description = "Category deleted"),
        (status = 404, description = "Category not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_category(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    state.services.categories.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
