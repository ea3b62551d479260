//! Handlers for the `/categories` resource.
//!
//! Reads are public; writes require the `admin` role.

use axum::extract::State;
use axum::http::StatusCode;
use eventhub_core::category::validate_category_name;
use eventhub_core::error::CoreError;
use eventhub_core::sorting::CategorySortField;
use eventhub_core::types::DbId;
use eventhub_db::models::category::{CreateCategory, EventCategory, UpdateCategory};
use eventhub_db::repositories::CategoryRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{Json, Path, Query};
use crate::middleware::rbac::RequireAdmin;
use crate::query::ListParams;
use crate::response::{DataResponse, Paginated};
use crate::state::AppState;

/// GET /api/categories
pub async fn list_categories(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<Paginated<EventCategory>> {
    let sort = params.sort::<CategorySortField>();
    let page = params.page_request();

    let total = CategoryRepo::count(&state.pool).await?;
    let categories = CategoryRepo::list(&state.pool, &sort, &page).await?;

    Ok(Paginated::new(categories, &page, total))
}

/// GET /api/categories/{id}
pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<EventCategory>>> {
    let category = CategoryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id,
        }))?;
    Ok(Json(DataResponse { data: category }))
}

/// POST /api/categories
pub async fn create_category(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<CreateCategory>,
) -> AppResult<(StatusCode, Json<DataResponse<EventCategory>>)> {
    validate_category_name(&input.name)?;

    let category = CategoryRepo::create(&state.pool, &input).await?;
    tracing::info!(category_id = category.category_id, "Created category");

    Ok((StatusCode::CREATED, Json(DataResponse { data: category })))
}

/// PUT /api/categories/{id}
pub async fn update_category(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCategory>,
) -> AppResult<Json<DataResponse<EventCategory>>> {
    if let Some(name) = input.name.as_deref() {
        validate_category_name(name)?;
    }

    let category = CategoryRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id,
        }))?;
    Ok(Json(DataResponse { data: category }))
}

/// DELETE /api/categories/{id}
///
/// Events in the category keep existing with `category_id` set to null.
pub async fn delete_category(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !CategoryRepo::delete(&state.pool, id).await? {
        return Err(CoreError::NotFound {
            entity: "Category",
            id,
        }
        .into());
    }
    Ok(StatusCode::NO_CONTENT)
}
