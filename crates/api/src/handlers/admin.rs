//! Handlers for the `/admin` resource (user management).
//!
//! All handlers require the `admin` role via [`RequireAdmin`].

use axum::extract::State;
use eventhub_core::error::CoreError;
use eventhub_core::roles::{is_valid_role, VALID_ROLES};
use eventhub_core::sorting::UserSortField;
use eventhub_core::types::DbId;
use eventhub_db::models::user::{UserFilter, UserResponse};
use eventhub_db::repositories::UserRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::extract::{Json, Path, Query};
use crate::middleware::rbac::RequireAdmin;
use crate::query::{non_empty, ListParams};
use crate::response::{DataResponse, Paginated};
use crate::state::AppState;

/// Query parameters for `GET /admin/users`.
#[derive(Debug, Default, Deserialize)]
pub struct UserListParams {
    #[serde(flatten)]
    pub list: ListParams,
    pub role: Option<String>,
}

/// Request body for `PATCH /admin/users/{id}`.
#[derive(Debug, Deserialize)]
pub struct UpdateRoleRequest {
    pub role: String,
}

fn check_role(role: &str) -> Result<(), CoreError> {
    if is_valid_role(role) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid role '{role}'. Must be one of: {}",
            VALID_ROLES.join(", ")
        )))
    }
}

/// GET /api/admin/users
pub async fn list_users(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(params): Query<UserListParams>,
) -> AppResult<Paginated<UserResponse>> {
    let role = non_empty(&params.role).map(str::to_string);
    if let Some(role) = role.as_deref() {
        check_role(role)?;
    }
    let filter = UserFilter { role };
    let sort = params.list.sort::<UserSortField>();
    let page = params.list.page_request();

    let total = UserRepo::count(&state.pool, &filter).await?;
    let users = UserRepo::list(&state.pool, &filter, &sort, &page).await?;

    Ok(Paginated::new(users, &page, total).map(|u| UserResponse::from(&u)))
}

/// PATCH /api/admin/users/{id}
///
/// Change a user's role. Admins cannot demote themselves.
pub async fn update_user_role(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateRoleRequest>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    check_role(&input.role)?;
    if id == admin.user_id && input.role != admin.role {
        return Err(CoreError::Validation("Admins cannot change their own role".into()).into());
    }

    let user = UserRepo::update_role(&state.pool, id, &input.role)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;

    tracing::info!(user_id = id, role = %user.role, by = admin.user_id, "Updated user role");

    Ok(Json(DataResponse {
        data: UserResponse::from(&user),
    }))
}
