//! Handlers for the `/reviews` resource.
//!
//! One review per user per event. The rule is checked before insert and
//! backed by the `uq_reviews_event_user` constraint, so both paths produce
//! the same 409.

use axum::extract::State;
use axum::http::StatusCode;
use eventhub_core::error::CoreError;
use eventhub_core::review::{
    validate_moderation_notes, validate_rating, validate_rating_range, validate_review_body,
    ModerationStatus, DUPLICATE_REVIEW,
};
use eventhub_core::sorting::ReviewSortField;
use eventhub_core::types::DbId;
use eventhub_db::models::review::{
    CreateReview, ModerateReview, Review, ReviewFilter, UpdateReview,
};
use eventhub_db::repositories::review_repo::UQ_EVENT_USER;
use eventhub_db::repositories::{EventRepo, ReviewRepo};
use serde::Deserialize;

use crate::error::{is_unique_violation, AppError, AppResult};
use crate::extract::{Json, Path, Query};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::query::{non_empty, parse_id_filter, parse_int_filter, ListParams};
use crate::response::{DataResponse, Paginated};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Query parameters for `GET /reviews`.
#[derive(Debug, Default, Deserialize)]
pub struct ReviewListParams {
    #[serde(flatten)]
    pub list: ListParams,
    pub event_id: Option<String>,
    pub user_id: Option<String>,
    pub min_rating: Option<String>,
    pub max_rating: Option<String>,
    #[serde(alias = "moderation_status")]
    pub status: Option<String>,
}

impl ReviewListParams {
    fn filter(&self) -> AppResult<ReviewFilter> {
        let min_rating = parse_int_filter("min_rating", &self.min_rating)?;
        let max_rating = parse_int_filter("max_rating", &self.max_rating)?;
        validate_rating_range(min_rating, max_rating)?;

        Ok(ReviewFilter {
            event_id: parse_id_filter("event_id", &self.event_id)?,
            user_id: parse_id_filter("user_id", &self.user_id)?,
            min_rating,
            max_rating,
            status: non_empty(&self.status)
                .map(str::parse::<ModerationStatus>)
                .transpose()?,
        })
    }
}

/// Request body for `POST /reviews`.
#[derive(Debug, Deserialize)]
pub struct CreateReviewRequest {
    pub event_id: DbId,
    pub rating: i32,
    pub body: String,
}

/// Request body for `POST /reviews/{id}/moderate`.
#[derive(Debug, Deserialize)]
pub struct ModerateRequest {
    pub status: String,
    pub notes: Option<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/reviews
pub async fn list_reviews(
    State(state): State<AppState>,
    Query(params): Query<ReviewListParams>,
) -> AppResult<Paginated<Review>> {
    let filter = params.filter()?;
    let sort = params.list.sort::<ReviewSortField>();
    let page = params.list.page_request();

    let total = ReviewRepo::count(&state.pool, &filter).await?;
    let reviews = ReviewRepo::list(&state.pool, &filter, &sort, &page).await?;

    Ok(Paginated::new(reviews, &page, total))
}

/// GET /api/reviews/{id}
pub async fn get_review(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Review>>> {
    let review = find_review(&state, id).await?;
    Ok(Json(DataResponse { data: review }))
}

/// POST /api/reviews
///
/// The author is the authenticated user. New reviews start as `pending`.
pub async fn create_review(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<CreateReviewRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Review>>)> {
    validate_rating(input.rating)?;
    validate_review_body(&input.body)?;

    if EventRepo::find_by_id(&state.pool, input.event_id)
        .await?
        .is_none()
    {
        return Err(CoreError::NotFound {
            entity: "Event",
            id: input.event_id,
        }
        .into());
    }

    if ReviewRepo::exists_for_event_and_user(&state.pool, input.event_id, auth_user.user_id)
        .await?
    {
        return Err(CoreError::Conflict(DUPLICATE_REVIEW.into()).into());
    }

    let review = ReviewRepo::create(
        &state.pool,
        &CreateReview {
            event_id: input.event_id,
            user_id: auth_user.user_id,
            rating: input.rating,
            body: input.body,
        },
    )
    .await
    .map_err(|e| {
        if is_unique_violation(&e, UQ_EVENT_USER) {
            AppError::Core(CoreError::Conflict(DUPLICATE_REVIEW.into()))
        } else {
            AppError::Database(e)
        }
    })?;

    tracing::info!(
        review_id = review.review_id,
        event_id = review.event_id,
        user_id = review.user_id,
        "Created review"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: review })))
}

/// PATCH /api/reviews/{id}
pub async fn update_review(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateReview>,
) -> AppResult<Json<DataResponse<Review>>> {
    let existing = find_review(&state, id).await?;
    auth_user.ensure_owner_or_admin(existing.user_id, "review")?;

    if let Some(rating) = input.rating {
        validate_rating(rating)?;
    }
    if let Some(body) = input.body.as_deref() {
        validate_review_body(body)?;
    }

    let review = ReviewRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Review", id }))?;

    Ok(Json(DataResponse { data: review }))
}

/// DELETE /api/reviews/{id}
pub async fn delete_review(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let existing = find_review(&state, id).await?;
    auth_user.ensure_owner_or_admin(existing.user_id, "review")?;

    if !ReviewRepo::delete(&state.pool, id).await? {
        return Err(CoreError::NotFound { entity: "Review", id }.into());
    }
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/reviews/{id}/moderate
///
/// Record a moderation decision. The moderator and timestamp are set
/// server-side.
pub async fn moderate_review(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<ModerateRequest>,
) -> AppResult<Json<DataResponse<Review>>> {
    let status: ModerationStatus = input.status.parse()?;
    validate_moderation_notes(input.notes.as_deref())?;

    let review = ReviewRepo::moderate(
        &state.pool,
        id,
        &ModerateReview {
            status,
            notes: input.notes,
            moderator_id: admin.user_id,
        },
    )
    .await?
    .ok_or(AppError::Core(CoreError::NotFound { entity: "Review", id }))?;

    tracing::info!(review_id = id, status = %status, moderator = admin.user_id, "Moderated review");

    Ok(Json(DataResponse { data: review }))
}

async fn find_review(state: &AppState, id: DbId) -> AppResult<Review> {
    ReviewRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Review", id }))
}
