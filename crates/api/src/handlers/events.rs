//! Handlers for the `/events` resource.

use axum::extract::State;
use axum::http::StatusCode;
use eventhub_core::error::CoreError;
use eventhub_core::event::{
    validate_attendees, validate_event_name, validate_location, EventWindow,
};
use eventhub_core::sorting::EventSortField;
use eventhub_core::types::DbId;
use eventhub_db::models::event::{CreateEvent, Event, EventFilter, UpdateEvent};
use eventhub_db::repositories::EventRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::extract::{Json, Path, Query};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::query::{non_empty, parse_id_filter, ListParams};
use crate::response::{DataResponse, Paginated};
use crate::state::AppState;

/// Query parameters for `GET /events`.
#[derive(Debug, Default, Deserialize)]
pub struct EventListParams {
    #[serde(flatten)]
    pub list: ListParams,
    pub category_id: Option<String>,
    pub user_id: Option<String>,
    /// `upcoming` or `past`.
    pub when: Option<String>,
}

impl EventListParams {
    fn filter(&self) -> AppResult<EventFilter> {
        Ok(EventFilter {
            category_id: parse_id_filter("category_id", &self.category_id)?,
            user_id: parse_id_filter("user_id", &self.user_id)?,
            window: non_empty(&self.when).map(EventWindow::parse).transpose()?,
        })
    }
}

/// GET /api/events
pub async fn list_events(
    State(state): State<AppState>,
    Query(params): Query<EventListParams>,
) -> AppResult<Paginated<Event>> {
    let filter = params.filter()?;
    let sort = params.list.sort::<EventSortField>();
    let page = params.list.page_request();

    let total = EventRepo::count(&state.pool, &filter).await?;
    let events = EventRepo::list(&state.pool, &filter, &sort, &page).await?;

    Ok(Paginated::new(events, &page, total))
}

/// GET /api/events/{id}
pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Event>>> {
    let event = find_event(&state, id).await?;
    Ok(Json(DataResponse { data: event }))
}

/// POST /api/events
///
/// Admin-only. The authenticated admin becomes the event owner.
pub async fn create_event(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(input): Json<CreateEvent>,
) -> AppResult<(StatusCode, Json<DataResponse<Event>>)> {
    validate_event_name(&input.name)?;
    validate_location(&input.location)?;
    if let Some(attendees) = input.attendees {
        validate_attendees(attendees)?;
    }

    let event = EventRepo::create(&state.pool, admin.user_id, &input).await?;
    tracing::info!(event_id = event.event_id, owner = admin.user_id, "Created event");

    Ok((StatusCode::CREATED, Json(DataResponse { data: event })))
}

/// PATCH /api/events/{id}
pub async fn update_event(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateEvent>,
) -> AppResult<Json<DataResponse<Event>>> {
    let existing = find_event(&state, id).await?;
    auth_user.ensure_owner_or_admin(existing.user_id, "event")?;

    if let Some(name) = input.name.as_deref() {
        validate_event_name(name)?;
    }
    if let Some(location) = input.location.as_deref() {
        validate_location(location)?;
    }
    if let Some(attendees) = input.attendees {
        validate_attendees(attendees)?;
    }

    let event = EventRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Event", id }))?;

    Ok(Json(DataResponse { data: event }))
}

/// DELETE /api/events/{id}
pub async fn delete_event(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let existing = find_event(&state, id).await?;
    auth_user.ensure_owner_or_admin(existing.user_id, "event")?;

    if !EventRepo::delete(&state.pool, id).await? {
        return Err(CoreError::NotFound { entity: "Event", id }.into());
    }
    tracing::info!(event_id = id, by = auth_user.user_id, "Deleted event");
    Ok(StatusCode::NO_CONTENT)
}

async fn find_event(state: &AppState, id: DbId) -> AppResult<Event> {
    EventRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Event", id }))
}
