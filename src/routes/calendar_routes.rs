use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};

use crate::controllers::calendar_controller::CalendarController;
use crate::dto::calendar_dto::{CalendarEntry, CalendarQuery};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_calendar_router() -> Router<AppState> {
    Router::new().route("/", get(get_calendar))
}

async fn get_calendar(
    State(state): State<AppState>,
    Query(query): Query<CalendarQuery>,
) -> Result<Json<Vec<CalendarEntry>>, AppError> {
    let entries = CalendarController::new(state.pool.clone()).list(query).await?;
    Ok(Json(entries))
}
