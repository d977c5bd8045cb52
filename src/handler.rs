use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::Json;
use chrono::Utc;
use chrono_tz::Tz;
use serde::Deserialize;
use tracing::{info, instrument};

use crate::directory::TeamDirectory;
use crate::error::ApiError;
use crate::model::game::SchedulePayload;
use crate::model::team::TeamsPayload;
use crate::schedule::{self, DateRange};
use crate::statsapi::StatsApi;

/// Shared state available to both route handlers. No request reads or
/// writes mutable server state; this is a client handle plus display rules.
#[derive(Debug, Clone)]
pub struct AppState {
    pub statsapi: StatsApi,
    pub display_tz: Tz,
}

/// Query parameters for `GET /api/getSchedule`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleParams {
    #[serde(default)]
    pub team_ids: Option<String>,
    #[serde(default)]
    pub date_range: DateRange,
}

/// GET /api/getTeams
///
/// Republishes the upstream team list as `{ "teamsList": [...] }`.
#[instrument(skip(state))]
pub async fn get_teams(
    State(state): State<Arc<AppState>>,
) -> Result<Json<TeamsPayload>, ApiError> {
    let api = state.statsapi.clone();
    let teams = tokio::task::spawn_blocking(move || api.fetch_teams())
        .await
        .map_err(|e| ApiError::teams(format!("task join error: {}", e)))?
        .map_err(ApiError::teams)?;
    Ok(Json(TeamsPayload { teams_list: teams }))
}

/// GET /api/getSchedule
///
/// Resolves team abbreviations, computes the date window for the requested
/// selector, queries the upstream schedule and returns the flattened games.
#[instrument(skip(state))]
pub async fn get_schedule(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ScheduleParams>,
) -> Result<Json<SchedulePayload>, ApiError> {
    let api = state.statsapi.clone();
    let tz = state.display_tz;
    let range = params.date_range;
    let team_ids = clean_team_ids(params.team_ids.as_deref());

    // The window is anchored to the UTC calendar date at request time.
    let today = Utc::now().date_naive();
    let window = range.window(today);

    let games = tokio::task::spawn_blocking(move || {
        // The directory is resolved before the schedule query on every
        // request; the response cannot be produced without it.
        let directory = TeamDirectory::from_teams(&api.fetch_teams()?);
        let response = api.fetch_schedule(team_ids.as_deref(), window, range)?;
        schedule::flatten_games(response, &directory, tz)
    })
    .await
    .map_err(|e| ApiError::schedule(format!("task join error: {}", e)))?
    .map_err(ApiError::schedule)?;

    info!(game_count = games.len(), range = range.as_str(), "Prepared schedule response");
    Ok(Json(SchedulePayload { games }))
}

/// Drop empty segments from a comma-joined id list; None when nothing remains.
fn clean_team_ids(raw: Option<&str>) -> Option<String> {
    let cleaned = raw?
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(",");
    if cleaned.is_empty() { None } else { Some(cleaned) }
}
