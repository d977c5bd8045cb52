use chrono::{DateTime, Duration, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::directory::TeamDirectory;
use crate::model::game::{GameRecord, ScheduleResponse, TransformedGame};

/// Relative window selectors accepted by the schedule endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateRange {
    #[default]
    Today,
    Next7,
    #[serde(alias = "prev7")]
    Previous7,
    Upcoming,
    Previous,
}

impl DateRange {
    pub fn as_str(&self) -> &'static str {
        match self {
            DateRange::Today => "today",
            DateRange::Next7 => "next7",
            DateRange::Previous7 => "previous7",
            DateRange::Upcoming => "upcoming",
            DateRange::Previous => "previous",
        }
    }

    /// Resolve the selector to concrete start/end dates relative to `today`.
    pub fn window(self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        match self {
            DateRange::Today => (today, today),
            DateRange::Next7 => (today + Duration::days(1), today + Duration::days(7)),
            DateRange::Previous7 => (today - Duration::days(7), today - Duration::days(1)),
            DateRange::Upcoming => (today, season_end()),
            DateRange::Previous => (season_start(), today),
        }
    }
}

/// Fixed season bounds used by the open-ended selectors.
fn season_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 27).expect("valid season start date")
}

fn season_end() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 9, 28).expect("valid season end date")
}

/// Flatten `dates[].games[]` into one display-ready list, preserving the
/// upstream ordering (date-major, then game-major within a date).
pub fn flatten_games(
    response: ScheduleResponse,
    directory: &TeamDirectory,
    tz: Tz,
) -> Result<Vec<TransformedGame>, String> {
    let mut games = Vec::new();
    for date in response.dates {
        for game in date.games {
            games.push(transform_game(game, directory, tz)?);
        }
    }
    Ok(games)
}

fn transform_game(
    game: GameRecord,
    directory: &TeamDirectory,
    tz: Tz,
) -> Result<TransformedGame, String> {
    let local = parse_game_date(&game.game_date)?.with_timezone(&tz);
    Ok(TransformedGame {
        date: local.format("%a, %b %-d").to_string(),
        time: local.format("%-I:%M %p").to_string(),
        away_team: resolve_abbreviation(directory, game.teams.away.team.id),
        home_team: resolve_abbreviation(directory, game.teams.home.team.id),
        game_status: game.status.abstract_game_state,
        away_score: normalize_score(game.teams.away.score),
        home_score: normalize_score(game.teams.home.score),
    })
}

/// Unknown ids resolve to an empty abbreviation rather than an error.
fn resolve_abbreviation(directory: &TeamDirectory, id: i64) -> String {
    directory.lookup(id).unwrap_or("").to_string()
}

/// Presence-aware score check: a present 0 is a real score; absent or
/// negative values become null.
pub fn normalize_score(score: Option<i64>) -> Option<i64> {
    match score {
        Some(s) if s >= 0 => Some(s),
        _ => None,
    }
}

fn parse_game_date(raw: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| {
            chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
                .map(|naive| chrono::TimeZone::from_utc_datetime(&Utc, &naive))
        })
        .map_err(|e| {
            error!(error = %e, game_date = %raw, "Failed to parse game date");
            format!("Failed to parse game date '{}': {}", raw, e)
        })
}
