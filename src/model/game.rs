use serde::{Deserialize, Serialize};

/// Upstream schedule document: `{ "dates": [{ "games": [...] }] }`.
#[derive(Debug, Deserialize)]
pub struct ScheduleResponse {
    #[serde(default)]
    pub dates: Vec<ScheduleDate>,
}

#[derive(Debug, Deserialize)]
pub struct ScheduleDate {
    #[serde(default)]
    pub games: Vec<GameRecord>,
}

/// One upstream game, nested the way the schedule API returns it.
#[derive(Debug, Deserialize)]
pub struct GameRecord {
    #[serde(rename = "gameDate")]
    pub game_date: String,
    pub status: GameStatus,
    pub teams: GameTeams,
}

#[derive(Debug, Deserialize)]
pub struct GameStatus {
    /// Final, Preview, Scheduled or Live. Passed through verbatim.
    #[serde(rename = "abstractGameState")]
    pub abstract_game_state: String,
}

#[derive(Debug, Deserialize)]
pub struct GameTeams {
    pub away: GameSide,
    pub home: GameSide,
}

#[derive(Debug, Deserialize)]
pub struct GameSide {
    pub team: TeamRef,
    #[serde(default)]
    pub score: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct TeamRef {
    pub id: i64,
}

/// Flat, display-ready game record served to clients.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformedGame {
    pub date: String,
    pub time: String,
    pub away_team: String,
    pub home_team: String,
    pub game_status: String,
    pub away_score: Option<i64>,
    pub home_score: Option<i64>,
}

/// Response body for `GET /api/getSchedule`.
#[derive(Debug, Serialize)]
pub struct SchedulePayload {
    pub games: Vec<TransformedGame>,
}
