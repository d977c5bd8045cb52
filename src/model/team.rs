use serde::{Deserialize, Serialize};

/// Upstream teams document: `{ "teams": [...] }`.
#[derive(Debug, Deserialize)]
pub struct TeamsResponse {
    #[serde(default)]
    pub teams: Vec<TeamRecord>,
}

/// One upstream team record. Only the fields this service republishes;
/// everything else in the payload is ignored.
#[derive(Debug, Deserialize)]
pub struct TeamRecord {
    pub id: i64,
    pub name: String,
    pub abbreviation: String,
}

/// Reduced team shape served to clients and cached by the selection store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub name: String,
    pub abbreviation: String,
    pub id: i64,
}

/// Response body for `GET /api/getTeams`.
#[derive(Debug, Serialize, Deserialize)]
pub struct TeamsPayload {
    #[serde(rename = "teamsList")]
    pub teams_list: Vec<Team>,
}
