use chrono::NaiveDate;
use tracing::{error, info, info_span, instrument};

use crate::model::game::ScheduleResponse;
use crate::model::team::{Team, TeamsResponse};
use crate::schedule::DateRange;

/// Fixed sport filter sent on every upstream query.
const SPORT_ID: u8 = 1;

/// Thin client for the upstream Stats API.
#[derive(Debug, Clone)]
pub struct StatsApi {
    base_url: String,
}

impl StatsApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url }
    }

    /// Fetch the full team list and reduce it to the shape this service republishes.
    #[instrument(level = "info", skip(self))]
    pub fn fetch_teams(&self) -> Result<Vec<Team>, String> {
        let url = format!("{}/api/v1/teams?sportIds={}", self.base_url, SPORT_ID);
        let body = self.get(&url, None)?;
        match serde_json::from_str::<TeamsResponse>(&body) {
            Ok(doc) => {
                info!(team_count = doc.teams.len(), "Fetched upstream team list");
                Ok(doc
                    .teams
                    .into_iter()
                    .map(|t| Team {
                        name: t.name,
                        abbreviation: t.abbreviation,
                        id: t.id,
                    })
                    .collect())
            }
            Err(e) => {
                error!(error = %e, "Failed to deserialize teams response");
                Err(format!("Failed to deserialize teams response: {}", e))
            }
        }
    }

    /// Query the schedule for a concrete date window. `team_ids` is the
    /// already comma-joined filter; the selector rides along as a
    /// diagnostic header.
    #[instrument(level = "info", skip(self))]
    pub fn fetch_schedule(
        &self,
        team_ids: Option<&str>,
        window: (NaiveDate, NaiveDate),
        range: DateRange,
    ) -> Result<ScheduleResponse, String> {
        let (start_date, end_date) = window;
        let mut url = format!(
            "{}/api/v1/schedule?sportIds={}&startDate={}&endDate={}",
            self.base_url, SPORT_ID, start_date, end_date
        );
        if let Some(ids) = team_ids {
            url.push_str("&teamIds=");
            url.push_str(ids);
        }
        let body = self.get(&url, Some(range.as_str()))?;
        match serde_json::from_str::<ScheduleResponse>(&body) {
            Ok(doc) => {
                let game_count: usize = doc.dates.iter().map(|d| d.games.len()).sum();
                info!(date_count = doc.dates.len(), game_count, "Fetched upstream schedule");
                Ok(doc)
            }
            Err(e) => {
                error!(error = %e, "Failed to deserialize schedule response");
                Err(format!("Failed to deserialize schedule response: {}", e))
            }
        }
    }

    /// GET a URL and read the body to a string. Non-success statuses are
    /// failures whose message carries the status code.
    fn get(&self, url: &str, schedule_type: Option<&str>) -> Result<String, String> {
        let response_result = {
            let _span = info_span!("statsapi_fetch", url = %url).entered();
            let mut request = ureq::get(url);
            if let Some(selector) = schedule_type {
                request = request.header("X-Schedule-Type", selector);
            }
            request.call()
        };
        match response_result {
            Ok(response) => {
                let mut body_reader = response.into_body();
                match body_reader.read_to_string() {
                    Ok(body) => Ok(body),
                    Err(e) => {
                        error!(error = %e, "Failed to read response body");
                        Err(format!("Failed to read response body: {}", e))
                    }
                }
            }
            Err(ureq::Error::StatusCode(code)) => {
                error!(status = code, url = %url, "Upstream responded with non-success status");
                Err(format!("API responded with status: {}", code))
            }
            Err(e) => {
                error!(error = %e, url = %url, "Request failed");
                Err(format!("Request failed: {}", e))
            }
        }
    }
}
