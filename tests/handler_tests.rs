use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::Utc;
use mockito::Matcher;

use baseball_schedule_api::handler::{AppState, ScheduleParams, get_schedule, get_teams};
use baseball_schedule_api::schedule::DateRange;
use baseball_schedule_api::statsapi::StatsApi;

const TEAMS_BODY: &str = r#"{
  "teams": [
    { "id": 147, "name": "New York Yankees", "abbreviation": "NYY", "teamName": "Yankees" },
    { "id": 111, "name": "Boston Red Sox", "abbreviation": "BOS", "teamName": "Red Sox" }
  ]
}"#;

fn state_for(server: &mockito::ServerGuard) -> axum::extract::State<Arc<AppState>> {
    axum::extract::State(Arc::new(AppState {
        statsapi: StatsApi::new(server.url()),
        display_tz: chrono_tz::UTC,
    }))
}

fn schedule_query(team_ids: Option<&str>, date_range: DateRange) -> axum::extract::Query<ScheduleParams> {
    axum::extract::Query(ScheduleParams {
        team_ids: team_ids.map(str::to_string),
        date_range,
    })
}

#[tokio::test]
async fn schedule_end_to_end_transforms_one_game() {
    let mut server = mockito::Server::new_async().await;
    let _teams = server
        .mock("GET", "/api/v1/teams")
        .match_query(Matcher::UrlEncoded("sportIds".into(), "1".into()))
        .with_body(TEAMS_BODY)
        .create_async()
        .await;

    let today = Utc::now().date_naive();
    let schedule_body = serde_json::json!({
        "dates": [{ "games": [{
            "gameDate": format!("{}T17:05:00Z", today),
            "status": { "abstractGameState": "Final" },
            "teams": {
                "away": { "team": { "id": 147 }, "score": 5 },
                "home": { "team": { "id": 111 }, "score": 3 }
            }
        }]}]
    });
    let schedule_mock = server
        .mock("GET", "/api/v1/schedule")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("sportIds".into(), "1".into()),
            Matcher::UrlEncoded("teamIds".into(), "147".into()),
            Matcher::UrlEncoded("startDate".into(), today.to_string()),
            Matcher::UrlEncoded("endDate".into(), today.to_string()),
        ]))
        .match_header("X-Schedule-Type", "today")
        .with_body(schedule_body.to_string())
        .create_async()
        .await;

    let response = get_schedule(
        state_for(&server),
        schedule_query(Some("147"), DateRange::Today),
    )
    .await
    .expect("schedule request should succeed");

    schedule_mock.assert_async().await;

    let games = &response.0.games;
    assert_eq!(games.len(), 1);
    let game = &games[0];
    assert_eq!(game.date, today.format("%a, %b %-d").to_string());
    assert_eq!(game.time, "5:05 PM");
    assert_eq!(game.away_team, "NYY");
    assert_eq!(game.home_team, "BOS");
    assert_eq!(game.game_status, "Final");
    assert_eq!(game.away_score, Some(5));
    assert_eq!(game.home_score, Some(3));
}

#[tokio::test]
async fn schedule_upstream_503_yields_error_envelope() {
    let mut server = mockito::Server::new_async().await;
    let _teams = server
        .mock("GET", "/api/v1/teams")
        .match_query(Matcher::Any)
        .with_body(TEAMS_BODY)
        .create_async()
        .await;
    let _schedule = server
        .mock("GET", "/api/v1/schedule")
        .match_query(Matcher::Any)
        .with_status(503)
        .create_async()
        .await;

    let err = get_schedule(state_for(&server), schedule_query(None, DateRange::Today))
        .await
        .err()
        .expect("expected the schedule request to fail");

    assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(err.error, "Failed to fetch schedule data");
    assert!(err.message.contains("503"), "message was: {}", err.message);

    let response = err.into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn schedule_fails_when_team_directory_fetch_fails() {
    let mut server = mockito::Server::new_async().await;
    let _teams = server
        .mock("GET", "/api/v1/teams")
        .match_query(Matcher::Any)
        .with_status(500)
        .create_async()
        .await;

    let err = get_schedule(state_for(&server), schedule_query(None, DateRange::Today))
        .await
        .err()
        .expect("expected the schedule request to fail");

    assert_eq!(err.error, "Failed to fetch schedule data");
    assert!(err.message.contains("500"), "message was: {}", err.message);
}

#[tokio::test]
async fn teams_route_republishes_reduced_shape() {
    let mut server = mockito::Server::new_async().await;
    let _teams = server
        .mock("GET", "/api/v1/teams")
        .match_query(Matcher::UrlEncoded("sportIds".into(), "1".into()))
        .with_body(TEAMS_BODY)
        .create_async()
        .await;

    let payload = get_teams(state_for(&server))
        .await
        .expect("teams request should succeed")
        .0;

    assert_eq!(payload.teams_list.len(), 2);
    assert_eq!(payload.teams_list[0].abbreviation, "NYY");
    assert_eq!(payload.teams_list[0].id, 147);

    let value = serde_json::to_value(&payload).unwrap();
    assert!(value.get("teamsList").is_some());
    assert!(value["teamsList"][1].get("teamName").is_none());
}

#[tokio::test]
async fn teams_route_upstream_failure_yields_error_envelope() {
    let mut server = mockito::Server::new_async().await;
    let _teams = server
        .mock("GET", "/api/v1/teams")
        .match_query(Matcher::Any)
        .with_status(503)
        .create_async()
        .await;

    let err = get_teams(state_for(&server))
        .await
        .err()
        .expect("expected the teams request to fail");

    assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(err.error, "Failed to fetch team data");
    assert!(err.message.contains("503"), "message was: {}", err.message);
}

#[tokio::test]
async fn empty_team_ids_are_not_forwarded_upstream() {
    let mut server = mockito::Server::new_async().await;
    let _teams = server
        .mock("GET", "/api/v1/teams")
        .match_query(Matcher::Any)
        .with_body(TEAMS_BODY)
        .create_async()
        .await;
    // Exact query match: no teamIds parameter may be appended.
    let today = Utc::now().date_naive();
    let schedule_mock = server
        .mock("GET", "/api/v1/schedule")
        .match_query(Matcher::Exact(format!(
            "sportIds=1&startDate={}&endDate={}",
            today, today
        )))
        .with_body(r#"{ "dates": [] }"#)
        .create_async()
        .await;

    let response = get_schedule(state_for(&server), schedule_query(Some(",,"), DateRange::Today))
        .await
        .expect("schedule request should succeed");

    schedule_mock.assert_async().await;
    assert!(response.0.games.is_empty());
}
