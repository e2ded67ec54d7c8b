use blsz_sync::components::fixtures::Fixture;
use blsz_sync::components::game_events::EventSynthesizer;
use blsz_sync::components::google_calendar::{
    CalendarService, EventQuery, GoogleCalendarClient, RemoteEvent, SendUpdates, TokenManager,
};
use blsz_sync::config::Config;
use blsz_sync::error::Error;
use chrono::{TimeZone, Utc};
use chrono_tz::Europe::Budapest;
use serde_json::json;
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const EVENTS_PATH: &str = "/calendars/primary/events";

/// Client pointed at the mock server with a token that is still valid
fn client(server: &MockServer, dir: &TempDir) -> GoogleCalendarClient {
    let config = Config {
        google_client_id: "client".to_string(),
        google_client_secret: "secret".to_string(),
        google_calendar_id: "primary".to_string(),
        token_path: dir.path().join("token.json"),
        home_team_name: "SVÁBHEGY".to_string(),
        timezone: Budapest,
        create_delay: Duration::ZERO,
        schedules: Vec::new(),
    };

    let token_manager = TokenManager::new(&config);
    token_manager
        .set_token(json!({
            "access_token": "test-token",
            "refresh_token": "refresh",
            "expires_at": Utc::now().timestamp() + 3600,
        }))
        .unwrap();

    GoogleCalendarClient::with_token_manager(&config, token_manager).with_base_url(server.uri())
}

#[tokio::test]
async fn add_event_posts_marked_event() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    Mock::given(method("POST"))
        .and(path(EVENTS_PATH))
        .and(query_param("sendUpdates", "none"))
        .and(header("Authorization", "Bearer test-token"))
        .and(body_partial_json(json!({
            "summary": "SVÁBHEGY - TFSE",
            "location": "Home ground",
            "start": { "dateTime": "2024-03-09T12:30:00", "timeZone": "Europe/Budapest" },
            "end": { "dateTime": "2024-03-09T14:30:00", "timeZone": "Europe/Budapest" },
            "attendees": [{ "email": "a@example.com" }],
            "reminders": {
                "useDefault": false,
                "overrides": [
                    { "method": "email", "minutes": 2880 },
                    { "method": "popup", "minutes": 1440 }
                ]
            },
            "extendedProperties": { "public": { "scraper_automatic_event": "yes" } }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "created1",
            "summary": "SVÁBHEGY - TFSE",
            "start": { "dateTime": "2024-03-09T12:30:00+01:00", "timeZone": "Europe/Budapest" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let fixture =
        Fixture::new("SVÁBHEGY", "TFSE", "Home ground", "2024. 03. 09.  12:30", "BLSZ I.").unwrap();
    let payload = EventSynthesizer::new("SVÁBHEGY", Budapest)
        .synthesize(&fixture, &["a@example.com".to_string()])
        .unwrap();

    let created = client(&server, &dir)
        .add_event(&payload, SendUpdates::None)
        .await
        .unwrap();

    assert_eq!(created.id, "created1");
    assert_eq!(
        created.start.unwrap(),
        Utc.with_ymd_and_hms(2024, 3, 9, 11, 30, 0).unwrap()
    );
}

#[tokio::test]
async fn list_events_follows_pages_and_filters_on_marker() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    // Mounted first so it wins for the second request
    Mock::given(method("GET"))
        .and(path(EVENTS_PATH))
        .and(query_param("pageToken", "page2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                { "id": "c", "start": { "date": "2024-05-01" } }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(EVENTS_PATH))
        .and(query_param("sharedExtendedProperty", "scraper_automatic_event=yes"))
        .and(query_param("singleEvents", "true"))
        .and(query_param("orderBy", "startTime"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                { "id": "a", "summary": "First", "start": { "dateTime": "2024-03-09T12:30:00+01:00" } },
                { "id": "b", "summary": "Second", "start": { "dateTime": "2024-03-16T10:00:00+01:00" } }
            ],
            "nextPageToken": "page2"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let events = client(&server, &dir)
        .list_events(&EventQuery::generated_events())
        .await
        .unwrap();

    let ids: Vec<_> = events.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b", "c"]);
    assert_eq!(events[0].summary.as_deref(), Some("First"));
    assert_eq!(
        events[2].start.unwrap(),
        Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap()
    );
}

#[tokio::test]
async fn deleting_a_gone_event_succeeds() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    Mock::given(method("DELETE"))
        .and(path(format!("{}/gone1", EVENTS_PATH)))
        .and(query_param("sendUpdates", "none"))
        .respond_with(ResponseTemplate::new(410))
        .expect(1)
        .mount(&server)
        .await;

    let event = RemoteEvent {
        id: "gone1".to_string(),
        ..Default::default()
    };
    let result = client(&server, &dir)
        .delete_event(&event, SendUpdates::None)
        .await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn delete_succeeds_on_no_content() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    Mock::given(method("DELETE"))
        .and(path(format!("{}/ev1", EVENTS_PATH)))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let event = RemoteEvent {
        id: "ev1".to_string(),
        ..Default::default()
    };
    client(&server, &dir)
        .delete_event(&event, SendUpdates::None)
        .await
        .unwrap();
}

#[tokio::test]
async fn error_status_becomes_remote_service_error() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    Mock::given(method("GET"))
        .and(path(EVENTS_PATH))
        .respond_with(ResponseTemplate::new(403).set_body_string("rateLimitExceeded"))
        .mount(&server)
        .await;

    let result = client(&server, &dir)
        .list_events(&EventQuery::generated_events())
        .await;

    match result {
        Err(Error::RemoteService(message)) => {
            assert!(message.contains("403"));
            assert!(message.contains("rateLimitExceeded"));
        }
        other => panic!("expected remote service error, got {:?}", other),
    }
}

#[tokio::test]
async fn missing_token_is_a_config_error() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        google_client_id: "client".to_string(),
        google_client_secret: "secret".to_string(),
        google_calendar_id: "primary".to_string(),
        token_path: dir.path().join("missing.json"),
        home_team_name: "SVÁBHEGY".to_string(),
        timezone: Budapest,
        create_delay: Duration::ZERO,
        schedules: Vec::new(),
    };

    let result = GoogleCalendarClient::new(&config)
        .with_base_url(server.uri())
        .list_events(&EventQuery::generated_events())
        .await;

    assert!(matches!(result, Err(Error::Config(_))));
}
