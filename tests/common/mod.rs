//! Shared test utilities and fixtures
//!
//! Common infrastructure for the cross-crate tests: a mock places API, a
//! seeded event database, and a TestBackend renderer.

#![allow(dead_code)]

use std::path::PathBuf;

use ratatui::{Terminal, backend::TestBackend};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use lumen_engine::{App, NullAnnouncer, places::PlacesClient};
use lumen_types::{ApiKey, Coordinate, EventTable};

pub const FIXTURE_KEY: &str = "fixture-key";

/// Start a mock server that simulates the places nearby-search API.
pub async fn start_places_mock() -> MockServer {
    MockServer::start().await
}

/// Mount a nearby-search fixture for one place type with the given ranked
/// result names.
pub async fn mount_nearby_response(server: &MockServer, place_type: &str, names: &[&str]) {
    let results: Vec<serde_json::Value> = names
        .iter()
        .map(|name| serde_json::json!({"name": name}))
        .collect();
    let status = if names.is_empty() { "ZERO_RESULTS" } else { "OK" };

    Mock::given(method("GET"))
        .and(path("/maps/api/place/nearbysearch/json"))
        .and(query_param("type", place_type))
        .and(query_param("key", FIXTURE_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": status,
            "results": results,
        })))
        .mount(server)
        .await;
}

/// Create a `guidinglight.db` with the canonical three-row fixture.
pub fn seeded_db(dir: &tempfile::TempDir) -> PathBuf {
    let db_path = dir.path().join("guidinglight.db");
    let conn = rusqlite::Connection::open(&db_path).unwrap();
    conn.execute_batch(
        "CREATE TABLE guidinglight (
            id INTEGER PRIMARY KEY,
            timestamp TEXT,
            label TEXT,
            alert TEXT
        );
        INSERT INTO guidinglight (id, timestamp, label, alert) VALUES
            (1, '2024-03-01T10:00:00Z', 'doorway', ''),
            (2, '2024-03-01T10:05:00Z', 'kitchen', 'Flood'),
            (3, '2024-03-01T10:10:00Z', 'hallway', NULL);",
    )
    .unwrap();
    db_path
}

pub fn fixture_coordinate() -> Coordinate {
    Coordinate::new(37.77, -122.42).unwrap()
}

/// Assemble an `App` against the mock server with a silent announcer.
pub fn fixture_app(
    server: &MockServer,
    events: Result<EventTable, lumen_engine::StoreError>,
) -> App {
    let places = PlacesClient::with_base_url(ApiKey::new(FIXTURE_KEY).unwrap(), server.uri());
    App::new(fixture_coordinate(), places, events, Box::new(NullAnnouncer))
}

/// Render one frame into a plain string for content assertions.
pub fn render(app: &App) -> String {
    let backend = TestBackend::new(110, 34);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal.draw(|frame| lumen_tui::draw(frame, app)).unwrap();

    let buffer = terminal.backend().buffer();
    let area = buffer.area;
    let mut text = String::new();
    for y in 0..area.height {
        for x in 0..area.width {
            text.push_str(buffer[(x, y)].symbol());
        }
        text.push('\n');
    }
    text
}
