//! Full dashboard assembly: a seeded database plus a mock provider, rendered
//! frame by frame.

use crate::common::{
    fixture_app, mount_nearby_response, render, seeded_db, start_places_mock,
};
use lumen_engine::{EventStore, Tab};
use lumen_types::PlaceKind;

#[tokio::test]
async fn startup_resolution_and_event_tabs_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = seeded_db(&dir);
    let events = EventStore::read(&db_path, "guidinglight");

    let server = start_places_mock().await;
    mount_nearby_response(&server, "school", &["Mission High School"]).await;

    let mut app = fixture_app(&server, events);
    assert_eq!(app.selected_kind(), PlaceKind::School);
    app.resolve_selected().await;

    // Events tab first: every row, newest id on top. The result sentence
    // wraps inside the sidebar, so match it in line-sized pieces.
    let screen = render(&app);
    assert!(screen.contains("The closest school is:"));
    assert!(screen.contains("Mission High School"));
    assert!(screen.contains("hallway"));
    assert!(screen.contains("kitchen"));
    assert!(screen.contains("doorway"));

    // Alerts tab keeps only the meaningfully-flagged row.
    app.next_tab();
    assert_eq!(app.active_tab(), Tab::Alerts);
    let screen = render(&app);
    assert!(screen.contains("kitchen"));
    assert!(screen.contains("Flood"));
    assert!(!screen.contains("hallway"));
    assert!(!screen.contains("doorway"));
}

#[tokio::test]
async fn missing_database_renders_as_store_failure() {
    let dir = tempfile::tempdir().unwrap();
    let events = EventStore::read(&dir.path().join("absent.db"), "guidinglight");

    let server = start_places_mock().await;
    mount_nearby_response(&server, "school", &[]).await;

    let mut app = fixture_app(&server, events);
    app.resolve_selected().await;

    let screen = render(&app);
    assert!(screen.contains("Events unavailable:"));
}

#[tokio::test]
async fn alert_filter_survives_a_round_trip_through_the_store() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("guidinglight.db");
    {
        let conn = rusqlite::Connection::open(&db_path).unwrap();
        conn.execute_batch(
            "CREATE TABLE guidinglight (id INTEGER PRIMARY KEY, alert TEXT);
             INSERT INTO guidinglight (id, alert) VALUES
                (1, 'None'), (2, 'Fire'), (3, ''), (4, NULL), (5, '  ');",
        )
        .unwrap();
    }

    let table = EventStore::read(&db_path, "guidinglight").unwrap();
    let alerts = table.alerts();

    // Exact "" and "None" and NULL are excluded; whitespace-only survives.
    let ids: Vec<i64> = alerts.rows.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![5, 2]);
}
