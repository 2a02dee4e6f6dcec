use examtable_core::planner::{DataSource, ImportError, Planner};
use examtable_core::store::{DATA_KEY, EXTRA_KEY, KeyValueStore, MemoryStore, SELECTION_KEY};
use reqwest::Client;

const DOCUMENT: &str = r#"[
    {"name":"Math","exams":[{"date":"2026-01-10"}]},
    {"name":"History","exams":[{"date":"2026-01-05","period":"afternoon"}]}
]"#;

/// Serves exactly one HTTP response on a loopback port and returns the
/// document URL.
async fn serve_once(status_line: &'static str, body: &'static str) -> String {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind loopback listener");
    let addr = listener.local_addr().expect("local addr");

    tokio::spawn(async move {
        if let Ok((mut socket, _)) = listener.accept().await {
            let mut request = [0u8; 1024];
            let _ = socket.read(&mut request).await;
            let response = format!(
                "{status_line}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        }
    });

    format!("http://{addr}/data.json")
}

async fn loaded_planner(store: MemoryStore) -> (Planner<MemoryStore>, DataSource) {
    let mut planner = Planner::new(store);
    let source = planner
        .load_initial(&Client::new(), None)
        .await
        .expect("initial load");
    (planner, source)
}

#[tokio::test]
async fn stored_data_is_the_first_fallback_tier() {
    let store = MemoryStore::new().with_value(DATA_KEY, DOCUMENT);
    let (planner, source) = loaded_planner(store).await;

    assert_eq!(source, DataSource::Stored);
    assert_eq!(planner.subjects().len(), 2);
    assert_eq!(planner.subjects()[0].name, "Math");
    assert_eq!(planner.subjects()[0].exams[0].datetime, "2026-01-10T09:00");
}

#[tokio::test]
async fn corrupt_stored_data_falls_through_to_the_sample() {
    let store = MemoryStore::new().with_value(DATA_KEY, "{not json");
    let (planner, source) = loaded_planner(store).await;

    assert_eq!(source, DataSource::Sample);
    assert_eq!(planner.subjects().len(), 1);
    assert_eq!(planner.subjects()[0].name, "Sample Subject");
}

#[tokio::test]
async fn empty_store_without_url_yields_the_sample_and_persists_it() {
    let (planner, source) = loaded_planner(MemoryStore::new()).await;
    assert_eq!(source, DataSource::Sample);

    let store = planner.into_store();
    let persisted = store.load(DATA_KEY).expect("sample should be persisted");
    assert!(persisted.contains("Sample Subject"));
}

#[tokio::test]
async fn remote_document_is_the_second_fallback_tier() {
    let url = serve_once("HTTP/1.1 200 OK", DOCUMENT).await;

    let mut planner = Planner::new(MemoryStore::new());
    let source = planner
        .load_initial(&Client::new(), Some(&url))
        .await
        .expect("initial load");

    assert_eq!(source, DataSource::Fetched);
    assert_eq!(planner.subjects().len(), 2);
    assert_eq!(planner.subjects()[0].exams[0].datetime, "2026-01-10T09:00");

    let store = planner.into_store();
    let persisted = store.load(DATA_KEY).expect("fetched data should be persisted");
    assert!(persisted.contains("Math"));
    assert!(persisted.contains("History"));
}

#[tokio::test]
async fn unreachable_remote_url_falls_through_to_the_sample() {
    let mut planner = Planner::new(MemoryStore::new());
    let source = planner
        .load_initial(&Client::new(), Some("http://127.0.0.1:1/data.json"))
        .await
        .expect("initial load");

    assert_eq!(source, DataSource::Sample);
    assert_eq!(planner.subjects()[0].name, "Sample Subject");
}

#[tokio::test]
async fn remote_error_status_falls_through_to_the_sample() {
    let url = serve_once("HTTP/1.1 404 Not Found", "[]").await;

    let mut planner = Planner::new(MemoryStore::new());
    let source = planner
        .load_initial(&Client::new(), Some(&url))
        .await
        .expect("initial load");

    assert_eq!(source, DataSource::Sample);
}

#[tokio::test]
async fn stored_data_wins_over_a_configured_remote_url() {
    let store = MemoryStore::new().with_value(DATA_KEY, DOCUMENT);
    let mut planner = Planner::new(store);
    // The URL is never contacted when stored data parses.
    let source = planner
        .load_initial(&Client::new(), Some("http://127.0.0.1:1/data.json"))
        .await
        .expect("initial load");

    assert_eq!(source, DataSource::Stored);
}

#[tokio::test]
async fn orphaned_selection_names_are_dropped_from_the_effective_set_only() {
    let store = MemoryStore::new()
        .with_value(DATA_KEY, DOCUMENT)
        .with_value(SELECTION_KEY, r#"["Math","Ghost"]"#);
    let (planner, _) = loaded_planner(store).await;

    let effective: Vec<&str> = planner
        .effective_selection()
        .iter()
        .map(|s| s.name.as_str())
        .collect();
    assert_eq!(effective, ["Math"]);
    // The stored selection keeps the orphan until the next explicit save.
    assert!(planner.selection().contains(&"Ghost".to_string()));
}

#[tokio::test]
async fn effective_selection_orders_by_earliest_sitting() {
    let store = MemoryStore::new()
        .with_value(DATA_KEY, DOCUMENT)
        .with_value(SELECTION_KEY, r#"["Math","History"]"#);
    let (planner, _) = loaded_planner(store).await;

    let effective: Vec<&str> = planner
        .effective_selection()
        .iter()
        .map(|s| s.name.as_str())
        .collect();
    // History sits on 2026-01-05, before Math on 2026-01-10.
    assert_eq!(effective, ["History", "Math"]);
}

#[tokio::test]
async fn select_reports_unknown_names_and_persists_known_ones() {
    let store = MemoryStore::new().with_value(DATA_KEY, DOCUMENT);
    let (mut planner, _) = loaded_planner(store).await;

    let unknown = planner
        .select(&["Math".to_string(), "Nope".to_string()])
        .expect("select");
    assert_eq!(unknown, ["Nope"]);
    assert!(planner.is_selected("Math"));

    let store = planner.into_store();
    assert_eq!(store.load(SELECTION_KEY).as_deref(), Some(r#"["Math"]"#));
}

#[tokio::test]
async fn select_all_and_clear_round_trip() {
    let store = MemoryStore::new().with_value(DATA_KEY, DOCUMENT);
    let (mut planner, _) = loaded_planner(store).await;

    planner.select_all().expect("select all");
    assert_eq!(planner.effective_selection().len(), 2);

    planner.clear_selection().expect("clear");
    assert!(planner.effective_selection().is_empty());
}

#[tokio::test]
async fn extra_time_flag_persists_as_a_single_character() {
    let store = MemoryStore::new().with_value(DATA_KEY, DOCUMENT);
    let (mut planner, _) = loaded_planner(store).await;

    planner.set_extra_time(true).expect("toggle");
    assert!(planner.extra_time());

    let store = planner.into_store();
    assert_eq!(store.load(EXTRA_KEY).as_deref(), Some("1"));

    let (reloaded, _) = loaded_planner(store).await;
    assert!(reloaded.extra_time());
}

#[tokio::test]
async fn import_replaces_subjects_and_prunes_the_selection() {
    let store = MemoryStore::new()
        .with_value(DATA_KEY, DOCUMENT)
        .with_value(SELECTION_KEY, r#"["Math","History"]"#);
    let (mut planner, _) = loaded_planner(store).await;

    let count = planner
        .import(r#"[{"name":"Math","exams":[]},{"name":"Latin","date":"2026-02-01"}]"#)
        .expect("import");
    assert_eq!(count, 2);
    assert_eq!(planner.selection(), ["Math"]);
    assert_eq!(planner.subjects()[1].exams[0].datetime, "2026-02-01T09:00");
}

#[tokio::test]
async fn import_of_a_non_array_fails_and_leaves_state_untouched() {
    let store = MemoryStore::new().with_value(DATA_KEY, DOCUMENT);
    let (mut planner, _) = loaded_planner(store).await;

    let err = planner.import(r#"{"name":"Math"}"#).unwrap_err();
    assert!(matches!(err, ImportError::NotAnArray));
    assert_eq!(planner.subjects().len(), 2);

    let err = planner.import("not json at all").unwrap_err();
    assert!(matches!(err, ImportError::Parse(_)));
    assert_eq!(planner.subjects().len(), 2);
}

#[tokio::test]
async fn export_json_round_trips_through_import() {
    let store = MemoryStore::new().with_value(DATA_KEY, DOCUMENT);
    let (mut planner, _) = loaded_planner(store).await;

    let exported = planner.export_json().expect("export");
    let before = planner.subjects().to_vec();
    planner.import(&exported).expect("reimport");
    assert_eq!(planner.subjects(), before.as_slice());
}
