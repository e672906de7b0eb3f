#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
//! Integration tests for `AppStateBuilder` and `bootstrap`.
//!
//! The remote backend is played by wiremock; the local backend is a
//! `SqliteStore` in a temp directory.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use notes_lite_app::adapters::SqliteStore;
use notes_lite_app::backend::LocalReason;
use notes_lite_app::{bootstrap, AppState, AppStateBuilder, StartupOptions};
use notes_lite_core::error::CoreError;
use notes_lite_core::traits::{FolderRepository, NoteRepository};
use notes_lite_core::types::{BackendKind, DeleteOutcome, ROOT_FOLDER_ID};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ===== Helpers =====

fn options(dir: &tempfile::TempDir) -> StartupOptions {
    StartupOptions {
        config_path: dir.path().join("config.json"),
        database_path: None,
        default_database_path: dir.path().join("notes.db"),
    }
}

fn write_remote_config(dir: &tempfile::TempDir, server: &MockServer, policy: &str) {
    let body = serde_json::json!({
        "endpointUrl": server.uri(),
        "accessKey": "anon-test-key",
        "userId": "tester",
        "fallbackPolicy": policy,
    });
    std::fs::write(dir.path().join("config.json"), body.to_string()).unwrap();
}

async fn mount_empty_listings(server: &MockServer) {
    for table in ["notes", "folders"] {
        Mock::given(method("GET"))
            .and(path(format!("/rest/v1/{table}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(server)
            .await;
    }
}

async fn open_local(db_path: &Path) -> SqliteStore {
    SqliteStore::new(db_path)
        .await
        .expect("failed to reopen SqliteStore")
}

fn yes(_: &str) -> bool {
    true
}

// ===== AppStateBuilder =====

#[test]
fn build_without_repositories_fails() {
    let result = AppStateBuilder::new().build();
    assert!(matches!(result, Err(CoreError::ValidationError(_))));
}

#[tokio::test]
async fn build_with_store_defaults_to_local_public_user() {
    let tmp = tempfile::tempdir().unwrap();
    let store = Arc::new(open_local(&tmp.path().join("b.db")).await);

    let state = AppStateBuilder::new()
        .store(store)
        .local_reason(LocalReason::ConfigMissing)
        .build()
        .unwrap();

    assert_eq!(state.backend(), BackendKind::Local);
    assert_eq!(state.ctx.user_id(), "public-user");
    assert_eq!(state.local_reason, Some(LocalReason::ConfigMissing));
    assert!(state.fallback_events().await.is_empty());
}

// ===== bootstrap: local backend =====

#[tokio::test]
async fn missing_config_runs_a_local_session() {
    let tmp = tempfile::tempdir().unwrap();
    let opts = options(&tmp);

    let state = bootstrap(&opts).await.unwrap();

    assert_eq!(state.backend(), BackendKind::Local);
    assert_eq!(state.local_reason, Some(LocalReason::ConfigMissing));
    assert!(opts.default_database_path.exists());
}

#[tokio::test]
async fn explicit_database_path_wins() {
    let tmp = tempfile::tempdir().unwrap();
    let explicit: PathBuf = tmp.path().join("explicit").join("mine.db");
    let opts = StartupOptions {
        database_path: Some(explicit.clone()),
        ..options(&tmp)
    };

    bootstrap(&opts).await.unwrap();

    assert!(explicit.exists());
    assert!(!opts.default_database_path.exists());
}

#[tokio::test]
async fn local_session_persists_across_restarts() {
    let tmp = tempfile::tempdir().unwrap();
    let opts = options(&tmp);

    let (folder_id, note_id) = {
        let state = bootstrap(&opts).await.unwrap();
        let mut nb = state.load_notebook().await.unwrap();
        state.note_service.create_note(&mut nb).await.unwrap();
        let note = state
            .note_service
            .update_content(&mut nb, "<div>Plan #Trip</div><p>pack bags</p>")
            .await
            .unwrap();
        let folder = state
            .folder_service
            .create_folder(&mut nb, "Travel")
            .await
            .unwrap();
        state
            .note_service
            .move_active_to_folder(&mut nb, &folder.id)
            .await
            .unwrap();
        (folder.id, note.id)
    };

    let state = bootstrap(&opts).await.unwrap();
    let mut nb = state.load_notebook().await.unwrap();

    assert!(nb.notes_in(ROOT_FOLDER_ID).next().is_none());
    state.folder_service.select_folder(&mut nb, &folder_id).unwrap();
    let active = nb.active_note().unwrap();
    assert_eq!(active.id, note_id);
    assert_eq!(active.title, "Plan #Trip");
    assert_eq!(active.tags, vec!["trip"]);
    assert_eq!(state.search_service.all_tags(&nb), vec!["trip"]);
}

#[tokio::test]
async fn deleting_last_note_leaves_folder_empty() {
    let tmp = tempfile::tempdir().unwrap();
    let state = bootstrap(&options(&tmp)).await.unwrap();
    let mut nb = state.load_notebook().await.unwrap();
    state.note_service.create_note(&mut nb).await.unwrap();

    let outcome = state
        .note_service
        .delete_active_note(&mut nb, &yes)
        .await
        .unwrap();

    assert_eq!(outcome, DeleteOutcome::Deleted);
    assert_eq!(nb.active_id, None);
    assert!(state.search_service.list_filtered(&nb).is_empty());
}

// ===== bootstrap: remote backend =====

#[tokio::test]
async fn remote_session_loads_remote_rows() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/folders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"id": "f1", "user_id": "tester", "name": "Remote", "parent_id": null, "order_index": 1}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/notes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"id": "n1", "user_id": "tester", "content": "<div>From server</div>",
             "updated_at": "2025-03-01T10:00:00Z"}
        ])))
        .mount(&server)
        .await;

    let tmp = tempfile::tempdir().unwrap();
    write_remote_config(&tmp, &server, "localOnFailure");

    let state = bootstrap(&options(&tmp)).await.unwrap();
    let nb = state.load_notebook().await.unwrap();

    assert_eq!(state.backend(), BackendKind::Remote);
    assert_eq!(state.local_reason, None);
    assert_eq!(state.ctx.user_id(), "tester");
    assert!(nb.folder("f1").is_some());
    assert_eq!(nb.active_note().map(|n| n.title.as_str()), Some("From server"));
    assert!(state.fallback_events().await.is_empty());
}

#[tokio::test]
async fn failed_remote_folder_write_lands_in_local_store() {
    let server = MockServer::start().await;
    mount_empty_listings(&server).await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/folders"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let tmp = tempfile::tempdir().unwrap();
    write_remote_config(&tmp, &server, "localOnFailure");
    let opts = options(&tmp);

    let state = bootstrap(&opts).await.unwrap();
    let mut nb = state.load_notebook().await.unwrap();
    let folder = state
        .folder_service
        .create_folder(&mut nb, "Offline")
        .await
        .unwrap();

    assert!(nb.folder(&folder.id).is_some());
    let events = state.fallback_events().await;
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].operation, "upsert_folder");

    let local = open_local(&opts.default_database_path).await;
    let stored = local.list_folders("tester").await.unwrap();
    assert_eq!(stored, vec![folder]);
}

#[tokio::test]
async fn failed_remote_note_write_lands_in_local_store() {
    let server = MockServer::start().await;
    mount_empty_listings(&server).await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/notes"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let tmp = tempfile::tempdir().unwrap();
    write_remote_config(&tmp, &server, "localOnFailure");
    let opts = options(&tmp);

    let state = bootstrap(&opts).await.unwrap();
    let mut nb = state.load_notebook().await.unwrap();
    let note = state.note_service.create_note(&mut nb).await.unwrap();

    let local = open_local(&opts.default_database_path).await;
    assert_eq!(local.list_notes("tester").await.unwrap(), vec![note]);
}

#[tokio::test]
async fn failed_remote_delete_keeps_the_note() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/notes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"id": "n1", "user_id": "tester", "content": "<div>Keep</div>",
             "updated_at": "2025-03-01T10:00:00Z"}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/folders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/rest/v1/notes"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let tmp = tempfile::tempdir().unwrap();
    write_remote_config(&tmp, &server, "localOnFailure");

    let state = bootstrap(&options(&tmp)).await.unwrap();
    let mut nb = state.load_notebook().await.unwrap();
    let err = state
        .note_service
        .delete_active_note(&mut nb, &yes)
        .await
        .unwrap_err();

    assert!(err.is_remote());
    assert!(nb.note("n1").is_some());
    assert!(state.fallback_events().await.is_empty());

    let reloaded = state.load_notebook().await.unwrap();
    assert!(reloaded.note("n1").is_some());
}

#[tokio::test]
async fn propagate_policy_surfaces_remote_error() {
    let server = MockServer::start().await;
    mount_empty_listings(&server).await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/folders"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let tmp = tempfile::tempdir().unwrap();
    write_remote_config(&tmp, &server, "propagate");
    let opts = options(&tmp);

    let state: AppState = bootstrap(&opts).await.unwrap();
    let mut nb = state.load_notebook().await.unwrap();
    let err = state
        .folder_service
        .create_folder(&mut nb, "Nowhere")
        .await
        .unwrap_err();

    assert!(err.is_remote());
    assert_eq!(nb.folders.len(), 1);
    let local = open_local(&opts.default_database_path).await;
    assert!(local.list_folders("tester").await.unwrap().is_empty());
}

#[tokio::test]
async fn unreachable_remote_listing_falls_back_to_local_rows() {
    let tmp = tempfile::tempdir().unwrap();
    let opts = options(&tmp);

    {
        let local = open_local(&opts.default_database_path).await;
        let mut note = notes_lite_core::types::Note::new("tester", ROOT_FOLDER_ID, -1);
        note.set_content("<div>Cached</div>");
        local.upsert_note(&note).await.unwrap();
    }

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    write_remote_config(&tmp, &server, "localOnFailure");

    let state = bootstrap(&opts).await.unwrap();
    let nb = state.load_notebook().await.unwrap();

    assert_eq!(nb.active_note().map(|n| n.title.as_str()), Some("Cached"));
    let ops: Vec<_> = state
        .fallback_events()
        .await
        .into_iter()
        .map(|e| e.operation)
        .collect();
    assert_eq!(ops, vec!["list_folders", "list_notes"]);
}
