use crate::AppState;
use crate::db::connect_pool;
use crate::features::app_router;
use crate::tests::api_catalog_router::send;
use crate::tests::test_config;
use crate::tests::setup_test_pool;
use axum::Router;
use axum::body::{Body, Bytes};
use axum::http::{Method, Request, StatusCode, header};
use futures_util::StreamExt;
use futures_util::stream;
use rand::Rng;
use serde_json::json;
use sqlx::SqlitePool;
use std::time::Duration;
use tempfile::TempDir;
use tokio::task::JoinSet;
use tower::ServiceExt;

// on-disk database so several pooled connections see the same data
async fn setup_file_backed_api(max_connections: u32) -> (TempDir, SqlitePool, Router) {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}", dir.path().join("bookshelf.db").display());

    let pool = connect_pool(&test_config(&url, max_connections))
        .await
        .expect("Should create the database file and schema");
    let app = app_router(AppState { pool: pool.clone() });

    (dir, pool, app)
}

#[tokio::test]
async fn test_database_file_is_created_on_first_connect() {
    let (dir, pool, app) = setup_file_backed_api(2).await;

    assert!(dir.path().join("bookshelf.db").exists());

    let (status, _) = send(&app, Method::GET, "/authors/", None).await;
    assert_eq!(status, StatusCode::OK);

    pool.close().await;
}

// many readers in flight at once, each request holding its own pooled connection;
// a leaked connection would exhaust the pool of 4 and time the requests out
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_random_reads() {
    let author_count = 20;
    let request_count = 200;
    let (_dir, pool, app) = setup_file_backed_api(4).await;

    let mut ids = Vec::new();
    for i in 0..author_count {
        let (status, json) = send(
            &app,
            Method::POST,
            "/authors/",
            Some(json!({ "name": format!("Author {}", i), "bio": null })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        ids.push(json["id"].as_i64().unwrap());
    }

    // pick targets up front, the thread rng can't cross task boundaries
    let targets: Vec<i64> = {
        let mut rng = rand::rng();
        (0..request_count)
            .map(|_| ids[rng.random_range(0..ids.len())])
            .collect()
    };

    let mut set = JoinSet::new();
    for id in targets {
        let app = app.clone();
        set.spawn(async move {
            let (status, json) = send(&app, Method::GET, &format!("/authors/{}/", id), None).await;
            (id, status, json)
        });
    }

    while let Some(result) = set.join_next().await {
        let (id, status, json) = result.unwrap();
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["id"], id);
    }

    pool.close().await;
}

// racing creates with one name: the UNIQUE constraint lets exactly one through
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_duplicate_names_create_one_row() {
    let (_dir, pool, app) = setup_file_backed_api(4).await;

    let mut set = JoinSet::new();
    for i in 0..8 {
        let app = app.clone();
        set.spawn(async move {
            send(
                &app,
                Method::POST,
                "/authors/",
                Some(json!({ "name": "Same Name", "bio": format!("attempt {}", i) })),
            )
            .await
        });
    }

    let mut created = 0;
    let mut rejected = 0;
    while let Some(result) = set.join_next().await {
        let (status, json) = result.unwrap();
        match status {
            StatusCode::OK => created += 1,
            StatusCode::BAD_REQUEST => {
                assert_eq!(json["detail"], "Such name for Author already exists");
                rejected += 1;
            }
            other => panic!("unexpected status {}: {}", other, json),
        }
    }

    assert_eq!(created, 1);
    assert_eq!(rejected, 7);

    let (_, listed) = send(&app, Method::GET, "/authors/", None).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);

    pool.close().await;
}

// a body that sends half a JSON object and then never finishes
fn stalled_body(partial: &'static str) -> Body {
    let chunks = stream::once(async move { Ok::<_, std::io::Error>(Bytes::from(partial)) })
        .chain(stream::pending());
    Body::from_stream(chunks)
}

async fn one_connection_api() -> (SqlitePool, Router) {
    let mut config = test_config("sqlite::memory:", 1);
    config.acquire_timeout = Duration::from_secs(1);
    let pool = connect_pool(&config).await.unwrap();
    let app = app_router(AppState { pool: pool.clone() });
    (pool, app)
}

// a POST still waiting on its body must not be holding the only connection
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_slow_post_body_does_not_starve_reads() {
    let (pool, app) = one_connection_api().await;

    for (uri, partial) in [
        ("/authors/", r#"{"name": "#),
        ("/books/", r#"{"title": "Dune", "#),
    ] {
        let stalled = app.clone().oneshot(
            Request::builder()
                .method(Method::POST)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(stalled_body(partial))
                .unwrap(),
        );
        let stalled = tokio::spawn(stalled);

        // give the stalled request time to reach its body extractor
        tokio::time::sleep(Duration::from_millis(100)).await;

        let (status, json) = tokio::time::timeout(
            Duration::from_secs(5),
            send(&app, Method::GET, "/authors/", None),
        )
        .await
        .expect("GET should not wait on the stalled POST");

        assert_eq!(status, StatusCode::OK, "GET during stalled {} -> {}", uri, json);
        assert!(!stalled.is_finished());
        stalled.abort();
    }

    pool.close().await;
}

// bodies that fail validation are rejected without touching the pool
#[tokio::test]
async fn test_rejected_body_leaves_pool_alone() {
    let pool = setup_test_pool().await;
    let app = app_router(AppState { pool: pool.clone() });

    // keep the only connection checked out; a handler that acquired first would time out
    let held = pool.acquire().await.unwrap();

    let (status, _) = tokio::time::timeout(
        Duration::from_secs(2),
        send(&app, Method::POST, "/authors/", Some(json!({ "bio": "no name" }))),
    )
    .await
    .expect("validation should not wait for a connection");
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    drop(held);
    pool.close().await;
}
