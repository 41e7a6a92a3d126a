//! Drives the router in-process against in-memory stores.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use localess_api::{router, AppState};
use localess_config::CacheConfig;
use localess_publish::Publisher;
use localess_store::{
    BlobStore, Content, Locale, MemoryBlobStore, MemoryDocumentStore, Repository, Space,
    Translation,
};
use serde_json::{json, Value};
use tower::ServiceExt;

const CACHE: &str = "public, max-age=60, s-maxage=120";

struct Harness {
    app: Router,
    blobs: Arc<MemoryBlobStore>,
}

async fn harness() -> Harness {
    let repo = Repository::new(Arc::new(MemoryDocumentStore::new()));
    let blobs = Arc::new(MemoryBlobStore::new());

    repo.save_space(&Space {
        id: "s1".into(),
        name: "Site".into(),
        locales: vec![Locale::new("en", "English"), Locale::new("de", "German")],
        locale_fallback: Locale::new("en", "English"),
        created_at: None,
        updated_at: None,
    })
    .await
    .unwrap();
    repo.save_translation(
        "s1",
        &Translation::new("greeting")
            .with_value("en", "Hello")
            .with_value("de", "Hallo"),
    )
    .await
    .unwrap();

    for content in [
        Content::folder("f1", "Blog", "blog", ""),
        Content::page("p1", "First", "first", "blog"),
        Content::page("p2", "Blogroll", "blogroll", ""),
        Content::page("p3", "About", "about", ""),
        Content::folder("f2", "Archive", "archive", ""),
        Content::page("p4", "Old", "blog", "archive"),
    ] {
        let mut content = content;
        if content.is_page() {
            content.data = Some(json!({}));
        }
        repo.save_content("s1", &content).await.unwrap();
    }

    Publisher::new(repo.clone(), blobs.clone())
        .publish("s1", None)
        .await
        .unwrap();

    let cache = CacheConfig {
        max_age: 60,
        s_maxage: 120,
    };
    let app = router(AppState::new(repo, blobs.clone(), cache));
    Harness { app, blobs }
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Option<String>, Vec<u8>) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let cache = response
        .headers()
        .get(header::CACHE_CONTROL)
        .map(|v| v.to_str().unwrap().to_string());
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, cache, body.to_vec())
}

#[tokio::test]
async fn translations_served_with_cache_header() {
    let h = harness().await;
    let (status, cache, body) = get(&h.app, "/api/v1/spaces/s1/translations/de.json").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cache.as_deref(), Some(CACHE));
    let value: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(value, json!({"greeting": "Hallo"}));
}

#[tokio::test]
async fn unknown_locale_serves_fallback_blob_byte_for_byte() {
    let h = harness().await;
    let (status, _, body) = get(&h.app, "/api/v1/spaces/s1/translations/xx.json").await;
    assert_eq!(status, StatusCode::OK);
    let fallback = h
        .blobs
        .download("spaces/s1/translations/en.json")
        .await
        .unwrap();
    assert_eq!(body, fallback.to_vec());
}

#[tokio::test]
async fn missing_space_is_404_with_cache_header() {
    let h = harness().await;
    for uri in [
        "/api/v1/spaces/nope/translations/en.json",
        "/api/v1/spaces/nope/links",
        "/api/v1/spaces/nope/contents/p1/en",
    ] {
        let (status, cache, body) = get(&h.app, uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(cache.as_deref(), Some(CACHE), "{uri}");
        let value: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value, json!({"status": "NOT_FOUND", "message": "Space not found"}));
    }
}

#[tokio::test]
async fn unaddressable_space_id_is_404_with_cache_header() {
    let h = harness().await;
    for uri in [
        "/api/v1/spaces/a%2Fb/links",
        "/api/v1/spaces/%2E%2E/translations/en.json",
        "/api/v1/spaces/a%2Fb/contents/p1/en",
    ] {
        let (status, cache, body) = get(&h.app, uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(cache.as_deref(), Some(CACHE), "{uri}");
        let value: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value, json!({"status": "NOT_FOUND", "message": "Space not found"}));
    }
}

#[tokio::test]
async fn malformed_links_query_is_a_structured_400() {
    let h = harness().await;
    let (status, _, body) = get(&h.app, "/api/v1/spaces/s1/links?kind=PAGE&kind=FOLDER").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let value: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(value["status"], "INVALID_ARGUMENT");
    assert!(value["message"].as_str().unwrap().contains("kind"));
}

#[tokio::test]
async fn missing_blob_is_404_without_cache_header() {
    let h = harness().await;
    let (status, cache, body) = get(&h.app, "/api/v1/spaces/s1/contents/f1/en").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(cache, None);
    let value: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(value["message"], "File not found, Publish first.");
}

#[tokio::test]
async fn blob_backend_failure_reported_as_not_found() {
    let h = harness().await;
    h.blobs.fail_downloads(true);
    let (status, _, _) = get(&h.app, "/api/v1/spaces/s1/translations/en.json").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn content_served_per_locale() {
    let h = harness().await;
    let (status, cache, body) = get(&h.app, "/api/v1/spaces/s1/contents/p1/de").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cache.as_deref(), Some(CACHE));
    let value: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(value["id"], "p1");
    assert_eq!(value["locale"], "de");
    assert_eq!(value["fullSlug"], "blog/first");

    let (_, _, fallback) = get(&h.app, "/api/v1/spaces/s1/contents/p1/xx").await;
    let value: Value = serde_json::from_slice(&fallback).unwrap();
    assert_eq!(value["locale"], "en");
}

#[tokio::test]
async fn links_filtered_by_slug_prefix_range() {
    let h = harness().await;
    let (status, cache, body) = get(&h.app, "/api/v1/spaces/s1/links?startSlug=blog").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cache.as_deref(), Some(CACHE));
    let links: Vec<Value> = serde_json::from_slice(&body).unwrap();
    let slugs: Vec<&str> = links.iter().map(|l| l["fullSlug"].as_str().unwrap()).collect();
    assert_eq!(slugs, ["blog", "blog/first", "blogroll"]);
    assert!(slugs.iter().all(|s| *s >= "blog" && *s < "blog~"));
}

#[tokio::test]
async fn links_filtered_by_kind() {
    let h = harness().await;
    let (_, _, body) = get(&h.app, "/api/v1/spaces/s1/links?kind=FOLDER").await;
    let links: Vec<Value> = serde_json::from_slice(&body).unwrap();
    let ids: Vec<&str> = links.iter().map(|l| l["id"].as_str().unwrap()).collect();
    assert_eq!(ids, ["f1", "f2"]);
    assert!(links.iter().all(|l| l.get("publishedAt").is_none()));

    let (_, _, body) = get(&h.app, "/api/v1/spaces/s1/links?kind=PAGE&startSlug=").await;
    let links: Vec<Value> = serde_json::from_slice(&body).unwrap();
    assert_eq!(links.len(), 4);
    assert!(links.iter().all(|l| l["publishedAt"].is_string()));
}

#[tokio::test]
async fn translations_path_requires_json_suffix() {
    let h = harness().await;
    let (status, cache, _) = get(&h.app, "/api/v1/spaces/s1/translations/en").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(cache, None);
}

#[tokio::test]
async fn cors_reflects_origin() {
    let h = harness().await;
    let response = h
        .app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/v1/spaces/s1/links")
                .header(header::ORIGIN, "https://example.com")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "https://example.com"
    );
}

#[tokio::test]
async fn health_check() {
    let h = harness().await;
    let (status, _, body) = get(&h.app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"OK");
}
