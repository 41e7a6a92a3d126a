//! Publishing against in-memory stores.

use std::sync::Arc;

use localess_fields::{FieldType, Schema, SchemaField, TextAttributes};
use localess_publish::{PublishError, Publisher};
use localess_store::{
    BlobStore, Content, Locale, MemoryBlobStore, MemoryDocumentStore, Repository, SchemaStore,
    Space, Translation,
};
use serde_json::{json, Value};

struct Fixture {
    repo: Repository,
    blobs: Arc<MemoryBlobStore>,
    publisher: Publisher,
}

async fn fixture() -> Fixture {
    let repo = Repository::new(Arc::new(MemoryDocumentStore::new()));
    let blobs = Arc::new(MemoryBlobStore::new());
    let publisher = Publisher::new(repo.clone(), blobs.clone());

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

    repo.save_translation("s1", &Translation::new("greeting").with_value("en", "Hello").with_value("de", "Hallo"))
        .await
        .unwrap();
    repo.save_translation("s1", &Translation::new("farewell").with_value("en", "Bye"))
        .await
        .unwrap();

    let mut schema = Schema::new("sc1", "page");
    schema.fields = vec![SchemaField::new(
        "title",
        FieldType::Text(TextAttributes {
            translatable: Some(true),
            min_length: None,
            max_length: None,
        }),
    )];
    repo.create("s1", schema).await.unwrap();

    let mut home = Content::page("c1", "Home", "home", "");
    home.schema = Some("page".into());
    home.data = Some(json!({"title": "Welcome", "title_de": "Willkommen"}));
    repo.save_content("s1", &home).await.unwrap();
    repo.save_content("s1", &Content::folder("f1", "Blog", "blog", ""))
        .await
        .unwrap();
    repo.save_content("s1", &Content::page("c2", "Draft", "draft", "blog"))
        .await
        .unwrap();

    Fixture {
        repo,
        blobs,
        publisher,
    }
}

async fn blob_json(blobs: &MemoryBlobStore, path: &str) -> Value {
    serde_json::from_slice(&blobs.download(path).await.unwrap()).unwrap()
}

#[tokio::test]
async fn publish_writes_translations_with_fallback() {
    let f = fixture().await;
    let report = f.publisher.publish("s1", Some("first".into())).await.unwrap();
    assert_eq!(report.locales, ["en", "de"]);

    assert_eq!(
        blob_json(&f.blobs, "spaces/s1/translations/en.json").await,
        json!({"greeting": "Hello", "farewell": "Bye"})
    );
    assert_eq!(
        blob_json(&f.blobs, "spaces/s1/translations/de.json").await,
        json!({"greeting": "Hallo", "farewell": "Bye"})
    );
    assert_eq!(
        f.blobs.content_type("spaces/s1/translations/de.json").await.as_deref(),
        Some("application/json")
    );
}

#[tokio::test]
async fn publish_writes_localized_pages_only() {
    let f = fixture().await;
    let report = f.publisher.publish("s1", None).await.unwrap();
    assert_eq!(
        report.content_blobs,
        ["spaces/s1/contents/c1/en.json", "spaces/s1/contents/c1/de.json"]
    );

    let de = blob_json(&f.blobs, "spaces/s1/contents/c1/de.json").await;
    assert_eq!(de["id"], "c1");
    assert_eq!(de["locale"], "de");
    assert_eq!(de["kind"], "PAGE");
    assert_eq!(de["fullSlug"], "home");
    assert_eq!(de["data"], json!({"title": "Willkommen"}));
    assert!(de["publishedAt"].as_str().unwrap().ends_with('Z'));

    let en = blob_json(&f.blobs, "spaces/s1/contents/c1/en.json").await;
    assert_eq!(en["data"], json!({"title": "Welcome"}));

    let stored = f.repo.find_content("s1", "c1").await.unwrap();
    assert!(stored.published_at.is_some());
    let draft = f.repo.find_content("s1", "c2").await.unwrap();
    assert!(draft.published_at.is_none());
}

#[tokio::test]
async fn publishing_twice_overwrites_and_appends_one_entry_per_run() {
    let f = fixture().await;
    f.publisher.publish("s1", Some("one".into())).await.unwrap();
    let blobs_after_first = f.blobs.paths().await;

    f.repo
        .save_translation("s1", &Translation::new("greeting").with_value("en", "Hi"))
        .await
        .unwrap();
    f.publisher.publish("s1", Some("two".into())).await.unwrap();

    assert_eq!(f.blobs.paths().await, blobs_after_first);
    assert_eq!(
        blob_json(&f.blobs, "spaces/s1/translations/en.json").await["greeting"],
        "Hi"
    );

    let history = f.repo.find_history("s1").await.unwrap();
    let descriptions: Vec<_> = history.iter().map(|h| h.description.as_deref()).collect();
    assert_eq!(descriptions, [Some("one"), Some("two")]);
}

#[tokio::test]
async fn publish_translations_skips_contents() {
    let f = fixture().await;
    let report = f
        .publisher
        .publish_translations("s1", Some("strings only".into()))
        .await
        .unwrap();
    assert_eq!(
        report.translation_blobs,
        ["spaces/s1/translations/en.json", "spaces/s1/translations/de.json"]
    );
    assert!(report.content_blobs.is_empty());
    assert!(report.history_id.is_some());

    assert_eq!(
        f.blobs.paths().await,
        ["spaces/s1/translations/de.json", "spaces/s1/translations/en.json"]
    );
    assert_eq!(
        blob_json(&f.blobs, "spaces/s1/translations/de.json").await,
        json!({"greeting": "Hallo", "farewell": "Bye"})
    );

    let history = f.repo.find_history("s1").await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].description.as_deref(), Some("strings only"));
    assert!(f.repo.find_content("s1", "c1").await.unwrap().published_at.is_none());
}

#[tokio::test]
async fn publish_content_writes_no_history() {
    let f = fixture().await;
    let report = f.publisher.publish_content("s1", "c1").await.unwrap();
    assert_eq!(report.content_blobs.len(), 2);
    assert!(report.history_id.is_none());
    assert!(f.repo.find_history("s1").await.unwrap().is_empty());
}

#[tokio::test]
async fn publish_content_rejects_folders_and_missing_content() {
    let f = fixture().await;
    assert!(matches!(
        f.publisher.publish_content("s1", "f1").await,
        Err(PublishError::NotAPage { .. })
    ));
    assert!(matches!(
        f.publisher.publish_content("s1", "zz").await,
        Err(PublishError::ContentNotFound { .. })
    ));
}

#[tokio::test]
async fn missing_space_is_reported() {
    let f = fixture().await;
    assert!(matches!(
        f.publisher.publish("nope", None).await,
        Err(PublishError::SpaceNotFound { .. })
    ));
    assert!(f.blobs.paths().await.iter().all(|p| !p.contains("nope")));
}
