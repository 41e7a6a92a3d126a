//! Commands run against file-backed stores in a temp directory.

use localess::commands;
use localess::{Services, EXIT_FAILURE};
use localess_config::LocalessConfig;
use localess_fields::{FieldType, Schema, SchemaField};
use localess_store::{Content, Locale, SchemaStore, Space};
use serde_json::json;
use tempfile::TempDir;

async fn services(temp: &TempDir) -> Services {
    let mut config = LocalessConfig::default();
    config.storage.data_dir = temp.path().to_path_buf();
    let services = Services::from_config(config);

    services
        .repo
        .save_space(&Space {
            id: "s1".into(),
            name: "Site".into(),
            locales: vec![Locale::new("en", "English")],
            locale_fallback: Locale::new("en", "English"),
            created_at: None,
            updated_at: None,
        })
        .await
        .unwrap();

    let mut article = Schema::new("article", "article");
    article.display_name = Some("Article".into());
    article.fields = vec![SchemaField::new("title", FieldType::default())];
    services.repo.create("s1", article).await.unwrap();

    let mut broken = Schema::new("broken", "broken");
    broken.preview_field = Some("missing".into());
    broken.fields = vec![
        SchemaField::new("title", FieldType::default()),
        SchemaField::new("title", FieldType::default()),
    ];
    services.repo.create("s1", broken).await.unwrap();

    services
}

fn text(out: Vec<u8>) -> String {
    String::from_utf8(out).unwrap()
}

#[tokio::test]
async fn schema_list_shows_every_schema() {
    let temp = TempDir::new().unwrap();
    let services = services(&temp).await;
    let mut out = Vec::new();
    let code = commands::schema_list(&services, "s1", &mut out).await.unwrap();
    assert_eq!(code, 0);
    let out = text(out);
    assert!(out.contains("article"));
    assert!(out.contains("broken"));
    assert!(out.contains("Article"));
}

#[tokio::test]
async fn schema_show_prints_yaml() {
    let temp = TempDir::new().unwrap();
    let services = services(&temp).await;
    let mut out = Vec::new();
    commands::schema_show(&services, "s1", "article", &mut out)
        .await
        .unwrap();
    let out = text(out);
    assert!(out.contains("name: article"));
    assert!(out.contains("kind: TEXT"));
}

#[tokio::test]
async fn schema_check_exit_codes() {
    let temp = TempDir::new().unwrap();
    let services = services(&temp).await;

    let mut out = Vec::new();
    let code = commands::schema_check(&services, "s1", "article", &mut out)
        .await
        .unwrap();
    assert_eq!(code, 0);

    let mut out = Vec::new();
    let code = commands::schema_check(&services, "s1", "broken", &mut out)
        .await
        .unwrap();
    assert_eq!(code, EXIT_FAILURE);
    let out = text(out);
    assert!(out.contains("previewField"));
    assert!(out.contains("is already in use"));
}

#[tokio::test]
async fn content_check_reports_missing_required_field() {
    let temp = TempDir::new().unwrap();
    let services = services(&temp).await;

    let mut field = SchemaField::new("title", FieldType::default());
    field.required = Some(true);
    let update = localess_fields::SchemaUpdate {
        name: "article".into(),
        display_name: None,
        preview_field: None,
        preview_image: None,
        fields: vec![field],
    };
    services.repo.update("s1", "article", update).await.unwrap();

    let mut page = Content::page("p1", "Post", "post", "");
    page.schema = Some("article".into());
    page.data = Some(json!({"title": ""}));
    services.repo.save_content("s1", &page).await.unwrap();

    let mut out = Vec::new();
    let code = commands::content_check(&services, "s1", "p1", &mut out)
        .await
        .unwrap();
    assert_eq!(code, EXIT_FAILURE);
    assert!(text(out).contains("title: is required"));
}

#[tokio::test]
async fn publish_writes_blobs_under_data_dir() {
    let temp = TempDir::new().unwrap();
    let services = services(&temp).await;
    let mut out = Vec::new();
    let code = commands::publish(&services, "s1", Some("cli".into()), &mut out)
        .await
        .unwrap();
    assert_eq!(code, 0);
    assert!(text(out).contains("spaces/s1/translations/en.json"));
    assert!(temp
        .path()
        .join("blobs/spaces/s1/translations/en.json")
        .is_file());
}

#[tokio::test]
async fn publishing_unknown_space_fails() {
    let temp = TempDir::new().unwrap();
    let services = services(&temp).await;
    let mut out = Vec::new();
    assert!(commands::publish(&services, "nope", None, &mut out)
        .await
        .is_err());
}
