use std::collections::BTreeMap;
use std::sync::Arc;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use localess_common::Pretty;
use localess_fields::Schema;
use localess_store::model::to_iso;
use localess_store::{
    paths, BlobStore, Content, ContentKind, ContentQuery, Repository, SchemaStore, Space,
    StoreError, TranslationHistory,
};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::{PublishError, Result};
use crate::localize::localize_data;

pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Body of a published content blob.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishedContent {
    pub id: String,
    pub name: String,
    pub kind: ContentKind,
    pub locale: String,
    pub slug: String,
    pub full_slug: String,
    pub parent_slug: String,
    pub created_at: String,
    pub updated_at: String,
    pub published_at: String,
    pub data: Value,
}

/// What a publish run wrote.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishReport {
    pub space_id: String,
    pub locales: Vec<String>,
    pub translation_blobs: Vec<String>,
    pub content_blobs: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history_id: Option<String>,
}

pub struct Publisher {
    repo: Repository,
    blobs: Arc<dyn BlobStore>,
}

impl Publisher {
    pub fn new(repo: Repository, blobs: Arc<dyn BlobStore>) -> Self {
        Self { repo, blobs }
    }

    /// Publish every translation and page of a space and record the run in
    /// the translation history.
    pub async fn publish(&self, space_id: &str, description: Option<String>) -> Result<PublishReport> {
        info!("Publishing space {}", space_id);
        let space = self.load_space(space_id).await?;

        let mut report = self.write_translations(&space).await?;
        report.content_blobs = self.write_all_contents(&space).await?;

        let entry = TranslationHistory::published(description);
        report.history_id = Some(self.repo.append_history(&space.id, &entry).await?);

        info!(
            "Published space {}: {} translation files, {} content files",
            space_id,
            report.translation_blobs.len(),
            report.content_blobs.len()
        );
        debug!("Publish report: {}", Pretty(&report));
        Ok(report)
    }

    /// Publish only the translations, with a history entry.
    pub async fn publish_translations(
        &self,
        space_id: &str,
        description: Option<String>,
    ) -> Result<PublishReport> {
        let space = self.load_space(space_id).await?;
        let mut report = self.write_translations(&space).await?;
        let entry = TranslationHistory::published(description);
        report.history_id = Some(self.repo.append_history(&space.id, &entry).await?);
        info!("Published translations of space {}", space_id);
        Ok(report)
    }

    /// Publish a single page. No history entry is written.
    pub async fn publish_content(&self, space_id: &str, content_id: &str) -> Result<PublishReport> {
        let space = self.load_space(space_id).await?;
        let content = match self.repo.find_content(space_id, content_id).await {
            Ok(content) => content,
            Err(StoreError::NotFound { .. }) => {
                return Err(PublishError::ContentNotFound {
                    space_id: space_id.to_string(),
                    content_id: content_id.to_string(),
                })
            }
            Err(e) => return Err(e.into()),
        };
        if !content.is_page() {
            return Err(PublishError::NotAPage {
                content_id: content_id.to_string(),
            });
        }

        let schemas = self.repo.find_all(space_id).await?;
        let content_blobs = self
            .write_content(&space, content, &schemas, Utc::now())
            .await?;
        info!("Published content {} of space {}", content_id, space_id);
        Ok(PublishReport {
            space_id: space.id.clone(),
            locales: locale_ids(&space),
            translation_blobs: Vec::new(),
            content_blobs,
            history_id: None,
        })
    }

    async fn load_space(&self, space_id: &str) -> Result<Space> {
        match self.repo.find_space(space_id).await {
            Ok(space) => Ok(space),
            Err(StoreError::NotFound { .. }) => Err(PublishError::SpaceNotFound {
                space_id: space_id.to_string(),
            }),
            Err(e) => Err(e.into()),
        }
    }

    async fn write_translations(&self, space: &Space) -> Result<PublishReport> {
        let translations = self.repo.find_translations(&space.id).await?;
        let fallback = space.locale_fallback.id.as_str();

        let mut report = PublishReport {
            space_id: space.id.clone(),
            locales: locale_ids(space),
            ..PublishReport::default()
        };
        for locale in &space.locales {
            let values: BTreeMap<&str, &str> = translations
                .iter()
                .filter_map(|t| t.resolve(&locale.id, fallback).map(|v| (t.name.as_str(), v)))
                .collect();
            let path = paths::translation_blob(&space.id, &locale.id);
            self.save_json(&path, &values).await?;
            debug!("Wrote {} translations to {}", values.len(), path);
            report.translation_blobs.push(path);
        }
        Ok(report)
    }

    async fn write_all_contents(&self, space: &Space) -> Result<Vec<String>> {
        let query = ContentQuery {
            kind: Some(ContentKind::Page.as_str().to_string()),
            start_slug: None,
        };
        let pages = self.repo.find_contents(&space.id, &query).await?;
        let schemas = self.repo.find_all(&space.id).await?;
        let now = Utc::now();

        let mut written = Vec::new();
        for page in pages.into_iter().filter(|p| p.data.is_some()) {
            written.extend(self.write_content(space, page, &schemas, now).await?);
        }
        Ok(written)
    }

    async fn write_content(
        &self,
        space: &Space,
        mut content: Content,
        schemas: &[Schema],
        now: DateTime<Utc>,
    ) -> Result<Vec<String>> {
        let data = content.data.clone().unwrap_or_else(|| Value::Object(Default::default()));
        let schema = content
            .schema
            .as_deref()
            .and_then(|name| schemas.iter().find(|s| s.name == name));
        if schema.is_none() {
            warn!(
                "Content {} has no known schema ({:?}); publishing data unlocalized",
                content.id, content.schema
            );
        }

        content.published_at = Some(now);
        let mut written = Vec::new();
        for locale in &space.locales {
            let localized = match schema {
                Some(schema) => {
                    localize_data(&data, schema, schemas, &locale.id, &space.locale_fallback.id)
                }
                None => data.clone(),
            };
            let body = PublishedContent {
                id: content.id.clone(),
                name: content.name.clone(),
                kind: content.kind,
                locale: locale.id.clone(),
                slug: content.slug.clone(),
                full_slug: content.full_slug.clone(),
                parent_slug: content.parent_slug.clone(),
                created_at: to_iso(&content.created_at),
                updated_at: to_iso(&content.updated_at),
                published_at: to_iso(&now),
                data: localized,
            };
            let path = paths::content_blob(&space.id, &content.id, &locale.id);
            self.save_json(&path, &body).await?;
            written.push(path);
        }
        self.repo.save_content(&space.id, &content).await?;
        Ok(written)
    }

    async fn save_json<T: Serialize>(&self, path: &str, value: &T) -> Result<()> {
        let bytes = Bytes::from(serde_json::to_vec(value)?);
        self.blobs.save(path, bytes, JSON_CONTENT_TYPE).await?;
        Ok(())
    }
}

fn locale_ids(space: &Space) -> Vec<String> {
    space.locales.iter().map(|l| l.id.clone()).collect()
}
