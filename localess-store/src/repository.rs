//! Typed access to the document store.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use localess_fields::{Schema, SchemaUpdate};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::document::DocumentStore;
use crate::error::{Result, StoreError};
use crate::model::{Content, Space, Translation, TranslationHistory};
use crate::query::ContentQuery;

/// Document and blob path layout.
pub mod paths {
    pub const SPACES: &str = "spaces";

    pub fn space(space_id: &str) -> String {
        format!("{SPACES}/{space_id}")
    }

    pub fn contents(space_id: &str) -> String {
        format!("{SPACES}/{space_id}/contents")
    }

    pub fn content(space_id: &str, content_id: &str) -> String {
        format!("{}/{content_id}", contents(space_id))
    }

    pub fn schemas(space_id: &str) -> String {
        format!("{SPACES}/{space_id}/schemas")
    }

    pub fn schema(space_id: &str, schema_id: &str) -> String {
        format!("{}/{schema_id}", schemas(space_id))
    }

    pub fn translations(space_id: &str) -> String {
        format!("{SPACES}/{space_id}/translations")
    }

    pub fn translation(space_id: &str, translation_id: &str) -> String {
        format!("{}/{translation_id}", translations(space_id))
    }

    pub fn translations_history(space_id: &str) -> String {
        format!("{SPACES}/{space_id}/translations_history")
    }

    /// Published translations of one locale.
    pub fn translation_blob(space_id: &str, locale: &str) -> String {
        format!("{SPACES}/{space_id}/translations/{locale}.json")
    }

    /// Published content of one locale.
    pub fn content_blob(space_id: &str, content_id: &str, locale: &str) -> String {
        format!("{SPACES}/{space_id}/contents/{content_id}/{locale}.json")
    }
}

/// Models whose id is the last segment of their document path.
trait Identified {
    fn set_id(&mut self, id: String);
}

impl Identified for Space {
    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

impl Identified for Content {
    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

impl Identified for Translation {
    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

impl Identified for Schema {
    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

fn decode<T: DeserializeOwned>(path: &str, value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(|e| StoreError::InvalidDocument {
        path: path.to_string(),
        message: e.to_string(),
    })
}

/// Persistence operations for spaces, contents, translations and schemas.
#[derive(Clone)]
pub struct Repository {
    docs: Arc<dyn DocumentStore>,
}

impl std::fmt::Debug for Repository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repository").finish_non_exhaustive()
    }
}

impl Repository {
    pub fn new(docs: Arc<dyn DocumentStore>) -> Self {
        Self { docs }
    }

    async fn find<T: DeserializeOwned + Identified>(&self, path: &str, id: &str) -> Result<T> {
        let value = self
            .docs
            .get(path)
            .await?
            .ok_or_else(|| StoreError::not_found(path))?;
        let mut model: T = decode(path, value)?;
        model.set_id(id.to_string());
        Ok(model)
    }

    async fn find_in<T: DeserializeOwned + Identified>(&self, collection: &str) -> Result<Vec<T>> {
        let documents = self.docs.list(collection).await?;
        documents
            .into_iter()
            .map(|doc| {
                let path = format!("{collection}/{}", doc.id);
                let mut model: T = decode(&path, doc.data)?;
                model.set_id(doc.id);
                Ok(model)
            })
            .collect()
    }

    async fn put<T: Serialize>(&self, path: &str, model: &T) -> Result<()> {
        self.docs.set(path, serde_json::to_value(model)?).await
    }

    pub async fn find_space(&self, space_id: &str) -> Result<Space> {
        self.find(&paths::space(space_id), space_id).await
    }

    /// Rejects spaces whose fallback locale is not one of their locales.
    pub async fn save_space(&self, space: &Space) -> Result<()> {
        space.validate()?;
        self.put(&paths::space(&space.id), space).await
    }

    pub async fn find_contents(&self, space_id: &str, query: &ContentQuery) -> Result<Vec<Content>> {
        let contents = self.find_in(&paths::contents(space_id)).await?;
        Ok(query.apply(contents))
    }

    pub async fn find_content(&self, space_id: &str, content_id: &str) -> Result<Content> {
        self.find(&paths::content(space_id, content_id), content_id)
            .await
    }

    pub async fn save_content(&self, space_id: &str, content: &Content) -> Result<()> {
        self.put(&paths::content(space_id, &content.id), content)
            .await
    }

    /// All translations of a space, ordered by id.
    pub async fn find_translations(&self, space_id: &str) -> Result<Vec<Translation>> {
        self.find_in(&paths::translations(space_id)).await
    }

    pub async fn save_translation(&self, space_id: &str, translation: &Translation) -> Result<()> {
        self.put(&paths::translation(space_id, &translation.id), translation)
            .await
    }

    /// Publish history, oldest first.
    pub async fn find_history(&self, space_id: &str) -> Result<Vec<TranslationHistory>> {
        let collection = paths::translations_history(space_id);
        let mut history = self
            .docs
            .list(&collection)
            .await?
            .into_iter()
            .map(|doc| decode(&format!("{collection}/{}", doc.id), doc.data))
            .collect::<Result<Vec<TranslationHistory>>>()?;
        history.sort_by_key(|h| h.created_at);
        Ok(history)
    }

    /// Append a history entry and return its generated id.
    pub async fn append_history(&self, space_id: &str, entry: &TranslationHistory) -> Result<String> {
        self.docs
            .add(
                &paths::translations_history(space_id),
                serde_json::to_value(entry)?,
            )
            .await
    }
}

/// Persistence contract used by the schema editor.
#[async_trait]
pub trait SchemaStore: Send + Sync {
    /// All schemas of a space, ordered by id.
    async fn find_all(&self, space_id: &str) -> Result<Vec<Schema>>;

    async fn find_by_id(&self, space_id: &str, schema_id: &str) -> Result<Schema>;

    /// Store a new schema. Fails when the id is taken.
    async fn create(&self, space_id: &str, schema: Schema) -> Result<Schema>;

    /// Replace the editable part of a schema and stamp `updatedAt`.
    /// Concurrent updates are last-write-wins.
    async fn update(&self, space_id: &str, schema_id: &str, update: SchemaUpdate) -> Result<Schema>;
}

#[async_trait]
impl SchemaStore for Repository {
    async fn find_all(&self, space_id: &str) -> Result<Vec<Schema>> {
        self.find_in(&paths::schemas(space_id)).await
    }

    async fn find_by_id(&self, space_id: &str, schema_id: &str) -> Result<Schema> {
        self.find(&paths::schema(space_id, schema_id), schema_id)
            .await
    }

    async fn create(&self, space_id: &str, mut schema: Schema) -> Result<Schema> {
        let path = paths::schema(space_id, &schema.id);
        if self.docs.get(&path).await?.is_some() {
            return Err(StoreError::AlreadyExists { path });
        }
        let now = Utc::now();
        schema.created_at = Some(now);
        schema.updated_at = Some(now);
        self.put(&path, &schema).await?;
        tracing::info!("Created schema {} in space {}", schema.name, space_id);
        Ok(schema)
    }

    async fn update(&self, space_id: &str, schema_id: &str, update: SchemaUpdate) -> Result<Schema> {
        let path = paths::schema(space_id, schema_id);
        let mut schema: Schema = self.find(&path, schema_id).await?;
        schema.apply(update);
        schema.updated_at = Some(Utc::now());
        self.put(&path, &schema).await?;
        tracing::info!("Updated schema {} in space {}", schema.name, space_id);
        Ok(schema)
    }
}
