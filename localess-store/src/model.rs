//! Domain models persisted in the document store.
//!
//! Documents are stored without their id; the id is the last path segment
//! and is filled in by the repository on read.

use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Result, StoreError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Locale {
    pub id: String,
    pub name: String,
}

impl Locale {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Tenant container owning schemas, contents and translations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Space {
    #[serde(default, skip_serializing)]
    pub id: String,
    pub name: String,
    pub locales: Vec<Locale>,
    pub locale_fallback: Locale,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Space {
    /// The fallback locale must be one of the configured locales.
    pub fn validate(&self) -> Result<()> {
        if self.has_locale(&self.locale_fallback.id) {
            Ok(())
        } else {
            Err(StoreError::Invariant {
                message: format!(
                    "space '{}': fallback locale '{}' is not one of its locales",
                    self.id, self.locale_fallback.id
                ),
            })
        }
    }

    pub fn has_locale(&self, locale: &str) -> bool {
        self.locales.iter().any(|l| l.id == locale)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContentKind {
    Page,
    Folder,
}

impl ContentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::Page => "PAGE",
            ContentKind::Folder => "FOLDER",
        }
    }
}

/// A page or folder in a space's content tree.
///
/// `data` holds the authored field values of a page. Translatable fields
/// carry one key per non-fallback locale, named `{field}_{locale}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Content {
    #[serde(default, skip_serializing)]
    pub id: String,
    pub kind: ContentKind,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub parent_slug: String,
    pub full_slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
}

impl Content {
    /// A new page under `parent_slug`, timestamped now.
    pub fn page(
        id: impl Into<String>,
        name: impl Into<String>,
        slug: impl Into<String>,
        parent_slug: impl Into<String>,
    ) -> Self {
        Self::new(ContentKind::Page, id, name, slug, parent_slug)
    }

    pub fn folder(
        id: impl Into<String>,
        name: impl Into<String>,
        slug: impl Into<String>,
        parent_slug: impl Into<String>,
    ) -> Self {
        Self::new(ContentKind::Folder, id, name, slug, parent_slug)
    }

    fn new(
        kind: ContentKind,
        id: impl Into<String>,
        name: impl Into<String>,
        slug: impl Into<String>,
        parent_slug: impl Into<String>,
    ) -> Self {
        let slug = slug.into();
        let parent_slug = parent_slug.into();
        let full_slug = if parent_slug.is_empty() {
            slug.clone()
        } else {
            format!("{parent_slug}/{slug}")
        };
        let now = Utc::now();
        Self {
            id: id.into(),
            kind,
            name: name.into(),
            slug,
            parent_slug,
            full_slug,
            schema: None,
            data: None,
            created_at: now,
            updated_at: now,
            published_at: None,
        }
    }

    pub fn is_page(&self) -> bool {
        self.kind == ContentKind::Page
    }
}

/// Timestamps in published JSON use millisecond precision and a `Z` suffix.
pub fn to_iso(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Lightweight view of a content used for navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentLink {
    pub id: String,
    pub kind: ContentKind,
    pub name: String,
    pub slug: String,
    pub full_slug: String,
    pub parent_slug: String,
    pub created_at: String,
    pub updated_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<String>,
}

impl From<&Content> for ContentLink {
    fn from(content: &Content) -> Self {
        let published_at = match content.kind {
            ContentKind::Page => content.published_at.as_ref().map(to_iso),
            ContentKind::Folder => None,
        };
        Self {
            id: content.id.clone(),
            kind: content.kind,
            name: content.name.clone(),
            slug: content.slug.clone(),
            full_slug: content.full_slug.clone(),
            parent_slug: content.parent_slug.clone(),
            created_at: to_iso(&content.created_at),
            updated_at: to_iso(&content.updated_at),
            published_at,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TranslationKind {
    #[default]
    String,
    Plural,
    Array,
}

/// A translation key with one value per locale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Translation {
    #[serde(default, skip_serializing)]
    pub id: String,
    pub name: String,
    #[serde(default, rename = "type")]
    pub kind: TranslationKind,
    #[serde(default)]
    pub locales: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Translation {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: name.clone(),
            name,
            kind: TranslationKind::String,
            locales: BTreeMap::new(),
            description: None,
        }
    }

    pub fn with_value(mut self, locale: impl Into<String>, value: impl Into<String>) -> Self {
        self.locales.insert(locale.into(), value.into());
        self
    }

    /// Value for `locale`, or for `fallback` when the locale has none.
    pub fn resolve(&self, locale: &str, fallback: &str) -> Option<&str> {
        self.locales
            .get(locale)
            .filter(|v| !v.is_empty())
            .or_else(|| self.locales.get(fallback))
            .map(String::as_str)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TranslationHistoryType {
    Published,
}

/// Audit entry appended when translations are published.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationHistory {
    #[serde(rename = "type")]
    pub kind: TranslationHistoryType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl TranslationHistory {
    pub fn published(description: Option<String>) -> Self {
        Self {
            kind: TranslationHistoryType::Published,
            description,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn space(fallback: &str) -> Space {
        Space {
            id: "s1".into(),
            name: "Site".into(),
            locales: vec![Locale::new("en", "English"), Locale::new("de", "German")],
            locale_fallback: Locale::new(fallback, fallback),
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn fallback_must_be_a_space_locale() {
        assert!(space("en").validate().is_ok());
        assert!(matches!(
            space("fr").validate(),
            Err(StoreError::Invariant { .. })
        ));
    }

    #[test]
    fn full_slug_joins_parent() {
        assert_eq!(Content::page("c1", "Home", "home", "").full_slug, "home");
        assert_eq!(Content::page("c2", "Post", "post", "blog").full_slug, "blog/post");
    }

    #[test]
    fn link_omits_published_at_for_folders() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let mut folder = Content::folder("f1", "Blog", "blog", "");
        folder.created_at = ts;
        folder.updated_at = ts;
        folder.published_at = Some(ts);

        let link = serde_json::to_value(ContentLink::from(&folder)).unwrap();
        assert_eq!(
            link,
            json!({
                "id": "f1",
                "kind": "FOLDER",
                "name": "Blog",
                "slug": "blog",
                "fullSlug": "blog",
                "parentSlug": "",
                "createdAt": "2024-01-02T03:04:05.000Z",
                "updatedAt": "2024-01-02T03:04:05.000Z"
            })
        );
    }

    #[test]
    fn link_carries_published_at_for_pages() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let mut page = Content::page("p1", "Post", "post", "blog");
        page.published_at = Some(ts);
        let link = ContentLink::from(&page);
        assert_eq!(link.published_at.as_deref(), Some("2024-01-02T03:04:05.000Z"));
    }

    #[test]
    fn translation_falls_back() {
        let t = Translation::new("greeting").with_value("en", "Hello");
        assert_eq!(t.resolve("de", "en"), Some("Hello"));
        let t = t.with_value("de", "Hallo");
        assert_eq!(t.resolve("de", "en"), Some("Hallo"));
        assert_eq!(Translation::new("empty").resolve("de", "en"), None);
    }

    #[test]
    fn stored_content_omits_id() {
        let page = Content::page("p1", "Post", "post", "");
        let value = serde_json::to_value(&page).unwrap();
        assert!(value.get("id").is_none());
        assert_eq!(value["kind"], "PAGE");
    }
}
