//! Content listing filters.

use serde::Deserialize;

use crate::model::Content;

/// Upper bound appended to a slug prefix: every printable slug character
/// sorts below it.
const PREFIX_END: char = '~';

/// Filters for listing a space's contents.
///
/// Empty strings behave like absent filters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentQuery {
    /// Exact match on the content kind (`PAGE` or `FOLDER`).
    #[serde(default)]
    pub kind: Option<String>,
    /// Restrict to full slugs in `[start_slug, start_slug + "~")`.
    #[serde(default)]
    pub start_slug: Option<String>,
}

impl ContentQuery {
    pub fn kind(&self) -> Option<&str> {
        self.kind.as_deref().filter(|k| !k.is_empty())
    }

    pub fn start_slug(&self) -> Option<&str> {
        self.start_slug.as_deref().filter(|s| !s.is_empty())
    }

    /// True when `content` passes every filter.
    pub fn matches(&self, content: &Content) -> bool {
        if let Some(kind) = self.kind() {
            if content.kind.as_str() != kind {
                return false;
            }
        }
        if let Some(start) = self.start_slug() {
            let end = format!("{start}{PREFIX_END}");
            let slug = content.full_slug.as_str();
            if slug < start || slug >= end.as_str() {
                return false;
            }
        }
        true
    }

    /// Filter and order `contents`. A slug range orders by full slug,
    /// otherwise by id.
    pub fn apply(&self, contents: Vec<Content>) -> Vec<Content> {
        let mut selected: Vec<Content> = contents.into_iter().filter(|c| self.matches(c)).collect();
        if self.start_slug().is_some() {
            selected.sort_by(|a, b| a.full_slug.cmp(&b.full_slug).then_with(|| a.id.cmp(&b.id)));
        } else {
            selected.sort_by(|a, b| a.id.cmp(&b.id));
        }
        selected
    }
}
