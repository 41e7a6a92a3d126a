//! Logging utilities

use serde::Serialize;
use std::fmt::Debug;

/// Wrapper for pretty-printing types in logs as YAML
///
/// ```ignore
/// use localess_common::Pretty;
/// use tracing::debug;
///
/// debug!("loaded config: {}", Pretty(&config));
/// ```
///
/// Outputs YAML with a leading newline. Debug is the fallback if YAML
/// serialization fails.
pub struct Pretty<T>(pub T);

impl<T: Serialize + Debug> std::fmt::Display for Pretty<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match serde_yaml_ng::to_string(&self.0) {
            Ok(yaml) => write!(f, "\n{}", yaml),
            Err(_) => write!(f, "\n{:#?}", self.0),
        }
    }
}

impl<T: Serialize + Debug> std::fmt::Debug for Pretty<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Serialize)]
    struct Locale {
        id: String,
        name: String,
    }

    #[test]
    fn pretty_renders_yaml_with_leading_newline() {
        let locale = Locale {
            id: "en".into(),
            name: "English".into(),
        };
        let out = format!("{}", Pretty(&locale));
        assert!(out.starts_with('\n'));
        assert!(out.contains("id: en"));
        assert!(out.contains("name: English"));
    }

    #[test]
    fn pretty_debug_matches_display() {
        let value = serde_json::json!({"locales": ["en", "de"]});
        assert_eq!(format!("{:?}", Pretty(&value)), format!("{}", Pretty(&value)));
    }
}
