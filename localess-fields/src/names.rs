//! Reserved-name bookkeeping for schema edit sessions.

use std::collections::BTreeMap;

/// Names already taken inside a scope (field names of one schema, or schema
/// names of one space).
///
/// A multiset: the same name may be reserved more than once when persisted
/// data already contains duplicates, and each `release` drops one claim.
/// Comparison is case-sensitive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameRegistry {
    claims: BTreeMap<String, usize>,
}

impl NameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a claim on `name`, returning the updated registry.
    pub fn with(mut self, name: impl Into<String>) -> Self {
        self.reserve(name);
        self
    }

    /// Drop one claim on `name`, returning the updated registry.
    pub fn without(mut self, name: &str) -> Self {
        self.release(name);
        self
    }

    pub fn reserve(&mut self, name: impl Into<String>) {
        *self.claims.entry(name.into()).or_default() += 1;
    }

    /// Returns false when `name` held no claim.
    pub fn release(&mut self, name: &str) -> bool {
        match self.claims.get_mut(name) {
            Some(count) if *count > 1 => {
                *count -= 1;
                true
            }
            Some(_) => {
                self.claims.remove(name);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.claims.contains_key(name)
    }

    /// True when `name` is taken by someone other than `except`.
    ///
    /// `except` is the name the caller itself registered, so a field never
    /// collides with its own reservation.
    pub fn is_reserved(&self, name: &str, except: Option<&str>) -> bool {
        match self.claims.get(name) {
            None => false,
            Some(&count) if except == Some(name) => count > 1,
            Some(_) => true,
        }
    }

    pub fn len(&self) -> usize {
        self.claims.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for NameRegistry {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        iter.into_iter().fold(NameRegistry::new(), NameRegistry::with)
    }
}
