//! Strongly-typed key used by the sync-context lock registry.
//!
//! Deliberately version-independent: the version resolver may rewrite an
//! artifact's version mid-resolution, but the sync context must key on the
//! *logical* subject so two concurrent callers resolving the same
//! coordinate (possibly against different version ranges) still serialize
//! against each other.

use crate::coordinates::Coordinates;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubjectKey(String);

impl SubjectKey {
    pub fn from_coordinates(coordinates: &Coordinates) -> Self {
        Self(format!(
            "{}:{}:{}:{}",
            coordinates.group,
            coordinates.id,
            coordinates.classifier.as_deref().unwrap_or(""),
            coordinates.extension,
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
