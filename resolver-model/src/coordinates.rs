//! Artifact coordinates: the tuple that uniquely addresses a binary file.

use serde::{Deserialize, Serialize};
use std::fmt;

/// `(group, id, classifier, extension, version, base_version)`.
///
/// `version` and `base_version` differ only for snapshots: `version` may
/// carry a resolved timestamp (`1.0-20240101.120000-3`) while
/// `base_version` is the logical, caller-facing identity (`1.0-SNAPSHOT`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coordinates {
    pub group: String,
    pub id: String,
    pub classifier: Option<String>,
    pub extension: String,
    pub version: String,
    pub base_version: String,
}

impl Coordinates {
    pub fn new(
        group: impl Into<String>,
        id: impl Into<String>,
        extension: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        let version = version.into();
        Self {
            group: group.into(),
            id: id.into(),
            classifier: None,
            extension: extension.into(),
            base_version: version.clone(),
            version,
        }
    }

    pub fn with_classifier(mut self, classifier: impl Into<String>) -> Self {
        self.classifier = Some(classifier.into());
        self
    }

    pub fn with_version(mut self, version: impl Into<String>, base_version: impl Into<String>) -> Self {
        self.version = version.into();
        self.base_version = base_version.into();
        self
    }

    /// A version denotes a snapshot line iff it ends in `-SNAPSHOT` or carries
    /// a timestamped snapshot qualifier distinct from `base_version`.
    pub fn is_snapshot(&self) -> bool {
        self.version.ends_with("-SNAPSHOT") || self.version != self.base_version
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group, self.id)?;
        if let Some(classifier) = &self.classifier {
            write!(f, ":{}:{}", classifier, self.extension)?;
        } else {
            write!(f, ":{}", self.extension)?;
        }
        write!(f, ":{}", self.version)
    }
}
