//! The artifact value type: coordinates, properties, and a resolved file.

use crate::coordinates::Coordinates;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Property key marking an artifact as pre-hosted: the caller supplies the
/// file directly and no tier (workspace, local, remote) is consulted.
pub const LOCAL_PATH_PROPERTY: &str = "local_path";

/// A uniquely-coordinated binary file, immutable after each derivation step.
///
/// `file` starts `None` and is set once a tier (workspace, local cache, or
/// download) produces a concrete path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub coordinates: Coordinates,
    pub properties: HashMap<String, String>,
    pub file: Option<PathBuf>,
}

impl Artifact {
    pub fn new(coordinates: Coordinates) -> Self {
        Self {
            coordinates,
            properties: HashMap::new(),
            file: None,
        }
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn with_local_path(self, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        self.with_property(LOCAL_PATH_PROPERTY, path.to_string_lossy().into_owned())
    }

    pub fn is_snapshot(&self) -> bool {
        self.coordinates.is_snapshot()
    }

    /// The pre-hosted file path, if the caller supplied one via
    /// [`LOCAL_PATH_PROPERTY`].
    pub fn local_path(&self) -> Option<&Path> {
        self.properties
            .get(LOCAL_PATH_PROPERTY)
            .map(|p| Path::new(p.as_str()))
    }

    pub fn set_file(&mut self, file: PathBuf) {
        self.file = Some(file);
    }

    pub fn is_resolved(&self) -> bool {
        self.file.is_some()
    }
}

impl std::fmt::Display for Artifact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.coordinates)
    }
}
