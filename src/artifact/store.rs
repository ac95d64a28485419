//! Filesystem-backed artifact store

use std::path::{Path, PathBuf};

use log::debug;

use super::ArtifactSlot;
use crate::domain::PuzzleCoordinate;
use crate::error::{Result, SolvrError};

/// Resolves (coordinate, slot) pairs to files under a root directory
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    root: PathBuf,
    extension: String,
}

impl ArtifactStore {
    /// Create a store rooted at `root`; generated source slots use `extension`
    pub fn new(root: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        let extension = extension.into();
        Self {
            root: root.into(),
            extension: extension.trim_start_matches('.').to_string(),
        }
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Directory holding every slot of a coordinate
    pub fn dir(&self, coordinate: &PuzzleCoordinate) -> PathBuf {
        self.root.join(coordinate.relative_dir())
    }

    /// Location of a slot. Pure: the same inputs always give the same path.
    pub fn resolve(&self, coordinate: &PuzzleCoordinate, slot: ArtifactSlot) -> PathBuf {
        self.dir(coordinate).join(slot.file_name(&self.extension))
    }

    /// Write content, creating parent directories and replacing any previous content
    pub async fn write(&self, path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(path, content).await?;
        debug!("Wrote {} bytes to {}", content.len(), path.display());
        Ok(())
    }

    pub fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    pub async fn read(&self, path: &Path) -> Result<String> {
        tokio::fs::read_to_string(path)
            .await
            .map_err(|e| SolvrError::Artifact(format!("Failed to read {}: {}", path.display(), e)))
    }

    pub async fn write_slot(&self, coordinate: &PuzzleCoordinate, slot: ArtifactSlot, content: &str) -> Result<PathBuf> {
        let path = self.resolve(coordinate, slot);
        self.write(&path, content).await?;
        Ok(path)
    }

    pub async fn read_slot(&self, coordinate: &PuzzleCoordinate, slot: ArtifactSlot) -> Result<String> {
        self.read(&self.resolve(coordinate, slot)).await
    }

    pub fn slot_exists(&self, coordinate: &PuzzleCoordinate, slot: ArtifactSlot) -> bool {
        self.exists(&self.resolve(coordinate, slot))
    }
}
