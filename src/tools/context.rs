//! Ambient state every tool call runs against

use std::path::{Path, PathBuf};

use crate::artifact::{ArtifactSlot, ArtifactStore};
use crate::domain::PuzzleCoordinate;

/// The coordinate, store and working directory of one run.
///
/// The oracle never names coordinates; they come from here.
#[derive(Debug, Clone)]
pub struct ToolContext {
    pub coordinate: PuzzleCoordinate,
    pub store: ArtifactStore,
    /// Working directory for every subprocess
    pub workdir: PathBuf,
}

impl ToolContext {
    pub fn new(coordinate: PuzzleCoordinate, store: ArtifactStore, workdir: impl Into<PathBuf>) -> Self {
        Self {
            coordinate,
            store,
            workdir: workdir.into(),
        }
    }

    /// Absolute location of a slot, for substitution into command lines
    pub fn slot_path(&self, slot: ArtifactSlot) -> PathBuf {
        absolute(self.store.resolve(&self.coordinate, slot))
    }

    /// Absolute coordinate directory
    pub fn dir(&self) -> PathBuf {
        absolute(self.store.dir(&self.coordinate))
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }
}

fn absolute(path: PathBuf) -> PathBuf {
    std::path::absolute(&path).unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_slot_paths_are_absolute() {
        let ctx = ToolContext::new(
            PuzzleCoordinate::new(2023, 4, 2).unwrap(),
            ArtifactStore::new("puzzles", "js"),
            ".",
        );

        let path = ctx.slot_path(ArtifactSlot::Solution);
        assert!(path.is_absolute());
        assert!(path.ends_with("puzzles/year2023/day4/part2/solution.js"));
        assert!(ctx.dir().ends_with("year2023/day4/part2"));
    }

    #[test]
    fn test_slot_path_under_absolute_root() {
        let temp = tempdir().unwrap();
        let store = ArtifactStore::new(temp.path(), "js");
        let coordinate = PuzzleCoordinate::new(2023, 4, 1).unwrap();
        let ctx = ToolContext::new(coordinate, store.clone(), temp.path());

        assert_eq!(
            ctx.slot_path(ArtifactSlot::RawInput),
            store.resolve(&coordinate, ArtifactSlot::RawInput)
        );
        assert_eq!(ctx.workdir(), temp.path());
    }
}
