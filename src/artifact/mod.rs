//! Artifact namespace - where every file of a puzzle run lives.
//!
//! A puzzle coordinate maps to a fixed set of slots under
//! `<root>/year{Y}/day{D}/part{P}/`. Slots are only ever replaced, never
//! appended to.

mod slot;
mod store;

pub use slot::ArtifactSlot;
pub use store::ArtifactStore;
