//! Domain types for Solvr
//!
//! - PuzzleCoordinate: the (year, day, part) key every artifact path derives from
//! - RunOutcome: how an orchestration run ended

pub mod coordinate;
pub mod outcome;

pub use coordinate::PuzzleCoordinate;
pub use outcome::RunOutcome;
