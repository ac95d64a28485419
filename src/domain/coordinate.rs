//! Puzzle coordinate - identifies one puzzle part and its artifact namespace

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SolvrError};

/// First Advent of Code event
pub const FIRST_YEAR: u16 = 2015;

/// Upper bound accepted for the year field
pub const LAST_YEAR: u16 = 2100;

/// Days per event
pub const MAX_DAY: u8 = 25;

/// Parts per day
pub const MAX_PART: u8 = 2;

/// Ordered (year, day, part) triple. Immutable once a run starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PuzzleCoordinate {
    year: u16,
    day: u8,
    part: u8,
}

impl PuzzleCoordinate {
    /// Create a coordinate, rejecting values outside the event calendar
    pub fn new(year: u16, day: u8, part: u8) -> Result<Self> {
        if !(FIRST_YEAR..=LAST_YEAR).contains(&year) {
            return Err(SolvrError::InvalidCoordinate(format!(
                "year {} is outside {}..={}",
                year, FIRST_YEAR, LAST_YEAR
            )));
        }
        if !(1..=MAX_DAY).contains(&day) {
            return Err(SolvrError::InvalidCoordinate(format!(
                "day {} is outside 1..={}",
                day, MAX_DAY
            )));
        }
        if !(1..=MAX_PART).contains(&part) {
            return Err(SolvrError::InvalidCoordinate(format!(
                "part {} is outside 1..={}",
                part, MAX_PART
            )));
        }
        Ok(Self { year, day, part })
    }

    pub fn year(&self) -> u16 {
        self.year
    }

    pub fn day(&self) -> u8 {
        self.day
    }

    pub fn part(&self) -> u8 {
        self.part
    }

    /// Namespace relative to the artifact root: `year{Y}/day{D}/part{P}`
    pub fn relative_dir(&self) -> PathBuf {
        PathBuf::from(format!("year{}", self.year))
            .join(format!("day{}", self.day))
            .join(format!("part{}", self.part))
    }
}

impl fmt::Display for PuzzleCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} day {} part {}", self.year, self.day, self.part)
    }
}
