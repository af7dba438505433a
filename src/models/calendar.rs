//! The weekly planning horizon.
//!
//! A week is exactly 7 days × 3 shifts = 21 [`Block`]s. Blocks are
//! linearized day-major, shift-minor: `index = day * 3 + shift`, so block
//! index order is also chronological order.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Days in the planning horizon.
pub const DAYS_PER_WEEK: usize = 7;

/// Shifts per day.
pub const SHIFTS_PER_DAY: usize = 3;

/// Blocks in the planning horizon.
pub const BLOCKS_PER_WEEK: usize = DAYS_PER_WEEK * SHIFTS_PER_DAY;

/// Day of the week, Monday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Day {
    /// All days in calendar order.
    pub const ALL: [Day; DAYS_PER_WEEK] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
        Day::Sunday,
    ];

    /// Zero-based position in the week.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Day at a zero-based position, if in range.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Name used in input rows and schedule files.
    pub fn name(self) -> &'static str {
        match self {
            Day::Monday => "mandag",
            Day::Tuesday => "tirsdag",
            Day::Wednesday => "onsdag",
            Day::Thursday => "torsdag",
            Day::Friday => "fredag",
            Day::Saturday => "lørdag",
            Day::Sunday => "søndag",
        }
    }

    /// Three-letter column label for reports.
    pub fn short_name(self) -> &'static str {
        match self {
            Day::Monday => "man",
            Day::Tuesday => "tir",
            Day::Wednesday => "ons",
            Day::Thursday => "tor",
            Day::Friday => "fre",
            Day::Saturday => "lør",
            Day::Sunday => "søn",
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Day {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim().to_lowercase();
        Day::ALL
            .into_iter()
            .find(|d| d.name() == token)
            .ok_or_else(|| ValidationError::UnknownDay(s.trim().to_string()))
    }
}

/// Kind of shift. The discriminant is the shift's position within a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ShiftKind {
    Night,
    Day,
    Evening,
}

impl ShiftKind {
    /// All shift kinds in within-day order.
    pub const ALL: [ShiftKind; SHIFTS_PER_DAY] =
        [ShiftKind::Night, ShiftKind::Day, ShiftKind::Evening];

    /// Zero-based position within a day.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Name used in input rows and schedule files.
    pub fn name(self) -> &'static str {
        match self {
            ShiftKind::Night => "nat",
            ShiftKind::Day => "dag",
            ShiftKind::Evening => "aften",
        }
    }
}

impl fmt::Display for ShiftKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ShiftKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim().to_lowercase();
        ShiftKind::ALL
            .into_iter()
            .find(|k| k.name() == token)
            .ok_or_else(|| ValidationError::UnknownShift(s.trim().to_string()))
    }
}

/// One `(day, shift)` planning slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Block {
    pub day: Day,
    pub shift: ShiftKind,
}

impl Block {
    pub fn new(day: Day, shift: ShiftKind) -> Self {
        Self { day, shift }
    }

    /// Linear index `day * 3 + shift`.
    pub fn index(self) -> usize {
        self.day.index() * SHIFTS_PER_DAY + self.shift.index()
    }

    /// Block at a linear index.
    ///
    /// # Panics
    /// Panics if `index >= BLOCKS_PER_WEEK`.
    pub fn from_index(index: usize) -> Self {
        assert!(index < BLOCKS_PER_WEEK, "block index {index} out of range");
        Self {
            day: Day::ALL[index / SHIFTS_PER_DAY],
            shift: ShiftKind::ALL[index % SHIFTS_PER_DAY],
        }
    }

    /// All blocks of the week in index order.
    pub fn all() -> impl Iterator<Item = Block> {
        (0..BLOCKS_PER_WEEK).map(Block::from_index)
    }
}

/// Required headcount per shift kind, identical for every day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RequiredWorkers {
    pub night: usize,
    pub day: usize,
    pub evening: usize,
}

impl RequiredWorkers {
    pub fn new(night: usize, day: usize, evening: usize) -> Self {
        Self { night, day, evening }
    }

    /// Headcount for one shift kind.
    pub fn for_shift(&self, shift: ShiftKind) -> usize {
        match shift {
            ShiftKind::Night => self.night,
            ShiftKind::Day => self.day,
            ShiftKind::Evening => self.evening,
        }
    }

    /// Headcount for the block at `index`.
    pub fn for_block(&self, index: usize) -> usize {
        self.for_shift(Block::from_index(index).shift)
    }

    /// Distinct workers needed to staff one day.
    pub fn per_day(&self) -> usize {
        self.night + self.day + self.evening
    }
}
