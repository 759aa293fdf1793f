use std::fmt;

use derive_more::{Display, Into};

use crate::{GroupKey, ReadError, group_id};

pub trait PlanRepository {
    fn read_plan(&self) -> Result<Plan, ReadError>;
}

pub trait PlanService {
    fn get_plan(&self) -> Result<Plan, ReadError>;
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Plan {
    pub days: Vec<Day>,
}

impl Plan {
    #[must_use]
    pub fn day(&self, id: &DayID) -> Option<&Day> {
        self.days.iter().find(|d| d.id == *id)
    }

    pub fn day_ids(&self) -> impl Iterator<Item = &DayID> {
        self.days.iter().map(|d| &d.id)
    }
}

#[derive(Debug, Display, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DayID(String);

impl AsRef<str> for DayID {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for DayID {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for DayID {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Day {
    pub id: DayID,
    pub title: String,
    pub parts: Vec<Part>,
}

impl Day {
    /// Exercises in the order they are performed, across all parts.
    pub fn exercises(&self) -> impl Iterator<Item = &ExerciseDefinition> {
        self.parts.iter().flat_map(|p| p.exercises.iter())
    }

    #[must_use]
    pub fn num_sets(&self) -> u32 {
        self.exercises().map(|e| e.sets).sum()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Part {
    pub title: String,
    pub exercises: Vec<ExerciseDefinition>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseDefinition {
    pub code: Code,
    pub name: String,
    pub alt_name: String,
    pub note: String,
    pub ai_query: String,
    pub target: Target,
    pub sets: u32,
    pub rest: Time,
}

#[derive(Debug, Display, Clone, PartialEq, Eq, Hash)]
pub struct Code(String);

impl AsRef<str> for Code {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Code {
    #[must_use]
    pub fn group(&self) -> GroupKey {
        group_id(&self.0)
    }
}

impl From<&str> for Code {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for Code {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Reps(Reps),
    Time(Time),
}

impl Target {
    #[must_use]
    pub fn is_timed(&self) -> bool {
        matches!(self, Target::Time(_))
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Reps(reps) => write!(f, "{reps} reps"),
            Target::Time(time) => write!(f, "{time} s"),
        }
    }
}

#[derive(Debug, Default, Display, Clone, Copy, Into, PartialEq, Eq, PartialOrd, Ord)]
pub struct Reps(u32);

impl From<u32> for Reps {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

/// Duration in whole seconds.
#[derive(Debug, Default, Display, Clone, Copy, Into, PartialEq, Eq, PartialOrd, Ord)]
pub struct Time(u32);

impl Time {
    pub const DEFAULT_REST: Time = Time(90);

    #[must_use]
    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub fn saturating_dec(self) -> Self {
        Self(self.0.saturating_sub(1))
    }
}

impl From<u32> for Time {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl From<Time> for i64 {
    fn from(value: Time) -> Self {
        i64::from(value.0)
    }
}
