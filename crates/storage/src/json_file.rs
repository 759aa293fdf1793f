use std::{
    fs, io,
    path::{Path, PathBuf},
};

use indexmap::IndexMap;
use log::debug;
use serde::Deserialize;
use setflow_app::{Settings, SettingsRepository};
use setflow_domain as domain;

/// Workout plan stored as JSON, keyed by day.
pub struct PlanFile {
    path: PathBuf,
}

impl PlanFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl domain::PlanRepository for PlanFile {
    fn read_plan(&self) -> Result<domain::Plan, domain::ReadError> {
        let content = fs::read_to_string(&self.path).map_err(|err| io_error(&self.path, err))?;
        let plan = parse_plan(&content)?;
        debug!(
            "read {} days from {}",
            plan.days.len(),
            self.path.display()
        );
        Ok(plan)
    }
}

pub fn parse_plan(json: &str) -> Result<domain::Plan, domain::ReadError> {
    serde_json::from_str::<PlanDto>(json)
        .map(domain::Plan::from)
        .map_err(|err| domain::StorageError::InvalidData(err.to_string()).into())
}

fn io_error(path: &Path, err: io::Error) -> domain::StorageError {
    match err.kind() {
        io::ErrorKind::NotFound => domain::StorageError::NotFound(path.display().to_string()),
        _ => domain::StorageError::Other(Box::new(err)),
    }
}

#[derive(Deserialize)]
struct PlanDto {
    days: IndexMap<String, DayDto>,
}

#[derive(Deserialize)]
struct DayDto {
    #[serde(default)]
    title: String,
    #[serde(default)]
    parts: Vec<PartDto>,
}

#[derive(Deserialize)]
struct PartDto {
    #[serde(default)]
    title: String,
    #[serde(default)]
    exercises: Vec<ExerciseDto>,
}

#[derive(Deserialize)]
struct ExerciseDto {
    code: String,
    #[serde(default)]
    name_en: String,
    #[serde(default)]
    name_fa: String,
    #[serde(default)]
    note: String,
    #[serde(default)]
    ai_query: String,
    #[serde(default = "one")]
    sets: u32,
    reps: Option<u32>,
    time: Option<u32>,
    rest: Option<u32>,
}

fn one() -> u32 {
    1
}

impl From<PlanDto> for domain::Plan {
    fn from(value: PlanDto) -> Self {
        Self {
            days: value
                .days
                .into_iter()
                .map(|(id, day)| domain::Day {
                    id: id.into(),
                    title: day.title,
                    parts: day.parts.into_iter().map(domain::Part::from).collect(),
                })
                .collect(),
        }
    }
}

impl From<PartDto> for domain::Part {
    fn from(value: PartDto) -> Self {
        Self {
            title: value.title,
            exercises: value
                .exercises
                .into_iter()
                .map(domain::ExerciseDefinition::from)
                .collect(),
        }
    }
}

impl From<ExerciseDto> for domain::ExerciseDefinition {
    fn from(value: ExerciseDto) -> Self {
        let target = match value.time {
            Some(time) => domain::Target::Time(time.into()),
            None => domain::Target::Reps(value.reps.unwrap_or_default().into()),
        };
        Self {
            code: value.code.into(),
            name: value.name_en,
            alt_name: value.name_fa,
            note: value.note,
            ai_query: value.ai_query,
            target,
            sets: value.sets,
            rest: value.rest.map_or(domain::Time::DEFAULT_REST, domain::Time::from),
        }
    }
}

/// Settings stored as JSON, a missing file yields the default settings.
pub struct SettingsFile {
    path: PathBuf,
}

impl SettingsFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SettingsRepository for SettingsFile {
    fn read_settings(&self) -> Result<Settings, String> {
        match fs::read_to_string(&self.path) {
            Ok(content) => serde_json::from_str(&content).map_err(|err| err.to_string()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(Settings::default()),
            Err(err) => Err(err.to_string()),
        }
    }

    fn write_settings(&self, settings: Settings) -> Result<(), String> {
        let json = serde_json::to_string_pretty(&settings).map_err(|err| err.to_string())?;
        fs::write(&self.path, json).map_err(|err| err.to_string())
    }
}
