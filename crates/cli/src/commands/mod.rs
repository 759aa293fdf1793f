use std::path::Path;

use anyhow::{Context, anyhow, bail};
use setflow_app::{Settings, SettingsService};
use setflow_domain::{Day, DayID, Plan, PlanService};
use setflow_storage::json_file::{PlanFile, SettingsFile};

pub mod day;
pub mod session;
pub mod settings;

pub fn load_plan(path: &Path) -> anyhow::Result<Plan> {
    setflow_domain::Service::new(PlanFile::new(path))
        .get_plan()
        .map_err(|err| anyhow!("{err}"))
        .with_context(|| format!("failed to load plan {}", path.display()))
}

pub fn load_settings(path: &Path) -> anyhow::Result<Settings> {
    setflow_app::Service::new(SettingsFile::new(path))
        .get_settings()
        .map_err(|err| anyhow!("{err}"))
        .with_context(|| format!("failed to load settings {}", path.display()))
}

/// The requested day, else the configured default day, else the first day of the plan.
pub fn select_day<'a>(
    plan: &'a Plan,
    settings: &Settings,
    requested: Option<String>,
) -> anyhow::Result<&'a Day> {
    let id = requested
        .map(DayID::from)
        .or_else(|| settings.default_day_id());
    match id {
        Some(id) => plan.day(&id).ok_or_else(|| {
            anyhow!(
                "unknown day {id}, available: {}",
                plan.day_ids()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ")
            )
        }),
        None => match plan.days.first() {
            Some(day) => Ok(day),
            None => bail!("plan contains no days"),
        },
    }
}
