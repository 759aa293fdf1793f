use std::path::Path;

use setflow_domain::DaySession;

use crate::render;

pub fn list(plan_path: &Path) -> anyhow::Result<()> {
    let plan = super::load_plan(plan_path)?;
    print!("{}", render::days(&plan));
    Ok(())
}

pub fn show(plan_path: &Path, settings_path: &Path, day: Option<String>) -> anyhow::Result<()> {
    let plan = super::load_plan(plan_path)?;
    let settings = super::load_settings(settings_path)?;
    let day = super::select_day(&plan, &settings, day)?;
    print!("{}", render::day(day, &DaySession::new(day), &settings));
    Ok(())
}
