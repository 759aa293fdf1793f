use std::fmt::Write;

use setflow_app::Settings;
use setflow_domain::{Day, DaySession, ExerciseUnit, Plan, UnitStatus};

fn symbol(status: UnitStatus) -> char {
    match status {
        UnitStatus::Locked => '·',
        UnitStatus::Active => '▶',
        UnitStatus::AwaitingTurn => '…',
        UnitStatus::Completed => '✓',
    }
}

fn progress(unit: &ExerciseUnit) -> String {
    let done = usize::try_from(unit.completed_sets()).unwrap_or(usize::MAX);
    let open = usize::try_from(unit.remaining_sets()).unwrap_or(usize::MAX);
    format!("{}{}", "●".repeat(done), "○".repeat(open))
}

pub fn days(plan: &Plan) -> String {
    let mut out = String::new();
    for day in &plan.days {
        let _ = writeln!(
            out,
            "{:<8} {} ({} exercises, {} sets)",
            day.id.as_ref(),
            day.title,
            day.exercises().count(),
            day.num_sets()
        );
    }
    out
}

/// Card of every exercise of `day` with the progress held by `session`.
pub fn day(day: &Day, session: &DaySession, settings: &Settings) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} ({})  {}/{} sets",
        day.title,
        day.id,
        session.completed_sets(),
        session.total_sets()
    );

    let mut units = session.units().iter();
    for part in &day.parts {
        let _ = writeln!(out, "── {} ──", part.title);
        for exercise in &part.exercises {
            let Some(unit) = units.next() else {
                break;
            };
            let mut name = exercise.name.clone();
            if !exercise.alt_name.is_empty() {
                let _ = write!(name, " ({})", exercise.alt_name);
            }
            let _ = writeln!(
                out,
                "{} {:<4} {}  {}  {}  rest {} s",
                symbol(unit.status()),
                unit.code().as_ref(),
                name,
                unit.target(),
                progress(unit),
                unit.rest()
            );
            if settings.show_notes && !exercise.note.is_empty() {
                let _ = writeln!(out, "       {}", exercise.note);
            }
            if settings.show_hints && !exercise.ai_query.is_empty() {
                let _ = writeln!(out, "       ? {}", exercise.ai_query);
            }
        }
    }

    out
}

/// One line about the running timers or the end of the day, empty if there is nothing to say.
pub fn status(session: &DaySession) -> String {
    if session.is_finished() {
        return String::from("Day finished!");
    }
    let mut parts = vec![];
    if let Some(countdown) = session.countdown() {
        if let Some(unit) = session.unit(countdown.unit) {
            parts.push(format!("Timer {}: {} s left", unit.code(), countdown.remaining));
        }
    }
    if let Some(rest) = session.rest() {
        parts.push(format!("Rest: {} s left", rest.remaining));
    }
    if parts.is_empty() {
        if let Some(unit) = session.active_unit() {
            parts.push(format!(
                "Next: {} set {}/{} ({})",
                unit.code(),
                unit.completed_sets() + 1,
                unit.total_sets(),
                unit.group().kind()
            ));
        }
    }
    parts.join(", ")
}
