use crate::{Day, DayID, ExerciseUnit, Time, UnitStatus};

/// Progress through the exercises of the selected day.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct DaySession {
    pub(crate) day_id: Option<DayID>,
    pub(crate) units: Vec<ExerciseUnit>,
    pub(crate) active: Option<usize>,
    pub(crate) rest: Option<PendingRest>,
    pub(crate) countdown: Option<Countdown>,
}

/// Rest interval started after the set of `unit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingRest {
    pub unit: usize,
    pub remaining: Time,
}

/// Running timer of a time-based exercise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    pub unit: usize,
    pub remaining: Time,
}

impl DaySession {
    /// All units start locked, nothing is active yet.
    #[must_use]
    pub fn new(day: &Day) -> Self {
        Self {
            day_id: Some(day.id.clone()),
            units: day.exercises().map(ExerciseUnit::from).collect(),
            active: None,
            rest: None,
            countdown: None,
        }
    }

    #[must_use]
    pub fn day_id(&self) -> Option<&DayID> {
        self.day_id.as_ref()
    }

    #[must_use]
    pub fn units(&self) -> &[ExerciseUnit] {
        &self.units
    }

    #[must_use]
    pub fn unit(&self, idx: usize) -> Option<&ExerciseUnit> {
        self.units.get(idx)
    }

    #[must_use]
    pub fn active(&self) -> Option<usize> {
        self.active
    }

    #[must_use]
    pub fn active_unit(&self) -> Option<&ExerciseUnit> {
        self.active.and_then(|idx| self.units.get(idx))
    }

    #[must_use]
    pub fn rest(&self) -> Option<PendingRest> {
        self.rest
    }

    #[must_use]
    pub fn countdown(&self) -> Option<Countdown> {
        self.countdown
    }

    #[must_use]
    pub fn is_countdown_running(&self) -> bool {
        self.countdown.is_some()
    }

    /// A day without any unit is never finished, as it was never started.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        !self.units.is_empty() && self.units.iter().all(|u| u.status() == UnitStatus::Completed)
    }

    #[must_use]
    pub fn completed_sets(&self) -> u32 {
        self.units.iter().map(ExerciseUnit::completed_sets).sum()
    }

    #[must_use]
    pub fn total_sets(&self) -> u32 {
        self.units.iter().map(ExerciseUnit::total_sets).sum()
    }

    pub(crate) fn lock_all(&mut self) {
        for unit in &mut self.units {
            unit.lock();
        }
        self.active = None;
    }

    /// A finished or unknown unit is never activated, the active unit stays as it is then.
    pub(crate) fn activate(&mut self, idx: usize) -> bool {
        if self.units.get(idx).is_none_or(ExerciseUnit::is_finished) {
            return false;
        }
        if let Some(active) = self.active.filter(|a| *a != idx) {
            if let Some(unit) = self.units.get_mut(active) {
                unit.await_turn();
            }
        }
        let activated = self
            .units
            .get_mut(idx)
            .is_some_and(ExerciseUnit::activate);
        if activated {
            self.active = Some(idx);
        }
        activated
    }

    pub(crate) fn activate_first(&mut self) -> Option<usize> {
        let first = self
            .units
            .iter()
            .position(|u| u.status() != UnitStatus::Completed)?;
        self.activate(first).then_some(first)
    }
}
