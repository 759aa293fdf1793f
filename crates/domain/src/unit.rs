use crate::{Code, ExerciseDefinition, GroupKey, Target, Time};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum UnitStatus {
    #[default]
    Locked,
    Active,
    /// Dimmed while a sibling in the same group has its turn.
    AwaitingTurn,
    Completed,
}

/// Progress of one exercise of the selected day.
#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseUnit {
    code: Code,
    group: GroupKey,
    target: Target,
    rest: Time,
    total_sets: u32,
    completed_sets: u32,
    status: UnitStatus,
}

impl ExerciseUnit {
    #[must_use]
    pub fn new(code: Code, target: Target, total_sets: u32, rest: Time) -> Self {
        Self {
            group: code.group(),
            code,
            target,
            rest,
            total_sets,
            completed_sets: 0,
            status: if total_sets == 0 {
                UnitStatus::Completed
            } else {
                UnitStatus::Locked
            },
        }
    }

    #[must_use]
    pub fn code(&self) -> &Code {
        &self.code
    }

    #[must_use]
    pub fn group(&self) -> &GroupKey {
        &self.group
    }

    #[must_use]
    pub fn target(&self) -> Target {
        self.target
    }

    #[must_use]
    pub fn rest(&self) -> Time {
        self.rest
    }

    #[must_use]
    pub fn total_sets(&self) -> u32 {
        self.total_sets
    }

    #[must_use]
    pub fn completed_sets(&self) -> u32 {
        self.completed_sets
    }

    #[must_use]
    pub fn remaining_sets(&self) -> u32 {
        self.total_sets.saturating_sub(self.completed_sets)
    }

    #[must_use]
    pub fn status(&self) -> UnitStatus {
        self.status
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.completed_sets >= self.total_sets
    }

    #[must_use]
    pub fn is_clickable(&self) -> bool {
        self.status == UnitStatus::Active
    }

    pub(crate) fn lock(&mut self) {
        if self.status != UnitStatus::Completed {
            self.status = UnitStatus::Locked;
        }
    }

    pub(crate) fn activate(&mut self) -> bool {
        if self.is_finished() {
            return false;
        }
        self.status = UnitStatus::Active;
        true
    }

    pub(crate) fn await_turn(&mut self) {
        if !self.is_finished() {
            self.status = UnitStatus::AwaitingTurn;
        }
    }

    pub(crate) fn complete(&mut self) {
        self.status = UnitStatus::Completed;
    }

    pub(crate) fn credit_set(&mut self) {
        self.completed_sets = (self.completed_sets + 1).min(self.total_sets);
    }
}

impl From<&ExerciseDefinition> for ExerciseUnit {
    fn from(value: &ExerciseDefinition) -> Self {
        Self::new(value.code.clone(), value.target, value.sets, value.rest)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn unit(total_sets: u32) -> ExerciseUnit {
        ExerciseUnit::new("1a".into(), Target::Reps(10.into()), total_sets, 60.into())
    }

    #[test]
    fn test_unit_new() {
        let unit = unit(3);
        assert_eq!(unit.group(), &GroupKey::Number(1));
        assert_eq!(unit.completed_sets(), 0);
        assert_eq!(unit.remaining_sets(), 3);
        assert_eq!(unit.status(), UnitStatus::Locked);
        assert!(!unit.is_clickable());
    }

    #[test]
    fn test_unit_new_without_sets() {
        let mut unit = unit(0);
        assert_eq!(unit.status(), UnitStatus::Completed);
        assert!(!unit.activate());
        unit.lock();
        assert_eq!(unit.status(), UnitStatus::Completed);
    }

    #[test]
    fn test_unit_credit_set() {
        let mut unit = unit(2);
        unit.credit_set();
        assert_eq!(unit.completed_sets(), 1);
        assert!(!unit.is_finished());
        unit.credit_set();
        unit.credit_set();
        assert_eq!(unit.completed_sets(), 2);
        assert_eq!(unit.remaining_sets(), 0);
        assert!(unit.is_finished());
    }

    #[test]
    fn test_unit_transitions() {
        let mut unit = unit(2);
        assert!(unit.activate());
        assert!(unit.is_clickable());
        unit.credit_set();
        unit.await_turn();
        assert_eq!(unit.status(), UnitStatus::AwaitingTurn);
        assert!(unit.activate());
        unit.credit_set();
        unit.await_turn();
        assert_eq!(unit.status(), UnitStatus::Active);
        unit.complete();
        assert_eq!(unit.status(), UnitStatus::Completed);
        assert!(!unit.activate());
        unit.lock();
        assert_eq!(unit.status(), UnitStatus::Completed);
    }

    #[test]
    fn test_unit_from_exercise_definition() {
        let definition = ExerciseDefinition {
            code: "B2".into(),
            name: String::from("Plank"),
            alt_name: String::new(),
            note: String::new(),
            ai_query: String::new(),
            target: Target::Time(45.into()),
            sets: 3,
            rest: 30.into(),
        };
        let unit = ExerciseUnit::from(&definition);
        assert_eq!(unit.code(), &Code::from("B2"));
        assert_eq!(unit.group(), &GroupKey::Letter('B'));
        assert_eq!(unit.target(), Target::Time(45.into()));
        assert_eq!(unit.rest(), Time::from(30));
        assert_eq!(unit.total_sets(), 3);
    }

    #[rstest]
    #[case(UnitStatus::Locked, "locked")]
    #[case(UnitStatus::Active, "active")]
    #[case(UnitStatus::AwaitingTurn, "awaiting_turn")]
    #[case(UnitStatus::Completed, "completed")]
    fn test_unit_status_display(#[case] status: UnitStatus, #[case] expected: &str) {
        assert_eq!(status.to_string(), expected);
    }
}
