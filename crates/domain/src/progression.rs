use log::debug;

use crate::{ExerciseUnit, UnitStatus};

/// Outcome of a completed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// Index of the unit to activate, `None` once the day is finished.
    pub next_active: Option<usize>,
    pub start_rest: bool,
}

impl Transition {
    pub const FINISHED: Transition = Transition {
        next_active: None,
        start_rest: false,
    };
}

/// Decides which unit follows the unit at `just_completed`.
///
/// The caller must have credited the set to `just_completed` already. The completed unit is moved
/// to `Completed` or `AwaitingTurn`; activating the returned unit is left to the caller.
///
/// Within a group the next unit with remaining sets is searched cyclically, starting after the
/// completed unit. Moving further down the list is a back-to-back transition without rest, while
/// wrapping around to an earlier unit (or the same one) starts a rest. Once the whole group is
/// finished, the next unit after the completed one that is not `Completed` follows after a rest.
pub fn record_set_completion(units: &mut [ExerciseUnit], just_completed: usize) -> Transition {
    let Some(current) = units.get_mut(just_completed) else {
        debug!("no unit at position {just_completed}");
        return Transition::FINISHED;
    };

    if current.is_finished() {
        current.complete();
    } else {
        current.await_turn();
    }

    let group = current.group().clone();
    let group_units = units
        .iter()
        .enumerate()
        .filter(|(_, u)| *u.group() == group)
        .map(|(i, _)| i)
        .collect::<Vec<_>>();
    let idx = group_units
        .iter()
        .position(|i| *i == just_completed)
        .unwrap_or_default();
    let len = group_units.len();

    let next_in_group = (1..=len)
        .map(|offset| group_units[(idx + offset) % len])
        .find(|i| !units[*i].is_finished());

    if let Some(next) = next_in_group {
        return Transition {
            next_active: Some(next),
            start_rest: next <= just_completed,
        };
    }

    let next = units
        .iter()
        .enumerate()
        .skip(just_completed + 1)
        .find(|(_, u)| u.status() != UnitStatus::Completed)
        .map(|(i, _)| i);

    Transition {
        next_active: next,
        start_rest: next.is_some(),
    }
}
