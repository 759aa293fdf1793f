use log::{debug, info, warn};

use crate::{
    Countdown, Day, DayID, DaySession, PendingRest, Plan, Target, Time, Transition,
    record_set_completion,
};

/// Timers and sound output driven by the session controller.
///
/// The controller keeps track of the remaining seconds itself and expects [`SessionController::tick`]
/// to be called once per second while a rest interval or a countdown is running.
pub trait TimerService {
    fn start_rest(&mut self, seconds: Time);
    fn cancel_rest(&mut self);
    fn start_countdown(&mut self, seconds: Time);
    fn cancel_countdown(&mut self);
    fn play_cue(&mut self, cue: Cue);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    CountdownFinished,
    RestFinished,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SwitchDayError {
    #[error("Stop the timer before switching the day")]
    CountdownRunning,
    #[error("Unknown day {0}")]
    UnknownDay(DayID),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownToggle {
    Started(Time),
    /// Stopped manually, no set is credited.
    Stopped,
    Ignored,
}

pub struct SessionController<T> {
    session: DaySession,
    timers: T,
}

impl<T: TimerService> SessionController<T> {
    pub fn new(timers: T) -> Self {
        Self {
            session: DaySession::default(),
            timers,
        }
    }

    pub fn session(&self) -> &DaySession {
        &self.session
    }

    pub fn timers(&self) -> &T {
        &self.timers
    }

    pub fn timers_mut(&mut self) -> &mut T {
        &mut self.timers
    }

    /// Discards all progress and unlocks the first exercise of `day`.
    pub fn activate_day(&mut self, day: &Day) {
        self.cancel_timers();
        self.session = DaySession::new(day);
        self.session.lock_all();
        match self.session.activate_first() {
            Some(first) => info!(
                "activated {} ({}), starting with {}",
                day.id, day.title, self.session.units[first].code()
            ),
            None => info!("activated {} ({}), nothing to do", day.id, day.title),
        }
    }

    pub fn switch_day(&mut self, plan: &Plan, day_id: &DayID) -> Result<(), SwitchDayError> {
        if self.session.is_countdown_running() {
            warn!("refusing to switch to {day_id} while a countdown is running");
            return Err(SwitchDayError::CountdownRunning);
        }
        let Some(day) = plan.day(day_id) else {
            warn!("refusing to switch to unknown day {day_id}");
            return Err(SwitchDayError::UnknownDay(day_id.clone()));
        };
        self.activate_day(day);
        Ok(())
    }

    /// Credits one set to `unit` and moves on to the next exercise.
    ///
    /// Returns `None` without changing any state if the unit is not the active one, or if it is a
    /// time-based exercise while a countdown is running.
    pub fn record_set(&mut self, unit: usize) -> Option<Transition> {
        let Some(u) = self.session.units.get(unit) else {
            debug!("ignoring set for unknown unit {unit}");
            return None;
        };
        if !u.is_clickable() {
            debug!("ignoring set for {}: unit is {}", u.code(), u.status());
            return None;
        }
        if u.target().is_timed() && self.session.is_countdown_running() {
            debug!("ignoring set for {}: countdown is running", u.code());
            return None;
        }
        Some(self.complete_set(unit))
    }

    /// Starts the countdown of the active time-based exercise, or stops it if it is running.
    pub fn toggle_countdown(&mut self, unit: usize) -> CountdownToggle {
        let Some(u) = self.session.units.get(unit) else {
            return CountdownToggle::Ignored;
        };
        let Target::Time(seconds) = u.target() else {
            debug!("ignoring countdown for {}: not time-based", u.code());
            return CountdownToggle::Ignored;
        };
        match self.session.countdown {
            Some(countdown) if countdown.unit == unit => {
                self.session.countdown = None;
                self.timers.cancel_countdown();
                info!("stopped countdown of {}", u.code());
                CountdownToggle::Stopped
            }
            Some(_) => {
                debug!("ignoring countdown for {}: another one is running", u.code());
                CountdownToggle::Ignored
            }
            None if u.is_clickable() => {
                info!("started countdown of {} ({seconds} s)", u.code());
                self.skip_rest();
                self.session.countdown = Some(Countdown {
                    unit,
                    remaining: seconds,
                });
                self.timers.start_countdown(seconds);
                CountdownToggle::Started(seconds)
            }
            None => {
                debug!("ignoring countdown for {}: unit is {}", u.code(), u.status());
                CountdownToggle::Ignored
            }
        }
    }

    /// Advances the rest interval and the countdown by one second.
    ///
    /// Returns the transition caused by a countdown reaching zero.
    pub fn tick(&mut self) -> Option<Transition> {
        if let Some(rest) = self.session.rest.as_mut() {
            rest.remaining = rest.remaining.saturating_dec();
            if rest.remaining.is_zero() {
                self.session.rest = None;
                self.timers.play_cue(Cue::RestFinished);
                info!("rest finished");
            }
        }

        let countdown = self.session.countdown.as_mut()?;
        countdown.remaining = countdown.remaining.saturating_dec();
        if !countdown.remaining.is_zero() {
            return None;
        }
        let unit = countdown.unit;
        self.session.countdown = None;
        self.timers.play_cue(Cue::CountdownFinished);
        if self.session.units[unit].is_clickable() {
            Some(self.complete_set(unit))
        } else {
            None
        }
    }

    pub fn skip_rest(&mut self) -> bool {
        if self.session.rest.take().is_some() {
            self.timers.cancel_rest();
            info!("skipped rest");
            true
        } else {
            false
        }
    }

    fn complete_set(&mut self, unit: usize) -> Transition {
        if self.session.rest.take().is_some() {
            self.timers.cancel_rest();
        }

        let units = &mut self.session.units;
        units[unit].credit_set();
        info!(
            "completed set {}/{} of {}",
            units[unit].completed_sets(),
            units[unit].total_sets(),
            units[unit].code()
        );

        let transition = record_set_completion(units, unit);

        match transition.next_active {
            Some(next) => {
                self.session.activate(next);
                debug!("next: {}", self.session.units[next].code());
            }
            None => {
                self.session.active = None;
                info!("day finished");
            }
        }

        let rest = self.session.units[unit].rest();
        if transition.start_rest && !rest.is_zero() {
            self.session.rest = Some(PendingRest {
                unit,
                remaining: rest,
            });
            self.timers.start_rest(rest);
            info!("resting for {rest} s");
        } else {
            self.timers.cancel_rest();
        }

        transition
    }

    fn cancel_timers(&mut self) {
        if self.session.countdown.take().is_some() {
            self.timers.cancel_countdown();
        }
        if self.session.rest.take().is_some() {
            self.timers.cancel_rest();
        }
    }
}
