use chrono::{DateTime, TimeDelta, Utc};
use log::debug;
use setflow_app::Settings;
use setflow_domain::{Cue, Time, TimerService};

const BELL: char = '\x07';

/// Collects the timer notifications until the frontend prints them.
pub struct Terminal {
    beep_volume: u8,
    messages: Vec<String>,
}

impl Terminal {
    pub fn new(settings: &Settings) -> Self {
        Self {
            beep_volume: settings.beep_volume,
            messages: vec![],
        }
    }

    pub fn take_messages(&mut self) -> Vec<String> {
        std::mem::take(&mut self.messages)
    }
}

impl TimerService for Terminal {
    fn start_rest(&mut self, seconds: Time) {
        self.messages.push(format!("Rest for {seconds} s"));
    }

    fn cancel_rest(&mut self) {
        debug!("rest timer cancelled");
    }

    fn start_countdown(&mut self, seconds: Time) {
        self.messages.push(format!("Timer started: {seconds} s"));
    }

    fn cancel_countdown(&mut self) {
        self.messages.push(String::from("Timer stopped"));
    }

    fn play_cue(&mut self, cue: Cue) {
        let text = match cue {
            Cue::CountdownFinished => "Time is up!",
            Cue::RestFinished => "Rest is over, next set!",
        };
        if self.beep_volume == 0 {
            self.messages.push(text.to_string());
        } else {
            self.messages.push(format!("{BELL}{text}"));
        }
    }
}

/// Converts wall clock time into whole-second ticks.
pub struct Ticker {
    last: DateTime<Utc>,
}

impl Ticker {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self { last: now }
    }

    /// Number of whole seconds since the previous call, the fraction is carried over.
    pub fn elapsed(&mut self, now: DateTime<Utc>) -> u32 {
        let seconds = (now - self.last).num_seconds();
        if seconds <= 0 {
            return 0;
        }
        self.last += TimeDelta::seconds(seconds);
        u32::try_from(seconds).unwrap_or(u32::MAX)
    }

    pub fn reset(&mut self, now: DateTime<Utc>) {
        self.last = now;
    }
}
