#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

pub mod controller;
pub mod error;
pub mod group;
pub mod plan;
pub mod progression;
pub mod service;
pub mod session;
pub mod unit;

pub use controller::{CountdownToggle, Cue, SessionController, SwitchDayError, TimerService};
pub use error::{ReadError, StorageError};
pub use group::{GroupKey, GroupKind, group_id};
pub use plan::{
    Code, Day, DayID, ExerciseDefinition, Part, Plan, PlanRepository, PlanService, Reps, Target,
    Time,
};
pub use progression::{Transition, record_set_completion};
pub use service::Service;
pub use session::{Countdown, DaySession, PendingRest};
pub use unit::{ExerciseUnit, UnitStatus};
