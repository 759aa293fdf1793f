#![warn(clippy::pedantic)]

pub mod log;
pub mod service;
pub mod settings;

pub use service::Service;
pub use settings::{Settings, SettingsRepository, SettingsService};
