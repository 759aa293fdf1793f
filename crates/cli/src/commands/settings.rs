use std::path::Path;

use anyhow::anyhow;
use clap::Subcommand;
use setflow_app::{Settings, SettingsService};
use setflow_storage::json_file::SettingsFile;

#[derive(Subcommand)]
pub enum SettingsAction {
    /// Print the current settings as JSON
    Show,
    /// Change one or more settings
    Set {
        /// Volume of the audible cues in percent, 0 mutes them
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
        beep_volume: Option<u8>,
        /// Show the notes of the exercises
        #[arg(long)]
        show_notes: Option<bool>,
        /// Show the hints of the exercises
        #[arg(long)]
        show_hints: Option<bool>,
        /// Day selected when no day is given, an empty value clears it
        #[arg(long)]
        default_day: Option<String>,
    },
    /// Restore the default settings
    Reset,
}

pub fn run(path: &Path, action: SettingsAction) -> anyhow::Result<()> {
    let service = setflow_app::Service::new(SettingsFile::new(path));
    match action {
        SettingsAction::Show => {
            let settings = super::load_settings(path)?;
            println!("{}", serde_json::to_string_pretty(&settings)?);
        }
        SettingsAction::Set {
            beep_volume,
            show_notes,
            show_hints,
            default_day,
        } => {
            let mut settings = super::load_settings(path)?;
            if let Some(beep_volume) = beep_volume {
                settings.beep_volume = beep_volume;
            }
            if let Some(show_notes) = show_notes {
                settings.show_notes = show_notes;
            }
            if let Some(show_hints) = show_hints {
                settings.show_hints = show_hints;
            }
            if let Some(default_day) = default_day {
                settings.default_day = Some(default_day).filter(|d| !d.is_empty());
            }
            service
                .set_settings(settings)
                .map_err(|err| anyhow!("failed to save settings: {err}"))?;
            println!("ok");
        }
        SettingsAction::Reset => {
            service
                .set_settings(Settings::default())
                .map_err(|err| anyhow!("failed to save settings: {err}"))?;
            println!("settings reset to defaults");
        }
    }
    Ok(())
}
