use setflow_domain::DayID;

pub trait SettingsService {
    fn get_settings(&self) -> Result<Settings, String>;
    fn set_settings(&self, settings: Settings) -> Result<(), String>;
}

pub trait SettingsRepository {
    fn read_settings(&self) -> Result<Settings, String>;
    fn write_settings(&self, settings: Settings) -> Result<(), String>;
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Volume of the audible cues in percent, 0 mutes them.
    pub beep_volume: u8,
    pub show_notes: bool,
    pub show_hints: bool,
    pub default_day: Option<String>,
}

impl Settings {
    #[must_use]
    pub fn is_muted(&self) -> bool {
        self.beep_volume == 0
    }

    #[must_use]
    pub fn default_day_id(&self) -> Option<DayID> {
        self.default_day.as_deref().map(DayID::from)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            beep_volume: 80,
            show_notes: true,
            show_hints: false,
            default_day: None,
        }
    }
}
