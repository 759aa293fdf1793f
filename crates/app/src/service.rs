use crate::{Settings, SettingsRepository, SettingsService};

pub struct Service<R> {
    repository: R,
}

impl<R> Service<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

impl<R: SettingsRepository> SettingsService for Service<R> {
    fn get_settings(&self) -> Result<Settings, String> {
        self.repository.read_settings()
    }

    fn set_settings(&self, settings: Settings) -> Result<(), String> {
        self.repository.write_settings(settings)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use pretty_assertions::assert_eq;

    use super::*;

    #[derive(Default)]
    struct Memory(RefCell<Option<Settings>>);

    impl SettingsRepository for Memory {
        fn read_settings(&self) -> Result<Settings, String> {
            Ok(self.0.borrow().clone().unwrap_or_default())
        }

        fn write_settings(&self, settings: Settings) -> Result<(), String> {
            *self.0.borrow_mut() = Some(settings);
            Ok(())
        }
    }

    #[test]
    fn test_settings_round_trip_through_service() {
        let service = Service::new(Memory::default());
        assert_eq!(service.get_settings(), Ok(Settings::default()));

        let settings = Settings {
            beep_volume: 10,
            ..Settings::default()
        };
        service.set_settings(settings.clone()).unwrap();
        assert_eq!(service.get_settings(), Ok(settings));
    }
}
