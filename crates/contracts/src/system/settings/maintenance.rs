//! Maintenance-mode change detection across polls.
//!
//! The first observation only establishes the baseline. After that, every
//! flip produces exactly one alert and a repeated value produces none.

use super::{maintenance_flag, Setting};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MaintenanceState {
    #[default]
    Unknown,
    Off,
    On,
}

impl MaintenanceState {
    fn from_flag(flag: bool) -> Self {
        if flag {
            MaintenanceState::On
        } else {
            MaintenanceState::Off
        }
    }

    pub fn is_on(&self) -> bool {
        matches!(self, MaintenanceState::On)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaintenanceAlert {
    Enabled,
    Disabled,
}

impl MaintenanceAlert {
    pub fn message(&self) -> &'static str {
        match self {
            MaintenanceAlert::Enabled => "Maintenance mode is ON: the storefront is closed to customers",
            MaintenanceAlert::Disabled => "Maintenance mode is OFF: the storefront is open again",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MaintenanceWatch {
    state: MaintenanceState,
}

impl MaintenanceWatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> MaintenanceState {
        self.state
    }

    /// Feeds one poll result
    pub fn observe(&mut self, flag: bool) -> Option<MaintenanceAlert> {
        let next = MaintenanceState::from_flag(flag);
        let alert = match (self.state, next) {
            (MaintenanceState::Off, MaintenanceState::On) => Some(MaintenanceAlert::Enabled),
            (MaintenanceState::On, MaintenanceState::Off) => Some(MaintenanceAlert::Disabled),
            _ => None,
        };
        self.state = next;
        alert
    }

    /// Feeds a full settings list. A missing or unparsable key leaves the state as is.
    pub fn observe_settings(&mut self, settings: &[Setting]) -> Option<MaintenanceAlert> {
        maintenance_flag(settings).and_then(|flag| self.observe(flag))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::settings::{SettingType, MAINTENANCE_MODE_KEY};

    #[test]
    fn test_first_observation_is_silent() {
        let mut w = MaintenanceWatch::new();
        assert_eq!(w.state(), MaintenanceState::Unknown);
        assert_eq!(w.observe(true), None);
        assert_eq!(w.state(), MaintenanceState::On);

        let mut w = MaintenanceWatch::new();
        assert_eq!(w.observe(false), None);
        assert_eq!(w.state(), MaintenanceState::Off);
    }

    #[test]
    fn test_poll_sequence_alerts_only_on_transitions() {
        let polls = [false, false, true, true, false];
        let mut w = MaintenanceWatch::new();
        let alerts: Vec<(usize, MaintenanceAlert)> = polls
            .iter()
            .enumerate()
            .filter_map(|(i, flag)| w.observe(*flag).map(|a| (i, a)))
            .collect();
        assert_eq!(
            alerts,
            vec![(2, MaintenanceAlert::Enabled), (4, MaintenanceAlert::Disabled)]
        );
    }

    #[test]
    fn test_missing_key_keeps_state() {
        let mut w = MaintenanceWatch::new();
        let on = vec![Setting {
            key: MAINTENANCE_MODE_KEY.to_string(),
            value: "1".to_string(),
            setting_type: SettingType::Bool,
            is_setting: None,
        }];
        assert_eq!(w.observe_settings(&on), None);
        assert_eq!(w.observe_settings(&[]), None);
        assert!(w.state().is_on());

        let off = vec![Setting {
            value: "0".to_string(),
            ..on[0].clone()
        }];
        assert_eq!(w.observe_settings(&off), Some(MaintenanceAlert::Disabled));
    }
}
