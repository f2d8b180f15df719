//! Display settings and preferences
//!
//! Persisted separately from the leaderboard in LocalStorage.

use serde::{Deserialize, Serialize};

use crate::platform::Storage;

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Whether to draw the city skyline
    pub fn skyline_enabled(&self) -> bool {
        !matches!(self, QualityPreset::Low)
    }

    /// Whether to draw the star field
    pub fn stars_enabled(&self) -> bool {
        matches!(self, QualityPreset::High)
    }
}

/// Display preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Background detail
    pub quality: QualityPreset,
    /// Scroll the background with the run
    pub parallax: bool,
    /// Reduced motion (freezes the background)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::High,
            parallax: true,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// LocalStorage key
    pub const STORAGE_KEY: &'static str = "hazard_runner_settings_v1";

    /// Create settings from a quality preset
    pub fn from_preset(preset: QualityPreset) -> Self {
        Self {
            quality: preset,
            ..Self::default()
        }
    }

    /// Effective parallax (respects reduced_motion)
    pub fn effective_parallax(&self) -> bool {
        self.parallax && !self.reduced_motion
    }

    /// Load settings, falling back to defaults on missing or bad data
    pub fn load(storage: &dyn Storage) -> Self {
        match storage
            .get(Self::STORAGE_KEY)
            .map(|json| serde_json::from_str(&json))
        {
            Some(Ok(settings)) => {
                log::info!("Loaded settings from storage");
                settings
            }
            Some(Err(e)) => {
                log::warn!("Ignoring unreadable settings: {}", e);
                Self::default()
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Save settings (best-effort)
    pub fn save(&self, storage: &mut dyn Storage) {
        if let Ok(json) = serde_json::to_string(self) {
            if storage.set(Self::STORAGE_KEY, &json) {
                log::info!("Settings saved");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::MemoryStorage;

    #[test]
    fn test_preset_detail_levels() {
        assert!(!QualityPreset::Low.skyline_enabled());
        assert!(QualityPreset::Medium.skyline_enabled());
        assert!(!QualityPreset::Medium.stars_enabled());
        assert!(QualityPreset::High.stars_enabled());
        assert_eq!(QualityPreset::from_name("MED"), Some(QualityPreset::Medium));
        assert_eq!(QualityPreset::from_name("ultra"), None);
    }

    #[test]
    fn test_reduced_motion_disables_parallax() {
        let mut settings = Settings::default();
        assert!(settings.effective_parallax());
        settings.reduced_motion = true;
        assert!(!settings.effective_parallax());
    }

    #[test]
    fn test_load_save_and_fallback() {
        let mut storage = MemoryStorage::new();
        assert_eq!(Settings::load(&storage), Settings::default());

        let settings = Settings::from_preset(QualityPreset::Low);
        settings.save(&mut storage);
        assert_eq!(Settings::load(&storage), settings);

        storage.set(Settings::STORAGE_KEY, "{broken");
        assert_eq!(Settings::load(&storage), Settings::default());
    }
}
