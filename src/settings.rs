//! Game settings and preferences
//!
//! Persisted separately from progress under its own storage key.

use serde::{Deserialize, Serialize};

use crate::persistence::{KeyValueStore, SETTINGS_KEY, StorageError, load_json, save_json};
use crate::sim::MAX_PARTICLES;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Silence everything
    pub muted: bool,

    // === Visual Effects ===
    /// Pop and drop particles
    pub particles: bool,
    /// Dashed guide line from the launcher
    pub show_aim_guide: bool,

    // === Accessibility ===
    /// Reduced motion (no particle bursts)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,

            particles: true,
            show_aim_guide: true,

            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Volume applied to sound effects (0 when muted)
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            (self.master_volume * self.sfx_volume).clamp(0.0, 1.0)
        }
    }

    /// Effective particle count cap
    pub fn max_particles(&self) -> usize {
        if !self.particles || self.reduced_motion {
            0
        } else {
            MAX_PARTICLES
        }
    }

    /// Load settings; anything missing or corrupt falls back to defaults
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        match load_json(store, SETTINGS_KEY) {
            Some(settings) => {
                log::info!("Loaded settings");
                settings
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &mut S) -> Result<(), StorageError> {
        save_json(store, SETTINGS_KEY, self)?;
        log::info!("Settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_effective_volume() {
        let mut settings = Settings::default();
        assert!((settings.effective_volume() - 0.8).abs() < 0.001);

        settings.sfx_volume = 0.5;
        assert!((settings.effective_volume() - 0.4).abs() < 0.001);

        settings.muted = true;
        assert_eq!(settings.effective_volume(), 0.0);
    }

    #[test]
    fn test_particle_cap() {
        let mut settings = Settings::default();
        assert_eq!(settings.max_particles(), MAX_PARTICLES);
        settings.reduced_motion = true;
        assert_eq!(settings.max_particles(), 0);
        settings.reduced_motion = false;
        settings.particles = false;
        assert_eq!(settings.max_particles(), 0);
    }

    #[test]
    fn test_load_save() {
        let mut store = MemoryStore::new();
        assert_eq!(Settings::load(&store), Settings::default());

        let settings = Settings {
            muted: true,
            show_aim_guide: false,
            ..Default::default()
        };
        settings.save(&mut store).unwrap();
        assert_eq!(Settings::load(&store), settings);
    }

    #[test]
    fn test_partial_and_corrupt_settings() {
        let mut store = MemoryStore::new();
        // Missing fields take defaults
        store.set(SETTINGS_KEY, r#"{"muted":true}"#).unwrap();
        let loaded = Settings::load(&store);
        assert!(loaded.muted);
        assert!(loaded.particles);

        store.set(SETTINGS_KEY, "not json").unwrap();
        assert_eq!(Settings::load(&store), Settings::default());
    }
}
