//! Achievement bookkeeping
//!
//! The simulation only *requests* unlocks via `GameEvent::Achievement`; this
//! book decides whether the request is new and persists the result.

use serde::{Deserialize, Serialize};

use crate::persistence::{ACHIEVEMENTS_KEY, KeyValueStore, StorageError, load_json, save_json};

/// Known achievements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementId {
    FirstBlood,
    ComboMaster,
    Sharpshooter,
    Explorer,
    DailyHero,
}

impl AchievementId {
    /// Every achievement in display order
    pub const ALL: [AchievementId; 5] = [
        AchievementId::FirstBlood,
        AchievementId::ComboMaster,
        AchievementId::Sharpshooter,
        AchievementId::Explorer,
        AchievementId::DailyHero,
    ];

    /// Stable storage id
    pub fn as_str(&self) -> &'static str {
        match self {
            AchievementId::FirstBlood => "first_blood",
            AchievementId::ComboMaster => "combo_master",
            AchievementId::Sharpshooter => "sharpshooter",
            AchievementId::Explorer => "explorer",
            AchievementId::DailyHero => "daily_hero",
        }
    }

    pub fn from_id(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.as_str() == s)
    }

    pub fn title(&self) -> &'static str {
        match self {
            AchievementId::FirstBlood => "First Pop",
            AchievementId::ComboMaster => "Combo Master",
            AchievementId::Sharpshooter => "Sharpshooter",
            AchievementId::Explorer => "Explorer",
            AchievementId::DailyHero => "Daily Hero",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            AchievementId::FirstBlood => "Clear your first level",
            AchievementId::ComboMaster => "Pop 10+ bubbles in one shot",
            AchievementId::Sharpshooter => "Clear a level without missing",
            AchievementId::Explorer => "Reach Level 5",
            AchievementId::DailyHero => "Complete a Daily Challenge",
        }
    }
}

/// One achievement with its unlock flag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Achievement {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub unlocked: bool,
}

impl Achievement {
    fn locked(id: AchievementId) -> Self {
        Self {
            id: id.as_str().to_string(),
            title: id.title().to_string(),
            description: id.description().to_string(),
            unlocked: false,
        }
    }
}

/// Stored entry; extra fields from older saves are ignored
#[derive(Debug, Deserialize)]
struct StoredAchievement {
    id: String,
    #[serde(default)]
    unlocked: bool,
}

/// All achievements and their unlock state
#[derive(Debug, Clone, PartialEq)]
pub struct AchievementBook {
    pub entries: Vec<Achievement>,
}

impl Default for AchievementBook {
    fn default() -> Self {
        Self::new()
    }
}

impl AchievementBook {
    /// Everything locked
    pub fn new() -> Self {
        Self {
            entries: AchievementId::ALL.into_iter().map(Achievement::locked).collect(),
        }
    }

    /// Load unlock flags, merged into the current list so new achievements
    /// show up locked and unknown stored ids are dropped
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        let mut book = Self::new();
        let Some(stored) = load_json::<Vec<StoredAchievement>, _>(store, ACHIEVEMENTS_KEY) else {
            log::info!("No achievements found, starting fresh");
            return book;
        };
        for entry in book.entries.iter_mut() {
            entry.unlocked = stored.iter().any(|s| s.id == entry.id && s.unlocked);
        }
        log::info!("Loaded achievements ({} unlocked)", book.unlocked_count());
        book
    }

    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &mut S) -> Result<(), StorageError> {
        save_json(store, ACHIEVEMENTS_KEY, &self.entries)
    }

    pub fn is_unlocked(&self, id: AchievementId) -> bool {
        self.entries
            .iter()
            .any(|e| e.id == id.as_str() && e.unlocked)
    }

    /// Unlock an achievement. Returns true only the first time.
    pub fn unlock(&mut self, id: AchievementId) -> bool {
        match self.entries.iter_mut().find(|e| e.id == id.as_str()) {
            Some(entry) if !entry.unlocked => {
                entry.unlocked = true;
                log::info!("Achievement unlocked: {}", id.title());
                true
            }
            _ => false,
        }
    }

    pub fn unlocked_count(&self) -> usize {
        self.entries.iter().filter(|e| e.unlocked).count()
    }
}
