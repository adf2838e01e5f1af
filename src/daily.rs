//! Daily challenge record
//!
//! One board per calendar day, seeded from the date string. The record only
//! tracks whether today's board has been cleared.

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::persistence::{DAILY_KEY, KeyValueStore, StorageError, load_json, save_json};

/// Date key in `Y-M-D` form without zero padding (e.g. `2024-1-5`).
///
/// This string seeds the daily board, so its format is fixed.
pub fn date_string(date: NaiveDate) -> String {
    format!("{}-{}-{}", date.year(), date.month(), date.day())
}

/// Today's date key from the local calendar
pub fn today_string() -> String {
    date_string(Local::now().date_naive())
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyRecord {
    pub last_played_date: Option<String>,
    pub completed: bool,
}

impl DailyRecord {
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        load_json(store, DAILY_KEY).unwrap_or_default()
    }

    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &mut S) -> Result<(), StorageError> {
        save_json(store, DAILY_KEY, self)
    }

    /// The record as it applies to `today`: a stale day starts over uncompleted
    pub fn for_today(self, today: &str) -> Self {
        if self.last_played_date.as_deref() == Some(today) {
            self
        } else {
            log::info!("New daily challenge for {}", today);
            Self {
                last_played_date: Some(today.to_string()),
                completed: false,
            }
        }
    }

    /// Record today's board as cleared. Returns true the first time.
    pub fn mark_completed(&mut self, today: &str) -> bool {
        let already = self.completed && self.last_played_date.as_deref() == Some(today);
        self.last_played_date = Some(today.to_string());
        self.completed = true;
        !already
    }

    pub fn is_completed(&self, today: &str) -> bool {
        self.completed && self.last_played_date.as_deref() == Some(today)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_date_string_has_no_padding() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert_eq!(date_string(date), "2024-1-5");
        let date = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        assert_eq!(date_string(date), "2026-10-18");
    }

    #[test]
    fn test_today_string_shape() {
        let today = today_string();
        let parts: Vec<&str> = today.split('-').collect();
        assert_eq!(parts.len(), 3);
        assert!(parts.iter().all(|p| !p.starts_with('0')));
    }

    #[test]
    fn test_new_day_resets() {
        let record = DailyRecord {
            last_played_date: Some("2024-1-14".to_string()),
            completed: true,
        };
        let today = record.for_today("2024-1-15");
        assert_eq!(today.last_played_date.as_deref(), Some("2024-1-15"));
        assert!(!today.completed);
    }

    #[test]
    fn test_same_day_keeps_completion() {
        let mut record = DailyRecord::default().for_today("2024-1-15");
        assert!(record.mark_completed("2024-1-15"));
        assert!(!record.mark_completed("2024-1-15"));
        let record = record.for_today("2024-1-15");
        assert!(record.is_completed("2024-1-15"));
        assert!(!record.is_completed("2024-1-16"));
    }

    #[test]
    fn test_storage_format() {
        let mut store = MemoryStore::new();
        let mut record = DailyRecord::default();
        record.mark_completed("2024-1-15");
        record.save(&mut store).unwrap();

        assert_eq!(
            store.get(DAILY_KEY).unwrap().as_deref(),
            Some(r#"{"lastPlayedDate":"2024-1-15","completed":true}"#)
        );
        assert_eq!(DailyRecord::load(&store), record);

        store.set(DAILY_KEY, "[]").unwrap();
        assert_eq!(DailyRecord::load(&store), DailyRecord::default());
    }
}
