//! Date-keyed completion history with file locking.
//!
//! One entry per local calendar date: either a completed scheduled workout
//! or a custom logged activity. Persisted as JSON with shared/exclusive
//! locks and atomic replace so concurrent invocations cannot corrupt it.

use crate::error::{Error, Result};
use crate::types::{HistoryEntry, LoggedActivity, SessionSummary};
use chrono::NaiveDate;
use fs2::FileExt;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Format a local calendar date as a `YYYY-MM-DD` history key
pub fn local_date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Completion history, one entry per date key
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct HistoryStore {
    entries: BTreeMap<String, HistoryEntry>,
}

impl HistoryStore {
    /// Load history from a file with shared locking
    ///
    /// Returns an empty store if the file doesn't exist. A corrupted file
    /// logs a warning and yields an empty store rather than failing.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::info!("No history file found, starting empty");
            return Ok(Self::default());
        }

        let file = match File::open(path) {
            Ok(f) => f,
            Err(e) => {
                tracing::warn!(
                    "Unable to open history file {:?}: {}. Starting empty.",
                    path,
                    e
                );
                return Ok(Self::default());
            }
        };

        if let Err(e) = file.lock_shared() {
            tracing::warn!(
                "Unable to lock history file {:?}: {}. Starting empty.",
                path,
                e
            );
            return Ok(Self::default());
        }

        let mut contents = String::new();
        let mut reader = std::io::BufReader::new(&file);
        if let Err(e) = reader.read_to_string(&mut contents) {
            let _ = file.unlock();
            tracing::warn!(
                "Failed to read history file {:?}: {}. Starting empty.",
                path,
                e
            );
            return Ok(Self::default());
        }

        file.unlock()?;

        match serde_json::from_str::<HistoryStore>(&contents) {
            Ok(store) => {
                tracing::debug!("Loaded {} history entries from {:?}", store.len(), path);
                Ok(store)
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to parse history file {:?}: {}. Starting empty.",
                    path,
                    e
                );
                Ok(Self::default())
            }
        }
    }

    /// Save history with exclusive locking
    ///
    /// Atomically writes by:
    /// 1. Writing to a temp file in the same directory
    /// 2. Syncing to disk
    /// 3. Renaming over the original
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let temp = NamedTempFile::new_in(path.parent().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::Other, "history path missing parent")
        })?)?;

        temp.as_file().lock_exclusive()?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            let contents = serde_json::to_string(self)?;
            writer.write_all(contents.as_bytes())?;
            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.as_file().unlock()?;

        temp.persist(path).map_err(|e| Error::Io(e.error))?;

        tracing::debug!("Saved {} history entries to {:?}", self.len(), path);
        Ok(())
    }

    /// Load history, modify it, and save it back atomically
    pub fn update<F>(path: &Path, f: F) -> Result<Self>
    where
        F: FnOnce(&mut HistoryStore) -> Result<()>,
    {
        let mut store = Self::load(path)?;
        f(&mut store)?;
        store.save(path)?;
        Ok(store)
    }

    /// Record a completed scheduled workout from a session summary.
    /// Last write per date wins, matching a single-user daily log.
    pub fn record(&mut self, summary: &SessionSummary) {
        self.entries.insert(
            summary.date_key.clone(),
            HistoryEntry::Workout {
                day_key: summary.day_key.clone(),
            },
        );
    }

    /// Record a custom logged activity under the given date key
    pub fn log_activity(&mut self, date_key: String, activity: LoggedActivity) {
        self.entries
            .insert(date_key, HistoryEntry::Activity(activity));
    }

    pub fn entry(&self, date_key: &str) -> Option<&HistoryEntry> {
        self.entries.get(date_key)
    }

    pub fn remove(&mut self, date_key: &str) -> Option<HistoryEntry> {
        self.entries.remove(date_key)
    }

    /// Clear all history
    pub fn reset(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total_completed(&self) -> usize {
        self.entries.len()
    }

    /// Date-ordered iteration (BTreeMap keys are `YYYY-MM-DD`, so
    /// lexicographic order is chronological)
    pub fn iter(&self) -> impl Iterator<Item = (&str, &HistoryEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Export the history to CSV, overwriting the target file.
    pub fn export_csv(&self, path: &Path) -> Result<usize> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = File::create(path)?;
        let mut writer = csv::Writer::from_writer(file);

        for (date_key, entry) in self.iter() {
            writer.serialize(CsvRow::new(date_key, entry))?;
        }

        writer.flush()?;
        let file = writer
            .into_inner()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
        file.sync_all()?;

        tracing::info!("Exported {} history entries to {:?}", self.len(), path);
        Ok(self.len())
    }
}

/// A row in the CSV export
#[derive(Debug, serde::Serialize)]
struct CsvRow<'a> {
    date: &'a str,
    kind: &'static str,
    detail: String,
    duration: Option<&'a str>,
    completed: bool,
}

impl<'a> CsvRow<'a> {
    fn new(date: &'a str, entry: &'a HistoryEntry) -> Self {
        match entry {
            HistoryEntry::Workout { day_key } => CsvRow {
                date,
                kind: "workout",
                detail: day_key.clone(),
                duration: None,
                completed: true,
            },
            HistoryEntry::Activity(activity) => CsvRow {
                date,
                kind: "activity",
                detail: activity.activity_type.clone(),
                duration: Some(activity.duration_label.as_str()),
                completed: activity.completed,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn summary(date_key: &str, day_key: &str) -> SessionSummary {
        SessionSummary {
            day_key: day_key.into(),
            date_key: date_key.into(),
            elapsed_seconds: 1200,
        }
    }

    fn activity(name: &str) -> LoggedActivity {
        LoggedActivity {
            id: Uuid::new_v4(),
            activity_type: name.into(),
            duration_label: "30 min".into(),
            completed: true,
            timestamp: Some(Utc::now()),
        }
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("history.json");

        let mut store = HistoryStore::default();
        store.record(&summary("2026-08-24", "dayA"));
        store.log_activity("2026-08-23".into(), activity("Run"));
        store.save(&path).unwrap();

        let loaded = HistoryStore::load(&path).unwrap();
        assert_eq!(loaded.len(), 2);
        assert!(matches!(
            loaded.entry("2026-08-24"),
            Some(HistoryEntry::Workout { .. })
        ));
        assert!(matches!(
            loaded.entry("2026-08-23"),
            Some(HistoryEntry::Activity(_))
        ));
    }

    #[test]
    fn test_load_nonexistent_returns_empty() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = HistoryStore::load(&temp_dir.path().join("missing.json")).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_corrupted_file_returns_empty() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("corrupted.json");
        std::fs::write(&path, "{ invalid json }").unwrap();

        let store = HistoryStore::load(&path).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_update_pattern() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("history.json");

        HistoryStore::default().save(&path).unwrap();
        HistoryStore::update(&path, |store| {
            store.record(&summary("2026-08-24", "dayB"));
            Ok(())
        })
        .unwrap();

        let loaded = HistoryStore::load(&path).unwrap();
        assert_eq!(loaded.total_completed(), 1);
    }

    #[test]
    fn test_same_date_last_write_wins() {
        let mut store = HistoryStore::default();
        store.record(&summary("2026-08-24", "dayA"));
        store.log_activity("2026-08-24".into(), activity("Swim"));

        assert_eq!(store.len(), 1);
        assert!(matches!(
            store.entry("2026-08-24"),
            Some(HistoryEntry::Activity(_))
        ));
    }

    #[test]
    fn test_remove_and_reset() {
        let mut store = HistoryStore::default();
        store.record(&summary("2026-08-22", "dayA"));
        store.record(&summary("2026-08-24", "dayB"));

        assert!(store.remove("2026-08-22").is_some());
        assert_eq!(store.len(), 1);

        store.reset();
        assert!(store.is_empty());
    }

    #[test]
    fn test_iteration_is_chronological() {
        let mut store = HistoryStore::default();
        store.record(&summary("2026-08-24", "dayB"));
        store.record(&summary("2026-08-20", "dayA"));
        store.record(&summary("2026-08-22", "dayC"));

        let dates: Vec<&str> = store.iter().map(|(d, _)| d).collect();
        assert_eq!(dates, vec!["2026-08-20", "2026-08-22", "2026-08-24"]);
    }

    #[test]
    fn test_csv_export() {
        let temp_dir = tempfile::tempdir().unwrap();
        let csv_path = temp_dir.path().join("history.csv");

        let mut store = HistoryStore::default();
        store.record(&summary("2026-08-24", "dayA"));
        store.log_activity("2026-08-23".into(), activity("Run"));

        let count = store.export_csv(&csv_path).unwrap();
        assert_eq!(count, 2);

        let mut reader = csv::Reader::from_path(&csv_path).unwrap();
        let rows: Vec<csv::StringRecord> =
            reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][0], "2026-08-23");
        assert_eq!(&rows[0][1], "activity");
        assert_eq!(&rows[1][1], "workout");
    }

    #[test]
    fn test_local_date_key_format() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 5).unwrap();
        assert_eq!(local_date_key(date), "2026-08-05");
    }

    #[test]
    fn test_atomic_save_leaves_no_temp_files() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("history.json");

        HistoryStore::default().save(&path).unwrap();

        assert!(path.exists());
        let extras: Vec<_> = std::fs::read_dir(temp_dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name() != "history.json")
            .collect();
        assert!(extras.is_empty(), "unexpected files: {:?}", extras);
    }
}
