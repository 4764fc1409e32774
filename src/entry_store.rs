use crate::entry::Entry;
use crate::error::{Error, Result};
use crate::storage::KeyValueStorage;
use chrono::{DateTime, Local};
use serde_json::Value;
use tracing::{debug, info, warn};

/// Storage key holding the full entry snapshot.
pub const STORAGE_KEY: &str = "devlogEntries";

/// The ordered entry collection and its persistence binding.
///
/// The in-memory `entries` are the source of truth; every mutation rewrites
/// the whole snapshot under [`STORAGE_KEY`].
pub struct EntryStore {
    entries: Vec<Entry>,
    storage: Box<dyn KeyValueStorage>,
}

impl EntryStore {
    /// Reads the persisted snapshot. Any JSON array is kept element by
    /// element; missing, unreadable or non-array data yields an empty store.
    pub fn load(storage: Box<dyn KeyValueStorage>) -> Self {
        let entries = match storage.get_item(STORAGE_KEY) {
            Ok(Some(serialized)) => match serde_json::from_str::<Value>(&serialized) {
                Ok(Value::Array(items)) => items.iter().map(Entry::from_value).collect(),
                Ok(_) => {
                    warn!("discarding journal snapshot that is not a sequence");
                    Vec::new()
                }
                Err(e) => {
                    warn!(error = %e, "discarding malformed journal snapshot");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(error = %e, "failed to read journal snapshot");
                Vec::new()
            }
        };
        debug!(count = entries.len(), "loaded journal");

        EntryStore { entries, storage }
    }

    pub fn add(&mut self, text: &str) -> Result<Option<Entry>> {
        self.add_at(text, Local::now())
    }

    pub fn add_at(&mut self, text: &str, now: DateTime<Local>) -> Result<Option<Entry>> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(None);
        }

        let entry = Entry::new(text.to_string(), now);
        self.entries.push(entry.clone());
        info!(id = entry.id, "added entry");
        self.save()?;
        Ok(Some(entry))
    }

    pub fn remove(&mut self, id: i64) -> Result<()> {
        self.entries.retain(|e| e.id != id);
        info!(id, "removed entry");
        self.save()
    }

    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn export_text(&self) -> Result<String> {
        if self.entries.is_empty() {
            return Err(Error::NothingToExport);
        }

        Ok(self
            .entries
            .iter()
            .filter(|e| e.is_exportable())
            .map(Entry::display_line)
            .collect::<Vec<_>>()
            .join("\n"))
    }

    #[cfg(test)]
    pub(crate) fn storage(&self) -> &dyn KeyValueStorage {
        self.storage.as_ref()
    }

    fn save(&mut self) -> Result<()> {
        let serialized = serde_json::to_string(&self.entries)?;
        self.storage.set_item(STORAGE_KEY, &serialized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use chrono::{Duration, TimeZone};

    fn empty_store() -> EntryStore {
        EntryStore::load(Box::new(MemoryStorage::new()))
    }

    fn store_with(snapshot: &str) -> EntryStore {
        let mut storage = MemoryStorage::new();
        storage.set_item(STORAGE_KEY, snapshot).unwrap();
        EntryStore::load(Box::new(storage))
    }

    fn morning() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap()
    }

    #[test]
    fn test_add_trims_and_persists() {
        let mut store = empty_store();
        let entry = store.add_at("  Fixed the bug \n", morning()).unwrap().unwrap();

        assert_eq!(entry.text, "Fixed the bug");
        assert_eq!(entry.date, "01/01/2024");
        assert_eq!(store.count(), 1);

        let snapshot = store.storage().get_item(STORAGE_KEY).unwrap().unwrap();
        assert!(snapshot.contains("Fixed the bug"));
    }

    #[test]
    fn test_add_blank_is_noop() {
        let mut store = empty_store();
        assert!(store.add("").unwrap().is_none());
        assert!(store.add("   ").unwrap().is_none());
        assert_eq!(store.count(), 0);
        assert_eq!(store.storage().get_item(STORAGE_KEY).unwrap(), None);
    }

    #[test]
    fn test_remove_existing_and_missing() {
        let mut store = empty_store();
        let first = store.add_at("one", morning()).unwrap().unwrap();
        store
            .add_at("two", morning() + Duration::milliseconds(5))
            .unwrap();

        store.remove(first.id).unwrap();
        assert_eq!(store.count(), 1);
        assert_eq!(store.entries()[0].text, "two");

        store.remove(12345).unwrap();
        assert_eq!(store.count(), 1);
    }

    #[test]
    fn test_reload_reproduces_sequence() {
        let mut store = empty_store();
        store.add_at("first", morning()).unwrap();
        store
            .add_at("second", morning() + Duration::days(1))
            .unwrap();

        let snapshot = store.storage().get_item(STORAGE_KEY).unwrap().unwrap();
        let reloaded = store_with(&snapshot);

        assert_eq!(reloaded.entries(), store.entries());
    }

    #[test]
    fn test_malformed_snapshot_is_discarded() {
        assert_eq!(store_with("{not json").count(), 0);
        assert_eq!(store_with(r#"{"id": 1}"#).count(), 0);
        assert_eq!(store_with(r#""just a string""#).count(), 0);
    }

    #[test]
    fn test_odd_elements_do_not_discard_valid_entries() {
        let mut store = store_with(
            r#"[{"id":1,"text":"keep me","date":"1/1/2024"}, 5, {"id":2,"text":null}]"#,
        );
        assert_eq!(store.count(), 3);
        assert_eq!(store.export_text().unwrap(), "[1/1/2024] keep me");

        store.add_at("new", morning()).unwrap();
        let snapshot = store.storage().get_item(STORAGE_KEY).unwrap().unwrap();
        let reloaded = store_with(&snapshot);
        assert_eq!(reloaded.count(), 4);
        assert_eq!(reloaded.entries()[0].text, "keep me");
        assert_eq!(reloaded.entries()[3].text, "new");
    }

    #[test]
    fn test_textless_record_is_kept_but_not_exported() {
        let store = store_with(r#"[{"id":1,"date":"1/1/2024"},{"id":2,"text":"hello","date":"1/1/2024"}]"#);
        assert_eq!(store.count(), 2);
        assert_eq!(store.export_text().unwrap(), "[1/1/2024] hello");
    }

    #[test]
    fn test_export_empty_fails() {
        let store = empty_store();
        assert!(matches!(store.export_text(), Err(Error::NothingToExport)));
    }

    #[test]
    fn test_export_joins_lines_in_order() {
        let store = store_with(
            r#"[{"id":1,"text":"a","date":"1/1/2024"},{"id":2,"text":"b","date":"2/1/2024"}]"#,
        );
        assert_eq!(store.export_text().unwrap(), "[1/1/2024] a\n[2/1/2024] b");
    }
}
