//! Local key/value state store.
//!
//! Everything the client keeps between runs lives under three fixed keys,
//! each holding a JSON value. The trait is the substitution seam: the CLI
//! uses [`SqliteStore`], tests use [`MemoryStore`].

use chrono::NaiveDate;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::models::AttendanceRecord;

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// Snapshot of today's attendance record.
pub const KEY_TODAY_RECORD: &str = "today_record";
/// Records waiting to be replayed against the server, in creation order.
pub const KEY_OFFLINE_QUEUE: &str = "attendance_offline_records";
/// Last calendar day the rollover check observed.
pub const KEY_LAST_DATE_CHECK: &str = "last_date_check";

/// Raw string storage plus typed accessors for the fixed keys.
///
/// Writes never propagate errors: a failed write is logged and the caller
/// carries on with its in-memory state, mirroring how a browser client
/// treats its local storage.
pub trait StateStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);

    fn load_today(&self) -> Option<AttendanceRecord> {
        read_json(self.get(KEY_TODAY_RECORD), KEY_TODAY_RECORD)
    }

    fn save_today(&self, record: &AttendanceRecord) {
        write_json(self, KEY_TODAY_RECORD, record);
    }

    fn clear_today(&self) {
        self.remove(KEY_TODAY_RECORD);
    }

    /// Offline queue, oldest first. A corrupt queue is treated as empty.
    fn load_queue(&self) -> Vec<AttendanceRecord> {
        read_json(self.get(KEY_OFFLINE_QUEUE), KEY_OFFLINE_QUEUE).unwrap_or_default()
    }

    fn save_queue(&self, queue: &[AttendanceRecord]) {
        write_json(self, KEY_OFFLINE_QUEUE, &queue);
    }

    fn push_queued(&self, record: &AttendanceRecord) {
        let mut queue = self.load_queue();
        queue.push(record.clone());
        self.save_queue(&queue);
    }

    fn last_checked_date(&self) -> Option<NaiveDate> {
        read_json(self.get(KEY_LAST_DATE_CHECK), KEY_LAST_DATE_CHECK)
    }

    fn set_last_checked_date(&self, date: NaiveDate) {
        write_json(self, KEY_LAST_DATE_CHECK, &date);
    }
}

/// Corrupt values are treated as absent, with a warning. The engine then
/// rebuilds from the server or starts fresh.
fn read_json<T: DeserializeOwned>(raw: Option<String>, key: &str) -> Option<T> {
    let raw = raw?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(err) => {
            warn!("discarding corrupt state under '{key}': {err}");
            None
        }
    }
}

fn write_json<S: StateStore + ?Sized, T: Serialize>(store: &S, key: &str, value: &T) {
    match serde_json::to_string(value) {
        Ok(json) => store.set(key, &json),
        Err(err) => warn!("could not serialize state for '{key}': {err}"),
    }
}
