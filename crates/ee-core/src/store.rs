//! In-memory, timestamp-ordered record store.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use crate::record::Record;

/// Records keyed by timestamp, iterated in ascending order.
///
/// A single ordered map serves both exact lookups and ordered traversal, so
/// the ordering and the lookup table cannot drift apart. The first record
/// stored for a timestamp wins; later duplicates are dropped.
#[derive(Debug, Default, Clone)]
pub struct Store {
    records: BTreeMap<i64, Record>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a record unless its timestamp is already present.
    ///
    /// Returns `true` if the record was stored.
    pub fn put(&mut self, record: Record) -> bool {
        match self.records.entry(record.timestamp) {
            Entry::Vacant(slot) => {
                slot.insert(record);
                true
            }
            Entry::Occupied(_) => {
                tracing::debug!(timestamp = record.timestamp, "dropping duplicate timestamp");
                false
            }
        }
    }

    /// Returns the record stored at exactly `timestamp`.
    pub fn get(&self, timestamp: i64) -> Option<&Record> {
        self.records.get(&timestamp)
    }

    /// Records in ascending timestamp order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Record> + ExactSizeIterator {
        self.records.values()
    }

    /// Stored timestamps in ascending order.
    pub fn timestamps(&self) -> impl DoubleEndedIterator<Item = i64> + ExactSizeIterator + '_ {
        self.records.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'a> IntoIterator for &'a Store {
    type Item = &'a Record;
    type IntoIter = std::collections::btree_map::Values<'a, i64, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.values()
    }
}

impl Extend<Record> for Store {
    fn extend<T: IntoIterator<Item = Record>>(&mut self, iter: T) {
        for record in iter {
            self.put(record);
        }
    }
}

impl FromIterator<Record> for Store {
    fn from_iter<T: IntoIterator<Item = Record>>(iter: T) -> Self {
        let mut store = Self::new();
        store.extend(iter);
        store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_then_get_turn_off_ordered_first() {
        let mut store = Store::new();
        store.put(Record::delta(1_544_206_563, 0.3));

        let record = Record::turn_off(1_544_206_562);
        assert!(store.put(record));

        assert_eq!(store.get(1_544_206_562), Some(&record));
        assert_eq!(store.timestamps().next(), Some(1_544_206_562));
    }

    #[test]
    fn put_then_get_delta_ordered_first() {
        let mut store = Store::new();
        store.put(Record::delta(1_544_210_163, 0.3));

        let record = Record::delta(1_544_206_562, -0.6);
        assert!(store.put(record));

        assert_eq!(store.get(1_544_206_562), Some(&record));
        assert_eq!(store.timestamps().next(), Some(1_544_206_562));
    }

    #[test]
    fn get_missing_timestamp_is_none() {
        let store: Store = [Record::turn_off(5)].into_iter().collect();
        assert!(store.get(6).is_none());
    }

    #[test]
    fn duplicate_timestamp_keeps_first_record() {
        let mut store = Store::new();
        assert!(store.put(Record::delta(100, -0.25)));
        let before = store.clone();

        assert!(!store.put(Record::delta(100, 0.75)));
        assert!(!store.put(Record::turn_off(100)));

        assert_eq!(store.len(), 1);
        assert_eq!(store.get(100), Some(&Record::delta(100, -0.25)));
        assert!(store.iter().eq(before.iter()));
    }

    #[test]
    fn timestamps_stay_strictly_ascending() {
        let order = [50, 10, 40, 10, 30, 20, 50, 0, -5, 25];
        let mut store = Store::new();
        for ts in order {
            store.put(Record::turn_off(ts));
        }

        let timestamps: Vec<i64> = store.timestamps().collect();
        assert!(timestamps.windows(2).all(|pair| pair[0] < pair[1]));
        assert_eq!(timestamps, vec![-5, 0, 10, 20, 25, 30, 40, 50]);
        assert!(store.iter().map(|r| r.timestamp).eq(timestamps));
    }
}
