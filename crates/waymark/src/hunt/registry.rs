//! Immutable, ordered location catalog.

use std::collections::{HashMap, HashSet};

use waymark_common::{LocationRecord, WaymarkError};

/// Read-only catalog of hunt locations
#[derive(Debug)]
pub struct Registry {
    /// Records in authoring order
    records: Vec<LocationRecord>,
    /// id -> index into `records`
    index: HashMap<String, usize>,
    /// Index of the entry point
    entry: usize,
}

impl Registry {
    /// Build a registry, checking that the catalog forms a single chain.
    ///
    /// `entry` defaults to the first authored record.
    pub fn new(entry: Option<&str>, records: Vec<LocationRecord>) -> Result<Self, WaymarkError> {
        if records.is_empty() {
            return Err(WaymarkError::Config("hunt has no locations".into()));
        }

        let mut index = HashMap::with_capacity(records.len());
        for (i, record) in records.iter().enumerate() {
            if !is_path_segment(&record.id) {
                return Err(WaymarkError::Config(format!(
                    "location id {:?} must be non-empty ASCII letters, digits, '-' or '_'",
                    record.id
                )));
            }
            if index.insert(record.id.clone(), i).is_some() {
                return Err(WaymarkError::Config(format!(
                    "duplicate location id {:?}",
                    record.id
                )));
            }
        }

        for record in &records {
            if let Some(ref next) = record.successor {
                if !index.contains_key(next) {
                    return Err(WaymarkError::Config(format!(
                        "location {:?} points to unknown successor {:?}",
                        record.id, next
                    )));
                }
            }
        }

        let entry = match entry {
            Some(id) => *index.get(id).ok_or_else(|| {
                WaymarkError::Config(format!("entry point {:?} is not a location", id))
            })?,
            None => 0,
        };

        for (i, record) in records.iter().enumerate() {
            if i != entry && record.unlock_secret.trim().is_empty() {
                return Err(WaymarkError::Config(format!(
                    "location {:?} has no unlock secret",
                    record.id
                )));
            }
        }

        let registry = Self { records, index, entry };
        registry.check_chain()?;
        Ok(registry)
    }

    /// Walk from the entry point; every record must be visited exactly once.
    fn check_chain(&self) -> Result<(), WaymarkError> {
        let mut seen = HashSet::with_capacity(self.records.len());
        let mut current = Some(&self.records[self.entry]);

        while let Some(record) = current {
            if !seen.insert(record.id.as_str()) {
                return Err(WaymarkError::Config(format!(
                    "successor chain loops back to {:?}",
                    record.id
                )));
            }
            current = record.successor.as_deref().and_then(|id| self.lookup(id));
        }

        if seen.len() != self.records.len() {
            let unreachable: Vec<&str> = self
                .records
                .iter()
                .map(|r| r.id.as_str())
                .filter(|id| !seen.contains(id))
                .collect();
            return Err(WaymarkError::Config(format!(
                "locations not reachable from entry point: {}",
                unreachable.join(", ")
            )));
        }

        Ok(())
    }

    fn lookup(&self, id: &str) -> Option<&LocationRecord> {
        self.index.get(id).map(|&i| &self.records[i])
    }

    /// Look up a location by id
    pub fn get(&self, id: &str) -> Result<&LocationRecord, WaymarkError> {
        self.lookup(id)
            .ok_or_else(|| WaymarkError::NotFound(id.to_string()))
    }

    /// Locations in authoring order
    pub fn iter(&self) -> impl Iterator<Item = &LocationRecord> {
        self.records.iter()
    }

    pub fn entry_id(&self) -> &str {
        &self.records[self.entry].id
    }

    pub fn is_entry(&self, id: &str) -> bool {
        self.entry_id() == id
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Locations in visiting order, starting at the entry point
    pub fn successor_chain(&self) -> Vec<&LocationRecord> {
        let mut chain = Vec::with_capacity(self.records.len());
        let mut current = Some(&self.records[self.entry]);
        while let Some(record) = current {
            chain.push(record);
            current = record.successor.as_deref().and_then(|id| self.lookup(id));
        }
        chain
    }
}

fn is_path_segment(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
