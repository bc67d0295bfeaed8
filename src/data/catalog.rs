//! Ordered, immutable key -> entity catalogs and the generic JSON loader the
//! kind modules share. Iteration order is source-file order; resolution
//! tie-breaks depend on it.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

#[derive(Debug)]
pub enum DataError {
    Read { path: PathBuf, source: std::io::Error },
    Parse { path: PathBuf, source: serde_json::Error },
    Record { path: PathBuf, key: String, source: serde_json::Error },
    DuplicateKey { path: PathBuf, key: String },
}

impl fmt::Display for DataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read { path, source } => {
                write!(f, "failed to read {}: {source}", path.display())
            }
            Self::Parse { path, source } => {
                write!(f, "failed to parse {}: {source}", path.display())
            }
            Self::Record { path, key, source } => {
                write!(f, "bad record '{key}' in {}: {source}", path.display())
            }
            Self::DuplicateKey { path, key } => {
                write!(f, "duplicate key '{key}' in {}", path.display())
            }
        }
    }
}

impl std::error::Error for DataError {}

/// Insertion-ordered catalog with O(1) key lookup. Built once at load and
/// never mutated afterwards.
#[derive(Debug, Clone)]
pub struct Catalog<T> {
    entries: Vec<(String, T)>,
    index: HashMap<String, usize>,
}

impl<T> Catalog<T> {
    /// Build from already-ordered entries, rejecting duplicate keys.
    pub fn from_entries(path: &Path, entries: Vec<(String, T)>) -> Result<Self, DataError> {
        let mut index = HashMap::with_capacity(entries.len());
        for (position, (key, _)) in entries.iter().enumerate() {
            if index.insert(key.clone(), position).is_some() {
                return Err(DataError::DuplicateKey {
                    path: path.to_path_buf(),
                    key: key.clone(),
                });
            }
        }
        Ok(Catalog { entries, index })
    }

    pub fn get(&self, key: &str) -> Option<&T> {
        self.index.get(key).map(|&position| &self.entries[position].1)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Keys in source-file order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    /// (key, entity) pairs in source-file order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.entries.iter().map(|(key, entry)| (key.as_str(), entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Load a JSON object of raw key -> record and build one catalog entry per
/// record. `build` decides the final key (waves re-key by index) and the
/// constructed entity; everything else is shared across kinds.
pub fn load_catalog<R, T>(
    path: &Path,
    mut build: impl FnMut(&str, R) -> (String, T),
) -> Result<Catalog<T>, DataError>
where
    R: DeserializeOwned,
{
    let raw = fs::read_to_string(path).map_err(|source| DataError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let object: Map<String, Value> = serde_json::from_str(&raw).map_err(|source| DataError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let mut entries = Vec::with_capacity(object.len());
    for (key, value) in object {
        let record: R = serde_json::from_value(value).map_err(|source| DataError::Record {
            path: path.to_path_buf(),
            key: key.clone(),
            source,
        })?;
        entries.push(build(&key, record));
    }
    Catalog::from_entries(path, entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog(entries: Vec<(&str, u32)>) -> Result<Catalog<u32>, DataError> {
        let owned = entries
            .into_iter()
            .map(|(key, value)| (key.to_string(), value))
            .collect();
        Catalog::from_entries(Path::new("test.json"), owned)
    }

    #[test]
    fn preserves_entry_order_and_looks_up_by_key() {
        let catalog = catalog(vec![("zealot", 1), ("archon", 2), ("marine", 3)])
            .expect("catalog should build");

        let keys: Vec<&str> = catalog.keys().collect();
        assert_eq!(keys, vec!["zealot", "archon", "marine"]);
        assert_eq!(catalog.get("archon"), Some(&2));
        assert_eq!(catalog.get("missing"), None);
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn rejects_duplicate_keys() {
        let err = catalog(vec![("zealot", 1), ("zealot", 2)])
            .expect_err("duplicate keys should be rejected");
        assert!(matches!(err, DataError::DuplicateKey { ref key, .. } if key == "zealot"));
    }
}
