//! Durable numeric key-value storage for the best score.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Get/set a number by key. Failures are the store's problem: callers never
/// see an error, a missing or unreadable value simply reads as `None`.
pub trait ScoreStore {
    fn get(&self, key: &str) -> Option<u32>;
    fn set(&mut self, key: &str, value: u32);
}

/// On-disk shape of the score file: a flat `{ "key": number }` object.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
struct ScoreFile {
    values: BTreeMap<String, u32>,
}

/// Scores kept in a small JSON object on disk.
pub struct FileStore {
    path: PathBuf,
    file: ScoreFile,
}

impl FileStore {
    /// Opens the store at `path`. A missing or malformed file starts empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let file = match fs::read_to_string(&path) {
            Ok(json) => serde_json::from_str(&json).unwrap_or_else(|e| {
                log::warn!("ignoring malformed score file {}: {}", path.display(), e);
                ScoreFile::default()
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => ScoreFile::default(),
            Err(e) => {
                log::warn!("cannot read score file {}: {}", path.display(), e);
                ScoreFile::default()
            }
        };
        Self { path, file }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.file)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(&self.path, json)
    }
}

impl ScoreStore for FileStore {
    fn get(&self, key: &str) -> Option<u32> {
        self.file.values.get(key).copied()
    }

    fn set(&mut self, key: &str, value: u32) {
        self.file.values.insert(key.to_string(), value);
        if let Err(e) = self.save() {
            log::warn!("cannot write score file {}: {}", self.path.display(), e);
        }
    }
}

/// Volatile store, used when nothing should touch the disk.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: HashMap<String, u32>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScoreStore for MemoryStore {
    fn get(&self, key: &str) -> Option<u32> {
        self.values.get(key).copied()
    }

    fn set(&mut self, key: &str, value: u32) {
        self.values.insert(key.to_string(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::process;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = env::temp_dir().join(format!("skyflap-test-{}-{}", name, process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_memory_store_get_set() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("warp-best"), None);
        store.set("warp-best", 7);
        assert_eq!(store.get("warp-best"), Some(7));
        store.set("warp-best", 3);
        assert_eq!(store.get("warp-best"), Some(3));
    }

    #[test]
    fn test_file_store_persists_across_opens() {
        let dir = scratch_dir("persist");
        let path = dir.join("nested").join("scores.json");

        let mut store = FileStore::open(&path);
        assert_eq!(store.get("warp-best"), None);
        store.set("warp-best", 42);
        assert!(path.exists());

        let reopened = FileStore::open(&path);
        assert_eq!(reopened.get("warp-best"), Some(42));
        assert_eq!(reopened.path(), path.as_path());

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_file_store_flat_json_format() {
        let dir = scratch_dir("format");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("scores.json");
        fs::write(&path, r#"{ "warp-best": 17 }"#).unwrap();

        let mut store = FileStore::open(&path);
        assert_eq!(store.get("warp-best"), Some(17));
        store.set("warp-best", 18);
        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["warp-best"], 18);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_file_store_malformed_reads_empty() {
        let dir = scratch_dir("malformed");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("scores.json");
        fs::write(&path, "not json {").unwrap();

        let store = FileStore::open(&path);
        assert_eq!(store.get("warp-best"), None);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_file_store_write_failure_is_silent() {
        let dir = scratch_dir("blocked");
        fs::create_dir_all(&dir).unwrap();
        // A regular file where the parent directory should be.
        let blocker = dir.join("blocker");
        fs::write(&blocker, "").unwrap();

        let mut store = FileStore::open(blocker.join("scores.json"));
        store.set("warp-best", 5);
        assert_eq!(store.get("warp-best"), Some(5));

        let _ = fs::remove_dir_all(&dir);
    }
}
