// Rust guideline compliant 2026-02-06

//! Storage module for per-realm linkifier collections.
//!
//! A store keeps each realm's ordered linkifiers and runs mutations as one
//! read-check-write unit under a per-realm exclusive lock. Two backends are
//! provided: JSONL files on disk and an in-memory map.

use crate::models::{compact_orders, Linkifier, RealmId};
use crate::{Error, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// Durable storage for ordered per-realm linkifier collections.
pub trait LinkifierStore {
    /// Loads a realm's linkifiers sorted by `order`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn load(&self, realm_id: RealmId) -> Result<Vec<Linkifier>>;

    /// Runs `f` against the realm's linkifiers under the realm's exclusive
    /// lock and persists the result if `f` succeeds.
    ///
    /// Orders are re-compacted before writing. If `f` fails, nothing is
    /// written.
    ///
    /// # Errors
    ///
    /// Returns the closure's error, or an error if the lock cannot be
    /// acquired or the result cannot be written.
    fn transaction<T, F>(&self, realm_id: RealmId, f: F) -> Result<T>
    where
        F: FnOnce(&mut Vec<Linkifier>) -> Result<T>;

    /// Deletes every linkifier of a realm and returns how many were removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be updated.
    fn delete_realm(&self, realm_id: RealmId) -> Result<usize>;
}

/// JSONL file store, one `realm-<id>.jsonl` file per realm.
///
/// Writers serialize on an OS file lock (`realm-<id>.lock`); files are
/// replaced atomically (temp file + rename), so readers never observe a
/// partially written collection.
pub struct JsonlStore {
    /// Directory holding the realm files.
    dir: PathBuf,
}

impl JsonlStore {
    /// Creates a new JsonlStore rooted at `dir`.
    ///
    /// The directory is created lazily on the first write.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is empty.
    pub fn new(dir: PathBuf) -> Result<Self> {
        Self::validate_path(&dir)?;
        Ok(Self { dir })
    }

    fn validate_path(path: &Path) -> Result<()> {
        if path.as_os_str().is_empty() {
            return Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "Path cannot be empty",
            )));
        }
        Ok(())
    }

    /// Returns the store directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the JSONL file path for a realm.
    pub fn realm_path(&self, realm_id: RealmId) -> PathBuf {
        self.dir.join(format!("realm-{}.jsonl", realm_id))
    }

    fn lock_path(&self, realm_id: RealmId) -> PathBuf {
        self.dir.join(format!("realm-{}.lock", realm_id))
    }

    fn load_file(path: &Path) -> Result<Vec<Linkifier>> {
        use std::fs::File;
        use std::io::{BufRead, BufReader};

        if !path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let mut linkifiers = Vec::new();

        for (number, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<Linkifier>(&line) {
                Ok(linkifier) => linkifiers.push(linkifier),
                Err(e) => {
                    log::warn!(
                        "Skipping malformed line {} in {}: {}",
                        number + 1,
                        path.display(),
                        e
                    );
                }
            }
        }

        linkifiers.sort_by_key(|l| l.order);
        Ok(linkifiers)
    }

    fn save_file(&self, path: &Path, linkifiers: &[Linkifier]) -> Result<()> {
        use std::fs::File;
        use std::io::Write;

        let temp_path = path.with_extension("jsonl.tmp");
        {
            let mut file = File::create(&temp_path)?;
            for linkifier in linkifiers {
                let json = serde_json::to_string(linkifier)?;
                file.write_all(json.as_bytes())?;
                file.write_all(b"\n")?;
            }
            file.sync_all()?;
        }

        std::fs::rename(&temp_path, path)?;
        Ok(())
    }

    /// Executes a closure with an exclusive lock on a realm's lock file.
    ///
    /// Blocks until the lock is available, so concurrent writers to the same
    /// realm run one after another.
    ///
    /// # Errors
    ///
    /// Returns an error if the lock file cannot be created or locked, or the
    /// closure fails.
    pub fn with_lock<F, T>(&self, realm_id: RealmId, f: F) -> Result<T>
    where
        F: FnOnce() -> Result<T>,
    {
        use fs2::FileExt;
        use std::fs::OpenOptions;

        std::fs::create_dir_all(&self.dir)?;
        let lock_file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(self.lock_path(realm_id))?;

        lock_file.lock_exclusive().map_err(|e| {
            Error::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to acquire lock for realm {}: {}", realm_id, e),
            ))
        })?;

        let result = f();

        let _ = lock_file.unlock();

        result
    }
}

impl LinkifierStore for JsonlStore {
    fn load(&self, realm_id: RealmId) -> Result<Vec<Linkifier>> {
        Self::load_file(&self.realm_path(realm_id))
    }

    fn transaction<T, F>(&self, realm_id: RealmId, f: F) -> Result<T>
    where
        F: FnOnce(&mut Vec<Linkifier>) -> Result<T>,
    {
        let path = self.realm_path(realm_id);
        self.with_lock(realm_id, || {
            let before = Self::load_file(&path)?;
            let mut linkifiers = before.clone();
            let value = f(&mut linkifiers)?;
            compact_orders(&mut linkifiers);
            if linkifiers != before {
                self.save_file(&path, &linkifiers)?;
                log::debug!(
                    "Wrote {} linkifier(s) to {}",
                    linkifiers.len(),
                    path.display()
                );
            }
            Ok(value)
        })
    }

    fn delete_realm(&self, realm_id: RealmId) -> Result<usize> {
        let path = self.realm_path(realm_id);
        self.with_lock(realm_id, || {
            let count = Self::load_file(&path)?.len();
            if path.exists() {
                std::fs::remove_file(&path)?;
            }
            Ok(count)
        })
    }
}

/// In-memory store, suitable for embedding and tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    realms: RwLock<HashMap<RealmId, Vec<Linkifier>>>,
}

impl MemoryStore {
    /// Creates an empty MemoryStore.
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned() -> Error {
    Error::Io(std::io::Error::new(
        std::io::ErrorKind::Other,
        "linkifier store lock poisoned",
    ))
}

impl LinkifierStore for MemoryStore {
    fn load(&self, realm_id: RealmId) -> Result<Vec<Linkifier>> {
        let realms = self.realms.read().map_err(|_| poisoned())?;
        Ok(realms.get(&realm_id).cloned().unwrap_or_default())
    }

    fn transaction<T, F>(&self, realm_id: RealmId, f: F) -> Result<T>
    where
        F: FnOnce(&mut Vec<Linkifier>) -> Result<T>,
    {
        let mut realms = self.realms.write().map_err(|_| poisoned())?;
        let mut linkifiers = realms.get(&realm_id).cloned().unwrap_or_default();
        let value = f(&mut linkifiers)?;
        compact_orders(&mut linkifiers);
        if linkifiers.is_empty() {
            realms.remove(&realm_id);
        } else {
            realms.insert(realm_id, linkifiers);
        }
        Ok(value)
    }

    fn delete_realm(&self, realm_id: RealmId) -> Result<usize> {
        let mut realms = self.realms.write().map_err(|_| poisoned())?;
        Ok(realms.remove(&realm_id).map(|l| l.len()).unwrap_or(0))
    }
}
