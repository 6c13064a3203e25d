// File: ./src/storage.rs
// Local file persistence for the plant store.
//
// ⚠️ VERSION BUMP REQUIRED:
// Changes to Plant / CareTask / Activity serialization require
// incrementing STORE_VERSION below to prevent data corruption.
use crate::context::AppContext;
use crate::model::{Activity, CareTask, Plant};
use crate::store::PlantStore;
use anyhow::{Result, bail};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

// Increment this when making breaking changes to the record serialization.
// Version history:
// - v1: initial format (plants + tasks + activities in one envelope)
const STORE_VERSION: u32 = 1;

/// Versioned envelope around the persisted records.
#[derive(Serialize, Deserialize)]
struct StoreData {
    #[serde(default)]
    version: u32,
    #[serde(default)]
    plants: Vec<Plant>,
    #[serde(default)]
    tasks: Vec<CareTask>,
    #[serde(default)]
    activities: Vec<Activity>,
}

pub struct LocalStorage;

impl LocalStorage {
    fn get_lock_path(file_path: &Path) -> PathBuf {
        file_path.with_extension("lock")
    }

    /// Run `f` while holding an exclusive advisory lock next to
    /// `file_path`. Guards concurrent CLI invocations against torn
    /// read-modify-write cycles.
    pub fn with_lock<F, T>(file_path: &Path, f: F) -> Result<T>
    where
        F: FnOnce() -> Result<T>,
    {
        let lock_path = Self::get_lock_path(file_path);
        let file = fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        file.lock_exclusive()?;
        let result = f();
        FileExt::unlock(&file)?;
        result
    }

    /// Atomic write: write to a .tmp file then rename over the target.
    pub fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(path: P, contents: C) -> Result<()> {
        let path = path.as_ref();
        let tmp_path = path.with_extension("tmp");
        fs::write(&tmp_path, contents)?;
        fs::rename(tmp_path, path)?;
        Ok(())
    }

    /// Load the store from disk. A missing file is an empty store; an
    /// unreadable or future-versioned file is an error, never a silent
    /// reset.
    pub fn load(ctx: &dyn AppContext) -> Result<PlantStore> {
        let path = ctx.get_store_path()?;
        if !path.exists() {
            return Ok(PlantStore::new());
        }

        let data = Self::with_lock(&path, || {
            let json = fs::read_to_string(&path)?;
            let data: StoreData = serde_json::from_str(&json).map_err(|e| {
                anyhow::anyhow!("Failed to parse store file '{}': {}", path.display(), e)
            })?;
            Ok(data)
        })?;

        if data.version > STORE_VERSION {
            bail!(
                "Store file '{}' is v{}, newer than this build understands (v{})",
                path.display(),
                data.version,
                STORE_VERSION
            );
        }
        if data.version < STORE_VERSION {
            // v0 means the version field was absent; the v1 layout reads
            // it fine, so only the envelope needs refreshing on next save.
            log::info!(
                "Migrating store file from v{} to v{}",
                data.version,
                STORE_VERSION
            );
        }

        PlantStore::from_records(data.plants, data.tasks, data.activities)
    }

    /// Persist the whole store. Writes are locked and atomic so a crashed
    /// or concurrent invocation never leaves a half-written file.
    pub fn save(ctx: &dyn AppContext, store: &PlantStore) -> Result<()> {
        let path = ctx.get_store_path()?;
        let data = StoreData {
            version: STORE_VERSION,
            plants: store.plants().into_iter().cloned().collect(),
            tasks: store.tasks().into_iter().cloned().collect(),
            activities: store.activities().to_vec(),
        };

        Self::with_lock(&path, || {
            let json = serde_json::to_string_pretty(&data)?;
            Self::atomic_write(&path, json)?;
            Ok(())
        })
    }
}
