//! Filesystem-backed engine.
//!
//! Each module lives at `<base_dir>/<hex address>/dat.json`. The index is
//! loaded on `ready()` and kept in memory until `destroy()`.

use crate::engine::{EngineClient, InitRequest, ModuleRecord};
use crate::error::EngineError;
use crate::types::{ModuleKey, ModuleType};
use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

const METADATA_FILE: &str = "dat.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Ready,
    Closed,
}

struct State {
    phase: Phase,
    /// Ordered by creation time
    modules: Vec<ModuleRecord>,
}

pub struct LocalEngine {
    base_dir: PathBuf,
    state: Mutex<State>,
    nonce: AtomicU64,
}

impl LocalEngine {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            state: Mutex::new(State {
                phase: Phase::Idle,
                modules: Vec::new(),
            }),
            nonce: AtomicU64::new(0),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn metadata_path(&self, key: &ModuleKey) -> PathBuf {
        self.base_dir.join(key.to_hex()).join(METADATA_FILE)
    }

    fn ensure_ready(&self) -> Result<(), EngineError> {
        match self.state.lock().phase {
            Phase::Ready => Ok(()),
            Phase::Idle => Err(EngineError::NotReady),
            Phase::Closed => Err(EngineError::Closed),
        }
    }

    fn lookup(&self, key: &ModuleKey) -> Result<ModuleRecord, EngineError> {
        self.state
            .lock()
            .modules
            .iter()
            .find(|m| m.url == *key)
            .cloned()
            .ok_or(EngineError::NotFound(*key))
    }

    fn list_by_type(&self, module_type: ModuleType) -> Result<Vec<ModuleRecord>, EngineError> {
        self.ensure_ready()?;
        Ok(self
            .state
            .lock()
            .modules
            .iter()
            .filter(|m| m.module_type == module_type)
            .cloned()
            .collect())
    }

    /// Replace the cached copy of `record`, appending it when new.
    fn store_cached(&self, record: ModuleRecord) {
        let mut state = self.state.lock();
        match state.modules.iter_mut().find(|m| m.url == record.url) {
            Some(existing) => *existing = record,
            None => state.modules.push(record),
        }
    }

    fn derive_key(&self, request: &InitRequest) -> ModuleKey {
        let nonce = self.nonce.fetch_add(1, Ordering::SeqCst);
        let mut hasher = blake3::Hasher::new();
        hasher.update(request.module_type.as_str().as_bytes());
        hasher.update(request.title.as_bytes());
        hasher.update(request.description.as_bytes());
        hasher.update(&Utc::now().timestamp_nanos_opt().unwrap_or_default().to_le_bytes());
        hasher.update(&std::process::id().to_le_bytes());
        hasher.update(&nonce.to_le_bytes());
        ModuleKey(*hasher.finalize().as_bytes())
    }

    async fn write_record(&self, record: &ModuleRecord) -> Result<(), EngineError> {
        let path = self.metadata_path(&record.url);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_vec_pretty(record)?;
        tokio::fs::write(&path, json).await?;
        Ok(())
    }

    async fn load_index(&self) -> Result<Vec<ModuleRecord>, EngineError> {
        let mut entries = tokio::fs::read_dir(&self.base_dir).await?;
        let mut modules = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            // Stray files (e.g. `.DS_Store`) are not modules
            if !entry.file_type().await?.is_dir() {
                continue;
            }
            let path = entry.path().join(METADATA_FILE);
            let content = match tokio::fs::read(&path).await {
                Ok(c) => c,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
                Err(e) => {
                    tracing::warn!("Failed to read module metadata {}: {}", path.display(), e);
                    continue;
                }
            };
            match serde_json::from_slice::<ModuleRecord>(&content) {
                Ok(record) => modules.push(record),
                Err(e) => {
                    tracing::warn!("Failed to parse module metadata {}: {}", path.display(), e);
                }
            }
        }
        modules.sort_by(|a, b| a.created.cmp(&b.created).then(a.url.cmp(&b.url)));
        Ok(modules)
    }
}

#[async_trait]
impl EngineClient for LocalEngine {
    async fn ready(&self) -> Result<(), EngineError> {
        if self.state.lock().phase == Phase::Closed {
            return Err(EngineError::Closed);
        }
        tokio::fs::create_dir_all(&self.base_dir).await?;
        let modules = self.load_index().await?;
        tracing::debug!(
            base_dir = %self.base_dir.display(),
            modules = modules.len(),
            "Local engine ready"
        );
        let mut state = self.state.lock();
        state.modules = modules;
        state.phase = Phase::Ready;
        Ok(())
    }

    async fn init(&self, request: InitRequest) -> Result<ModuleRecord, EngineError> {
        self.ensure_ready()?;
        if request.title.trim().is_empty() {
            return Err(EngineError::Rejected("title is required".to_string()));
        }
        let key = self.derive_key(&request);
        let record = ModuleRecord::from_request(key, request, Utc::now());
        self.write_record(&record).await?;
        tracing::debug!(url = %record.url, module_type = %record.module_type, "Module initialized");
        self.store_cached(record.clone());
        Ok(record)
    }

    async fn get(&self, key: &ModuleKey) -> Result<ModuleRecord, EngineError> {
        self.ensure_ready()?;
        self.lookup(key)
    }

    async fn set(&self, record: ModuleRecord) -> Result<(), EngineError> {
        self.ensure_ready()?;
        let existing = self.lookup(&record.url)?;
        if existing.module_type != record.module_type {
            return Err(EngineError::Rejected(format!(
                "module type of {} cannot change",
                record.url
            )));
        }
        self.write_record(&record).await?;
        self.store_cached(record);
        Ok(())
    }

    async fn list_content(&self) -> Result<Vec<ModuleRecord>, EngineError> {
        self.list_by_type(ModuleType::Content)
    }

    async fn list_profiles(&self) -> Result<Vec<ModuleRecord>, EngineError> {
        self.list_by_type(ModuleType::Profile)
    }

    async fn register(&self, child: &ModuleKey, parent: &ModuleKey) -> Result<(), EngineError> {
        self.ensure_ready()?;
        let content = self.lookup(child)?;
        let mut profile = self.lookup(parent)?;
        if content.module_type != ModuleType::Content {
            return Err(EngineError::Rejected(format!("{} is not a content module", child)));
        }
        if profile.module_type != ModuleType::Profile {
            return Err(EngineError::Rejected(format!("{} is not a profile", parent)));
        }
        if profile.contents.contains(child) {
            return Ok(());
        }
        profile.contents.push(*child);
        self.write_record(&profile).await?;
        self.store_cached(profile);
        Ok(())
    }

    async fn destroy(&self) -> Result<(), EngineError> {
        let mut state = self.state.lock();
        if state.phase == Phase::Closed {
            return Err(EngineError::Closed);
        }
        state.phase = Phase::Closed;
        state.modules.clear();
        tracing::debug!(base_dir = %self.base_dir.display(), "Local engine destroyed");
        Ok(())
    }
}
