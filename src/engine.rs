//! Engine Client
//!
//! Contract of the module-management engine the CLI delegates to. The
//! dispatcher owns one client per invocation; handlers only borrow it.

pub mod local;
mod record;

pub use local::LocalEngine;
pub use record::{InitRequest, ModuleRecord, DEFAULT_LICENSE, DEFAULT_LICENSE_NAME};

use crate::error::EngineError;
use crate::types::ModuleKey;
use async_trait::async_trait;

/// Module-management engine.
///
/// `ready` must succeed before any domain operation; `destroy` releases the
/// engine and is called exactly once by the owner after a successful `ready`.
#[async_trait]
pub trait EngineClient: Send + Sync {
    /// Suspends until the engine is usable.
    async fn ready(&self) -> Result<(), EngineError>;

    async fn init(&self, request: InitRequest) -> Result<ModuleRecord, EngineError>;

    async fn get(&self, key: &ModuleKey) -> Result<ModuleRecord, EngineError>;

    /// Persists a full metadata record for an existing module.
    async fn set(&self, record: ModuleRecord) -> Result<(), EngineError>;

    async fn list_content(&self) -> Result<Vec<ModuleRecord>, EngineError>;

    async fn list_profiles(&self) -> Result<Vec<ModuleRecord>, EngineError>;

    /// Records `child` (content) under `parent` (profile).
    async fn register(&self, child: &ModuleKey, parent: &ModuleKey) -> Result<(), EngineError>;

    /// Suspends until resources are released.
    async fn destroy(&self) -> Result<(), EngineError>;
}
