//! Storage layer for the ledger
//!
//! Movements live in a schemaless document file behind the
//! [`MovementStore`] seam; users live in a separate credential file.

pub mod codec;
pub mod file_io;
pub mod movements;
pub mod users;

pub use file_io::JsonFile;
pub use movements::JsonMovementStore;
pub use users::{CredentialCheck, JsonUserDirectory};

use crate::config::paths::LedgerPaths;
use crate::error::LedgerResult;
use crate::models::{Movement, MovementId, MovementPatch};

/// Persistence seam for movements
///
/// `create` assigns the id; the caller's movement must not carry one.
/// `update` and `delete` fail with a not-found error for unknown ids.
pub trait MovementStore {
    fn list_all(&self) -> LedgerResult<Vec<Movement>>;
    fn create(&self, movement: &Movement) -> LedgerResult<MovementId>;
    fn update(&self, id: &MovementId, patch: &MovementPatch) -> LedgerResult<()>;
    fn delete(&self, id: &MovementId) -> LedgerResult<()>;
}

/// Main storage coordinator
pub struct Storage {
    paths: LedgerPaths,
    pub movements: JsonMovementStore,
    pub users: JsonUserDirectory,
}

impl Storage {
    /// Create a new Storage instance, creating directories as needed
    pub fn new(paths: LedgerPaths) -> LedgerResult<Self> {
        paths.ensure_directories()?;

        Ok(Self {
            movements: JsonMovementStore::new(paths.movements_file()),
            users: JsonUserDirectory::new(paths.users_file()),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &LedgerPaths {
        &self.paths
    }

    /// Check if the ledger has been initialized
    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }
}
