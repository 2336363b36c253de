//! Movement document store
//!
//! Keeps every movement as a JSON document keyed by a store-assigned id in
//! movements.json. Each operation reads the file, applies one change and
//! writes it back atomically, so the file is always the source of truth.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Movement, MovementId, MovementPatch};

use super::codec;
use super::file_io::JsonFile;
use super::MovementStore;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Document {
    id: String,
    #[serde(flatten)]
    fields: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct MovementDocuments {
    #[serde(default)]
    documents: Vec<Document>,
}

/// File-backed movement store
pub struct JsonMovementStore {
    file: JsonFile<MovementDocuments>,
}

impl JsonMovementStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            file: JsonFile::new(path),
        }
    }

    fn read(&self) -> LedgerResult<MovementDocuments> {
        self.file.load()
    }

    fn write(&self, docs: &MovementDocuments) -> LedgerResult<()> {
        self.file.save(docs)
    }

    /// Number of stored documents
    pub fn count(&self) -> LedgerResult<usize> {
        Ok(self.read()?.documents.len())
    }
}

impl MovementStore for JsonMovementStore {
    fn list_all(&self) -> LedgerResult<Vec<Movement>> {
        let docs = self.read()?;
        docs.documents
            .iter()
            .map(|doc| {
                let id: MovementId = doc.id.parse().map_err(|_| {
                    LedgerError::Storage(format!(
                        "Document without id in {}",
                        self.file.path().display()
                    ))
                })?;
                codec::decode(&id, &doc.fields)
            })
            .collect()
    }

    fn create(&self, movement: &Movement) -> LedgerResult<MovementId> {
        if movement.id.is_some() {
            return Err(LedgerError::Validation(
                "Cannot create a movement that already has an id".into(),
            ));
        }

        let mut docs = self.read()?;
        let id = MovementId::generate();
        docs.documents.push(Document {
            id: id.to_string(),
            fields: codec::encode(movement),
        });
        self.write(&docs)?;

        tracing::debug!(id = %id, "created movement document");
        Ok(id)
    }

    fn update(&self, id: &MovementId, patch: &MovementPatch) -> LedgerResult<()> {
        let mut docs = self.read()?;
        let doc = docs
            .documents
            .iter_mut()
            .find(|d| d.id == id.as_str())
            .ok_or_else(|| LedgerError::movement_not_found(id.to_string()))?;

        let changes = codec::encode_patch(patch);
        codec::drop_legacy_fields(&mut doc.fields, &changes);
        doc.fields.extend(changes);
        self.write(&docs)?;

        tracing::debug!(id = %id, "updated movement document");
        Ok(())
    }

    fn delete(&self, id: &MovementId) -> LedgerResult<()> {
        let mut docs = self.read()?;
        let before = docs.documents.len();
        docs.documents.retain(|d| d.id != id.as_str());
        if docs.documents.len() == before {
            return Err(LedgerError::movement_not_found(id.to_string()));
        }
        self.write(&docs)?;

        tracing::debug!(id = %id, "deleted movement document");
        Ok(())
    }
}
