use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use super::{KeyValueStorage, StoreError, DOCUMENT_KEY, SECTOR_KEY};
use crate::models::{ResumeDocument, ResumePatch, Sector};

/// Schema version written alongside every persisted document.
pub const SCHEMA_VERSION: u32 = 1;

/// Documents written before versioning existed carry no `schemaVersion`.
fn legacy_schema_version() -> u32 {
    1
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PersistedDocumentRef<'a> {
    schema_version: u32,
    #[serde(flatten)]
    document: &'a ResumeDocument,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PersistedDocument {
    #[serde(default = "legacy_schema_version")]
    schema_version: u32,
    #[serde(flatten)]
    document: ResumeDocument,
}

/// Serializes a document in its persisted (versioned) form.
pub fn encode_document(document: &ResumeDocument) -> Result<String, StoreError> {
    Ok(serde_json::to_string(&PersistedDocumentRef {
        schema_version: SCHEMA_VERSION,
        document,
    })?)
}

/// Parses a persisted document, rejecting schema versions newer than ours.
pub fn decode_document(raw: &str) -> Result<ResumeDocument, StoreError> {
    let persisted: PersistedDocument = serde_json::from_str(raw)?;
    if persisted.schema_version > SCHEMA_VERSION {
        return Err(StoreError::UnsupportedSchema {
            found: persisted.schema_version,
            supported: SCHEMA_VERSION,
        });
    }
    Ok(persisted.document)
}

/// Owns the canonical document and mirrors it into durable storage.
///
/// Not synchronized: callers serialize access (the session sits behind a
/// single mutex).
pub struct RecordStore {
    storage: Box<dyn KeyValueStorage>,
    document: ResumeDocument,
}

impl RecordStore {
    /// Restores the previously saved document, or starts empty. A document
    /// that fails to load is logged and discarded; this never fails.
    pub fn open(storage: impl KeyValueStorage + 'static) -> Self {
        let storage: Box<dyn KeyValueStorage> = Box::new(storage);

        let document = match storage.get(DOCUMENT_KEY) {
            Ok(Some(raw)) => match decode_document(&raw) {
                Ok(document) => {
                    info!("Restored saved resume document");
                    document
                }
                Err(e) => {
                    warn!("Discarding saved resume document: {e}");
                    ResumeDocument::default()
                }
            },
            Ok(None) => {
                debug!("No saved resume document, starting empty");
                ResumeDocument::default()
            }
            Err(e) => {
                warn!("Could not read saved resume document: {e}");
                ResumeDocument::default()
            }
        };

        Self { storage, document }
    }

    /// An owned snapshot of the current document.
    pub fn get(&self) -> ResumeDocument {
        self.document.clone()
    }

    /// Borrowed view of the current document.
    pub fn document(&self) -> &ResumeDocument {
        &self.document
    }

    /// Applies `patch` and writes the full document back to storage. A sector
    /// in the patch is also written under its own key.
    pub fn patch(&mut self, patch: ResumePatch) {
        let sector = patch.sector;
        self.document.apply(patch);

        match encode_document(&self.document) {
            Ok(raw) => self.write(DOCUMENT_KEY, &raw),
            Err(e) => error!("Failed to serialize resume document: {e}"),
        }
        if let Some(sector) = sector {
            self.write(SECTOR_KEY, sector.as_str());
        }
    }

    /// Clears both storage keys and returns to the empty document.
    pub fn reset(&mut self) {
        for key in [DOCUMENT_KEY, SECTOR_KEY] {
            if let Err(e) = self.storage.remove(key) {
                error!("Failed to clear storage key '{key}': {e}");
            }
        }
        self.document = ResumeDocument::default();
        info!("Resume document reset");
    }

    /// The sector tag saved by a previous session, if any.
    pub fn stored_sector(&self) -> Option<Sector> {
        match self.storage.get(SECTOR_KEY) {
            Ok(Some(tag)) => match tag.parse() {
                Ok(sector) => Some(sector),
                Err(e) => {
                    warn!("Ignoring saved sector: {e}");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!("Could not read saved sector: {e}");
                None
            }
        }
    }

    fn write(&self, key: &str, value: &str) {
        if let Err(e) = self.storage.set(key, value) {
            error!("Failed to persist '{key}': {e}");
        }
    }
}
