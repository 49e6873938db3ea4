use thiserror::Error;
use uuid::Uuid;

use assessa_core::error::CoreError;
use assessa_export::error::ExportError;
use assessa_instruments::error::InstrumentError;
use assessa_storage::error::StorageError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("profile not found: {0}")]
    ProfileNotFound(Uuid),

    #[error("invalid {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    #[error(transparent)]
    Instrument(#[from] InstrumentError),

    #[error("storage failure: {0}")]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    Settings(#[from] CoreError),
}
