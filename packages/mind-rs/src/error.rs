use thiserror::Error;

use crate::types::RecordKind;

#[derive(Error, Debug)]
pub enum RecordError {
    #[error("Malformed record: {0}")]
    MalformedRecord(String),

    #[error("Record contains no usable channels")]
    EmptyRecord,

    #[error("No record loaded for kind: {0}")]
    NoRecordLoaded(RecordKind),
}

pub type Result<T> = std::result::Result<T, RecordError>;
