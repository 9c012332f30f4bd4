use crate::rr::NameError;

/// Boxed error for sources that come from more than one parser.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors raised by the record and domain models.
///
/// None of these are fatal: a bad record fails only the operation it was
/// handed to, and the caller decides whether to skip it or stop the run.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("no such DNS type as {record_type:?}")]
    InvalidRecordType { record_type: String },

    #[error("{record_type} record rejected: {text:?}: {source}")]
    InvalidRecordSyntax {
        text: String,
        record_type: String,
        #[source]
        source: BoxError,
    },

    #[error("copy failed: {0}")]
    CopyFailure(#[source] serde_json::Error),

    #[error("metadata for {provider} could not be read: {source}")]
    ProviderMetadataUnreadable {
        provider: String,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Name(#[from] NameError),
}

impl ModelError {
    pub(crate) fn syntax<E>(text: impl Into<String>, record_type: impl Into<String>, source: E) -> Self
    where
        E: Into<BoxError>,
    {
        ModelError::InvalidRecordSyntax {
            text: text.into(),
            record_type: record_type.into(),
            source: source.into(),
        }
    }
}
