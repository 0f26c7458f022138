/// Errors while producing an export artifact.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExportError {
    #[error("blueprint {id} has no points to draw")]
    NoPoints { id: String },

    #[error("blueprint {id} has a non-finite coordinate")]
    NonFinite { id: String },

    #[error("serialization error: {reason}")]
    Serialization { reason: String },
}
