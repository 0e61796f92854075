use thiserror::Error;

/// Errors that abort a conversion run.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConversionError {
    #[error("Failed to parse project JSON: {0}")]
    JsonParseError(String),

    #[error("Message '{message_id}' has a malformed payload: {reason}")]
    MalformedPayload { message_id: String, reason: String },

    #[error(
        "Message '{message_id}' is reached again before the next intent boundary; looping flows are not supported"
    )]
    CycleDetected { message_id: String },

    #[error("Failed to read project file: {0}")]
    Io(String),
}

/// Non-fatal problems found while converting. The run degrades to a documented
/// fallback and keeps going.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConversionWarning {
    #[error("\"{content_type}\" on message '{message_id}' is an unsupported content type and was coerced to text")]
    UnsupportedContentType {
        message_id: String,
        content_type: String,
    },

    #[error("No intent of segment '{anchor_id}' resolves; condition falls back to '{fallback}'")]
    UnresolvedIntent { anchor_id: String, fallback: String },

    #[error("Slot of intent '{intent}' references unknown variable '{variable_id}'")]
    UnresolvedVariable { intent: String, variable_id: String },

    #[error("Message '{from}' points to message '{to}', which is not on the board")]
    MissingMessage { from: String, to: String },

    #[error(
        "Message '{message_id}' follows root '{root_id}' without an intent and belongs to no dialog node"
    )]
    UnanchoredMessage { root_id: String, message_id: String },

    #[error("Root message '{0}' is not on the board")]
    MissingRoot(String),
}

/// Errors raised while writing or reading a skill document.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Failed to serialize skill document: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to parse skill document '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("I/O error on '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
