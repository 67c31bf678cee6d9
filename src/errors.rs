use thiserror::Error;

#[derive(Debug, Error)]
pub enum CollectError {
    #[error("no output node set")]
    NoOutput,

    #[error("no sampling frame set")]
    NoSamplingFrame,

    #[error("sampling frame is missing, cannot compute point coordinates")]
    MissingFrame,

    #[error("anchor and sampling frames cannot be the same")]
    FrameConflict,

    #[error("unsupported output node kind: {0}")]
    UnsupportedOutputKind(String),

    #[error("unrecognized collect mode literal: {0:?}")]
    InvalidModeLiteral(String),

    #[error("invalid value {value:?} for attribute {name}")]
    InvalidAttribute { name: String, value: String },

    #[error("invalid mesh geometry: {0}")]
    InvalidGeometry(String),

    #[error("label counter cannot advance past {0}")]
    LabelCounterExhausted(u64),

    #[error("output node is already borrowed")]
    OutputBusy,

    #[error("collection session is already borrowed")]
    SessionBusy,

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
