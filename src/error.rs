use uuid::Uuid;

/// Error returned by mutating session and store commands.
///
/// Validation failures leave all state untouched; the caller keeps its form
/// values and can surface the missing field to the user.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("required field `{0}` is missing")]
    MissingField(&'static str),

    #[error("amount must be a positive number of grams")]
    InvalidAmount,

    #[error("field `{0}` must be a positive number")]
    InvalidMeasurement(&'static str),

    #[error("no meal template with id {0}")]
    UnknownTemplate(Uuid),

    #[error("not signed in")]
    NotSignedIn,

    #[error("failed to persist meal templates")]
    Persist(#[from] PersistError),
}

#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
