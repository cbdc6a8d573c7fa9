/// Closed error taxonomy for the whole service. Every external failure is
/// normalized into one of these at the boundary where it is caught; the HTTP
/// mapping lives in `adapters::error`.
#[derive(Debug)]
pub enum ApplicationError {
    /// A file rejected locally (size, MIME type, extension); never sent to the
    /// remote store. Carries the user-facing reason.
    Validation(String),
    /// The auth provider rejected the request; message propagated verbatim.
    RemoteAuth(String),
    /// An object-store operation failed; normalized to a message string.
    RemoteStorage(String),
    /// A relational-store operation failed; normalized to a message string.
    RemoteQuery(String),
    NotFound,
    Unauthorized,
    BadRequest(String),
    Internal(String),
}

impl ApplicationError {
    /// The string surfaced to callers, also used when recording a failed
    /// upload task.
    pub fn message(&self) -> String {
        match self {
            ApplicationError::Validation(msg)
            | ApplicationError::RemoteAuth(msg)
            | ApplicationError::RemoteStorage(msg)
            | ApplicationError::RemoteQuery(msg)
            | ApplicationError::BadRequest(msg) => msg.clone(),
            ApplicationError::NotFound => "Resource not found".to_string(),
            ApplicationError::Unauthorized => "Unauthorized".to_string(),
            ApplicationError::Internal(_) => "Internal server error".to_string(),
        }
    }
}
