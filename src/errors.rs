use thiserror::Error;

pub type GemchatResult<T> = Result<T, GemchatError>;

/// Everything that can go wrong between a submitted message and a rendered
/// reply. Store failures are downgraded to banner text at the call site;
/// completion failures are logged in full and rendered as one generic
/// fallback message.
#[derive(Debug, Error)]
pub enum GemchatError {
    #[error("missing Gemini API key")]
    MissingCredential,

    #[error("local key storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Gemini API error ({status}): {detail}")]
    HttpError { status: u16, detail: String },

    #[error("Gemini returned an empty response")]
    EmptyResponse,

    #[error("request failed: {0}")]
    TransportError(#[from] reqwest::Error),
}
