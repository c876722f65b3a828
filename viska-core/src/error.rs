//! Domain errors of the native core.

use riko_runtime::{ErrorKind, ErrorPayload};

/// Failures of core operations, sent to the host under their own kinds.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    /// The profile path does not name a profile.
    #[error("invalid profile path `{0}`")]
    InvalidProfile(String),

    /// A display name was empty or too long.
    #[error("invalid display name: {0}")]
    InvalidDisplayName(&'static str),
}

impl ErrorKind for CoreError {
    fn kind(&self) -> &str {
        match self {
            Self::InvalidProfile(_) => "InvalidProfile",
            Self::InvalidDisplayName(_) => "InvalidDisplayName",
        }
    }
}

impl From<CoreError> for ErrorPayload {
    fn from(err: CoreError) -> Self {
        Self::from_error(&err)
    }
}
