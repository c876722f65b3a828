//! Unified error types for the Viska host SDK.

use riko_runtime::envelope::{self, ErrorPayload};
use riko_runtime::error::KIND_NOT_FOUND;
use riko_runtime::{Marshal, MalformedPayload};

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Kind reported for [`Error::UseAfterFree`].
pub const KIND_USE_AFTER_FREE: &str = "UseAfterFree";
/// Kind reported for [`Error::DoubleFree`].
pub const KIND_DOUBLE_FREE: &str = "DoubleFree";

/// Top-level error type for the Viska host SDK.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A method was called on a proxy after it was released. The native side
    /// was not contacted.
    #[error("{class} used after release")]
    UseAfterFree {
        /// Class of the released proxy.
        class: &'static str,
    },

    /// A proxy was released a second time. The native side was not contacted.
    #[error("{class} released twice")]
    DoubleFree {
        /// Class of the released proxy.
        class: &'static str,
    },

    /// A buffer could not be encoded or decoded on this side of the boundary.
    #[error("malformed payload: {0}")]
    MalformedPayload(#[from] MalformedPayload),

    /// An error raised by the native core, keeping its kind.
    #[error("{kind}: {message}")]
    Native {
        /// Category chosen by the native side.
        kind: String,
        /// Human-readable description.
        message: String,
    },
}

impl Error {
    /// Category of this error, matching the wire kinds for native errors.
    #[must_use]
    pub fn kind(&self) -> &str {
        match self {
            Self::UseAfterFree { .. } => KIND_USE_AFTER_FREE,
            Self::DoubleFree { .. } => KIND_DOUBLE_FREE,
            Self::MalformedPayload(_) => riko_runtime::error::KIND_MALFORMED_PAYLOAD,
            Self::Native { kind, .. } => kind,
        }
    }

    /// Whether the native handle table did not know the handle.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Native { kind, .. } if kind == KIND_NOT_FOUND)
    }
}

impl From<ErrorPayload> for Error {
    fn from(payload: ErrorPayload) -> Self {
        Self::Native {
            kind: payload.kind,
            message: payload.message,
        }
    }
}

/// Decode an envelope returned by the boundary into a value or an error.
///
/// # Errors
///
/// [`Error::MalformedPayload`] for an undecodable buffer, otherwise the
/// native error the envelope carries.
pub fn unwrap<T: Marshal>(buf: &[u8]) -> Result<T> {
    envelope::open(buf)?.map_err(Error::from)
}

#[cfg(test)]
mod tests {
    use riko_runtime::Envelope;
    use riko_runtime::envelope::seal;

    use super::*;

    #[test]
    fn unwrap_success() {
        let buf = seal(&Envelope::Ok("hi".to_owned()));
        assert_eq!(unwrap::<String>(&buf).unwrap(), "hi");
    }

    #[test]
    fn unwrap_failure_keeps_kind_and_message() {
        let buf = seal(&Envelope::<String>::err("InvalidProfile", "bad path"));
        let err = unwrap::<String>(&buf).unwrap_err();
        assert_eq!(err.kind(), "InvalidProfile");
        assert_eq!(err.to_string(), "InvalidProfile: bad path");
        assert!(!err.is_not_found());
    }

    #[test]
    fn unwrap_rejects_wrong_payload_type() {
        let buf = seal(&Envelope::Ok(5u8));
        let err = unwrap::<u64>(&buf).unwrap_err();
        assert!(matches!(err, Error::MalformedPayload(MalformedPayload::Truncated { .. })));
    }

    #[test]
    fn not_found_is_recognized() {
        let buf = seal(&Envelope::<()>::err(KIND_NOT_FOUND, "gone"));
        assert!(unwrap::<()>(&buf).unwrap_err().is_not_found());
    }
}
