//! Error types shared by both sides of the boundary.

use std::fmt;

use crate::heap::Handle;

/// Convenience alias used throughout the runtime.
pub type Result<T> = std::result::Result<T, Error>;

/// Wire kind for [`MalformedPayload`] failures.
pub const KIND_MALFORMED_PAYLOAD: &str = "MalformedPayload";
/// Wire kind for handle table misses.
pub const KIND_NOT_FOUND: &str = "NotFound";
/// Wire kind for a native panic caught at the boundary.
pub const KIND_PANIC: &str = "Panic";
/// Wire kind for a call to an entry point the core does not export.
pub const KIND_UNKNOWN_SYMBOL: &str = "UnknownSymbol";

/// A buffer that does not follow the marshaled layout of the expected type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MalformedPayload {
    /// The buffer ended before the value was complete.
    #[error("truncated payload: needed {needed} byte(s), {remaining} remaining")]
    Truncated {
        /// Bytes the decoder asked for.
        needed: usize,
        /// Bytes left in the buffer.
        remaining: usize,
    },

    /// A tag byte carried a value outside its defined set.
    #[error("invalid {what} tag: {tag:#04x}")]
    InvalidTag {
        /// Which tag was being read.
        what: &'static str,
        /// The offending byte.
        tag: u8,
    },

    /// A handle field held zero, which is never issued.
    #[error("null handle in payload")]
    NullHandle,

    /// A string payload was not valid UTF-8.
    #[error("invalid UTF-8 in string payload")]
    InvalidUtf8,

    /// Bytes were left over after the top-level value.
    #[error("{0} trailing byte(s) after payload")]
    TrailingBytes(usize),

    /// A sequence is too long for the 32-bit length prefix.
    #[error("length {0} does not fit the 32-bit length prefix")]
    LengthOverflow(usize),
}

/// Failures raised by the runtime itself, as opposed to domain errors of the core.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An argument or return buffer could not be decoded.
    #[error(transparent)]
    MalformedPayload(#[from] MalformedPayload),

    /// The handle is not registered in the table.
    #[error("no live instance for handle {0}")]
    NotFound(Handle),

    /// Native code panicked while serving a boundary call.
    #[error("native panic: {0}")]
    Panic(String),

    /// The requested entry point does not exist.
    #[error("unknown entry point `{0}`")]
    UnknownSymbol(String),
}

/// Chooses the wire kind an error travels under.
///
/// Domain errors of the native core implement this so that the host sees a
/// stable category next to the human-readable message.
pub trait ErrorKind: fmt::Display {
    /// Category string written into the error payload.
    fn kind(&self) -> &str;
}

impl ErrorKind for Error {
    fn kind(&self) -> &str {
        match self {
            Self::MalformedPayload(_) => KIND_MALFORMED_PAYLOAD,
            Self::NotFound(_) => KIND_NOT_FOUND,
            Self::Panic(_) => KIND_PANIC,
            Self::UnknownSymbol(_) => KIND_UNKNOWN_SYMBOL,
        }
    }
}

impl ErrorKind for MalformedPayload {
    fn kind(&self) -> &str {
        KIND_MALFORMED_PAYLOAD
    }
}
