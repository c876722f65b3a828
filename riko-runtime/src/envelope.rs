//! Tagged success/failure wrapper carried by every boundary return.
//!
//! Wire layout: one tag byte, `0x00` followed by the marshaled payload or
//! `0x01` followed by an [`ErrorPayload`] (two length-prefixed strings).

use std::fmt;

use crate::error::{Error, ErrorKind, MalformedPayload};
use crate::marshal::{Marshal, Reader, WireResult, from_bytes, to_bytes};

/// Tag byte of a successful envelope.
pub const TAG_OK: u8 = 0x00;
/// Tag byte of a failed envelope.
pub const TAG_ERR: u8 = 0x01;

/// A native failure as it travels across the boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorPayload {
    /// Category, e.g. `NotFound` or a domain-specific kind.
    pub kind: String,
    /// Human-readable description.
    pub message: String,
}

impl ErrorPayload {
    /// Build a payload from its parts.
    pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
        }
    }

    /// Capture an error's kind and display text.
    pub fn from_error<E: ErrorKind + ?Sized>(err: &E) -> Self {
        Self::new(err.kind(), err.to_string())
    }
}

impl fmt::Display for ErrorPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for ErrorPayload {}

impl From<Error> for ErrorPayload {
    fn from(err: Error) -> Self {
        Self::from_error(&err)
    }
}

impl From<MalformedPayload> for ErrorPayload {
    fn from(err: MalformedPayload) -> Self {
        Self::from_error(&err)
    }
}

impl Marshal for ErrorPayload {
    fn encode(&self, out: &mut Vec<u8>) -> WireResult<()> {
        self.kind.encode(out)?;
        self.message.encode(out)
    }

    fn decode(reader: &mut Reader<'_>) -> WireResult<Self> {
        Ok(Self {
            kind: String::decode(reader)?,
            message: String::decode(reader)?,
        })
    }
}

/// Either a payload or the error that replaced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Envelope<T> {
    /// The call succeeded.
    Ok(T),
    /// The call failed natively.
    Err(ErrorPayload),
}

impl<T> Envelope<T> {
    /// Failed envelope from a kind and message.
    pub fn err(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Err(ErrorPayload::new(kind, message))
    }

    /// Whether this is the success variant.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        matches!(self, Self::Ok(_))
    }

    /// Convert into a standard `Result`.
    ///
    /// # Errors
    ///
    /// The native error payload of an `Err` envelope.
    pub fn into_result(self) -> Result<T, ErrorPayload> {
        match self {
            Self::Ok(v) => Ok(v),
            Self::Err(e) => Err(e),
        }
    }
}

impl<T, E: Into<ErrorPayload>> From<Result<T, E>> for Envelope<T> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(v) => Self::Ok(v),
            Err(e) => Self::Err(e.into()),
        }
    }
}

impl<T: Marshal> Marshal for Envelope<T> {
    fn encode(&self, out: &mut Vec<u8>) -> WireResult<()> {
        match self {
            Self::Ok(v) => {
                out.push(TAG_OK);
                v.encode(out)
            }
            Self::Err(e) => {
                out.push(TAG_ERR);
                e.encode(out)
            }
        }
    }

    fn decode(reader: &mut Reader<'_>) -> WireResult<Self> {
        match reader.take_u8()? {
            TAG_OK => T::decode(reader).map(Self::Ok),
            TAG_ERR => ErrorPayload::decode(reader).map(Self::Err),
            tag => Err(MalformedPayload::InvalidTag {
                what: "envelope",
                tag,
            }),
        }
    }
}

/// Encode an envelope, degrading to a `MalformedPayload` error envelope when
/// the success value itself cannot be encoded.
pub fn seal<T: Marshal>(envelope: &Envelope<T>) -> Vec<u8> {
    to_bytes(envelope).unwrap_or_else(|e| {
        let fallback: Envelope<()> = Envelope::Err(e.into());
        // Kind and message are short literals, the prefix cannot overflow.
        to_bytes(&fallback).unwrap_or_else(|_| vec![TAG_ERR, 0, 0, 0, 0, 0, 0, 0, 0])
    })
}

/// Decode an envelope buffer into its result.
///
/// # Errors
///
/// The outer result fails with [`MalformedPayload`] when `buf` is not a
/// complete envelope of `T`; the inner one carries the native error.
pub fn open<T: Marshal>(buf: &[u8]) -> WireResult<Result<T, ErrorPayload>> {
    from_bytes::<Envelope<T>>(buf).map(Envelope::into_result)
}
