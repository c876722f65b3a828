#![doc = include_str!("../README.md")]

pub mod bridge;
pub mod envelope;
pub mod error;
pub mod ffi;
pub mod heap;
pub mod logger;
pub mod marshal;

// Re-export core public API at crate root.
pub use bridge::CallResult;
pub use envelope::{Envelope, ErrorPayload};
pub use error::{Error, ErrorKind, MalformedPayload, Result};
pub use ffi::RikoBuffer;
pub use heap::{Handle, HandleTable};
pub use marshal::{Marshal, Reader, from_bytes, to_bytes};
