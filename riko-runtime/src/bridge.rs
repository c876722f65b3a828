//! Helpers that native entry points are written with.
//!
//! Every entry point decodes its argument buffers, runs, and returns exactly one
//! sealed [`Envelope`]. Failures of any kind, including panics, become the
//! `Err` variant; nothing unwinds across the boundary.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use crate::envelope::{Envelope, ErrorPayload, seal};
use crate::error::Error;
use crate::heap::{Handle, HandleTable};
use crate::marshal::{Marshal, from_bytes};

/// Outcome of a native operation before it is sealed.
pub type CallResult<T> = std::result::Result<T, ErrorPayload>;

/// Run `f`, catch panics, and seal the outcome.
pub fn call<R: Marshal>(f: impl FnOnce() -> CallResult<R>) -> Vec<u8> {
    let envelope = match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(result) => Envelope::from(result),
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            tracing::error!(%message, "native panic caught at boundary");
            Envelope::Err(Error::Panic(message).into())
        }
    };
    seal(&envelope)
}

/// Decode one argument buffer.
///
/// # Errors
///
/// A `MalformedPayload` payload if `buf` does not decode as `T`.
pub fn arg<T: Marshal>(buf: &[u8]) -> CallResult<T> {
    Ok(from_bytes(buf)?)
}

/// Build an instance with `f` and register it, returning its handle.
pub fn create<T>(table: &HandleTable<T>, f: impl FnOnce() -> CallResult<T>) -> Vec<u8> {
    call(|| f().map(|instance| table.register(instance)))
}

/// Run a method on the instance behind `handle`.
pub fn method<T, R: Marshal>(
    table: &HandleTable<T>,
    handle: u64,
    f: impl FnOnce(&mut T) -> CallResult<R>,
) -> Vec<u8> {
    call(|| table.with(Handle::new(handle), f)?)
}

/// Remove the instance behind `handle`. Unknown handles seal a `NotFound` error.
pub fn destroy<T>(table: &HandleTable<T>, handle: u64) -> Vec<u8> {
    call(|| {
        table.remove(Handle::new(handle))?;
        Ok(())
    })
}

/// Extract a readable message from a panic payload.
pub fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_owned()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_owned()
    }
}
