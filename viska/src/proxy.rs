//! Host-side representative of one native instance.
//!
//! A [`Proxy`] holds nothing but the boundary, the integer handle, and a local
//! `freed` flag. The flag lives in an [`RwLock`]: method calls hold the read
//! side for the whole boundary call, [`Proxy::release`] holds the write side
//! for check, destructor call and flag update. Two racing releases therefore
//! cannot both reach the native destructor, and no method call can overlap
//! the release of its own proxy.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use riko_runtime::{Handle, Marshal};

use crate::boundary::Boundary;
use crate::error::{self, Error, Result};

/// Static description of a native class.
#[derive(Debug)]
pub struct Class {
    /// Name used in errors and logs.
    pub name: &'static str,
    /// Destructor entry point, called with the handle and no arguments.
    pub drop: &'static str,
}

/// Liveness-guarded handle to a native instance.
pub struct Proxy {
    boundary: Arc<dyn Boundary>,
    class: &'static Class,
    handle: Handle,
    freed: RwLock<bool>,
}

impl Proxy {
    /// Call `factory` and wrap the handle it returns.
    ///
    /// On failure no proxy exists.
    ///
    /// # Errors
    ///
    /// Whatever the factory reports. An undecodable handle is also logged at
    /// error level: the native side may hold an instance nobody can release.
    pub fn create(
        boundary: Arc<dyn Boundary>,
        class: &'static Class,
        factory: &str,
        args: &[&[u8]],
    ) -> Result<Self> {
        let handle: Handle =
            error::unwrap(&boundary.call_static(factory, args)).inspect_err(|e| {
                if let Error::MalformedPayload(reason) = e {
                    // The factory may have registered an instance we cannot name.
                    tracing::error!(
                        class = class.name,
                        factory,
                        %reason,
                        "undecodable handle from factory, native instance may leak"
                    );
                }
            })?;
        tracing::debug!(class = class.name, %handle, "proxy created");
        Ok(Self {
            boundary,
            class,
            handle,
            freed: RwLock::new(false),
        })
    }

    /// Invoke `symbol` on the instance and decode its return value.
    ///
    /// # Errors
    ///
    /// [`Error::UseAfterFree`] without contacting the native side once
    /// released; otherwise any error the method reports.
    pub fn call<R: Marshal>(&self, symbol: &str, args: &[&[u8]]) -> Result<R> {
        let freed = self.freed.read().unwrap_or_else(PoisonError::into_inner);
        if *freed {
            return Err(Error::UseAfterFree {
                class: self.class.name,
            });
        }
        let buf = self.boundary.call_method(symbol, self.handle, args);
        drop(freed);
        error::unwrap(&buf)
    }

    /// Destroy the native instance.
    ///
    /// The proxy is marked freed even when the destructor fails. A `NotFound`
    /// from the destructor means host and native disagree about liveness; it
    /// is logged as an error and returned.
    ///
    /// # Errors
    ///
    /// [`Error::DoubleFree`] on a second call, without contacting the native
    /// side. A failing destructor is returned as is.
    pub fn release(&self) -> Result<()> {
        let mut freed = self.freed.write().unwrap_or_else(PoisonError::into_inner);
        if *freed {
            return Err(Error::DoubleFree {
                class: self.class.name,
            });
        }
        let buf = self.boundary.call_method(self.class.drop, self.handle, &[]);
        *freed = true;
        drop(freed);

        error::unwrap::<()>(&buf).inspect_err(|e| {
            if e.is_not_found() {
                tracing::error!(
                    class = self.class.name,
                    handle = %self.handle,
                    "native side did not know a live proxy's handle"
                );
            } else {
                tracing::error!(
                    class = self.class.name,
                    handle = %self.handle,
                    error = %e,
                    "release failed"
                );
            }
        })
    }

    /// Whether [`release`](Self::release) has run.
    pub fn is_freed(&self) -> bool {
        *self.freed.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// The handle this proxy stands for. Meaningless once freed.
    #[must_use]
    pub const fn handle(&self) -> Handle {
        self.handle
    }

    /// Class name.
    #[must_use]
    pub const fn class(&self) -> &'static str {
        self.class.name
    }
}

impl Drop for Proxy {
    fn drop(&mut self) {
        let freed = *self.freed.get_mut().unwrap_or_else(PoisonError::into_inner);
        if !freed {
            // Errors are already logged by release.
            let _ = self.release();
        }
    }
}

impl fmt::Debug for Proxy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Proxy")
            .field("class", &self.class.name)
            .field("handle", &self.handle)
            .field("freed", &self.is_freed())
            .finish()
    }
}
