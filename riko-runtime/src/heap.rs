//! Process-wide registry of native instances addressed by opaque handles.
//!
//! A single [`RwLock`] guards both the slot map and the allocation counter, so
//! handing out a handle and inserting its instance is one atomic step. Handles
//! come from a monotonic counter and are never recycled: once removed, a
//! handle stays dead for the lifetime of the table.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use crate::error::{Error, MalformedPayload, Result};
use crate::marshal::{Marshal, Reader, WireResult};

/// Opaque token naming one live native instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Handle(u64);

impl Handle {
    /// Wrap a raw handle value received from the host.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw integer carried across the boundary.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl Marshal for Handle {
    fn encode(&self, out: &mut Vec<u8>) -> WireResult<()> {
        self.0.encode(out)
    }

    fn decode(reader: &mut Reader<'_>) -> WireResult<Self> {
        match u64::decode(reader)? {
            0 => Err(MalformedPayload::NullHandle),
            raw => Ok(Self(raw)),
        }
    }
}

/// Shared, individually locked native instance.
pub type Slot<T> = Arc<Mutex<T>>;

struct Inner<T> {
    next: u64,
    slots: HashMap<Handle, Slot<T>>,
}

/// Thread-safe table owning every registered instance of one class.
pub struct HandleTable<T> {
    name: &'static str,
    inner: RwLock<Inner<T>>,
}

impl<T> HandleTable<T> {
    /// Create an empty table. `name` labels log lines.
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            inner: RwLock::new(Inner {
                next: 1,
                slots: HashMap::new(),
            }),
        }
    }

    /// Take ownership of `instance` and return its fresh handle.
    pub fn register(&self, instance: T) -> Handle {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let handle = Handle(inner.next);
        inner.next += 1;
        inner.slots.insert(handle, Arc::new(Mutex::new(instance)));
        tracing::debug!(table = self.name, %handle, "registered");
        handle
    }

    /// Shared reference to a live instance.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] if `handle` is not registered.
    pub fn lookup(&self, handle: Handle) -> Result<Slot<T>> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .slots
            .get(&handle)
            .cloned()
            .ok_or(Error::NotFound(handle))
    }

    /// Run `action` on the locked instance.
    ///
    /// The table lock is released before `action` runs, so a slow method never
    /// blocks registrations or removals of other handles.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] if `handle` is not registered.
    pub fn with<R>(&self, handle: Handle, action: impl FnOnce(&mut T) -> R) -> Result<R> {
        let slot = self.lookup(handle)?;
        let mut instance = slot.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(action(&mut *instance))
    }

    /// Unregister an instance. Unknown or already removed handles are an error.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] if `handle` was never issued or is already gone.
    pub fn remove(&self, handle: Handle) -> Result<Slot<T>> {
        let removed = self
            .inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .slots
            .remove(&handle);
        match removed {
            Some(slot) => {
                tracing::debug!(table = self.name, %handle, "removed");
                Ok(slot)
            }
            None => Err(Error::NotFound(handle)),
        }
    }

    /// Whether `handle` names a live instance.
    pub fn contains(&self, handle: Handle) -> bool {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .slots
            .contains_key(&handle)
    }

    /// Number of live instances.
    pub fn len(&self) -> usize {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .slots
            .len()
    }

    /// Whether no instance is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of all live handles, sorted.
    pub fn handles(&self) -> Vec<Handle> {
        let mut handles: Vec<Handle> = self
            .inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .slots
            .keys()
            .copied()
            .collect();
        handles.sort_unstable();
        handles
    }

    /// Remove every instance, returning them. The counter keeps running so
    /// handles issued before the drain can never become valid again.
    pub fn drain(&self) -> Vec<(Handle, Slot<T>)> {
        let drained: Vec<_> = self
            .inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .slots
            .drain()
            .collect();
        if !drained.is_empty() {
            tracing::debug!(table = self.name, count = drained.len(), "drained");
        }
        drained
    }
}

impl<T> fmt::Debug for HandleTable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandleTable")
            .field("name", &self.name)
            .field("len", &self.len())
            .finish()
    }
}
