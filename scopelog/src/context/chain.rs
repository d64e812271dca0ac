//! Immutable context chain with typed slots.

use std::any::Any;
use std::fmt;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

static NEXT_SLOT_ID: AtomicU64 = AtomicU64::new(0);

/// An opaque, process-unique token identifying one kind of binding in a
/// context chain.
///
/// A slot is created once at initialization and handed to every site that
/// needs to read or derive its binding. Two slots never compare equal, even
/// for the same value type, so independent libraries cannot collide.
pub struct Slot<T> {
    id: u64,
    _marker: PhantomData<fn(T) -> T>,
}

impl<T> Slot<T> {
    /// Creates a slot distinct from every other slot in the process.
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: NEXT_SLOT_ID.fetch_add(1, Ordering::Relaxed),
            _marker: PhantomData,
        }
    }
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Slot<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Slot<T> {}

impl<T> fmt::Debug for Slot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Slot").field("id", &self.id).finish()
    }
}

/// One link in a context chain: a slot binding plus the parent it shadows.
struct Link {
    slot_id: u64,
    value: Arc<dyn Any + Send + Sync>,
    parent: Option<Arc<Link>>,
}

/// An immutable chain of request-scoped bindings.
///
/// Contexts are derived, never mutated: [`Context::with_value`] returns a
/// child that shares the parent's links. Cloning is one `Arc` bump, and a
/// context may be read from any number of threads at once.
///
/// Lookup walks child-first, so a binding added later in a lineage shadows
/// an earlier binding for the same slot without disturbing it.
#[derive(Clone, Default)]
pub struct Context {
    head: Option<Arc<Link>>,
}

impl Context {
    /// Returns the empty root context.
    #[must_use]
    pub const fn background() -> Self {
        Self { head: None }
    }

    /// Derives a child context carrying one more binding.
    ///
    /// The parent is left untouched and remains valid and usable
    /// concurrently; siblings derived from it observe nothing.
    #[must_use]
    pub fn with_value<T: Send + Sync + 'static>(&self, slot: &Slot<T>, value: T) -> Self {
        Self {
            head: Some(Arc::new(Link {
                slot_id: slot.id,
                value: Arc::new(value),
                parent: self.head.clone(),
            })),
        }
    }

    /// Looks up the nearest binding for `slot`, walking child-first.
    #[must_use]
    pub fn value<T: Send + Sync + 'static>(&self, slot: &Slot<T>) -> Option<&T> {
        let mut link = self.head.as_deref();
        while let Some(current) = link {
            if current.slot_id == slot.id {
                return current.value.downcast_ref::<T>();
            }
            link = current.parent.as_deref();
        }
        None
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut depth = 0_usize;
        let mut link = self.head.as_deref();
        while let Some(current) = link {
            depth += 1;
            link = current.parent.as_deref();
        }
        f.debug_struct("Context").field("depth", &depth).finish()
    }
}
