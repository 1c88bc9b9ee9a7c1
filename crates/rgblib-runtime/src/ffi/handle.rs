//! Shared ownership of native objects
//!
//! An [`ObjectHandle`] owns one strong reference to a native object. Each method
//! call borrows the handle through a [`CallLease`], which clones the native
//! pointer for the callee and keeps the object alive until the lease drops.
//!
//! The call counter starts at `0`, which stands for the handle's own reference.
//! Leases raise it, [`ObjectHandle::destroy`] lowers it once, and the object is
//! freed on the single transition from `0` to `-1`. Counter updates are
//! lock-free compare-and-swap loops so leases may be taken and released from
//! any number of threads, including one that is destroying the handle.

use crate::ffi::caller::{check_undeclared, FfiError, FfiRuntime};
use crate::ffi::types::{ObjectCloneFn, ObjectFreeFn, ObjectPointer, RustCallStatus};
use std::fmt;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use tracing::error;

/// A kind of native object, identified by its export names
pub trait ObjectKind {
    /// Name used in lifetime-violation panics, e.g. `"Wallet"`
    const NAME: &'static str;

    /// Lower-case export suffix, e.g. `"wallet"` for `uniffi_<ns>_fn_clone_wallet`
    const SYMBOL: &'static str;
}

/// Clone/free exports of one object kind
#[derive(Clone, Copy)]
pub struct ObjectVtable {
    pub clone: ObjectCloneFn,
    pub free: ObjectFreeFn,
}

impl ObjectVtable {
    /// Resolve `uniffi_<ns>_fn_clone_<symbol>` and `uniffi_<ns>_fn_free_<symbol>`
    pub fn resolve<K: ObjectKind>(runtime: &FfiRuntime) -> Result<Self, FfiError> {
        let namespace = runtime.namespace();
        // Safety: generated clone/free exports always have these signatures
        unsafe {
            Ok(Self {
                clone: runtime.function(&format!("uniffi_{namespace}_fn_clone_{}", K::SYMBOL))?,
                free: runtime.function(&format!("uniffi_{namespace}_fn_free_{}", K::SYMBOL))?,
            })
        }
    }
}

/// Reference-counted owner of a native object pointer
pub struct ObjectHandle<K: ObjectKind> {
    pointer: ObjectPointer,
    call_counter: AtomicI64,
    destroyed: AtomicBool,
    vtable: ObjectVtable,
    runtime: FfiRuntime,
    _kind: PhantomData<fn() -> K>,
}

// Safety: the native objects are thread-safe; every access to `pointer` goes
// through the atomic call counter
unsafe impl<K: ObjectKind> Send for ObjectHandle<K> {}
unsafe impl<K: ObjectKind> Sync for ObjectHandle<K> {}

impl<K: ObjectKind> ObjectHandle<K> {
    /// Take ownership of a pointer returned by a constructor or method
    ///
    /// # Safety
    ///
    /// `pointer` must be a live object of kind `K` owned by the caller, as
    /// returned by one of its constructors or methods. Ownership moves into
    /// the handle, which frees it.
    pub unsafe fn new(runtime: &FfiRuntime, pointer: ObjectPointer) -> Result<Self, FfiError> {
        let vtable = ObjectVtable::resolve::<K>(runtime)?;
        Ok(Self::from_parts(runtime.clone(), pointer, vtable))
    }

    /// Assemble a handle from an already resolved vtable
    ///
    /// # Safety
    ///
    /// Same contract as [`ObjectHandle::new`]; `vtable` must hold the clone and
    /// free exports of `K`.
    pub unsafe fn from_parts(
        runtime: FfiRuntime,
        pointer: ObjectPointer,
        vtable: ObjectVtable,
    ) -> Self {
        Self {
            pointer,
            call_counter: AtomicI64::new(0),
            destroyed: AtomicBool::new(false),
            vtable,
            runtime,
            _kind: PhantomData,
        }
    }

    pub fn runtime(&self) -> &FfiRuntime {
        &self.runtime
    }

    /// Borrow the object for one native call
    ///
    /// # Panics
    ///
    /// Panics if the object has already been freed, or if the call counter
    /// would overflow.
    pub fn acquire(&self) -> Result<CallLease<'_, K>, FfiError> {
        let mut current = self.call_counter.load(Ordering::Acquire);
        loop {
            if current <= -1 {
                panic!("{} object has already been destroyed", K::NAME);
            }
            if current == i64::MAX {
                panic!("{} object call counter would overflow", K::NAME);
            }
            match self.call_counter.compare_exchange_weak(
                current,
                current + 1,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => break,
                Err(actual) => current = actual,
            }
        }

        let mut status = RustCallStatus::default();
        // Safety: the counter is above -1, so the pointer has not been freed
        let cloned = unsafe { (self.vtable.clone)(self.pointer, &mut status) };
        if let Err(e) = check_undeclared(self.runtime.buffers(), status) {
            self.release();
            return Err(e);
        }

        Ok(CallLease {
            handle: self,
            pointer: cloned,
        })
    }

    fn release(&self) {
        let mut current = self.call_counter.load(Ordering::Acquire);
        loop {
            if current <= -1 {
                panic!("{} object released more often than acquired", K::NAME);
            }
            match self.call_counter.compare_exchange_weak(
                current,
                current - 1,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => break,
                Err(actual) => current = actual,
            }
        }
        if current == 0 {
            self.free();
        }
    }

    fn free(&self) {
        let mut status = RustCallStatus::default();
        // Safety: reached once, on the 0 -> -1 transition
        unsafe { (self.vtable.free)(self.pointer, &mut status) };
        if let Err(e) = check_undeclared(self.runtime.buffers(), status) {
            error!(object = K::NAME, error = %e, "failed to free native object");
        }
    }

    /// Give up the handle's own reference
    ///
    /// Idempotent. The object is freed now, or when the last outstanding lease
    /// drops.
    pub fn destroy(&self) {
        if self
            .destroyed
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
        {
            self.release();
        }
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed.load(Ordering::Acquire)
    }
}

impl<K: ObjectKind> Drop for ObjectHandle<K> {
    fn drop(&mut self) {
        self.destroy();
    }
}

impl<K: ObjectKind> fmt::Debug for ObjectHandle<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectHandle")
            .field("kind", &K::NAME)
            .field("pointer", &self.pointer)
            .field("call_counter", &self.call_counter.load(Ordering::Relaxed))
            .field("destroyed", &self.is_destroyed())
            .finish()
    }
}

/// A borrowed reference held for the duration of one native call
pub struct CallLease<'a, K: ObjectKind> {
    handle: &'a ObjectHandle<K>,
    pointer: ObjectPointer,
}

impl<K: ObjectKind> CallLease<'_, K> {
    /// Cloned pointer to pass to the native method, which consumes it
    pub fn pointer(&self) -> ObjectPointer {
        self.pointer
    }
}

impl<K: ObjectKind> Drop for CallLease<'_, K> {
    fn drop(&mut self) {
        self.handle.release();
    }
}
