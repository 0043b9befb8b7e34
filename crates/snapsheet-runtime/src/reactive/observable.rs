#![forbid(unsafe_code)]

//! Shared, version-tracked values with change notification.
//!
//! [`Observable<T>`] replaces published-object state from reactive UI
//! frameworks with an explicit mechanism: the presenter mutates the value,
//! the presentation layer subscribes for change callbacks or polls
//! [`Observable::version`].
//!
//! # Failure Modes
//!
//! - Subscriber panic: propagates to the caller of `set`.
//! - Re-entrant `set` from inside a subscriber: the outer notification pass
//!   continues with the subscriber list captured at its start; the inner
//!   `set` runs its own pass.

use std::any::Any;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

type Callback<T> = dyn Fn(&T);

struct Inner<T> {
    value: T,
    version: u64,
    subscribers: Vec<Weak<Callback<T>>>,
}

/// A shared value that notifies subscribers when it changes.
///
/// Cloning an `Observable` clones the handle, not the value: all clones see
/// and mutate the same state.
pub struct Observable<T> {
    inner: Rc<RefCell<Inner<T>>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Observable")
            .field("value", &inner.value)
            .field("version", &inner.version)
            .finish()
    }
}

impl<T: Clone + PartialEq + 'static> Observable<T> {
    /// Create an observable holding `value`.
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                value,
                version: 0,
                subscribers: Vec::new(),
            })),
        }
    }

    /// Get a clone of the current value.
    #[must_use]
    pub fn get(&self) -> T {
        self.inner.borrow().value.clone()
    }

    /// Read the current value through a borrow, without cloning.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.borrow().value)
    }

    /// Set a new value, notifying subscribers if it differs from the current
    /// one. Setting an equal value is a no-op.
    pub fn set(&self, value: T) {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.value == value {
                return;
            }
            inner.value = value;
            inner.version += 1;
        }
        self.notify();
    }

    /// Mutate the value in place, notifying subscribers if it changed.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        {
            let mut inner = self.inner.borrow_mut();
            let before = inner.value.clone();
            f(&mut inner.value);
            if inner.value == before {
                return;
            }
            inner.version += 1;
        }
        self.notify();
    }

    /// Number of mutations that changed the value since creation.
    pub fn version(&self) -> u64 {
        self.inner.borrow().version
    }

    /// Subscribe to changes. The callback fires after every mutation that
    /// changes the value, in registration order, for as long as the returned
    /// [`Subscription`] is alive.
    #[must_use]
    pub fn subscribe<F: Fn(&T) + 'static>(&self, callback: F) -> Subscription {
        let callback = Rc::new(callback);
        let weak = Rc::downgrade(&callback);
        let weak: Weak<Callback<T>> = weak;
        self.inner.borrow_mut().subscribers.push(weak);
        Subscription {
            _callback: callback,
        }
    }

    fn notify(&self) {
        // Capture value and live subscribers first so no RefCell borrow is
        // held while callbacks run (a callback may read or set this
        // observable again).
        let (value, callbacks) = {
            let mut inner = self.inner.borrow_mut();
            inner.subscribers.retain(|weak| weak.strong_count() > 0);
            let callbacks: Vec<Rc<Callback<T>>> = inner
                .subscribers
                .iter()
                .filter_map(Weak::upgrade)
                .collect();
            (inner.value.clone(), callbacks)
        };
        for callback in callbacks {
            callback(&value);
        }
    }
}

impl<T: Clone + PartialEq + Default + 'static> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

/// RAII guard for an [`Observable`] subscription.
///
/// The callback stays registered until this guard is dropped; dropped
/// subscriptions are purged from the observable lazily on the next
/// notification.
pub struct Subscription {
    _callback: Rc<dyn Any>,
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").finish()
    }
}
