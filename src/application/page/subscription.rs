// SPDX-License-Identifier: MPL-2.0
//! Scoped subscriptions.
//!
//! A driver task plus the callback it invokes. Disposal empties the
//! callback slot under its lock before aborting the task, so once
//! `dispose` returns the callback can no longer run, even if the task is
//! mid-step on another worker.

use crate::application::lock;
use std::fmt;
use std::sync::{Arc, Mutex};
use tokio::task::JoinHandle;

/// Shared slot holding a callback until disposal.
pub(crate) struct CallbackSlot<F>(Arc<Mutex<Option<F>>>);

impl<F> Clone for CallbackSlot<F> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<F: Send + 'static> CallbackSlot<F> {
    pub(crate) fn new(callback: F) -> Self {
        Self(Arc::new(Mutex::new(Some(callback))))
    }

    pub(crate) fn clear(&self) {
        lock(&self.0).take();
    }

    /// Closure that empties this slot, for [`ScopedSubscription::new`].
    pub(crate) fn releaser(&self) -> impl FnOnce() + Send + 'static {
        let slot = self.clone();
        move || slot.clear()
    }
}

impl<F: Send + 'static> CallbackSlot<F> {
    /// Hands the callback to `call` if still present. Returns whether it
    /// ran.
    pub(crate) fn with(&self, call: impl FnOnce(&mut F)) -> bool {
        let mut guard = lock(&self.0);
        match guard.as_mut() {
            Some(callback) => {
                call(callback);
                true
            }
            None => false,
        }
    }
}

impl<F: FnOnce() + Send + 'static> CallbackSlot<F> {
    /// Runs the callback if still present. Returns whether it ran.
    pub(crate) fn fire_once(&self) -> bool {
        let mut guard = lock(&self.0);
        match guard.take() {
            Some(callback) => {
                callback();
                true
            }
            None => false,
        }
    }
}

impl<F: FnMut() + Send + 'static> CallbackSlot<F> {
    /// Runs the callback if still present, keeping it for later calls.
    pub(crate) fn fire(&self) -> bool {
        let mut guard = lock(&self.0);
        match guard.as_mut() {
            Some(callback) => {
                callback();
                true
            }
            None => false,
        }
    }
}

/// Handle to a running listener. Dropping it disposes the listener.
pub struct ScopedSubscription {
    task: Option<JoinHandle<()>>,
    release: Option<Box<dyn FnOnce() + Send>>,
}

impl ScopedSubscription {
    pub(crate) fn new(task: JoinHandle<()>, release: impl FnOnce() + Send + 'static) -> Self {
        Self {
            task: Some(task),
            release: Some(Box::new(release)),
        }
    }

    /// Stops the listener. Idempotent.
    pub fn dispose(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.task.is_none()
    }

    /// True once the driver task has exited on its own or been disposed.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.as_ref().is_none_or(JoinHandle::is_finished)
    }
}

impl fmt::Debug for ScopedSubscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScopedSubscription")
            .field("disposed", &self.is_disposed())
            .finish()
    }
}

impl Drop for ScopedSubscription {
    fn drop(&mut self) {
        self.dispose();
    }
}
