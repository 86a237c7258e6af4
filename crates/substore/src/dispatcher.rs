//! Dispatcher for middleware action dispatch
//!
//! Middleware subscribes to the store's streams with plain callbacks. When a
//! callback needs to dispatch, it captures a `Dispatcher` instead of the store
//! itself. The dispatcher only holds a weak reference, so callbacks never keep
//! the store alive.
//!
//! Dispatching through it is synchronous: the nested action is reduced and
//! fully published before the call returns, so notifications resume
//! depth-first.

use std::fmt;
use std::rc::Weak;

use crate::action::Action;
use crate::error::{Result, StoreError};
use crate::store::StoreCore;

/// Handle for dispatching actions back into a store
pub struct Dispatcher<A> {
    core: Weak<StoreCore<A>>,
}

impl<A> Clone for Dispatcher<A> {
    fn clone(&self) -> Self {
        Self {
            core: Weak::clone(&self.core),
        }
    }
}

impl<A> fmt::Debug for Dispatcher<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("connected", &self.is_connected())
            .finish()
    }
}

impl<A: fmt::Debug + 'static> Dispatcher<A> {
    pub(crate) fn new(core: Weak<StoreCore<A>>) -> Self {
        Self { core }
    }

    /// Dispatch an action into the store
    ///
    /// Logs and drops the action if the store is gone or the dispatch depth
    /// limit is hit.
    pub fn dispatch(&self, action: Action<A>) {
        match self.core.upgrade() {
            Some(core) => core.dispatch(action),
            None => log::warn!("Dispatcher: store dropped, ignoring {:?}", action),
        }
    }

    /// Dispatch an action, reporting why it was not applied
    pub fn try_dispatch(&self, action: Action<A>) -> Result<()> {
        let core = self.core.upgrade().ok_or(StoreError::StoreDropped)?;
        core.try_dispatch(action)
    }
}

impl<A> Dispatcher<A> {
    /// Whether the store behind this dispatcher still exists
    pub fn is_connected(&self) -> bool {
        self.core.strong_count() > 0
    }
}
