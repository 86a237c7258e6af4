//! Actions
//!
//! The store understands three built-in actions for managing substates.
//! Anything else the application wants to express goes into `External` and is
//! handed to the application reducer untouched.

use std::rc::Rc;

use crate::state::{Substate, SubstateKey};

/// Root action type, generic over the application's own action payload `A`
#[derive(Debug, Clone)]
pub enum Action<A> {
    /// Put `substate` under `key`, replacing any previous entry
    Add {
        substate: Rc<dyn Substate>,
        key: SubstateKey,
    },
    /// Drop the entry under `key` (no-op if absent)
    Remove(SubstateKey),
    /// Drop every entry
    Reset,
    /// Application-defined action, delegated to the application reducer
    External(A),
}

impl<A> Action<A> {
    /// Build an `Add` action from a concrete substate value
    pub fn add<S: Substate>(substate: S, key: SubstateKey) -> Self {
        Action::Add {
            substate: Rc::new(substate),
            key,
        }
    }

    /// Build an `Add` action carrying a default-constructed substate
    pub fn add_default<S: Substate + Default>(key: SubstateKey) -> Self {
        Self::add(S::default(), key)
    }

    pub fn remove(key: SubstateKey) -> Self {
        Action::Remove(key)
    }

    pub fn external(action: A) -> Self {
        Action::External(action)
    }

    /// True for `Add`, `Remove` and `Reset`
    pub fn is_builtin(&self) -> bool {
        !matches!(self, Action::External(_))
    }

    /// The application payload, if this is an external action
    pub fn as_external(&self) -> Option<&A> {
        match self {
            Action::External(action) => Some(action),
            _ => None,
        }
    }
}

impl<A> From<A> for Action<A> {
    fn from(action: A) -> Self {
        Action::External(action)
    }
}
