//! Store state
//!
//! The whole application state is a map of independently addressable
//! substates. Substates are shared behind `Rc` so cloning a `StoreState`
//! (which happens on every dispatch and every notification) is shallow.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// Key addressing a substate inside the store
pub type SubstateKey = i64;

/// A unit of application state
///
/// Implemented for every `Default + Debug + 'static` type, so applications
/// never implement it by hand.
pub trait Substate: Any + fmt::Debug {
    fn as_any(&self) -> &dyn Any;
}

impl<T> Substate for T
where
    T: Any + fmt::Debug + Default,
{
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Full application state: substates keyed by `SubstateKey`
#[derive(Debug, Clone, Default)]
pub struct StoreState {
    substates: HashMap<SubstateKey, Rc<dyn Substate>>,
}

impl StoreState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a substate downcast to its concrete type
    ///
    /// Returns `None` if the key is absent or holds a different type.
    pub fn get<T: Substate>(&self, key: SubstateKey) -> Option<&T> {
        let substate: &dyn Substate = self.substates.get(&key)?.as_ref();
        substate.as_any().downcast_ref::<T>()
    }

    /// Get the shared substate stored under `key`, whatever its type
    pub fn get_shared(&self, key: SubstateKey) -> Option<&Rc<dyn Substate>> {
        self.substates.get(&key)
    }

    /// Insert or replace the substate under `key`
    pub fn insert(&mut self, key: SubstateKey, substate: Rc<dyn Substate>) {
        self.substates.insert(key, substate);
    }

    /// Remove the substate under `key`; absent keys are ignored
    pub fn remove(&mut self, key: SubstateKey) -> Option<Rc<dyn Substate>> {
        self.substates.remove(&key)
    }

    pub fn clear(&mut self) {
        self.substates.clear();
    }

    pub fn contains_key(&self, key: SubstateKey) -> bool {
        self.substates.contains_key(&key)
    }

    /// Keys in ascending order
    pub fn keys(&self) -> Vec<SubstateKey> {
        let mut keys: Vec<_> = self.substates.keys().copied().collect();
        keys.sort_unstable();
        keys
    }

    pub fn len(&self) -> usize {
        self.substates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.substates.is_empty()
    }
}

/// Two states are equal when they hold the same keys mapped to the very same
/// substate instances. Substates are only ever replaced wholesale, so identity
/// is what tells a changed entry apart.
impl PartialEq for StoreState {
    fn eq(&self, other: &Self) -> bool {
        self.substates.len() == other.substates.len()
            && self.substates.iter().all(|(key, substate)| {
                other
                    .substates
                    .get(key)
                    .is_some_and(|theirs| Rc::ptr_eq(substate, theirs))
            })
    }
}
