//! Single-state store with substates, reducers and middleware
//!
//! This crate provides:
//! - `StoreState`: the application state as a map of keyed substates
//! - `Action`: built-in substate actions plus application-defined ones
//! - `Store`: reduces dispatched actions and publishes the results
//! - `Published`: replaying broadcast streams for state and actions
//! - `Middleware`: observers attached to the store at registration
//!
//! ```text
//! dispatch(action) → reduce → state replaced → state / action / pair streams
//!                                                   ↓
//!                                         middleware may dispatch again
//! ```

pub mod action;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod middleware;
pub mod published;
pub mod reducer;
pub mod state;
pub mod store;

pub use action::Action;
pub use config::StoreConfig;
pub use dispatcher::Dispatcher;
pub use error::{Result, StoreError};
pub use middleware::{LoggingMiddleware, Middleware};
pub use published::{Published, Subscription};
pub use reducer::Reducer;
pub use state::{StoreState, Substate, SubstateKey};
pub use store::{LastAction, StateAndAction, Store};
