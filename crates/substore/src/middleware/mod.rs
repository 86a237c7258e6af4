//! Middleware system
//!
//! Middleware never takes part in reduction. It is handed the store once, at
//! registration, and sets up whatever subscriptions it needs:
//!
//! ```text
//! dispatch → Reducer → State ─┬→ state subscribers
//!                             ├→ action subscribers → middleware may dispatch again
//!                             └→ (state, action) subscribers
//! ```
//!
//! ## Example
//!
//! ```rust
//! use substore::{Action, Middleware, Store, Subscription};
//!
//! #[derive(Debug)]
//! enum AppAction {
//!     Ping,
//!     Pong,
//! }
//!
//! #[derive(Default)]
//! struct PongMiddleware {
//!     subscription: Option<Subscription>,
//! }
//!
//! impl Middleware<AppAction> for PongMiddleware {
//!     fn observe(&mut self, store: &Store<AppAction>) {
//!         let dispatcher = store.dispatcher();
//!         self.subscription = Some(store.last_dispatched_action().subscribe_updates(
//!             move |action| {
//!                 if let Some(Action::External(AppAction::Ping)) = action.as_deref() {
//!                     dispatcher.dispatch(Action::External(AppAction::Pong));
//!                 }
//!             },
//!         ));
//!     }
//! }
//! ```

mod logging;

pub use logging::LoggingMiddleware;

use crate::store::Store;

/// Middleware trait - observes the dispatch stream of a store
///
/// `observe` is called exactly once, synchronously, while the middleware is
/// being registered. Middlewares see notifications in registration order.
pub trait Middleware<A> {
    /// Attach to the store
    ///
    /// Typically subscribes to `store.state()` or
    /// `store.last_dispatched_action()`, capturing `store.dispatcher()` if
    /// follow-up actions are needed.
    fn observe(&mut self, store: &Store<A>);
}
