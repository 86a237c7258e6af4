use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use crate::action::Action;
use crate::config::StoreConfig;
use crate::dispatcher::Dispatcher;
use crate::error::{Result, StoreError};
use crate::middleware::Middleware;
use crate::published::Published;
use crate::reducer::{self, Reducer};
use crate::state::StoreState;

/// Action slot as published by the store; `None` until the first dispatch
pub type LastAction<A> = Option<Rc<Action<A>>>;

/// State and the action that produced it
pub type StateAndAction<A> = (StoreState, LastAction<A>);

/// Reduction and publishing, shared between the store and its dispatchers
pub(crate) struct StoreCore<A> {
    reducer: Reducer<A>,
    config: StoreConfig,
    state: Published<StoreState>,
    last_action: Published<LastAction<A>>,
    last_state_and_action: Published<StateAndAction<A>>,
    depth: Cell<usize>,
}

/// Tracks how many dispatches are on the call stack; unwinds with panics too
struct DepthGuard<'a> {
    depth: &'a Cell<usize>,
}

impl<'a> DepthGuard<'a> {
    fn enter(depth: &'a Cell<usize>) -> Self {
        depth.set(depth.get() + 1);
        Self { depth }
    }
}

impl Drop for DepthGuard<'_> {
    fn drop(&mut self) {
        self.depth.set(self.depth.get() - 1);
    }
}

impl<A: fmt::Debug + 'static> StoreCore<A> {
    pub(crate) fn dispatch(&self, action: Action<A>) {
        if let Err(e) = self.try_dispatch(action) {
            log::error!("Dispatch rejected: {}", e);
        }
    }

    pub(crate) fn try_dispatch(&self, action: Action<A>) -> Result<()> {
        let depth = self.depth.get() + 1;
        if let Some(limit) = self.config.max_dispatch_depth {
            if depth > limit {
                return Err(StoreError::DispatchDepthExceeded { depth, limit });
            }
        }
        let _guard = DepthGuard::enter(&self.depth);

        if self.config.log_actions {
            log::debug!("Dispatch (depth {}): {:?}", depth, action);
        }

        // A panicking reducer leaves every cell untouched
        let next = reducer::reduce(self.state.value(), &action, &*self.reducer);
        let action = Some(Rc::new(action));

        // Commit all cells before notifying, so nested dispatches triggered by
        // a subscriber always build on this state
        self.state.replace(next.clone());
        self.last_action.replace(action.clone());
        let pair = (next, action);
        self.last_state_and_action.replace(pair.clone());

        self.state.emit(&pair.0);
        self.last_action.emit(&pair.1);
        self.last_state_and_action.emit(&pair);
        Ok(())
    }
}

/// Store - holds the application state and runs the reduce-and-publish loop
///
/// Single-threaded: the store is neither `Send` nor `Sync`, and all
/// subscribers run synchronously inside `dispatch`. A subscriber that
/// dispatches again gets its action fully reduced and published before the
/// remaining subscribers of the outer dispatch are notified.
///
/// ```rust
/// use substore::{Action, Store, StoreState};
///
/// #[derive(Debug, Default)]
/// struct Settings {
///     dark_mode: bool,
/// }
///
/// #[derive(Debug)]
/// enum AppAction {
///     ToggleDarkMode,
/// }
///
/// fn reduce(mut state: StoreState, action: &AppAction) -> StoreState {
///     match action {
///         AppAction::ToggleDarkMode => {
///             let dark_mode = state.get::<Settings>(1).is_some_and(|s| s.dark_mode);
///             state.insert(1, std::rc::Rc::new(Settings { dark_mode: !dark_mode }));
///             state
///         }
///     }
/// }
///
/// let store = Store::new(reduce);
/// store.dispatch(Action::add_default::<Settings>(1));
/// store.dispatch(Action::External(AppAction::ToggleDarkMode));
/// assert!(store.current_state().get::<Settings>(1).unwrap().dark_mode);
/// ```
pub struct Store<A> {
    core: Rc<StoreCore<A>>,
    middleware: RefCell<Vec<Box<dyn Middleware<A>>>>,
}

impl<A: fmt::Debug + 'static> Store<A> {
    /// Create a store with an empty state and default configuration
    pub fn new(reducer: impl Fn(StoreState, &A) -> StoreState + 'static) -> Self {
        Self::with_config(reducer, StoreConfig::default())
    }

    pub fn with_config(
        reducer: impl Fn(StoreState, &A) -> StoreState + 'static,
        config: StoreConfig,
    ) -> Self {
        let initial = StoreState::new();
        Self {
            core: Rc::new(StoreCore {
                reducer: Box::new(reducer),
                config,
                state: Published::new(initial.clone()),
                last_action: Published::new(None),
                last_state_and_action: Published::new((initial, None)),
                depth: Cell::new(0),
            }),
            middleware: RefCell::new(Vec::new()),
        }
    }

    /// The latest committed state
    pub fn current_state(&self) -> StoreState {
        self.core.state.value()
    }

    /// Stream of states; replays the current one on subscribe
    pub fn state(&self) -> &Published<StoreState> {
        &self.core.state
    }

    /// Stream of dispatched actions; replays the latest on subscribe
    pub fn last_dispatched_action(&self) -> &Published<LastAction<A>> {
        &self.core.last_action
    }

    /// Stream of `(state, action)` pairs, one per dispatch
    ///
    /// Each pair is built by the dispatch that produced it, so the state and
    /// action always belong together, also when dispatches nest.
    pub fn last_state_and_action(&self) -> &Published<StateAndAction<A>> {
        &self.core.last_state_and_action
    }

    /// Reduce `action` into a new state and publish it
    ///
    /// All subscribers run before this returns. If a depth limit is
    /// configured and exceeded, the action is dropped with an error log.
    pub fn dispatch(&self, action: Action<A>) {
        self.core.dispatch(action);
    }

    /// Like `dispatch`, but reports a rejected action
    pub fn try_dispatch(&self, action: Action<A>) -> Result<()> {
        self.core.try_dispatch(action)
    }

    /// A weak handle for dispatching from subscriber callbacks
    pub fn dispatcher(&self) -> Dispatcher<A> {
        Dispatcher::new(Rc::downgrade(&self.core))
    }

    /// Register a middleware
    ///
    /// The middleware's `observe` hook runs first, then it is retained for
    /// the lifetime of the store. Earlier dispatches are not replayed beyond
    /// what the streams themselves remember.
    pub fn register<M: Middleware<A> + 'static>(&self, middleware: M) {
        self.register_boxed(Box::new(middleware));
    }

    pub fn register_boxed(&self, mut middleware: Box<dyn Middleware<A>>) {
        middleware.observe(self);
        let mut registry = self.middleware.borrow_mut();
        registry.push(middleware);
        log::trace!("Registered middleware #{}", registry.len());
    }

    /// Register middlewares in iteration order
    pub fn register_all<I>(&self, middlewares: I)
    where
        I: IntoIterator<Item = Box<dyn Middleware<A>>>,
    {
        for middleware in middlewares {
            self.register_boxed(middleware);
        }
    }

    pub fn middleware_count(&self) -> usize {
        self.middleware.borrow().len()
    }

    pub fn config(&self) -> &StoreConfig {
        &self.core.config
    }

    /// Number of dispatches currently on the call stack
    pub fn dispatch_depth(&self) -> usize {
        self.core.depth.get()
    }
}
