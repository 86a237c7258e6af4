//! Demo application: substates, actions, reducer and middleware

use std::rc::Rc;

use substore::{Action, Middleware, Store, StoreState, SubstateKey, Subscription};

pub const COUNTER_KEY: SubstateKey = 1;
pub const TODOS_KEY: SubstateKey = 2;

/// Counter wraps back to zero once it reaches this value
pub const COUNTER_LIMIT: i64 = 3;

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Counter {
    pub value: i64,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Todos {
    pub items: Vec<String>,
    pub done: usize,
}

/// Application actions
#[derive(Debug, Clone, PartialEq)]
pub enum AppAction {
    Increment,
    ResetCounter,
    AddTodo(String),
    CompleteTodo,
}

/// Application reducer; built-in substate actions never reach it
pub fn reduce(mut state: StoreState, action: &AppAction) -> StoreState {
    match action {
        AppAction::Increment => {
            let value = state.get::<Counter>(COUNTER_KEY).map_or(0, |c| c.value);
            state.insert(COUNTER_KEY, Rc::new(Counter { value: value + 1 }));
        }
        AppAction::ResetCounter => {
            state.insert(COUNTER_KEY, Rc::new(Counter::default()));
        }
        AppAction::AddTodo(item) => {
            let mut todos = state.get::<Todos>(TODOS_KEY).cloned().unwrap_or_default();
            todos.items.push(item.clone());
            state.insert(TODOS_KEY, Rc::new(todos));
        }
        AppAction::CompleteTodo => {
            // Without a todo list there is nothing to complete
            if let Some(todos) = state.get::<Todos>(TODOS_KEY) {
                let mut todos = todos.clone();
                todos.done = (todos.done + 1).min(todos.items.len());
                state.insert(TODOS_KEY, Rc::new(todos));
            }
        }
    }
    state
}

/// Resets the counter whenever it reaches `COUNTER_LIMIT`
///
/// Reacts on the `(state, action)` stream, which is emitted last for each
/// dispatch, so subscribers attached before it see the triggering pair
/// before the reset.
#[derive(Default)]
pub struct CounterWrapMiddleware {
    subscription: Option<Subscription>,
}

impl Middleware<AppAction> for CounterWrapMiddleware {
    fn observe(&mut self, store: &Store<AppAction>) {
        let dispatcher = store.dispatcher();
        let subscription = store.last_state_and_action().subscribe_updates(move |(state, _)| {
            if state
                .get::<Counter>(COUNTER_KEY)
                .is_some_and(|c| c.value >= COUNTER_LIMIT)
            {
                log::info!("Counter reached {}, wrapping", COUNTER_LIMIT);
                dispatcher.dispatch(Action::External(AppAction::ResetCounter));
            }
        });
        self.subscription = Some(subscription);
    }
}

/// Render the state as one line per substate
pub fn describe(state: &StoreState) -> Vec<String> {
    state
        .keys()
        .into_iter()
        .map(|key| {
            if let Some(counter) = state.get::<Counter>(key) {
                format!("{}: counter = {}", key, counter.value)
            } else if let Some(todos) = state.get::<Todos>(key) {
                format!("{}: todos {}/{} done", key, todos.done, todos.items.len())
            } else {
                format!("{}: {:?}", key, state.get_shared(key))
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_increment_creates_counter() {
        let state = reduce(StoreState::new(), &AppAction::Increment);
        assert_eq!(state.get::<Counter>(COUNTER_KEY), Some(&Counter { value: 1 }));
    }

    #[test]
    fn test_complete_without_todos_is_noop() {
        let state = reduce(StoreState::new(), &AppAction::CompleteTodo);
        assert!(state.is_empty());
    }

    #[test]
    fn test_complete_is_capped_by_items() {
        let mut state = reduce(StoreState::new(), &AppAction::AddTodo("a".into()));
        for _ in 0..3 {
            state = reduce(state, &AppAction::CompleteTodo);
        }
        let todos = state.get::<Todos>(TODOS_KEY).unwrap();
        assert_eq!(todos.items, vec!["a".to_string()]);
        assert_eq!(todos.done, 1);
    }

    #[test]
    fn test_counter_wraps_through_middleware() {
        let store = Store::new(reduce);
        store.register(CounterWrapMiddleware::default());

        for _ in 0..COUNTER_LIMIT {
            store.dispatch(Action::External(AppAction::Increment));
        }
        assert_eq!(
            store.current_state().get::<Counter>(COUNTER_KEY),
            Some(&Counter::default())
        );

        store.dispatch(Action::External(AppAction::Increment));
        assert_eq!(
            store.current_state().get::<Counter>(COUNTER_KEY),
            Some(&Counter { value: 1 })
        );
    }

    #[test]
    fn test_describe() {
        let mut state = reduce(StoreState::new(), &AppAction::Increment);
        state = reduce(state, &AppAction::AddTodo("a".into()));
        assert_eq!(
            describe(&state),
            vec!["1: counter = 1".to_string(), "2: todos 0/1 done".to_string()]
        );
    }

    #[test]
    fn test_earlier_subscribers_see_pairs_in_dispatch_order() {
        let store = Store::new(reduce);
        let printed = Rc::new(std::cell::RefCell::new(Vec::new()));
        let sink = Rc::clone(&printed);
        let _printer = store
            .last_state_and_action()
            .subscribe_updates(move |(state, action)| {
                let value = state.get::<Counter>(COUNTER_KEY).map_or(-1, |c| c.value);
                let action = action.as_ref().and_then(|a| a.as_external().cloned());
                sink.borrow_mut().push((action, value));
            });
        store.register(CounterWrapMiddleware::default());

        for _ in 0..COUNTER_LIMIT {
            store.dispatch(Action::External(AppAction::Increment));
        }

        let printed = printed.borrow();
        assert_eq!(printed.last(), Some(&(Some(AppAction::ResetCounter), 0)));
        assert_eq!(
            printed[printed.len() - 2],
            (Some(AppAction::Increment), COUNTER_LIMIT)
        );
    }
}
