use crate::action::Action;
use crate::state::StoreState;

/// Application reducer: pure function from state and external action to the
/// next state
pub type Reducer<A> = Box<dyn Fn(StoreState, &A) -> StoreState>;

/// Root reducer - handles the built-in substate actions and hands everything
/// else to the application reducer
pub fn reduce<A>(
    mut state: StoreState,
    action: &Action<A>,
    external: &dyn Fn(StoreState, &A) -> StoreState,
) -> StoreState {
    match action {
        Action::Add { substate, key } => {
            state.insert(*key, substate.clone());
            state
        }
        Action::Remove(key) => {
            if state.remove(*key).is_none() {
                log::trace!("Remove: no substate under key {}", key);
            }
            state
        }
        Action::Reset => StoreState::new(),
        Action::External(action) => external(state, action),
    }
}

/// Application reducer that ignores every action
pub fn identity<A>(state: StoreState, _action: &A) -> StoreState {
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[derive(Debug, Default, PartialEq)]
    struct Counter {
        value: i32,
    }

    #[derive(Debug)]
    enum CounterAction {
        Increment(i64),
        Unknown,
    }

    fn counter_reducer(mut state: StoreState, action: &CounterAction) -> StoreState {
        match action {
            CounterAction::Increment(key) => {
                let value = state.get::<Counter>(*key).map_or(0, |c| c.value);
                state.insert(*key, Rc::new(Counter { value: value + 1 }));
                state
            }
            _ => state,
        }
    }

    #[test]
    fn test_add_inserts_and_overwrites() {
        let state = reduce(
            StoreState::new(),
            &Action::add(Counter { value: 1 }, 1),
            &identity::<CounterAction>,
        );
        assert_eq!(state.get::<Counter>(1).map(|c| c.value), Some(1));

        let state = reduce(
            state,
            &Action::add(Counter { value: 9 }, 1),
            &identity::<CounterAction>,
        );
        assert_eq!(state.len(), 1);
        assert_eq!(state.get::<Counter>(1).map(|c| c.value), Some(9));
    }

    #[test]
    fn test_add_then_remove_restores_previous_state() {
        let before = reduce(
            StoreState::new(),
            &Action::add(Counter::default(), 1),
            &identity::<CounterAction>,
        );
        let added = reduce(
            before.clone(),
            &Action::add(Counter::default(), 2),
            &counter_reducer,
        );
        let removed = reduce(added, &Action::remove(2), &counter_reducer);
        assert_eq!(removed, before);
    }

    #[test]
    fn test_remove_absent_key_leaves_state() {
        let state = reduce(
            StoreState::new(),
            &Action::add(Counter::default(), 1),
            &identity::<CounterAction>,
        );
        let after = reduce(state.clone(), &Action::remove(99), &counter_reducer);
        assert_eq!(after, state);
    }

    #[test]
    fn test_reset_always_empties() {
        let mut state = StoreState::new();
        for key in 0..5 {
            state = reduce(state, &Action::add(Counter::default(), key), &counter_reducer);
        }
        assert_eq!(state.len(), 5);
        assert!(reduce(state, &Action::Reset, &counter_reducer).is_empty());
        assert!(reduce(StoreState::new(), &Action::Reset, &counter_reducer).is_empty());
    }

    #[test]
    fn test_external_actions_are_delegated() {
        let state = reduce(
            StoreState::new(),
            &Action::External(CounterAction::Increment(3)),
            &counter_reducer,
        );
        let state = reduce(
            state,
            &Action::External(CounterAction::Increment(3)),
            &counter_reducer,
        );
        assert_eq!(state.get::<Counter>(3), Some(&Counter { value: 2 }));
    }

    #[test]
    fn test_unknown_external_action_uses_reducer_fallback() {
        let state = reduce(
            StoreState::new(),
            &Action::add(Counter { value: 4 }, 1),
            &counter_reducer,
        );
        let unknown = Action::External(CounterAction::Unknown);
        let after = reduce(state.clone(), &unknown, &counter_reducer);
        assert_eq!(after, state);

        let after = reduce(state.clone(), &unknown, &identity::<CounterAction>);
        assert_eq!(after, state);
    }

    #[test]
    fn test_builtin_actions_bypass_external_reducer() {
        let calls = std::cell::Cell::new(0);
        let counting = |state: StoreState, _action: &CounterAction| {
            calls.set(calls.get() + 1);
            state
        };
        let state = reduce(
            StoreState::new(),
            &Action::add(Counter::default(), 1),
            &counting,
        );
        let state = reduce(state, &Action::remove(1), &counting);
        let state = reduce(state, &Action::Reset, &counting);
        assert_eq!(calls.get(), 0);

        reduce(state, &Action::External(CounterAction::Unknown), &counting);
        assert_eq!(calls.get(), 1);
    }
}
