use anyhow::Result;
use substore::{Action, LoggingMiddleware, Store, StoreConfig};

mod app;

use app::{AppAction, Counter, CounterWrapMiddleware, Todos, COUNTER_KEY, TODOS_KEY};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting substore-demo");

    let config = StoreConfig::load();
    let store = Store::with_config(app::reduce, config);

    let _printer = store.last_state_and_action().subscribe_updates(|(state, action)| {
        if let Some(action) = action {
            println!("{:?}", action);
            for line in app::describe(state) {
                println!("    {}", line);
            }
        }
    });

    // Middleware is notified in this order, after the printer above. Actions
    // dispatched by a middleware are fully processed before the subscribers
    // that come after it run, so the printer is attached first to see pairs
    // in dispatch order.
    store.register(LoggingMiddleware::with_level(log::Level::Info));
    store.register(CounterWrapMiddleware::default());

    store.try_dispatch(Action::add_default::<Counter>(COUNTER_KEY))?;
    store.try_dispatch(Action::add_default::<Todos>(TODOS_KEY))?;
    store.try_dispatch(Action::External(AppAction::AddTodo("write reducer".to_string())))?;
    store.try_dispatch(Action::External(AppAction::AddTodo("add middleware".to_string())))?;
    store.try_dispatch(Action::External(AppAction::CompleteTodo))?;
    for _ in 0..app::COUNTER_LIMIT {
        store.try_dispatch(Action::External(AppAction::Increment))?;
    }
    store.try_dispatch(Action::remove(COUNTER_KEY))?;

    println!("Final state:");
    for line in app::describe(&store.current_state()) {
        println!("    {}", line);
    }

    store.try_dispatch(Action::Reset)?;
    log::info!(
        "Exiting substore-demo ({} substates left)",
        store.current_state().len()
    );
    Ok(())
}
