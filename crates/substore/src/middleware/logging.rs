use std::fmt;

use crate::middleware::Middleware;
use crate::published::Subscription;
use crate::store::Store;

/// LoggingMiddleware - logs every dispatched action
pub struct LoggingMiddleware {
    level: log::Level,
    subscription: Option<Subscription>,
}

impl LoggingMiddleware {
    pub fn new() -> Self {
        Self::with_level(log::Level::Debug)
    }

    pub fn with_level(level: log::Level) -> Self {
        Self {
            level,
            subscription: None,
        }
    }

    /// True once the middleware has been registered with a store
    pub fn is_attached(&self) -> bool {
        self.subscription.is_some()
    }
}

impl Default for LoggingMiddleware {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: fmt::Debug + 'static> Middleware<A> for LoggingMiddleware {
    fn observe(&mut self, store: &Store<A>) {
        let level = self.level;
        // Updates only: the replayed value was logged when it was dispatched
        let subscription = store
            .last_dispatched_action()
            .subscribe_updates(move |action| {
                if let Some(action) = action {
                    log::log!(level, "Action: {:?}", action);
                }
            });
        self.subscription = Some(subscription);
    }
}
