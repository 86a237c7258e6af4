//! Replaying broadcast streams
//!
//! A `Published<T>` is a value cell plus a list of subscriber callbacks.
//! Subscribing replays the current value, later values are pushed
//! synchronously in subscription order. The stream never completes.
//!
//! Callbacks run without any borrow of the stream held, so a callback may
//! subscribe, cancel, or trigger another emission on the same stream.
//!
//! Subscribers stay attached as long as their `Subscription` handle lives.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

type Callback<T> = Rc<dyn Fn(&T)>;

struct Subscriber<T> {
    id: u64,
    active: Rc<Cell<bool>>,
    callback: Callback<T>,
}

// Derive would require `T: Clone`.
impl<T> Clone for Subscriber<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            active: Rc::clone(&self.active),
            callback: Rc::clone(&self.callback),
        }
    }
}

struct Shared<T> {
    value: T,
    next_id: u64,
    subscribers: Vec<Subscriber<T>>,
}

/// Broadcast stream with memory of its latest value
pub struct Published<T> {
    shared: Rc<RefCell<Shared<T>>>,
}

// Handles are cheap clones pointing at the same stream.
impl<T> Clone for Published<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Rc::clone(&self.shared),
        }
    }
}

impl<T: Clone + 'static> Published<T> {
    pub(crate) fn new(initial: T) -> Self {
        Self {
            shared: Rc::new(RefCell::new(Shared {
                value: initial,
                next_id: 0,
                subscribers: Vec::new(),
            })),
        }
    }

    /// The latest value
    pub fn value(&self) -> T {
        self.shared.borrow().value.clone()
    }

    /// Subscribe and immediately receive the latest value, then every
    /// subsequent one
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        let callback: Callback<T> = Rc::new(callback);
        let subscription = self.attach(Rc::clone(&callback));
        let current = self.value();
        callback(&current);
        subscription
    }

    /// Subscribe to future values only
    pub fn subscribe_updates(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        self.attach(Rc::new(callback))
    }

    pub fn subscriber_count(&self) -> usize {
        self.shared.borrow().subscribers.len()
    }

    /// Store `value` and push it to every subscriber
    #[cfg(test)]
    pub(crate) fn send(&self, value: T) {
        self.replace(value.clone());
        self.emit(&value);
    }

    /// Store `value` as the latest without notifying anyone
    pub(crate) fn replace(&self, value: T) {
        // Old value is dropped after the borrow ends
        let previous = std::mem::replace(&mut self.shared.borrow_mut().value, value);
        drop(previous);
    }

    /// Push `value` to the subscribers attached right now
    ///
    /// Subscribers added while emitting do not get this value pushed (they
    /// already saw the latest on subscribe); cancelled ones are skipped.
    pub(crate) fn emit(&self, value: &T) {
        let snapshot: Vec<Subscriber<T>> = self.shared.borrow().subscribers.clone();
        for subscriber in snapshot {
            if subscriber.active.get() {
                (subscriber.callback)(value);
            }
        }
    }

    fn attach(&self, callback: Callback<T>) -> Subscription {
        let active = Rc::new(Cell::new(true));
        let id = {
            let mut shared = self.shared.borrow_mut();
            let id = shared.next_id;
            shared.next_id += 1;
            shared.subscribers.push(Subscriber {
                id,
                active: Rc::clone(&active),
                callback,
            });
            log::trace!(
                "Subscriber #{} attached ({} total)",
                id,
                shared.subscribers.len()
            );
            id
        };

        let weak: Weak<RefCell<Shared<T>>> = Rc::downgrade(&self.shared);
        Subscription {
            detach: Some(Box::new(move || {
                active.set(false);
                let Some(shared) = weak.upgrade() else {
                    return;
                };
                let removed = {
                    let mut shared = shared.borrow_mut();
                    let removed = shared
                        .subscribers
                        .iter()
                        .position(|s| s.id == id)
                        .map(|index| shared.subscribers.remove(index));
                    log::trace!(
                        "Subscriber #{} detached ({} left)",
                        id,
                        shared.subscribers.len()
                    );
                    removed
                };
                // The callback may own subscriptions to this stream; drop it
                // with the stream unborrowed
                drop(removed);
            })),
        }
    }
}

/// Handle to a subscriber attached to a `Published` stream
///
/// Dropping the handle detaches the subscriber. Use `detach_forever` for
/// subscribers that should live as long as the stream.
#[must_use = "dropping a Subscription detaches the subscriber immediately"]
pub struct Subscription {
    detach: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Detach the subscriber; it receives no further values
    pub fn cancel(mut self) {
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }

    /// Give up the handle but keep the subscriber attached for the lifetime
    /// of the stream
    pub fn detach_forever(mut self) {
        self.detach = None;
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.detach.is_some())
            .finish()
    }
}
