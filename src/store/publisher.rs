use std::cell::RefCell;
use std::rc::Rc;

/// Shared state cell with keyed change subscribers. All mutation goes
/// through [`Publisher::with_mutation`], which notifies every subscriber
/// once the borrow is released.
pub struct Publisher<T> {
    value: Rc<RefCell<T>>,
    subscribers: Rc<RefCell<Vec<(String, Rc<dyn Fn()>)>>>,
}

impl<T> Clone for Publisher<T> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            subscribers: self.subscribers.clone(),
        }
    }
}

impl<T: Default> Default for Publisher<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> Publisher<T> {
    pub fn new(value: T) -> Self {
        Self {
            value: Rc::new(RefCell::new(value)),
            subscribers: Rc::default(),
        }
    }

    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.value.borrow())
    }

    pub fn with_mutation<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let result = f(&mut self.value.borrow_mut());
        self.notify();
        result
    }

    /// Register `subscriber` under `key`, replacing any previous entry for
    /// the same key.
    pub fn subscribe(&self, key: impl Into<String>, subscriber: impl Fn() + 'static) {
        let key = key.into();
        let mut subscribers = self.subscribers.borrow_mut();
        subscribers.retain(|(existing, _)| existing != &key);
        subscribers.push((key, Rc::new(subscriber)));
    }

    pub fn unsubscribe(&self, key: &str) {
        self.subscribers
            .borrow_mut()
            .retain(|(existing, _)| existing != key);
    }

    fn notify(&self) {
        // Collect first so a subscriber may subscribe/unsubscribe in turn.
        let subscribers: Vec<Rc<dyn Fn()>> = self
            .subscribers
            .borrow()
            .iter()
            .map(|(_, subscriber)| subscriber.clone())
            .collect();
        for subscriber in subscribers {
            subscriber()
        }
    }
}
