use core::fmt;

type Subscriber<T> = Box<dyn FnMut(&T)>;

/// A value that notifies its subscribers every time it is set.
///
/// Subscribers registered with [subscribe](Self::subscribe) immediately receive the current
/// value, then every later one. Rendering code that must not react to the implicit default
/// on attach uses [subscribe_changes](Self::subscribe_changes) instead. Values are set from
/// inside the crate only, so the owner stays in charge of its invariants.
pub struct Observable<T> {
    value: T,
    subscribers: Vec<Subscriber<T>>,
}

impl<T> Observable<T> {
    pub fn new(value: T) -> Observable<T> {
        Observable {
            value,
            subscribers: Vec::new(),
        }
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    /// Registers `subscriber` and replays the current value to it.
    pub fn subscribe<F>(&mut self, mut subscriber: F)
    where
        F: FnMut(&T) + 'static,
    {
        subscriber(&self.value);
        self.subscribers.push(Box::new(subscriber));
    }

    /// Registers `subscriber` for future values only.
    pub fn subscribe_changes<F>(&mut self, subscriber: F)
    where
        F: FnMut(&T) + 'static,
    {
        self.subscribers.push(Box::new(subscriber));
    }

    /// Stores `value` and notifies every subscriber, also when the value did not change.
    pub(crate) fn set(&mut self, value: T) {
        self.value = value;
        for subscriber in self.subscribers.iter_mut() {
            subscriber(&self.value);
        }
    }
}

impl<T: Default> Default for Observable<T> {
    fn default() -> Observable<T> {
        Observable::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Observable")
            .field("value", &self.value)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn subscribe_replays_current_value() {
        let mut flag = Observable::new(true);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        flag.subscribe(move |v| sink.borrow_mut().push(*v));
        flag.set(false);
        assert_eq!(*seen.borrow(), vec![true, false]);
    }

    #[test]
    fn subscribe_changes_skips_initial_value() {
        let mut flag = Observable::new(false);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        flag.subscribe_changes(move |v| sink.borrow_mut().push(*v));
        assert!(seen.borrow().is_empty());
        flag.set(true);
        flag.set(true);
        assert_eq!(*seen.borrow(), vec![true, true]);
    }
}
