use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Handle returned by [`Signal::connect`], used to disconnect a listener
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenerId(u64);

type Listener<E> = Rc<RefCell<dyn FnMut(&E)>>;

/// Single-threaded observer list.
///
/// Listeners are called in connection order after the state transition they
/// describe. Listeners may connect or disconnect while an emit is in progress:
/// a listener connected during an emit first hears the next one, and a
/// listener disconnected during an emit is not called for the rest of it.
/// A listener that re-enters itself through a nested emit is skipped there.
pub struct Signal<E> {
    listeners: RefCell<Vec<(ListenerId, Listener<E>)>>,
    next_id: Cell<u64>,
}

impl<E> Signal<E> {
    pub fn new() -> Self {
        Self {
            listeners: RefCell::new(Vec::new()),
            next_id: Cell::new(0),
        }
    }

    /// Register a listener
    pub fn connect<F>(&self, listener: F) -> ListenerId
    where
        F: FnMut(&E) + 'static,
    {
        let id = ListenerId(self.next_id.get());
        self.next_id.set(self.next_id.get() + 1);
        let listener: Listener<E> = Rc::new(RefCell::new(listener));
        self.listeners.borrow_mut().push((id, listener));
        id
    }

    /// Remove a listener. Returns false if it was not connected.
    pub fn disconnect(&self, id: ListenerId) -> bool {
        let position = self
            .listeners
            .borrow()
            .iter()
            .position(|(listener_id, _)| *listener_id == id);
        match position {
            Some(index) => {
                // Dropped outside the borrow; a closure's captures may touch this signal
                let removed = self.listeners.borrow_mut().remove(index);
                drop(removed);
                true
            }
            None => false,
        }
    }

    pub fn emit(&self, event: &E) {
        let snapshot: Vec<(ListenerId, Listener<E>)> = self
            .listeners
            .borrow()
            .iter()
            .map(|(id, listener)| (*id, listener.clone()))
            .collect();

        for (id, listener) in snapshot {
            if !self.is_connected(id) {
                continue;
            }
            match listener.try_borrow_mut() {
                Ok(mut listener) => (&mut *listener)(event),
                Err(_) => tracing::warn!(listener = id.0, "skipping listener re-entered by its own emit"),
            }
        }
    }

    fn is_connected(&self, id: ListenerId) -> bool {
        self.listeners.borrow().iter().any(|(listener_id, _)| *listener_id == id)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }
}

impl<E> Default for Signal<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> std::fmt::Debug for Signal<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signal")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

/// Test helper: a listener that records every event it sees
#[cfg(test)]
pub fn record<E: Clone + 'static>(signal: &Signal<E>) -> Rc<RefCell<Vec<E>>> {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    signal.connect(move |event: &E| sink.borrow_mut().push(event.clone()));
    seen
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emit_reaches_all_listeners_in_order() {
        let signal = Signal::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let first = seen.clone();
        signal.connect(move |n: &i32| first.borrow_mut().push(("first", *n)));
        let second = seen.clone();
        signal.connect(move |n: &i32| second.borrow_mut().push(("second", *n)));

        signal.emit(&7);
        assert_eq!(*seen.borrow(), vec![("first", 7), ("second", 7)]);
    }

    #[test]
    fn test_disconnect() {
        let signal: Signal<i32> = Signal::new();
        let seen = record(&signal);
        let other = signal.connect(|_| {});
        assert_eq!(signal.listener_count(), 2);

        assert!(signal.disconnect(other));
        assert!(!signal.disconnect(other));
        assert_eq!(signal.listener_count(), 1);

        signal.emit(&1);
        assert_eq!(*seen.borrow(), vec![1]);
    }

    #[test]
    fn test_listener_can_disconnect_itself_during_emit() {
        let signal: Rc<Signal<i32>> = Rc::new(Signal::new());
        let calls = Rc::new(Cell::new(0));
        let own_id: Rc<Cell<Option<ListenerId>>> = Rc::new(Cell::new(None));

        let weak = Rc::downgrade(&signal);
        let counter = calls.clone();
        let id_slot = own_id.clone();
        let id = signal.connect(move |_| {
            counter.set(counter.get() + 1);
            if let (Some(signal), Some(id)) = (weak.upgrade(), id_slot.get()) {
                signal.disconnect(id);
            }
        });
        own_id.set(Some(id));

        signal.emit(&1);
        signal.emit(&2);
        assert_eq!(calls.get(), 1);
        assert_eq!(signal.listener_count(), 0);
    }

    #[test]
    fn test_listener_disconnected_mid_emit_is_not_called() {
        let signal: Rc<Signal<i32>> = Rc::new(Signal::new());
        let later_id: Rc<Cell<Option<ListenerId>>> = Rc::new(Cell::new(None));

        let weak = Rc::downgrade(&signal);
        let slot = later_id.clone();
        signal.connect(move |_| {
            if let (Some(signal), Some(id)) = (weak.upgrade(), slot.get()) {
                signal.disconnect(id);
            }
        });
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        later_id.set(Some(signal.connect(move |n: &i32| sink.borrow_mut().push(*n))));

        signal.emit(&1);
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn test_connect_during_emit_takes_effect_next_time() {
        let signal: Rc<Signal<i32>> = Rc::new(Signal::new());
        let seen = Rc::new(RefCell::new(Vec::new()));

        let weak = Rc::downgrade(&signal);
        let sink = seen.clone();
        let connected = Rc::new(Cell::new(false));
        signal.connect(move |_| {
            if connected.replace(true) {
                return;
            }
            if let Some(signal) = weak.upgrade() {
                let sink = sink.clone();
                signal.connect(move |n: &i32| sink.borrow_mut().push(*n));
            }
        });

        signal.emit(&1);
        assert!(seen.borrow().is_empty());
        signal.emit(&2);
        assert_eq!(*seen.borrow(), vec![2]);
    }

    #[test]
    fn test_nested_emit_reaches_other_listeners() {
        let signal: Rc<Signal<i32>> = Rc::new(Signal::new());
        let weak = Rc::downgrade(&signal);
        signal.connect(move |n: &i32| {
            if *n == 1 {
                if let Some(signal) = weak.upgrade() {
                    signal.emit(&2);
                }
            }
        });
        let seen = record(&signal);

        signal.emit(&1);
        assert_eq!(*seen.borrow(), vec![2, 1]);
    }
}
