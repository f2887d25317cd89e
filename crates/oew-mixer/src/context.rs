// ABOUTME: Scoped single-writer value cell shared without threading it through every view.
// ABOUTME: Consumers hold weak handles and fail once the providing scope is gone.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

type Listener<T> = Box<dyn FnMut(T)>;

/// Upper bound on re-notification rounds when listeners keep rewriting the value
const MAX_NOTIFY_ROUNDS: usize = 8;

struct Slot<T> {
    value: Cell<T>,
    version: Cell<u64>,
    notifying: Cell<bool>,
    listeners: RefCell<Vec<Listener<T>>>,
}

impl<T: Copy> Slot<T> {
    fn new(value: T) -> Self {
        Self {
            value: Cell::new(value),
            version: Cell::new(0),
            notifying: Cell::new(false),
            listeners: RefCell::new(Vec::new()),
        }
    }

    fn store(&self, value: T) {
        self.value.set(value);
        self.version.set(self.version.get().wrapping_add(1));

        // A write from inside a listener is picked up by the outer round below
        if self.notifying.replace(true) {
            return;
        }

        // Listeners added while notifying are kept but only see writes after this one settles
        let mut listeners = self.listeners.take();
        let mut rounds = 0;
        loop {
            let version = self.version.get();
            let current = self.value.get();
            for listener in listeners.iter_mut() {
                listener(current);
            }
            if self.version.get() == version {
                break;
            }
            rounds += 1;
            if rounds >= MAX_NOTIFY_ROUNDS {
                tracing::warn!(
                    "Context listeners kept rewriting the value; stopped after {} rounds",
                    rounds
                );
                break;
            }
        }
        self.notifying.set(false);

        let mut current = self.listeners.borrow_mut();
        listeners.append(&mut current);
        *current = listeners;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ContextError {
    #[error("Context used outside its provider")]
    OutsideProvider,
}

/// Owns the shared value. Dropping the provider ends the scope.
pub struct Provider<T> {
    slot: Rc<Slot<T>>,
}

impl<T: Copy + 'static> Provider<T> {
    pub fn new(initial: T) -> Self {
        Self {
            slot: Rc::new(Slot::new(initial)),
        }
    }

    /// Handle for a view inside this provider's scope
    pub fn consumer(&self) -> Consumer<T> {
        Consumer {
            slot: Rc::downgrade(&self.slot),
        }
    }

    pub fn get(&self) -> T {
        self.slot.value.get()
    }

    pub fn set(&self, value: T) {
        self.slot.store(value);
    }

    /// Run `listener` after every write
    pub fn subscribe(&self, listener: impl FnMut(T) + 'static) {
        self.slot.listeners.borrow_mut().push(Box::new(listener));
    }
}

/// Handle to a provider's value, possibly from far down the view tree
pub struct Consumer<T> {
    slot: Weak<Slot<T>>,
}

impl<T: Copy + 'static> Consumer<T> {
    /// A handle that was never given a provider
    pub fn unbound() -> Self {
        Self { slot: Weak::new() }
    }

    pub fn is_bound(&self) -> bool {
        self.slot.strong_count() > 0
    }

    pub fn read(&self) -> Result<T, ContextError> {
        self.slot().map(|slot| slot.value.get())
    }

    pub fn write(&self, value: T) -> Result<(), ContextError> {
        self.slot()?.store(value);
        Ok(())
    }

    pub fn subscribe(&self, listener: impl FnMut(T) + 'static) -> Result<(), ContextError> {
        self.slot()?.listeners.borrow_mut().push(Box::new(listener));
        Ok(())
    }

    fn slot(&self) -> Result<Rc<Slot<T>>, ContextError> {
        self.slot.upgrade().ok_or(ContextError::OutsideProvider)
    }
}

impl<T> Clone for Consumer<T> {
    fn clone(&self) -> Self {
        Self {
            slot: Weak::clone(&self.slot),
        }
    }
}

impl<T: Copy + fmt::Debug> fmt::Debug for Provider<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Provider")
            .field("value", &self.slot.value.get())
            .field("listeners", &self.slot.listeners.borrow().len())
            .finish()
    }
}

impl<T: Copy + fmt::Debug> fmt::Debug for Consumer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = self.slot.upgrade().map(|slot| slot.value.get());
        f.debug_struct("Consumer").field("value", &value).finish()
    }
}

impl<T: Copy + 'static> Default for Consumer<T> {
    fn default() -> Self {
        Self::unbound()
    }
}
