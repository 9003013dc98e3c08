use std::cell::RefCell;
use std::rc::Rc;

/// Stable identifier for one subscription.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionHandle(u64);

impl SubscriptionHandle {
    pub fn id(&self) -> u64 {
        self.0
    }

    pub(crate) fn from_id(id: u64) -> Self {
        Self(id)
    }
}

type HeightObserver = Rc<dyn Fn(f64)>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    entries: Vec<(SubscriptionHandle, HeightObserver)>,
    last_height: Option<f64>,
}

/// Ordered list of height observers. Clones share the list.
///
/// A broadcast calls a snapshot of the list taken when it begins, without
/// holding the borrow, so callbacks may subscribe or unsubscribe freely;
/// such changes show up from the next broadcast.
#[derive(Clone, Default)]
pub struct ObserverHub {
    inner: Rc<RefCell<Registry>>,
}

impl ObserverHub {
    pub fn subscribe<F>(&self, observer: F) -> SubscriptionHandle
    where
        F: Fn(f64) + 'static,
    {
        let mut inner = self.inner.borrow_mut();
        let handle = SubscriptionHandle(inner.next_id);
        inner.next_id += 1;
        inner.entries.push((handle, Rc::new(observer)));
        handle
    }

    /// Returns false when the handle was not (or no longer) subscribed.
    pub fn unsubscribe(&self, handle: SubscriptionHandle) -> bool {
        let mut inner = self.inner.borrow_mut();
        let before = inner.entries.len();
        inner.entries.retain(|(h, _)| *h != handle);
        inner.entries.len() != before
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Height delivered by the most recent broadcast.
    pub fn last_height(&self) -> Option<f64> {
        self.inner.borrow().last_height
    }

    pub(crate) fn broadcast(&self, height: f64) {
        let snapshot: Vec<HeightObserver> = {
            let mut inner = self.inner.borrow_mut();
            inner.last_height = Some(height);
            inner.entries.iter().map(|(_, o)| Rc::clone(o)).collect()
        };

        for observer in snapshot {
            observer(height);
        }
    }

    pub(crate) fn clear(&self) {
        self.inner.borrow_mut().entries.clear();
    }
}
