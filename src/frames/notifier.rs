use super::{ChangeSource, FrameCallback, FrameId, SubscriptionId};
use log::warn;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

type Listener = Rc<RefCell<FrameCallback>>;

/// A synchronous, single-threaded hub for frame change events. Frames publish into it with
/// `notify` and every current subscriber is called in subscription order before `notify`
/// returns.
///
/// Subscribers may subscribe, unsubscribe, or cause further notifications from inside their
/// callback. The set of listeners is captured when delivery starts, so a subscriber removed
/// during delivery may still receive the event being delivered. A listener which is already
/// running when a nested notification reaches it is skipped for that nested event.
#[derive(Default)]
pub struct FrameNotifier {
    next_id: Cell<u64>,
    listeners: RefCell<Vec<(SubscriptionId, Listener)>>,
}

impl FrameNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver a change event for `frame` to all subscribers.
    pub fn notify(&self, frame: FrameId) {
        let snapshot = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, l)| l.clone())
            .collect::<Vec<_>>();

        for listener in snapshot {
            match listener.try_borrow_mut() {
                Ok(mut callback) => (&mut **callback)(frame),
                Err(_) => warn!("Skipping re-entrant change notification for frame {frame}"),
            }
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.borrow().is_empty()
    }
}

impl ChangeSource for FrameNotifier {
    fn subscribe(&self, callback: FrameCallback) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(self.next_id.get() + 1);
        self.listeners
            .borrow_mut()
            .push((id, Rc::new(RefCell::new(callback))));
        id
    }

    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(i, _)| *i != id);
        listeners.len() != before
    }
}
