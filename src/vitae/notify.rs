//! # Change Notifier
//!
//! Read-only consumers (preview renderers, exporters, status lines) subscribe
//! here and are handed every new document right after it is committed.
//!
//! Observers get a shared reference to the document and no handle back to the
//! session, so a second mutation cannot start while a broadcast is running: the
//! session holds `&mut self` for the whole "mutate, persist, broadcast" step.

use crate::model::ResumeDocument;

pub trait Observer {
    fn notify(&mut self, doc: &ResumeDocument);
}

impl<F> Observer for F
where
    F: FnMut(&ResumeDocument),
{
    fn notify(&mut self, doc: &ResumeDocument) {
        self(doc)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

#[derive(Default)]
pub struct Notifier {
    observers: Vec<(SubscriptionId, Box<dyn Observer>)>,
    next_id: u64,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, observer: impl Observer + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Returns false if the subscription was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sub, _)| *sub != id);
        self.observers.len() != before
    }

    /// Delivers `doc` to every observer, in subscription order.
    pub fn broadcast(&mut self, doc: &ResumeDocument) {
        tracing::debug!(observers = self.observers.len(), "broadcasting resume");
        for (_, observer) in self.observers.iter_mut() {
            observer.notify(doc);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}
