//! # Session Facade
//!
//! [`VitaeApi`] owns the one live [`ResumeDocument`] of an editing session and is
//! the only thing UIs talk to. Every edit goes through the same pipeline:
//!
//! ```text
//! Intent ──► commands::apply ──► store.save ──► notifier.broadcast
//!            (pure)              (whole doc)    (read-only observers)
//! ```
//!
//! - Nothing is saved or broadcast when a command reports `changed == false`.
//! - A failed save is logged and surfaced as a warning message; the in-memory
//!   edit still stands and the session keeps going.
//! - Mutations take `&mut self`, so they are strictly sequential and an
//!   observer can never see a half-applied edit.
//!
//! ## Generic Over DataStore
//!
//! - Production: `VitaeApi<FileStore>`
//! - Testing: `VitaeApi<InMemoryStore>`
//!
//! API tests check the pipeline (persist, broadcast, fallbacks). Mutation logic
//! itself is tested in `commands/*.rs`.

use crate::commands::{self, CmdMessage, CmdResult, FieldPath, Intent};
use crate::error::Result;
use crate::export::{self, Exporter};
use crate::model::{Collection, EntryId, IconType, IdGenerator, ResumeDocument};
use crate::notify::{Notifier, Observer, SubscriptionId};
use crate::reorder::{self, DragEvent};
use crate::store::DataStore;
use std::path::{Path, PathBuf};

pub struct VitaeApi<S: DataStore> {
    store: S,
    document: ResumeDocument,
    initial: ResumeDocument,
    ids: Box<dyn IdGenerator>,
    notifier: Notifier,
}

impl<S: DataStore> VitaeApi<S> {
    /// Starts a session: the stored document if it loads, otherwise the starter
    /// template. The template is built once here and reused by [`reset`](Self::reset).
    ///
    /// A freshly created template is saved right away so its entry ids stay
    /// the same for whoever opens the store next.
    pub fn open(store: S, mut ids: Box<dyn IdGenerator>) -> Self {
        let initial = ResumeDocument::template(ids.as_mut());
        let document = match store.load() {
            Some(doc) => doc,
            None => {
                tracing::info!(location = %store.location().display(), "no stored resume, starting from template");
                if let Err(e) = store.save(&initial) {
                    tracing::warn!(error = %e, "failed to persist starter resume");
                }
                initial.clone()
            }
        };

        Self {
            store,
            document,
            initial,
            ids,
            notifier: Notifier::new(),
        }
    }

    pub fn document(&self) -> &ResumeDocument {
        &self.document
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn location(&self) -> PathBuf {
        self.store.location()
    }

    /// Runs one intent through the mutate, persist, broadcast pipeline.
    pub fn apply(&mut self, intent: Intent) -> CmdResult {
        let mut result = commands::apply(&self.document, &intent, self.ids.as_mut());
        if !result.changed {
            tracing::debug!(?intent, "intent left the resume unchanged");
            return result;
        }
        tracing::debug!(?intent, "intent applied");
        self.commit(&mut result);
        result
    }

    fn commit(&mut self, result: &mut CmdResult) {
        self.document = result.document.clone();
        if let Err(e) = self.store.save(&self.document) {
            tracing::warn!(error = %e, "failed to persist resume");
            result.add_message(CmdMessage::warning(format!(
                "Changes were not saved: {}",
                e
            )));
        }
        self.notifier.broadcast(&self.document);
    }

    pub fn set_field(&mut self, path: FieldPath, value: impl Into<String>) -> CmdResult {
        self.apply(Intent::SetField {
            path,
            value: value.into(),
        })
    }

    pub fn add_entry(&mut self, collection: Collection) -> CmdResult {
        self.apply(Intent::AddEntry { collection })
    }

    pub fn delete_entry(&mut self, collection: Collection, id: EntryId) -> CmdResult {
        self.apply(Intent::DeleteEntry { collection, id })
    }

    pub fn reorder_entries(&mut self, collection: Collection, from: usize, to: usize) -> CmdResult {
        self.apply(Intent::ReorderEntries {
            collection,
            from,
            to,
        })
    }

    /// Applies a finished drag gesture. Gestures that resolve to nothing
    /// (cancelled, cross-collection, stale ids) leave the session untouched.
    pub fn drag(&mut self, event: &DragEvent) -> CmdResult {
        match reorder::resolve(&self.document, event) {
            Some(intent) => self.apply(intent),
            None => CmdResult::unchanged(&self.document),
        }
    }

    pub fn add_accomplishment(&mut self, collection: Collection, id: EntryId) -> CmdResult {
        self.apply(Intent::AddAccomplishment { collection, id })
    }

    pub fn delete_accomplishment(
        &mut self,
        collection: Collection,
        id: EntryId,
        index: usize,
    ) -> CmdResult {
        self.apply(Intent::DeleteAccomplishment {
            collection,
            id,
            index,
        })
    }

    pub fn set_accomplishment(
        &mut self,
        collection: Collection,
        id: EntryId,
        index: usize,
        value: impl Into<String>,
    ) -> CmdResult {
        self.apply(Intent::SetAccomplishment {
            collection,
            id,
            index,
            value: value.into(),
        })
    }

    pub fn set_date_range(
        &mut self,
        collection: Collection,
        id: EntryId,
        start: impl Into<String>,
        end: Option<String>,
        current: bool,
    ) -> CmdResult {
        self.apply(Intent::SetDateRange {
            collection,
            id,
            start: start.into(),
            end,
            current,
        })
    }

    pub fn add_contact_field(&mut self, key: impl Into<String>) -> CmdResult {
        self.apply(Intent::AddContactField { key: key.into() })
    }

    pub fn remove_contact_field(&mut self, key: impl Into<String>) -> CmdResult {
        self.apply(Intent::RemoveContactField { key: key.into() })
    }

    pub fn set_contact_icon(&mut self, key: impl Into<String>, icon: Option<IconType>) -> CmdResult {
        self.apply(Intent::SetContactIcon {
            key: key.into(),
            icon,
        })
    }

    /// Contact keys from the suggestion list that are not on the resume yet.
    pub fn addable_contact_fields(&self) -> Vec<&'static str> {
        commands::contacts::addable_fields(&self.document)
    }

    /// Discards the current resume and the stored copy, returning to the
    /// starter document this session opened with.
    pub fn reset(&mut self) -> CmdResult {
        let mut result = commands::reset::run(&self.initial);
        self.document = result.document.clone();
        if let Err(e) = self.store.clear() {
            tracing::warn!(error = %e, "failed to clear stored resume");
            result.add_message(CmdMessage::warning(format!(
                "Stored resume could not be cleared: {}",
                e
            )));
        }
        self.notifier.broadcast(&self.document);
        result
    }

    pub fn subscribe(&mut self, observer: impl Observer + 'static) -> SubscriptionId {
        self.notifier.subscribe(observer)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.notifier.unsubscribe(id)
    }

    pub fn render(&self, exporter: &dyn Exporter) -> Result<Vec<u8>> {
        exporter.render(&self.document)
    }

    pub fn export_to_dir(&self, exporter: &dyn Exporter, dir: &Path) -> Result<PathBuf> {
        export::export_to_dir(&self.document, exporter, dir)
    }
}
