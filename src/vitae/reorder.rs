//! # Reorder Controller
//!
//! Drag-and-drop lists identify their rows with sortable handles of the form
//! `<collection>-<entryId>` (e.g. `experience-3fa1c09e`). A finished gesture
//! reports the handle that was lifted and, unless it was cancelled, the handle
//! it was dropped onto. [`resolve`] turns that pair into a
//! [`Intent::ReorderEntries`] on the current document.
//!
//! A gesture resolves to nothing when:
//! - it was cancelled (no drop target),
//! - it was dropped onto itself,
//! - the two handles belong to different collections,
//! - either handle no longer names an entry in the document.

use crate::commands::Intent;
use crate::model::{Collection, EntryId, ResumeDocument};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DragHandle {
    pub collection: Collection,
    pub id: EntryId,
}

impl DragHandle {
    pub fn new(collection: Collection, id: EntryId) -> Self {
        Self { collection, id }
    }
}

impl fmt::Display for DragHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.collection, self.id)
    }
}

impl FromStr for DragHandle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (prefix, id) = s
            .split_once('-')
            .ok_or_else(|| format!("Invalid drag handle: {}", s))?;
        if id.is_empty() {
            return Err(format!("Invalid drag handle: {}", s));
        }
        Ok(Self {
            collection: prefix.parse()?,
            id: EntryId::from(id),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragEvent {
    pub active: DragHandle,
    pub over: Option<DragHandle>,
}

impl DragEvent {
    pub fn dropped(active: DragHandle, over: DragHandle) -> Self {
        Self {
            active,
            over: Some(over),
        }
    }

    pub fn cancelled(active: DragHandle) -> Self {
        Self { active, over: None }
    }
}

/// Maps a finished drag gesture to a reorder intent, or `None` if the gesture
/// should not change anything.
pub fn resolve(doc: &ResumeDocument, event: &DragEvent) -> Option<Intent> {
    let over = event.over.as_ref()?;
    let collection = event.active.collection;
    if over.collection != collection || over.id == event.active.id {
        return None;
    }

    let entries = doc.entries(collection);
    let from = entries.position(&event.active.id)?;
    let to = entries.position(&over.id)?;

    Some(Intent::ReorderEntries {
        collection,
        from,
        to,
    })
}
