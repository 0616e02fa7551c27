//! Bullet lists on experience and project entries.
//!
//! Bullets have no identity of their own; they are addressed by position.
//! Duplicate text is legal, so deletion is always by index, never by value.
//! Education entries have no bullet list and every operation on them is a no-op.

use crate::commands::CmdResult;
use crate::model::{Collection, EntryId, ResumeDocument};

fn edit_bullets<F>(doc: &ResumeDocument, collection: Collection, id: &EntryId, edit: F) -> CmdResult
where
    F: FnOnce(&mut Vec<String>) -> bool,
{
    let mut next = doc.clone();
    let applied = next
        .entries_mut(collection)
        .entry_mut(id)
        .and_then(|entry| entry.accomplishments_mut())
        .map(edit)
        .unwrap_or(false);

    if applied {
        CmdResult::changed(next)
    } else {
        CmdResult::unchanged(doc)
    }
}

pub fn add(doc: &ResumeDocument, collection: Collection, id: &EntryId) -> CmdResult {
    edit_bullets(doc, collection, id, |bullets| {
        bullets.push(String::new());
        true
    })
}

pub fn delete(doc: &ResumeDocument, collection: Collection, id: &EntryId, index: usize) -> CmdResult {
    edit_bullets(doc, collection, id, |bullets| {
        if index >= bullets.len() {
            return false;
        }
        bullets.remove(index);
        true
    })
}

pub fn set(
    doc: &ResumeDocument,
    collection: Collection,
    id: &EntryId,
    index: usize,
    value: &str,
) -> CmdResult {
    edit_bullets(doc, collection, id, |bullets| match bullets.get_mut(index) {
        Some(bullet) if bullet.as_str() != value => {
            *bullet = value.to_string();
            true
        }
        _ => false,
    })
}
