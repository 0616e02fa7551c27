use crate::commands::CmdResult;
use crate::model::{Collection, DateRange, EntryId, ResumeDocument};

/// Writes start, end and the ongoing flag in one step. An ongoing entry never
/// keeps an end date, whatever `end` says.
pub fn run(
    doc: &ResumeDocument,
    collection: Collection,
    id: &EntryId,
    start: &str,
    end: Option<String>,
    current: bool,
) -> CmdResult {
    let range = DateRange::new(start, end, current);
    let mut next = doc.clone();

    match next.entries_mut(collection).entry_mut(id) {
        Some(entry) if *entry.dates() != range => *entry.dates_mut() = range,
        _ => return CmdResult::unchanged(doc),
    }

    CmdResult::changed(next)
}
