use crate::commands::{CmdMessage, CmdResult};
use crate::model::{Collection, EntryId, ResumeDocument};

/// Appends a blank entry. Experience and project entries start with one empty
/// bullet so there is something to type into.
pub fn add(doc: &ResumeDocument, collection: Collection, id: EntryId) -> CmdResult {
    if doc.contains_id(&id) {
        return CmdResult::unchanged(doc);
    }

    let mut next = doc.clone();
    next.entries_mut(collection).push_blank(id.clone());
    CmdResult::changed(next).with_message(CmdMessage::success(format!(
        "Entry added ({}): {}",
        collection, id
    )))
}

pub fn delete(doc: &ResumeDocument, collection: Collection, id: &EntryId) -> CmdResult {
    let mut next = doc.clone();
    if !next.entries_mut(collection).remove_id(id) {
        return CmdResult::unchanged(doc);
    }
    CmdResult::changed(next).with_message(CmdMessage::success(format!(
        "Entry deleted ({}): {}",
        collection, id
    )))
}

/// Moves the entry at `from` to `to`, shifting the ones in between.
pub fn reorder(doc: &ResumeDocument, collection: Collection, from: usize, to: usize) -> CmdResult {
    let mut next = doc.clone();
    if !next.entries_mut(collection).move_entry(from, to) {
        return CmdResult::unchanged(doc);
    }
    CmdResult::changed(next).with_message(CmdMessage::success(format!(
        "Entry moved ({}): {} -> {}",
        collection,
        from + 1,
        to + 1
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EntryList, IdGenerator, SequentialIds};

    fn setup() -> (ResumeDocument, SequentialIds) {
        let mut ids = SequentialIds::default();
        let doc = ResumeDocument::template(&mut ids);
        (doc, ids)
    }

    #[test]
    fn add_appends_blank_entry_with_placeholder_bullet() {
        let (doc, mut ids) = setup();
        let id = ids.next_id();
        let result = add(&doc, Collection::Experience, id.clone());

        assert!(result.changed);
        let added = &result.document.experience[1];
        assert_eq!(added.id, id);
        assert_eq!(added.accomplishments, vec![String::new()]);
        assert_eq!(result.document.education, doc.education);
    }

    #[test]
    fn add_education_has_no_bullets() {
        let (doc, mut ids) = setup();
        let result = add(&doc, Collection::Education, ids.next_id());
        assert_eq!(result.document.education.len(), 2);
        assert_eq!(result.document.education[1].institution, "");
    }

    #[test]
    fn add_refuses_duplicate_id() {
        let (doc, _) = setup();
        let taken = doc.experience[0].id.clone();
        let result = add(&doc, Collection::Projects, taken);
        assert!(!result.changed);
        assert_eq!(result.document, doc);
    }

    #[test]
    fn delete_removes_only_matching_entry() {
        let (doc, mut ids) = setup();
        let doc = add(&doc, Collection::Projects, ids.next_id()).document;
        let first = doc.projects[0].id.clone();
        let second = doc.projects[1].id.clone();

        let result = delete(&doc, Collection::Projects, &first);
        assert!(result.changed);
        assert_eq!(result.document.projects.ids(), vec![second]);
    }

    #[test]
    fn delete_unknown_id_is_noop() {
        let (doc, _) = setup();
        let result = delete(&doc, Collection::Education, &EntryId::from("nope"));
        assert!(!result.changed);
        assert_eq!(result.document, doc);
    }

    #[test]
    fn delete_with_id_from_other_collection_is_noop() {
        let (doc, _) = setup();
        let exp_id = doc.experience[0].id.clone();
        let result = delete(&doc, Collection::Education, &exp_id);
        assert!(!result.changed);
    }

    #[test]
    fn delete_then_add_never_reuses_id() {
        let (doc, mut ids) = setup();
        let mut seen: Vec<EntryId> = Collection::ALL
            .iter()
            .flat_map(|c| doc.entries(*c).ids())
            .collect();

        let gone = doc.experience[0].id.clone();
        let doc = delete(&doc, Collection::Experience, &gone).document;
        let fresh = ids.next_id();
        let doc = add(&doc, Collection::Experience, fresh.clone()).document;

        assert!(!seen.contains(&fresh));
        seen.push(fresh);
        assert_eq!(doc.experience.len(), 1);
    }

    #[test]
    fn reorder_moves_and_shifts() {
        let (doc, mut ids) = setup();
        let mut doc = doc;
        for _ in 0..3 {
            doc = add(&doc, Collection::Education, ids.next_id()).document;
        }
        let before = doc.education.ids();

        let result = reorder(&doc, Collection::Education, 0, 2);
        assert!(result.changed);
        let after = result.document.education.ids();
        assert_eq!(
            after,
            vec![
                before[1].clone(),
                before[2].clone(),
                before[0].clone(),
                before[3].clone()
            ]
        );
    }

    #[test]
    fn reorder_inverse_restores_order() {
        let (doc, mut ids) = setup();
        let mut doc = doc;
        for _ in 0..4 {
            doc = add(&doc, Collection::Experience, ids.next_id()).document;
        }

        for (i, j) in [(0, 4), (3, 1), (2, 2), (4, 0)] {
            let moved = reorder(&doc, Collection::Experience, i, j).document;
            let back = reorder(&moved, Collection::Experience, j, i).document;
            assert_eq!(back, doc, "reorder({}, {}) was not undone", i, j);
        }
    }

    #[test]
    fn reorder_out_of_bounds_is_noop() {
        let (doc, _) = setup();
        assert!(!reorder(&doc, Collection::Projects, 0, 1).changed);
        assert!(!reorder(&doc, Collection::Projects, 5, 0).changed);
        assert!(!reorder(&doc, Collection::Projects, 0, 0).changed);
    }
}
