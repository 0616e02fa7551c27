use crate::commands::{CmdResult, FieldPath};
use crate::model::ResumeDocument;

pub fn run(doc: &ResumeDocument, path: &FieldPath, value: &str) -> CmdResult {
    let mut next = doc.clone();

    let slot = match path {
        FieldPath::Name => Some(&mut next.personal_info.name),
        FieldPath::Contact(key) => next.personal_info.contact_mut(key).map(|c| &mut c.value),
        FieldPath::Education(index, field) => {
            next.education.get_mut(*index).map(|e| e.field_mut(*field))
        }
        FieldPath::Experience(index, field) => {
            next.experience.get_mut(*index).map(|e| e.field_mut(*field))
        }
        FieldPath::Project(index, field) => {
            next.projects.get_mut(*index).map(|e| e.field_mut(*field))
        }
    };

    match slot {
        Some(slot) if slot.as_str() != value => {
            *slot = value.to_string();
            CmdResult::changed(next)
        }
        _ => CmdResult::unchanged(doc),
    }
}
