//! Dynamic contact fields in `personalInfo`.
//!
//! A contact field is a value plus its icon selector. Both are added together
//! and removed together; there is no way to leave a dangling icon behind.

use crate::commands::{CmdMessage, CmdResult};
use crate::model::{ContactField, IconType, ResumeDocument};

/// Fields offered by the "add contact" menu, in menu order.
pub const SUGGESTED_FIELDS: [&str; 5] = ["email", "phone", "linkedin", "github", "website"];

/// Suggested fields the document does not have yet.
pub fn addable_fields(doc: &ResumeDocument) -> Vec<&'static str> {
    SUGGESTED_FIELDS
        .iter()
        .copied()
        .filter(|key| !doc.personal_info.contains(key))
        .collect()
}

pub fn add(doc: &ResumeDocument, key: &str) -> CmdResult {
    let mut next = doc.clone();
    let field = ContactField::new(key, "", Some(IconType::for_field(key)));
    if !next.personal_info.insert(field) {
        return CmdResult::unchanged(doc);
    }
    CmdResult::changed(next).with_message(CmdMessage::success(format!("Contact added: {}", key)))
}

pub fn remove(doc: &ResumeDocument, key: &str) -> CmdResult {
    let mut next = doc.clone();
    if next.personal_info.remove(key).is_none() {
        return CmdResult::unchanged(doc);
    }
    CmdResult::changed(next)
        .with_message(CmdMessage::success(format!("Contact removed: {}", key)))
}

/// Picks a new icon. Choosing no icon removes the field outright.
pub fn set_icon(doc: &ResumeDocument, key: &str, icon: Option<IconType>) -> CmdResult {
    let Some(icon) = icon else {
        return remove(doc, key);
    };

    let mut next = doc.clone();
    match next.personal_info.contact_mut(key) {
        Some(contact) if contact.icon != Some(icon) => contact.icon = Some(icon),
        _ => return CmdResult::unchanged(doc),
    }
    CmdResult::changed(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SequentialIds;

    fn doc() -> ResumeDocument {
        ResumeDocument::template(&mut SequentialIds::default())
    }

    #[test]
    fn add_then_remove_restores_personal_info() {
        let before = doc();
        let added = add(&before, "website");
        assert!(added.changed);

        let website = added.document.personal_info.contact("website").unwrap();
        assert_eq!(website.value, "");
        assert_eq!(website.icon, Some(IconType::Website));

        let removed = remove(&added.document, "website");
        assert_eq!(removed.document.personal_info, before.personal_info);
    }

    #[test]
    fn adding_existing_field_is_noop() {
        let before = doc();
        let result = add(&before, "email");
        assert!(!result.changed);
        assert_eq!(result.document, before);
    }

    #[test]
    fn adding_reserved_key_is_noop() {
        let before = doc();
        assert!(!add(&before, "name").changed);
        assert!(!add(&before, "phoneIcon").changed);
        assert!(!add(&before, "").changed);
    }

    #[test]
    fn custom_field_gets_generic_icon() {
        let result = add(&doc(), "portfolio");
        let field = result.document.personal_info.contact("portfolio").unwrap();
        assert_eq!(field.icon, Some(IconType::Contact));
    }

    #[test]
    fn remove_takes_icon_with_it() {
        let result = remove(&doc(), "github");
        let json = serde_json::to_value(&result.document.personal_info).unwrap();
        assert!(json.get("github").is_none());
        assert!(json.get("githubIcon").is_none());
    }

    #[test]
    fn remove_missing_field_is_noop() {
        let before = doc();
        assert!(!remove(&before, "website").changed);
    }

    #[test]
    fn set_icon_changes_selector() {
        let result = set_icon(&doc(), "phone", Some(IconType::Contact));
        assert!(result.changed);
        assert_eq!(
            result.document.personal_info.contact("phone").unwrap().icon,
            Some(IconType::Contact)
        );
    }

    #[test]
    fn set_icon_none_removes_field() {
        let result = set_icon(&doc(), "linkedin", None);
        assert!(result.changed);
        assert!(!result.document.personal_info.contains("linkedin"));
    }

    #[test]
    fn addable_fields_excludes_present_ones() {
        assert_eq!(addable_fields(&doc()), vec!["website"]);
    }
}
