//! # Mutation Engine
//!
//! Every edit to a resume is a pure function from the current [`ResumeDocument`]
//! to the next one. Functions in this module never touch storage, never log to
//! stdout and never fail: an address that does not resolve (unknown id, index
//! out of range, invalid contact key) yields the input unchanged and a
//! [`CmdResult`] with `changed == false`.
//!
//! All user-facing operations are expressed as one [`Intent`] type and routed
//! through [`apply`]. The session (`api.rs`) persists and broadcasts whatever
//! comes back.

use crate::model::{
    Collection, EducationField, EntryId, ExperienceField, IconType, IdGenerator, ProjectField,
    ResumeDocument,
};
use std::str::FromStr;

pub mod accomplishments;
pub mod contacts;
pub mod dates;
pub mod entries;
pub mod fields;
pub mod reset;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CmdResult {
    pub document: ResumeDocument,
    pub changed: bool,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn changed(document: ResumeDocument) -> Self {
        Self {
            document,
            changed: true,
            messages: Vec::new(),
        }
    }

    pub fn unchanged(document: &ResumeDocument) -> Self {
        Self {
            document: document.clone(),
            changed: false,
            messages: Vec::new(),
        }
    }

    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_message(mut self, message: CmdMessage) -> Self {
        self.messages.push(message);
        self
    }
}

/// Typed address of a scalar field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldPath {
    Name,
    Contact(String),
    Education(usize, EducationField),
    Experience(usize, ExperienceField),
    Project(usize, ProjectField),
}

/// Parses the textual form used by UIs:
///
/// - `name`
/// - `contact.<key>`
/// - `<collection>.<position>.<field>`, position starting at 1
///   (`experience.1.company`, `projects.2.skills`)
impl FromStr for FieldPath {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "name" {
            return Ok(FieldPath::Name);
        }
        if let Some(key) = s.strip_prefix("contact.") {
            return Ok(FieldPath::Contact(key.to_string()));
        }

        let parts: Vec<&str> = s.split('.').collect();
        let [collection, position, field] = parts.as_slice() else {
            return Err(format!("Invalid field path: {}", s));
        };
        let collection: Collection = collection.parse()?;
        let index = match position.parse::<usize>() {
            Ok(n) if n > 0 => n - 1,
            _ => return Err(format!("Invalid position in field path: {}", s)),
        };

        let unknown = || format!("Unknown {} field: {}", collection, field);
        match collection {
            Collection::Education => {
                let field = match *field {
                    "institution" => EducationField::Institution,
                    "degree" => EducationField::Degree,
                    "location" => EducationField::Location,
                    _ => return Err(unknown()),
                };
                Ok(FieldPath::Education(index, field))
            }
            Collection::Experience => {
                let field = match *field {
                    "position" => ExperienceField::Position,
                    "company" => ExperienceField::Company,
                    "location" => ExperienceField::Location,
                    _ => return Err(unknown()),
                };
                Ok(FieldPath::Experience(index, field))
            }
            Collection::Projects => {
                let field = match *field {
                    "title" => ProjectField::Title,
                    "skills" => ProjectField::Skills,
                    "location" => ProjectField::Location,
                    _ => return Err(unknown()),
                };
                Ok(FieldPath::Project(index, field))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    SetField {
        path: FieldPath,
        value: String,
    },
    AddEntry {
        collection: Collection,
    },
    DeleteEntry {
        collection: Collection,
        id: EntryId,
    },
    ReorderEntries {
        collection: Collection,
        from: usize,
        to: usize,
    },
    AddAccomplishment {
        collection: Collection,
        id: EntryId,
    },
    DeleteAccomplishment {
        collection: Collection,
        id: EntryId,
        index: usize,
    },
    SetAccomplishment {
        collection: Collection,
        id: EntryId,
        index: usize,
        value: String,
    },
    SetDateRange {
        collection: Collection,
        id: EntryId,
        start: String,
        end: Option<String>,
        current: bool,
    },
    AddContactField {
        key: String,
    },
    RemoveContactField {
        key: String,
    },
    /// `None` clears the icon, which removes the whole field.
    SetContactIcon {
        key: String,
        icon: Option<IconType>,
    },
}

/// Routes an intent to its mutation. `ids` is only consulted by `AddEntry`.
pub fn apply(doc: &ResumeDocument, intent: &Intent, ids: &mut dyn IdGenerator) -> CmdResult {
    match intent {
        Intent::SetField { path, value } => fields::run(doc, path, value),
        Intent::AddEntry { collection } => {
            let mut id = ids.next_id();
            while doc.contains_id(&id) {
                id = ids.next_id();
            }
            entries::add(doc, *collection, id)
        }
        Intent::DeleteEntry { collection, id } => entries::delete(doc, *collection, id),
        Intent::ReorderEntries {
            collection,
            from,
            to,
        } => entries::reorder(doc, *collection, *from, *to),
        Intent::AddAccomplishment { collection, id } => {
            accomplishments::add(doc, *collection, id)
        }
        Intent::DeleteAccomplishment {
            collection,
            id,
            index,
        } => accomplishments::delete(doc, *collection, id, *index),
        Intent::SetAccomplishment {
            collection,
            id,
            index,
            value,
        } => accomplishments::set(doc, *collection, id, *index, value),
        Intent::SetDateRange {
            collection,
            id,
            start,
            end,
            current,
        } => dates::run(doc, *collection, id, start, end.clone(), *current),
        Intent::AddContactField { key } => contacts::add(doc, key),
        Intent::RemoveContactField { key } => contacts::remove(doc, key),
        Intent::SetContactIcon { key, icon } => contacts::set_icon(doc, key, *icon),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EntryList, SequentialIds};

    #[test]
    fn add_entry_skips_ids_already_in_document() {
        let mut ids = SequentialIds::default();
        let doc = ResumeDocument::template(&mut ids);
        // A fresh generator would hand out e1 again, which the seed education owns.
        let mut replay = SequentialIds::default();
        let result = apply(
            &doc,
            &Intent::AddEntry {
                collection: Collection::Projects,
            },
            &mut replay,
        );
        assert!(result.changed);
        assert_eq!(
            result.document.projects.ids().last(),
            Some(&EntryId::from("e4"))
        );
    }

    #[test]
    fn parses_field_paths() {
        assert_eq!("name".parse::<FieldPath>(), Ok(FieldPath::Name));
        assert_eq!(
            "contact.github".parse::<FieldPath>(),
            Ok(FieldPath::Contact("github".into()))
        );
        assert_eq!(
            "experience.1.company".parse::<FieldPath>(),
            Ok(FieldPath::Experience(0, ExperienceField::Company))
        );
        assert_eq!(
            "proj.3.skills".parse::<FieldPath>(),
            Ok(FieldPath::Project(2, ProjectField::Skills))
        );
    }

    #[test]
    fn rejects_bad_field_paths() {
        assert!("experience.0.company".parse::<FieldPath>().is_err());
        assert!("education.1.company".parse::<FieldPath>().is_err());
        assert!("education.1.startDate".parse::<FieldPath>().is_err());
        assert!("hobbies.1.title".parse::<FieldPath>().is_err());
        assert!("experience.company".parse::<FieldPath>().is_err());
    }

    #[test]
    fn unresolved_intent_reports_unchanged() {
        let doc = ResumeDocument::template(&mut SequentialIds::default());
        let result = apply(
            &doc,
            &Intent::DeleteEntry {
                collection: Collection::Education,
                id: EntryId::from("missing"),
            },
            &mut SequentialIds::default(),
        );
        assert!(!result.changed);
        assert!(result.messages.is_empty());
        assert_eq!(result.document, doc);
    }
}
