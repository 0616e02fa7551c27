//! # Document Model
//!
//! This module defines the resume document: [`ResumeDocument`] and the three
//! entry kinds it owns ([`Education`], [`Experience`], [`Project`]), plus the
//! dynamic contact mapping in [`PersonalInfo`].
//!
//! ## Identity
//!
//! Every entry carries an [`EntryId`] assigned at creation. Ids are opaque strings:
//! documents written by older builds used short random tokens, new entries get
//! UUID-based tokens from [`UuidIds`]. Ids are never renumbered or reused; the
//! session checks a freshly generated id against the live document before handing
//! it out (see `api.rs`).
//!
//! ## Addressing
//!
//! Scalar fields are addressed through closed enums ([`EducationField`],
//! [`ExperienceField`], [`ProjectField`]) instead of string keys. Only contact
//! fields are open-ended, and they live in one explicit ordered mapping.
//! Date fields are deliberately absent from the field enums: a date range is
//! always written as a unit so `current` and `endDate` cannot disagree.
//!
//! ## Storage Format
//!
//! The serialized form is camelCase JSON. Contact icons are flattened next to
//! their value as `<field>Icon`:
//!
//! ```text
//! "personalInfo": {
//!   "name": "Ada Lovelace",
//!   "email": "ada@example.com",
//!   "emailIcon": "email"
//! }
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

const ICON_SUFFIX: &str = "Icon";
const NAME_KEY: &str = "name";

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(String);

impl EntryId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntryId {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

/// Source of fresh entry identifiers.
pub trait IdGenerator {
    fn next_id(&mut self) -> EntryId;
}

/// Random v4 tokens. Used by real sessions.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
    fn next_id(&mut self) -> EntryId {
        EntryId(Uuid::new_v4().simple().to_string())
    }
}

/// Deterministic counter (`e1`, `e2`, ...). Handy in tests.
#[derive(Debug, Clone)]
pub struct SequentialIds {
    prefix: String,
    next: u64,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new("e")
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> EntryId {
        let id = EntryId(format!("{}{}", self.prefix, self.next));
        self.next += 1;
        id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Education,
    Experience,
    Projects,
}

impl Collection {
    pub const ALL: [Collection; 3] = [
        Collection::Education,
        Collection::Experience,
        Collection::Projects,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Education => "education",
            Collection::Experience => "experience",
            Collection::Projects => "projects",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Collection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "education" | "edu" => Ok(Collection::Education),
            "experience" | "exp" => Ok(Collection::Experience),
            "projects" | "project" | "proj" => Ok(Collection::Projects),
            other => Err(format!("Unknown collection: {}", other)),
        }
    }
}

/// Icon selector paired with a contact field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IconType {
    Phone,
    Email,
    Contact,
    Linkedin,
    Github,
    Website,
}

impl IconType {
    pub const ALL: [IconType; 6] = [
        IconType::Phone,
        IconType::Email,
        IconType::Contact,
        IconType::Linkedin,
        IconType::Github,
        IconType::Website,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IconType::Phone => "phone",
            IconType::Email => "email",
            IconType::Contact => "contact",
            IconType::Linkedin => "linkedin",
            IconType::Github => "github",
            IconType::Website => "website",
        }
    }

    /// Default icon for a newly added contact field: the selector sharing the
    /// field's name, or the generic contact card.
    pub fn for_field(name: &str) -> Self {
        name.parse().unwrap_or(IconType::Contact)
    }
}

impl fmt::Display for IconType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IconType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        IconType::ALL
            .iter()
            .copied()
            .find(|icon| icon.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unknown icon: {}", s))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactField {
    pub key: String,
    pub value: String,
    pub icon: Option<IconType>,
}

impl ContactField {
    pub fn new(key: impl Into<String>, value: impl Into<String>, icon: Option<IconType>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            icon,
        }
    }
}

/// Returns true if `key` can name a dynamic contact field.
pub fn is_valid_contact_key(key: &str) -> bool {
    !key.trim().is_empty() && key != NAME_KEY && !key.ends_with(ICON_SUFFIX)
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PersonalInfo {
    pub name: String,
    contacts: Vec<ContactField>,
}

impl PersonalInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            contacts: Vec::new(),
        }
    }

    pub fn with_contact(mut self, key: &str, value: &str) -> Self {
        self.contacts.push(ContactField::new(
            key,
            value,
            Some(IconType::for_field(key)),
        ));
        self
    }

    pub fn contacts(&self) -> &[ContactField] {
        &self.contacts
    }

    pub fn contact(&self, key: &str) -> Option<&ContactField> {
        self.contacts.iter().find(|c| c.key == key)
    }

    pub fn contact_mut(&mut self, key: &str) -> Option<&mut ContactField> {
        self.contacts.iter_mut().find(|c| c.key == key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.contact(key).is_some()
    }

    /// Appends a field. Returns false if the key is taken or invalid.
    pub fn insert(&mut self, field: ContactField) -> bool {
        if !is_valid_contact_key(&field.key) || self.contains(&field.key) {
            return false;
        }
        self.contacts.push(field);
        true
    }

    /// Removes a field together with its icon.
    pub fn remove(&mut self, key: &str) -> Option<ContactField> {
        let pos = self.contacts.iter().position(|c| c.key == key)?;
        Some(self.contacts.remove(pos))
    }
}

impl Serialize for PersonalInfo {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut flat = Map::new();
        flat.insert(NAME_KEY.to_string(), Value::String(self.name.clone()));
        for contact in &self.contacts {
            flat.insert(contact.key.clone(), Value::String(contact.value.clone()));
            if let Some(icon) = contact.icon {
                flat.insert(
                    format!("{}{}", contact.key, ICON_SUFFIX),
                    Value::String(icon.as_str().to_string()),
                );
            }
        }
        flat.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for PersonalInfo {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        use serde::de::Error;

        let flat = Map::<String, Value>::deserialize(deserializer)?;
        let mut info = PersonalInfo::default();
        let mut icons = Vec::new();

        for (key, value) in flat {
            let Value::String(value) = value else {
                return Err(D::Error::custom(format!(
                    "personalInfo.{} must be a string",
                    key
                )));
            };

            if key == NAME_KEY {
                info.name = value;
                continue;
            }

            match key.strip_suffix(ICON_SUFFIX) {
                Some(stem) if !stem.is_empty() => icons.push((stem.to_string(), value)),
                _ => info.contacts.push(ContactField::new(key, value, None)),
            }
        }

        // Icons without a matching field are dropped: a field and its icon live
        // and die together.
        for (stem, raw) in icons {
            let icon = if raw == "none" {
                None
            } else {
                Some(raw.parse::<IconType>().map_err(D::Error::custom)?)
            };
            if let Some(contact) = info.contact_mut(&stem) {
                contact.icon = icon;
            }
        }

        Ok(info)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    #[serde(default)]
    pub start_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default)]
    pub current: bool,
}

impl DateRange {
    /// Builds a range, dropping `end` when the entry is ongoing.
    pub fn new(start: impl Into<String>, end: Option<String>, current: bool) -> Self {
        Self {
            start_date: start.into(),
            end_date: if current { None } else { end },
            current,
        }
    }
}

/// Behaviour shared by every entry kind.
pub trait Entry {
    fn id(&self) -> &EntryId;
    fn dates(&self) -> &DateRange;
    fn dates_mut(&mut self) -> &mut DateRange;

    /// Bullet list, if this kind of entry has one.
    fn accomplishments(&self) -> Option<&[String]> {
        None
    }

    fn accomplishments_mut(&mut self) -> Option<&mut Vec<String>> {
        None
    }

    fn blank(id: EntryId) -> Self
    where
        Self: Sized;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    pub id: EntryId,
    pub institution: String,
    pub degree: String,
    #[serde(default)]
    pub location: String,
    #[serde(flatten)]
    pub dates: DateRange,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    pub id: EntryId,
    pub position: String,
    pub company: String,
    #[serde(default)]
    pub location: String,
    #[serde(flatten)]
    pub dates: DateRange,
    #[serde(default)]
    pub accomplishments: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: EntryId,
    pub title: String,
    pub skills: String,
    #[serde(default)]
    pub location: String,
    #[serde(flatten)]
    pub dates: DateRange,
    #[serde(default)]
    pub accomplishments: Vec<String>,
}

impl Entry for Education {
    fn id(&self) -> &EntryId {
        &self.id
    }

    fn dates(&self) -> &DateRange {
        &self.dates
    }

    fn dates_mut(&mut self) -> &mut DateRange {
        &mut self.dates
    }

    fn blank(id: EntryId) -> Self {
        Self {
            id,
            institution: String::new(),
            degree: String::new(),
            location: String::new(),
            dates: DateRange::default(),
        }
    }
}

impl Entry for Experience {
    fn id(&self) -> &EntryId {
        &self.id
    }

    fn dates(&self) -> &DateRange {
        &self.dates
    }

    fn dates_mut(&mut self) -> &mut DateRange {
        &mut self.dates
    }

    fn accomplishments(&self) -> Option<&[String]> {
        Some(&self.accomplishments)
    }

    fn accomplishments_mut(&mut self) -> Option<&mut Vec<String>> {
        Some(&mut self.accomplishments)
    }

    fn blank(id: EntryId) -> Self {
        Self {
            id,
            position: String::new(),
            company: String::new(),
            location: String::new(),
            dates: DateRange::default(),
            accomplishments: vec![String::new()],
        }
    }
}

impl Entry for Project {
    fn id(&self) -> &EntryId {
        &self.id
    }

    fn dates(&self) -> &DateRange {
        &self.dates
    }

    fn dates_mut(&mut self) -> &mut DateRange {
        &mut self.dates
    }

    fn accomplishments(&self) -> Option<&[String]> {
        Some(&self.accomplishments)
    }

    fn accomplishments_mut(&mut self) -> Option<&mut Vec<String>> {
        Some(&mut self.accomplishments)
    }

    fn blank(id: EntryId) -> Self {
        Self {
            id,
            title: String::new(),
            skills: String::new(),
            location: String::new(),
            dates: DateRange::default(),
            accomplishments: vec![String::new()],
        }
    }
}

/// Object-safe view over one ordered collection, so mutations can be written
/// once for all three entry kinds.
pub trait EntryList {
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
    fn ids(&self) -> Vec<EntryId>;
    fn position(&self, id: &EntryId) -> Option<usize>;
    fn entry(&self, id: &EntryId) -> Option<&dyn Entry>;
    fn entry_mut(&mut self, id: &EntryId) -> Option<&mut dyn Entry>;
    fn push_blank(&mut self, id: EntryId);
    fn remove_id(&mut self, id: &EntryId) -> bool;
    fn move_entry(&mut self, from: usize, to: usize) -> bool;
}

impl<T: Entry + 'static> EntryList for Vec<T> {
    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    fn ids(&self) -> Vec<EntryId> {
        self.iter().map(|e| e.id().clone()).collect()
    }

    fn position(&self, id: &EntryId) -> Option<usize> {
        self.iter().position(|e| e.id() == id)
    }

    fn entry(&self, id: &EntryId) -> Option<&dyn Entry> {
        self.iter().find(|e| e.id() == id).map(|e| e as &dyn Entry)
    }

    fn entry_mut(&mut self, id: &EntryId) -> Option<&mut dyn Entry> {
        self.iter_mut()
            .find(|e| e.id() == id)
            .map(|e| e as &mut dyn Entry)
    }

    fn push_blank(&mut self, id: EntryId) {
        self.push(T::blank(id));
    }

    fn remove_id(&mut self, id: &EntryId) -> bool {
        match EntryList::position(self, id) {
            Some(pos) => {
                self.remove(pos);
                true
            }
            None => false,
        }
    }

    fn move_entry(&mut self, from: usize, to: usize) -> bool {
        let len = <[T]>::len(self);
        if from == to || from >= len || to >= len {
            return false;
        }
        let item = self.remove(from);
        self.insert(to, item);
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EducationField {
    Institution,
    Degree,
    Location,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExperienceField {
    Position,
    Company,
    Location,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectField {
    Title,
    Skills,
    Location,
}

impl Education {
    pub fn field_mut(&mut self, field: EducationField) -> &mut String {
        match field {
            EducationField::Institution => &mut self.institution,
            EducationField::Degree => &mut self.degree,
            EducationField::Location => &mut self.location,
        }
    }
}

impl Experience {
    pub fn field_mut(&mut self, field: ExperienceField) -> &mut String {
        match field {
            ExperienceField::Position => &mut self.position,
            ExperienceField::Company => &mut self.company,
            ExperienceField::Location => &mut self.location,
        }
    }
}

impl Project {
    pub fn field_mut(&mut self, field: ProjectField) -> &mut String {
        match field {
            ProjectField::Title => &mut self.title,
            ProjectField::Skills => &mut self.skills,
            ProjectField::Location => &mut self.location,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeDocument {
    pub personal_info: PersonalInfo,
    pub education: Vec<Education>,
    pub experience: Vec<Experience>,
    pub projects: Vec<Project>,
}

impl ResumeDocument {
    /// The starter document shown on first launch and after a reset.
    pub fn template(ids: &mut dyn IdGenerator) -> Self {
        Self {
            personal_info: PersonalInfo::new("Your Name")
                .with_contact("email", "youremail@example.com")
                .with_contact("phone", "(123) 456-7890")
                .with_contact("linkedin", "linkedin.com/in/username")
                .with_contact("github", "github.com/username"),
            education: vec![Education {
                id: ids.next_id(),
                institution: "University Name".to_string(),
                degree: "Degree Program".to_string(),
                location: "City, State".to_string(),
                dates: DateRange::default(),
            }],
            experience: vec![Experience {
                id: ids.next_id(),
                position: "Job Title".to_string(),
                company: "Company Name".to_string(),
                location: "City, State".to_string(),
                dates: DateRange::default(),
                accomplishments: vec!["Key achievement or responsibility".to_string()],
            }],
            projects: vec![Project {
                id: ids.next_id(),
                title: "Project Name".to_string(),
                skills: "Technologies Used".to_string(),
                location: String::new(),
                dates: DateRange::default(),
                accomplishments: vec!["Project description or key feature".to_string()],
            }],
        }
    }

    pub fn entries(&self, collection: Collection) -> &dyn EntryList {
        match collection {
            Collection::Education => &self.education,
            Collection::Experience => &self.experience,
            Collection::Projects => &self.projects,
        }
    }

    pub fn entries_mut(&mut self, collection: Collection) -> &mut dyn EntryList {
        match collection {
            Collection::Education => &mut self.education,
            Collection::Experience => &mut self.experience,
            Collection::Projects => &mut self.projects,
        }
    }

    /// True if any collection holds an entry with this id.
    pub fn contains_id(&self, id: &EntryId) -> bool {
        Collection::ALL
            .iter()
            .any(|c| self.entries(*c).position(id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc() -> ResumeDocument {
        ResumeDocument::template(&mut SequentialIds::default())
    }

    #[test]
    fn template_has_one_seed_entry_per_collection() {
        let doc = doc();
        for c in Collection::ALL {
            assert_eq!(doc.entries(c).len(), 1);
        }
        assert_eq!(doc.experience[0].accomplishments.len(), 1);
        assert_eq!(doc.personal_info.contacts().len(), 4);
    }

    #[test]
    fn sequential_ids_do_not_repeat() {
        let mut ids = SequentialIds::default();
        assert_eq!(ids.next_id(), EntryId::from("e1"));
        assert_eq!(ids.next_id(), EntryId::from("e2"));
    }

    #[test]
    fn personal_info_serializes_flat_with_icons() {
        let info = PersonalInfo::new("Ada").with_contact("email", "ada@example.com");
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": "Ada",
                "email": "ada@example.com",
                "emailIcon": "email"
            })
        );
    }

    #[test]
    fn personal_info_keeps_contact_order() {
        let raw = r#"{"name":"Ada","phone":"1","github":"gh","githubIcon":"github","email":"e"}"#;
        let info: PersonalInfo = serde_json::from_str(raw).unwrap();
        let keys: Vec<_> = info.contacts().iter().map(|c| c.key.as_str()).collect();
        assert_eq!(keys, vec!["phone", "github", "email"]);
        assert_eq!(info.contact("github").unwrap().icon, Some(IconType::Github));
        assert_eq!(info.contact("phone").unwrap().icon, None);
    }

    #[test]
    fn orphan_icons_are_dropped() {
        let raw = r#"{"name":"Ada","websiteIcon":"website"}"#;
        let info: PersonalInfo = serde_json::from_str(raw).unwrap();
        assert!(info.contacts().is_empty());
    }

    #[test]
    fn non_string_contact_is_rejected() {
        let raw = r#"{"name":"Ada","phone":42}"#;
        assert!(serde_json::from_str::<PersonalInfo>(raw).is_err());
    }

    #[test]
    fn date_range_uses_camel_case_and_omits_missing_end() {
        let exp = Experience::blank(EntryId::from("x"));
        let json = serde_json::to_value(&exp).unwrap();
        assert_eq!(json["startDate"], "");
        assert_eq!(json["current"], false);
        assert!(json.get("endDate").is_none());
    }

    #[test]
    fn reads_legacy_entry_without_dates() {
        let raw = r#"{"id":"k3j2h1g0f","institution":"MIT","degree":"BSc","location":"","date":"2020"}"#;
        let edu: Education = serde_json::from_str(raw).unwrap();
        assert_eq!(edu.id.as_str(), "k3j2h1g0f");
        assert_eq!(edu.dates, DateRange::default());
    }

    #[test]
    fn date_range_new_clears_end_when_current() {
        let range = DateRange::new("2020-01", Some("2022-01".into()), true);
        assert!(range.current);
        assert_eq!(range.end_date, None);
    }

    #[test]
    fn icon_for_field_falls_back_to_contact() {
        assert_eq!(IconType::for_field("website"), IconType::Website);
        assert_eq!(IconType::for_field("mastodon"), IconType::Contact);
    }

    #[test]
    fn contact_keys_reject_reserved_names() {
        assert!(is_valid_contact_key("website"));
        assert!(!is_valid_contact_key("name"));
        assert!(!is_valid_contact_key("emailIcon"));
        assert!(!is_valid_contact_key("  "));
    }

    #[test]
    fn move_entry_ignores_out_of_range() {
        let mut items: Vec<Education> = (0..3)
            .map(|i| Education::blank(EntryId::new(format!("{}", i))))
            .collect();
        assert!(!EntryList::move_entry(&mut items, 0, 3));
        assert!(!EntryList::move_entry(&mut items, 1, 1));
        assert!(EntryList::move_entry(&mut items, 0, 2));
        assert_eq!(
            EntryList::ids(&items),
            vec![EntryId::from("1"), EntryId::from("2"), EntryId::from("0")]
        );
    }
}
