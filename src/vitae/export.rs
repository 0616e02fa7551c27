//! # Exports
//!
//! Exports are derived, read-only views of a [`ResumeDocument`]. They take the
//! document by shared reference and hand back bytes; nothing here can touch the
//! live document, so a failed export leaves the editing session as it was.
//!
//! Built-in formats:
//! - **Markdown**: plain-text summary in one of two layouts, `minimal`
//!   (`templates/resume.md.j2`) or `creative` (`templates/resume_creative.md.j2`).
//! - **JSON**: the document exactly as it is persisted.
//! - **Bundle**: a `.tar.gz` holding both of the above.
//!
//! Paginated PDF and raster snapshots are produced by external renderers; they
//! plug in by implementing [`Exporter`].
//!
//! Empty optional fields are skipped, bullets that are only whitespace are
//! dropped, and a section with no renderable entries is omitted entirely.

use crate::error::{Result, VitaeError};
use crate::model::ResumeDocument;
use chrono::{NaiveDate, Utc};
use flate2::write::GzEncoder;
use flate2::Compression;
use minijinja::Environment;
use serde::Serialize;
use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;

const MINIMAL_TEMPLATE: &str = include_str!("templates/resume.md.j2");
const CREATIVE_TEMPLATE: &str = include_str!("templates/resume_creative.md.j2");

/// Visual style of the markdown export.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MarkdownLayout {
    /// Clean, straightforward layout with nested headings.
    #[default]
    Minimal,
    /// Upper-case section banners, rules between sections, inline meta.
    Creative,
}

impl MarkdownLayout {
    fn template(&self) -> (&'static str, &'static str) {
        match self {
            MarkdownLayout::Minimal => ("resume.md", MINIMAL_TEMPLATE),
            MarkdownLayout::Creative => ("resume_creative.md", CREATIVE_TEMPLATE),
        }
    }
}

impl fmt::Display for MarkdownLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MarkdownLayout::Minimal => "minimal",
            MarkdownLayout::Creative => "creative",
        };
        f.write_str(name)
    }
}

impl FromStr for MarkdownLayout {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "minimal" => Ok(MarkdownLayout::Minimal),
            "creative" => Ok(MarkdownLayout::Creative),
            other => Err(format!("Unknown layout: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Markdown,
    Json,
    Bundle,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Markdown => "md",
            ExportFormat::Json => "json",
            ExportFormat::Bundle => "tar.gz",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExportFormat::Markdown => "markdown",
            ExportFormat::Json => "json",
            ExportFormat::Bundle => "bundle",
        };
        f.write_str(name)
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "markdown" | "md" => Ok(ExportFormat::Markdown),
            "json" => Ok(ExportFormat::Json),
            "bundle" | "tar" | "tgz" => Ok(ExportFormat::Bundle),
            other => Err(format!("Unknown export format: {}", other)),
        }
    }
}

/// A read-only view that turns a document into a file.
pub trait Exporter {
    fn format(&self) -> ExportFormat;
    fn render(&self, doc: &ResumeDocument) -> Result<Vec<u8>>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownExporter {
    pub layout: MarkdownLayout,
}

impl MarkdownExporter {
    pub fn new(layout: MarkdownLayout) -> Self {
        Self { layout }
    }
}

pub struct JsonExporter;

/// The markdown inside the bundle uses `layout`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BundleExporter {
    pub layout: MarkdownLayout,
}

/// `layout` only matters for formats that contain markdown.
pub fn exporter_for(format: ExportFormat, layout: MarkdownLayout) -> Box<dyn Exporter> {
    match format {
        ExportFormat::Markdown => Box::new(MarkdownExporter::new(layout)),
        ExportFormat::Json => Box::new(JsonExporter),
        ExportFormat::Bundle => Box::new(BundleExporter { layout }),
    }
}

impl Exporter for MarkdownExporter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Markdown
    }

    fn render(&self, doc: &ResumeDocument) -> Result<Vec<u8>> {
        Ok(render_markdown_with(doc, self.layout)?.into_bytes())
    }
}

impl Exporter for JsonExporter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Json
    }

    fn render(&self, doc: &ResumeDocument) -> Result<Vec<u8>> {
        let json = serde_json::to_string_pretty(doc).map_err(VitaeError::Serialization)?;
        Ok(json.into_bytes())
    }
}

impl Exporter for BundleExporter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Bundle
    }

    fn render(&self, doc: &ResumeDocument) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        write_bundle(&mut buf, doc, self.layout)?;
        Ok(buf)
    }
}

/// Renders `doc` with `exporter` and writes the result into `dir`.
/// Returns the path of the written file.
pub fn export_to_dir(doc: &ResumeDocument, exporter: &dyn Exporter, dir: &Path) -> Result<PathBuf> {
    let bytes = exporter.render(doc)?;
    let path = dir.join(default_file_name(exporter.format()));
    fs::write(&path, bytes)
        .map_err(|e| VitaeError::Export(format!("{}: {}", path.display(), e)))?;
    tracing::debug!(path = %path.display(), format = %exporter.format(), "resume exported");
    Ok(path)
}

pub fn default_file_name(format: ExportFormat) -> String {
    match format {
        ExportFormat::Bundle => format!(
            "vitae-{}.{}",
            Utc::now().format("%Y-%m-%d_%H-%M-%S"),
            format.extension()
        ),
        _ => format!("resume.{}", format.extension()),
    }
}

#[derive(Serialize)]
struct MarkdownView {
    name: String,
    contacts: Vec<String>,
    sections: Vec<SectionView>,
}

#[derive(Serialize)]
struct SectionView {
    title: &'static str,
    items: Vec<ItemView>,
}

#[derive(Serialize)]
struct ItemView {
    heading: String,
    meta: String,
    bullets: Vec<String>,
}

impl ItemView {
    fn new(
        heading: &str,
        subheading: &str,
        location: &str,
        dates: &crate::model::DateRange,
        bullets: &[String],
    ) -> Option<Self> {
        let dates = format_range(dates);
        let meta = [subheading, location, dates.as_str()]
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" | ");
        let bullets: Vec<String> = bullets
            .iter()
            .map(|b| b.trim())
            .filter(|b| !b.is_empty())
            .map(str::to_string)
            .collect();

        let heading = heading.trim();
        if heading.is_empty() && meta.is_empty() && bullets.is_empty() {
            return None;
        }
        Some(Self {
            heading: if heading.is_empty() {
                "Untitled".to_string()
            } else {
                heading.to_string()
            },
            meta,
            bullets,
        })
    }
}

fn section(title: &'static str, items: Vec<ItemView>) -> Option<SectionView> {
    if items.is_empty() {
        None
    } else {
        Some(SectionView { title, items })
    }
}

fn markdown_view(doc: &ResumeDocument) -> MarkdownView {
    let contacts = doc
        .personal_info
        .contacts()
        .iter()
        .map(|c| c.value.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect();

    let education = doc
        .education
        .iter()
        .filter_map(|e| ItemView::new(&e.institution, &e.degree, &e.location, &e.dates, &[]))
        .collect();
    let experience = doc
        .experience
        .iter()
        .filter_map(|e| {
            ItemView::new(
                &e.position,
                &e.company,
                &e.location,
                &e.dates,
                &e.accomplishments,
            )
        })
        .collect();
    let projects = doc
        .projects
        .iter()
        .filter_map(|p| ItemView::new(&p.title, &p.skills, &p.location, &p.dates, &p.accomplishments))
        .collect();

    MarkdownView {
        name: doc.personal_info.name.trim().to_string(),
        contacts,
        sections: [
            section("Education", education),
            section("Experience", experience),
            section("Projects", projects),
        ]
        .into_iter()
        .flatten()
        .collect(),
    }
}

pub fn render_markdown(doc: &ResumeDocument) -> Result<String> {
    render_markdown_with(doc, MarkdownLayout::default())
}

pub fn render_markdown_with(doc: &ResumeDocument, layout: MarkdownLayout) -> Result<String> {
    let (name, source) = layout.template();
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);
    env.add_template(name, source)?;
    let rendered = env.get_template(name)?.render(markdown_view(doc))?;
    Ok(format!("{}\n", rendered.trim()))
}

/// Formats `2021-03` or `2021-03-15` as `Mar 2021`; anything else is shown as typed.
pub fn format_date(raw: &str) -> String {
    let raw = raw.trim();
    let parsed = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(&format!("{}-01", raw), "%Y-%m-%d"));
    match parsed {
        Ok(date) => date.format("%b %Y").to_string(),
        Err(_) => raw.to_string(),
    }
}

pub fn format_range(dates: &crate::model::DateRange) -> String {
    let start = format_date(&dates.start_date);
    let end = if dates.current {
        "Present".to_string()
    } else {
        dates.end_date.as_deref().map(format_date).unwrap_or_default()
    };

    match (start.is_empty(), end.is_empty()) {
        (true, true) => String::new(),
        (false, true) => start,
        (true, false) => end,
        (false, false) => format!("{} - {}", start, end),
    }
}

fn write_bundle<W: Write>(writer: W, doc: &ResumeDocument, layout: MarkdownLayout) -> Result<()> {
    let enc = GzEncoder::new(writer, Compression::default());
    let mut tar = tar::Builder::new(enc);

    let markdown = MarkdownExporter::new(layout);
    let parts: [&dyn Exporter; 2] = [&markdown, &JsonExporter];
    for exporter in parts {
        let content = exporter.render(doc)?;
        let entry_name = format!("vitae/resume.{}", exporter.format().extension());

        let mut header = tar::Header::new_gnu();
        header.set_size(content.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();

        tar.append_data(&mut header, entry_name, content.as_slice())
            .map_err(VitaeError::Io)?;
    }

    tar.into_inner()
        .map_err(VitaeError::Io)?
        .finish()
        .map_err(VitaeError::Io)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{dates, entries, fields, FieldPath};
    use crate::model::{Collection, IdGenerator, PersonalInfo, SequentialIds};
    use pulldown_cmark::{Event, HeadingLevel, Parser, Tag, TagEnd};

    fn doc() -> ResumeDocument {
        ResumeDocument::template(&mut SequentialIds::default())
    }

    fn headings(md: &str) -> Vec<(HeadingLevel, String)> {
        let mut out = Vec::new();
        let mut current: Option<(HeadingLevel, String)> = None;
        for event in Parser::new(md) {
            match event {
                Event::Start(Tag::Heading { level, .. }) => current = Some((level, String::new())),
                Event::Text(text) => {
                    if let Some((_, buf)) = current.as_mut() {
                        buf.push_str(&text);
                    }
                }
                Event::End(TagEnd::Heading(_)) => out.extend(current.take()),
                _ => {}
            }
        }
        out
    }

    fn list_items(md: &str) -> Vec<String> {
        let mut out = Vec::new();
        let mut in_item = false;
        for event in Parser::new(md) {
            match event {
                Event::Start(Tag::Item) => {
                    in_item = true;
                    out.push(String::new());
                }
                Event::Text(text) if in_item => {
                    if let Some(last) = out.last_mut() {
                        last.push_str(&text);
                    }
                }
                Event::End(TagEnd::Item) => in_item = false,
                _ => {}
            }
        }
        out
    }

    #[test]
    fn markdown_has_name_and_section_headings() {
        let md = render_markdown(&doc()).unwrap();
        let heads = headings(&md);
        assert_eq!(
            heads,
            vec![
                (HeadingLevel::H1, "Your Name".to_string()),
                (HeadingLevel::H2, "Education".to_string()),
                (HeadingLevel::H3, "University Name".to_string()),
                (HeadingLevel::H2, "Experience".to_string()),
                (HeadingLevel::H3, "Job Title".to_string()),
                (HeadingLevel::H2, "Projects".to_string()),
                (HeadingLevel::H3, "Project Name".to_string()),
            ]
        );
        assert!(md.contains("youremail@example.com | (123) 456-7890"));
        assert!(md.contains("Degree Program | City, State"));
    }

    #[test]
    fn markdown_lists_non_empty_bullets_only() {
        let mut doc = doc();
        doc.experience[0].accomplishments =
            vec!["Shipped v1".into(), "   ".into(), "Shipped v1".into()];
        let md = render_markdown(&doc).unwrap();
        let items = list_items(&md);
        assert!(items.contains(&"Shipped v1".to_string()));
        assert_eq!(items.iter().filter(|i| i.as_str() == "Shipped v1").count(), 2);
        assert!(!items.iter().any(|i| i.trim().is_empty()));
    }

    #[test]
    fn empty_document_renders_without_sections() {
        let doc = ResumeDocument {
            personal_info: PersonalInfo::default(),
            education: Vec::new(),
            experience: Vec::new(),
            projects: Vec::new(),
        };
        let md = render_markdown(&doc).unwrap();
        assert!(headings(&md).is_empty());
        assert_eq!(md.trim(), "");
    }

    #[test]
    fn blank_entries_are_omitted() {
        let mut ids = SequentialIds::new("x");
        let base = doc();
        let with_blank = entries::add(&base, Collection::Education, ids.next_id()).document;
        assert_eq!(
            render_markdown(&with_blank).unwrap(),
            render_markdown(&base).unwrap()
        );
    }

    #[test]
    fn dates_render_as_month_year_or_present() {
        let base = doc();
        let id = base.experience[0].id.clone();
        let doc = dates::run(&base, Collection::Experience, &id, "2021-03", None, true).document;
        let md = render_markdown(&doc).unwrap();
        assert!(md.contains("Mar 2021 - Present"));
    }

    #[test]
    fn format_date_passes_free_text_through() {
        assert_eq!(format_date("2020-09-01"), "Sep 2020");
        assert_eq!(format_date("2020-09"), "Sep 2020");
        assert_eq!(format_date("Fall 2020"), "Fall 2020");
        assert_eq!(format_date(""), "");
    }

    #[test]
    fn export_does_not_touch_document() {
        let before = fields::run(&doc(), &FieldPath::Name, "Ada").document;
        let snapshot = before.clone();
        for format in [ExportFormat::Markdown, ExportFormat::Json, ExportFormat::Bundle] {
            for layout in [MarkdownLayout::Minimal, MarkdownLayout::Creative] {
                exporter_for(format, layout).render(&before).unwrap();
            }
        }
        assert_eq!(before, snapshot);
    }

    #[test]
    fn json_export_matches_persisted_shape() {
        let bytes = JsonExporter.render(&doc()).unwrap();
        let parsed: ResumeDocument = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(parsed, doc());
    }

    #[test]
    fn bundle_is_gzip() {
        let bytes = BundleExporter::default().render(&doc()).unwrap();
        assert_eq!(bytes[0], 0x1f);
        assert_eq!(bytes[1], 0x8b);
    }

    #[test]
    fn export_to_missing_dir_fails_cleanly() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("nope");
        let result = export_to_dir(&doc(), &MarkdownExporter::default(), &missing);
        assert!(matches!(result, Err(VitaeError::Export(_))));
    }

    #[test]
    fn export_writes_named_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = export_to_dir(&doc(), &JsonExporter, tmp.path()).unwrap();
        assert_eq!(path, tmp.path().join("resume.json"));
        assert!(path.exists());
    }

    #[test]
    fn minimal_is_the_default_layout() {
        let doc = doc();
        let bytes = MarkdownExporter::default().render(&doc).unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), render_markdown(&doc).unwrap());
        assert_eq!(
            render_markdown(&doc).unwrap(),
            render_markdown_with(&doc, MarkdownLayout::Minimal).unwrap()
        );
    }

    #[test]
    fn creative_layout_uses_banners_and_inline_meta() {
        let md = render_markdown_with(&doc(), MarkdownLayout::Creative).unwrap();
        assert_eq!(
            headings(&md),
            vec![
                (HeadingLevel::H1, "Your Name".to_string()),
                (HeadingLevel::H2, "EDUCATION".to_string()),
                (HeadingLevel::H2, "EXPERIENCE".to_string()),
                (HeadingLevel::H2, "PROJECTS".to_string()),
            ]
        );
        assert!(md.contains("> youremail@example.com · (123) 456-7890"));
        assert!(md.contains("**Job Title** · _Company Name | City, State_"));
        assert_eq!(
            list_items(&md),
            vec![
                "Key achievement or responsibility".to_string(),
                "Project description or key feature".to_string(),
            ]
        );
        assert_ne!(md, render_markdown(&doc()).unwrap());
    }

    #[test]
    fn creative_layout_skips_empty_meta() {
        let mut doc = doc();
        doc.projects[0].skills.clear();
        let md = render_markdown_with(&doc, MarkdownLayout::Creative).unwrap();
        assert!(md.contains("**Project Name**\n"));
    }

    #[test]
    fn creative_empty_document_is_blank() {
        let doc = ResumeDocument {
            personal_info: PersonalInfo::default(),
            education: Vec::new(),
            experience: Vec::new(),
            projects: Vec::new(),
        };
        assert_eq!(render_markdown_with(&doc, MarkdownLayout::Creative).unwrap().trim(), "");
    }

    #[test]
    fn parses_layouts() {
        assert_eq!("Creative".parse::<MarkdownLayout>(), Ok(MarkdownLayout::Creative));
        assert_eq!(MarkdownLayout::default().to_string(), "minimal");
        assert!("fancy".parse::<MarkdownLayout>().is_err());
    }

    #[test]
    fn parses_formats() {
        assert_eq!("md".parse::<ExportFormat>(), Ok(ExportFormat::Markdown));
        assert_eq!("bundle".parse::<ExportFormat>(), Ok(ExportFormat::Bundle));
        assert!("pdf".parse::<ExportFormat>().is_err());
    }
}
