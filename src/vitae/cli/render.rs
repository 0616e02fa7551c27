//! Terminal output. Everything renders to a `String` first so tests can check
//! it without a terminal; `print_*` wrappers write the result to stdout.
//!
//! Layout (widths, truncation, padding) is Unicode-aware via `unicode-width`.

use colored::Colorize;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};
use vitae::commands::{CmdMessage, MessageLevel};
use vitae::error::VitaeError;
use vitae::export::format_range;
use vitae::model::{Collection, DateRange, EntryId, ResumeDocument};

pub const LINE_WIDTH: usize = 100;
const KEY_WIDTH: usize = 10;
const BULLET: &str = "•";

pub fn render_messages(messages: &[CmdMessage]) -> String {
    messages
        .iter()
        .map(|message| {
            let line = match message.level {
                MessageLevel::Info => message.content.dimmed(),
                MessageLevel::Success => message.content.green(),
                MessageLevel::Warning => message.content.yellow(),
                MessageLevel::Error => message.content.red(),
            };
            format!("{}\n", line)
        })
        .collect()
}

pub fn print_messages(messages: &[CmdMessage]) {
    let output = render_messages(messages);
    if !output.is_empty() {
        print!("{}", output);
    }
}

/// Fatal errors go to stderr so they never mix with `show --json` output.
pub fn print_error(error: &VitaeError) {
    eprint!("{}", render_error(error));
}

fn render_error(error: &VitaeError) -> String {
    render_messages(&[CmdMessage::error(format!("Error: {}", error))])
}

struct Row<'a> {
    id: &'a EntryId,
    heading: String,
    location: &'a str,
    dates: &'a DateRange,
    bullets: &'a [String],
}

fn rows(doc: &ResumeDocument, collection: Collection) -> Vec<Row<'_>> {
    fn join(a: &str, b: &str) -> String {
        match (a.is_empty(), b.is_empty()) {
            (false, false) => format!("{}, {}", a, b),
            (false, true) => a.to_string(),
            _ => b.to_string(),
        }
    }

    match collection {
        Collection::Education => doc
            .education
            .iter()
            .map(|e| Row {
                id: &e.id,
                heading: join(&e.institution, &e.degree),
                location: &e.location,
                dates: &e.dates,
                bullets: &[],
            })
            .collect(),
        Collection::Experience => doc
            .experience
            .iter()
            .map(|e| Row {
                id: &e.id,
                heading: join(&e.position, &e.company),
                location: &e.location,
                dates: &e.dates,
                bullets: &e.accomplishments,
            })
            .collect(),
        Collection::Projects => doc
            .projects
            .iter()
            .map(|p| Row {
                id: &p.id,
                heading: join(&p.title, &p.skills),
                location: &p.location,
                dates: &p.dates,
                bullets: &p.accomplishments,
            })
            .collect(),
    }
}

fn section_title(collection: Collection) -> &'static str {
    match collection {
        Collection::Education => "Education",
        Collection::Experience => "Experience",
        Collection::Projects => "Projects",
    }
}

/// Editor view of the document: every entry is listed (blank ones too) with
/// its position and id, since those are what the other commands take.
pub fn render_resume(doc: &ResumeDocument) -> String {
    let mut out = String::new();

    let name = if doc.personal_info.name.is_empty() {
        "(no name)".dimmed()
    } else {
        doc.personal_info.name.bold()
    };
    out.push_str(&format!("{}\n", name));

    for contact in doc.personal_info.contacts() {
        let icon = contact.icon.map(|i| i.as_str()).unwrap_or("-");
        out.push_str(&format!(
            "  {:<width$}{} {}\n",
            contact.key,
            contact.value,
            format!("[{}]", icon).dimmed(),
            width = KEY_WIDTH
        ));
    }

    for collection in Collection::ALL {
        out.push('\n');
        out.push_str(&format!("{}\n", section_title(collection).bold().underline()));

        let rows = rows(doc, collection);
        if rows.is_empty() {
            out.push_str(&format!("    {}\n", "(empty)".dimmed()));
            continue;
        }

        for (i, row) in rows.iter().enumerate() {
            let idx = format!("{:>4}. ", i + 1);
            let id = row.id.as_str();
            let available = LINE_WIDTH.saturating_sub(idx.width() + id.width() + 1);
            let heading = if row.heading.is_empty() {
                "(untitled)".to_string()
            } else {
                truncate_to_width(&row.heading, available)
            };
            let padding = available.saturating_sub(heading.width());

            out.push_str(&format!(
                "{}{}{} {}\n",
                idx.yellow(),
                heading,
                " ".repeat(padding),
                id.dimmed()
            ));

            let meta: Vec<String> = [row.location.to_string(), format_range(row.dates)]
                .into_iter()
                .filter(|s| !s.is_empty())
                .collect();
            if !meta.is_empty() {
                out.push_str(&format!("      {}\n", meta.join(" | ").dimmed()));
            }

            for (n, bullet) in row.bullets.iter().enumerate() {
                let text = if bullet.is_empty() {
                    "(empty)".dimmed().to_string()
                } else {
                    truncate_to_width(bullet, LINE_WIDTH.saturating_sub(10))
                };
                out.push_str(&format!("      {} {:>2} {}\n", BULLET, n + 1, text));
            }
        }
    }

    out
}

pub fn print_resume(doc: &ResumeDocument) {
    print!("{}", render_resume(doc));
}

pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    let limit = max_width.saturating_sub(1);

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > limit {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}
