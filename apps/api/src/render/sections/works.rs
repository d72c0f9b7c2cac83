//! Work-shaped sections: projects, achievements, patents, custom, publications.

use std::cmp::Reverse;

use crate::models::cv::{AwardItem, CustomItem, PatentItem, ProjectItem, PublicationItem, Sections};
use crate::models::loose::Text;
use crate::render::blocks::{Body, Entry, Section};
use crate::render::escape::{escape, escape_opt, escape_text};
use crate::render::format::{date_range, escaped_items, link_text, parse_date, truncate};
use crate::render::sections::{section, Rules, SectionKey};

/// Shown in place of the year for undated publications.
const UNPUBLISHED: &str = "Unpublished";

fn description(text: &Text, rules: &Rules) -> Option<String> {
    text.get().map(|d| escape(&truncate(d, rules.truncate_at)))
}

fn titled_section<'a, T: 'a>(
    key: SectionKey,
    title: &Text,
    items: impl Iterator<Item = &'a T>,
    rules: &Rules,
    build: impl Fn(&'a T) -> Entry,
) -> Option<Section> {
    let built = items.map(build).filter(|entry| !entry.is_empty());
    section(key, title, Body::Entries(rules.cap(built)))
}

// ────────────────────────────────────────────────────────────────────────────
// Projects
// ────────────────────────────────────────────────────────────────────────────

pub fn projects(sections: &Sections, rules: &Rules) -> Option<Section> {
    let projects = sections.projects.get()?;
    titled_section(
        SectionKey::Projects,
        &projects.section_title,
        projects.items.iter(),
        rules,
        |project| project_entry(project, rules),
    )
}

fn project_entry(project: &ProjectItem, rules: &Rules) -> Entry {
    Entry::titled(link_text(&project.title, &project.url))
        .date(date_range(&project.dates))
        .text(description(&project.description, rules))
        .bullets(escaped_items(&project.key_contributions))
        .tags("Technologies", escaped_items(&project.technologies))
}

// ────────────────────────────────────────────────────────────────────────────
// Achievements
// ────────────────────────────────────────────────────────────────────────────

pub fn achievements(sections: &Sections, rules: &Rules) -> Option<Section> {
    let achievements = sections.achievements()?;
    titled_section(
        SectionKey::Achievements,
        &achievements.section_title,
        achievements.items.iter(),
        rules,
        achievement_entry,
    )
}

fn achievement_entry(award: &AwardItem) -> Entry {
    Entry::titled(escape_text(&award.title))
        .subheading(escape_opt(&award.organization))
        .date(date_range(&award.date))
        .text(escape_opt(&award.description))
}

// ────────────────────────────────────────────────────────────────────────────
// Patents / custom
// ────────────────────────────────────────────────────────────────────────────

pub fn patents(sections: &Sections, rules: &Rules) -> Option<Section> {
    let patents = sections.patents.get()?;
    titled_section(
        SectionKey::Patents,
        &patents.section_title,
        patents.items.iter(),
        rules,
        patent_entry,
    )
}

fn patent_entry(patent: &PatentItem) -> Entry {
    Entry::titled(link_text(&patent.title, &patent.url))
        .date(date_range(&patent.date))
        .field("Patent Number", escape_opt(&patent.number))
}

pub fn custom(sections: &Sections, rules: &Rules) -> Option<Section> {
    let custom = sections.custom.get()?;
    titled_section(
        SectionKey::Custom,
        &custom.section_title,
        custom.items.iter(),
        rules,
        |item| custom_entry(item, rules),
    )
}

fn custom_entry(item: &CustomItem, rules: &Rules) -> Entry {
    Entry::titled(link_text(&item.title, &item.url))
        .date(date_range(&item.date))
        .text(description(&item.description, rules))
}

// ────────────────────────────────────────────────────────────────────────────
// Publications
// ────────────────────────────────────────────────────────────────────────────

/// Citation lines, most recent first. Untitled items are dropped; undated ones sort last.
pub fn publications(sections: &Sections, rules: &Rules) -> Option<Section> {
    let publications = sections.publications.get()?;

    let mut dated: Vec<(&PublicationItem, Option<_>)> = publications
        .items
        .iter()
        .filter(|publication| publication.title.is_present())
        .map(|publication| {
            let date = publication.date.start.get().and_then(parse_date);
            (publication, date)
        })
        .collect();
    // Stable: equal dates keep input order.
    dated.sort_by_key(|(_, date)| Reverse(date.map(|d| d.sort_key())));

    let lines = rules.cap(dated.into_iter().map(|(publication, date)| {
        let year = date
            .map(|d| d.year().to_string())
            .unwrap_or_else(|| UNPUBLISHED.to_string());
        citation(publication, &year)
    }));
    section(
        SectionKey::Publications,
        &publications.section_title,
        Body::Items(lines),
    )
}

/// `\textbf{Title} (2021). Authors. \textit{Venue}.`
fn citation(publication: &PublicationItem, year: &str) -> String {
    let mut line = format!(
        "\\textbf{{{}}} ({year}).",
        link_text(&publication.title, &publication.url)
    );
    if let Some(authors) = publication.authors.get() {
        line.push_str(&format!(" {}.", escape(authors.trim_end_matches('.'))));
    }
    if let Some(venue) = publication.journal.or(&publication.venue).get() {
        line.push_str(&format!(" \\textit{{{}}}.", escape(venue.trim_end_matches('.'))));
    }
    line
}
