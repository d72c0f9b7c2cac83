//! Role-shaped sections: experience, education, research, volunteer, references.

use crate::models::cv::{
    EducationItem, ExperienceItem, ReferenceItem, ResearchItem, Sections, VolunteerItem,
};
use crate::models::loose::Text;
use crate::render::blocks::{Body, Entry, Section};
use crate::render::escape::{escape, escape_opt, escape_text};
use crate::render::format::{date_range, escaped_items, link_text, truncate};
use crate::render::sections::{section, Rules, SectionKey};

/// Heading/subheading pair where the organization moves up when the role is missing.
fn role_and_org(role: String, org: String) -> (String, Option<String>) {
    if role.is_empty() {
        (org, None)
    } else {
        (role, Some(org))
    }
}

fn entries<T>(
    key: SectionKey,
    title: &Text,
    items: impl Iterator<Item = T>,
    rules: &Rules,
    build: impl Fn(T) -> Entry,
) -> Option<Section> {
    let built = items.map(build).filter(|entry| !entry.is_empty());
    section(key, title, Body::Entries(rules.cap(built)))
}

// ────────────────────────────────────────────────────────────────────────────
// Experience
// ────────────────────────────────────────────────────────────────────────────

pub fn experience(sections: &Sections, rules: &Rules) -> Option<Section> {
    let experience = sections.experience.get()?;
    entries(
        SectionKey::Experience,
        &experience.section_title,
        experience.items.iter(),
        rules,
        experience_entry,
    )
}

fn experience_entry(job: &ExperienceItem) -> Entry {
    let (heading, org) = role_and_org(escape_text(&job.title), link_text(&job.company, &job.url));
    Entry::position(heading)
        .subheading(org)
        .date(date_range(&job.dates))
        .location(escape_opt(&job.location))
        .bullets(escaped_items(&job.achievements))
        .tags("Technologies", escaped_items(&job.technologies))
}

// ────────────────────────────────────────────────────────────────────────────
// Education
// ────────────────────────────────────────────────────────────────────────────

pub fn education(sections: &Sections, rules: &Rules) -> Option<Section> {
    let education = sections.education.get()?;
    entries(
        SectionKey::Education,
        &education.section_title,
        education.items.iter(),
        rules,
        education_entry,
    )
}

fn education_entry(edu: &EducationItem) -> Entry {
    let (heading, org) = role_and_org(
        escape_text(&edu.degree),
        link_text(&edu.institution, &edu.url),
    );
    Entry::position(heading)
        .subheading(org)
        .date(date_range(&edu.dates))
        .location(escape_opt(&edu.location))
        .field("GPA", escape_opt(&edu.gpa))
        .bullets(escaped_items(&edu.honors))
}

// ────────────────────────────────────────────────────────────────────────────
// Research
// ────────────────────────────────────────────────────────────────────────────

pub fn research(sections: &Sections, rules: &Rules) -> Option<Section> {
    let research = sections.research.get()?;
    entries(
        SectionKey::Research,
        &research.section_title,
        research.items.iter(),
        rules,
        |item| research_entry(item, rules),
    )
}

fn research_entry(item: &ResearchItem, rules: &Rules) -> Entry {
    let (heading, org) = role_and_org(
        link_text(&item.title, &item.url),
        escape_text(item.institution.or(&item.organization)),
    );
    let dates = if item.dates.is_empty() {
        &item.date
    } else {
        &item.dates
    };
    let description = item
        .description
        .get()
        .map(|d| escape(&truncate(d, rules.truncate_at)));

    Entry::position(heading)
        .subheading(org)
        .date(date_range(dates))
        .location(escape_opt(&item.location))
        .text(description)
        .bullets(escaped_items(&item.achievements))
}

// ────────────────────────────────────────────────────────────────────────────
// Volunteer
// ────────────────────────────────────────────────────────────────────────────

pub fn volunteer(sections: &Sections, rules: &Rules) -> Option<Section> {
    let volunteer = sections.volunteer.get()?;
    entries(
        SectionKey::Volunteer,
        &volunteer.section_title,
        volunteer.items.iter(),
        rules,
        volunteer_entry,
    )
}

fn volunteer_entry(vol: &VolunteerItem) -> Entry {
    let (heading, org) = role_and_org(escape_text(&vol.title), escape_text(&vol.organization));
    Entry::position(heading)
        .subheading(org)
        .date(date_range(&vol.dates))
        .location(escape_opt(&vol.location))
        .bullets(escaped_items(&vol.achievements))
}

// ────────────────────────────────────────────────────────────────────────────
// References
// ────────────────────────────────────────────────────────────────────────────

pub fn references(sections: &Sections, rules: &Rules) -> Option<Section> {
    let references = sections.references.get()?;
    entries(
        SectionKey::References,
        &references.section_title,
        references.items.iter(),
        rules,
        reference_entry,
    )
}

fn reference_entry(reference: &ReferenceItem) -> Entry {
    let role: Vec<String> = [&reference.title, &reference.company]
        .into_iter()
        .filter_map(escape_opt)
        .collect();

    let mut contact = Vec::new();
    if let Some(email) = escape_opt(&reference.email) {
        contact.push(format!("Email: {email}"));
    }
    if let Some(phone) = escape_opt(&reference.phone) {
        contact.push(format!("Phone: {phone}"));
    }

    Entry::position(escape_text(&reference.name))
        .subheading(Some(role.join(", ")))
        .text(Some(contact.join(" | ")))
}
