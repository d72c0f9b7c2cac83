//! Compact sections: summary, skills, languages, interests, certifications, courses.

use crate::models::cv::{CertificationItem, CourseItem, Sections, SkillCategory};
use crate::render::blocks::{Body, Field, Section};
use crate::render::escape::{escape, escape_opt};
use crate::render::format::{date_range, joined, link_text, truncate};
use crate::render::sections::{section, Rules, SectionKey};

pub fn summary(sections: &Sections, rules: &Rules) -> Option<Section> {
    let summary = sections.summary.get()?;
    let content = summary.content.get()?;
    let text = escape(&truncate(content, rules.truncate_at));
    section(SectionKey::Summary, &summary.section_title, Body::Paragraph(text))
}

// ────────────────────────────────────────────────────────────────────────────
// Skills / languages
// ────────────────────────────────────────────────────────────────────────────

pub fn skills(sections: &Sections, rules: &Rules) -> Option<Section> {
    let skills = sections.skills.get()?;
    let fields = rules.cap(skills.categories.iter().filter_map(skill_field));
    section(SectionKey::Skills, &skills.section_title, Body::Fields(fields))
}

/// `Category: a, b, c`; the description stands in when the category lists no items.
fn skill_field(category: &SkillCategory) -> Option<Field> {
    let value = joined(&category.items, ", ").or_else(|| escape_opt(&category.description))?;
    Some(Field {
        label: escape_opt(&category.name),
        value,
    })
}

pub fn languages(sections: &Sections, rules: &Rules) -> Option<Section> {
    let languages = sections.languages.get()?;
    let fields = rules.cap(languages.items.iter().filter_map(|lang| {
        let name = escape_opt(&lang.name)?;
        Some(match escape_opt(&lang.proficiency) {
            Some(proficiency) => Field {
                label: Some(name),
                value: proficiency,
            },
            None => Field {
                label: None,
                value: name,
            },
        })
    }));
    section(SectionKey::Languages, &languages.section_title, Body::Fields(fields))
}

pub fn interests(sections: &Sections, rules: &Rules) -> Option<Section> {
    let interests = sections.interests.get()?;
    let items = rules.cap(interests.items.iter().map(escape));
    section(
        SectionKey::Interests,
        &interests.section_title,
        Body::Paragraph(items.join(" | ")),
    )
}

// ────────────────────────────────────────────────────────────────────────────
// One-line items
// ────────────────────────────────────────────────────────────────────────────

pub fn certifications(sections: &Sections, rules: &Rules) -> Option<Section> {
    let certifications = sections.certifications.get()?;
    let items = rules.cap(certifications.items.iter().filter_map(certification_line));
    section(
        SectionKey::Certifications,
        &certifications.section_title,
        Body::Items(items),
    )
}

/// `Title -- Institution (Jan 2020 -- Jan 2023)`.
fn certification_line(cert: &CertificationItem) -> Option<String> {
    let parts: Vec<String> = [link_text(&cert.title, &cert.url)]
        .into_iter()
        .chain(escape_opt(&cert.institution))
        .filter(|part| !part.is_empty())
        .collect();
    if parts.is_empty() {
        return None;
    }

    let mut line = parts.join(" -- ");
    if let Some(range) = date_range(&cert.date) {
        line.push_str(&format!(" ({range})"));
    }
    Some(line)
}

pub fn courses(sections: &Sections, rules: &Rules) -> Option<Section> {
    let courses = sections.courses.get()?;
    let items = rules.cap(courses.items.iter().filter_map(course_line));
    section(SectionKey::Courses, &courses.section_title, Body::Items(items))
}

/// `Title at Institution - Location (Jan 2020 -- Jun 2020)`.
fn course_line(course: &CourseItem) -> Option<String> {
    let title = escape_opt(&course.title);
    let institution = escape_opt(&course.institution);
    let location = escape_opt(&course.location);
    if title.is_none() && institution.is_none() && location.is_none() {
        return None;
    }

    let mut line = title.unwrap_or_default();
    if let Some(institution) = institution {
        if line.is_empty() {
            line = institution;
        } else {
            line.push_str(&format!(" at {institution}"));
        }
    }
    if let Some(location) = location {
        if line.is_empty() {
            line = location;
        } else {
            line.push_str(&format!(" - {location}"));
        }
    }
    if let Some(range) = date_range(&course.dates) {
        line.push_str(&format!(" ({range})"));
    }
    Some(line)
}
