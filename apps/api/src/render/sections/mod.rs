//! Section generators: one pure function per section key.
//!
//! A generator reads its section from `Sections`, drops items with no
//! meaningful field, and returns `None` when nothing is left to show.

pub mod header;
pub mod listings;
pub mod positions;
pub mod works;

use crate::models::cv::{CvData, Sections};
use crate::models::loose::Text;
use crate::render::blocks::{Body, Fragment, Section};
use crate::render::escape::escape_opt;

// ────────────────────────────────────────────────────────────────────────────
// Section keys
// ────────────────────────────────────────────────────────────────────────────

/// Every section the renderer knows how to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKey {
    Header,
    Summary,
    Experience,
    Education,
    Skills,
    Projects,
    Certifications,
    Courses,
    Languages,
    Volunteer,
    Achievements,
    Publications,
    Interests,
    References,
    Patents,
    Research,
    Custom,
}

impl SectionKey {
    pub const ALL: [SectionKey; 17] = [
        SectionKey::Header,
        SectionKey::Summary,
        SectionKey::Experience,
        SectionKey::Education,
        SectionKey::Skills,
        SectionKey::Projects,
        SectionKey::Certifications,
        SectionKey::Courses,
        SectionKey::Languages,
        SectionKey::Volunteer,
        SectionKey::Achievements,
        SectionKey::Publications,
        SectionKey::Interests,
        SectionKey::References,
        SectionKey::Patents,
        SectionKey::Research,
        SectionKey::Custom,
    ];

    /// Looks up a `section_order` entry. Case and surrounding whitespace are ignored;
    /// `awards` is accepted for `achievements`.
    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim().to_ascii_lowercase();
        if key == "awards" {
            return Some(SectionKey::Achievements);
        }
        SectionKey::ALL.into_iter().find(|k| k.as_str() == key)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SectionKey::Header => "header",
            SectionKey::Summary => "summary",
            SectionKey::Experience => "experience",
            SectionKey::Education => "education",
            SectionKey::Skills => "skills",
            SectionKey::Projects => "projects",
            SectionKey::Certifications => "certifications",
            SectionKey::Courses => "courses",
            SectionKey::Languages => "languages",
            SectionKey::Volunteer => "volunteer",
            SectionKey::Achievements => "achievements",
            SectionKey::Publications => "publications",
            SectionKey::Interests => "interests",
            SectionKey::References => "references",
            SectionKey::Patents => "patents",
            SectionKey::Research => "research",
            SectionKey::Custom => "custom",
        }
    }

    /// Heading used when the payload carries no `section_title`. Unescaped.
    pub fn default_title(self) -> &'static str {
        match self {
            SectionKey::Header => "",
            SectionKey::Summary => "Professional Summary",
            SectionKey::Experience => "Professional Experience",
            SectionKey::Education => "Education",
            SectionKey::Skills => "Technical Skills",
            SectionKey::Projects => "Projects",
            SectionKey::Certifications => "Certifications",
            SectionKey::Courses => "Courses",
            SectionKey::Languages => "Languages",
            SectionKey::Volunteer => "Volunteer Experience",
            SectionKey::Achievements => "Awards & Achievements",
            SectionKey::Publications => "Publications",
            SectionKey::Interests => "Interests",
            SectionKey::References => "References",
            SectionKey::Patents => "Patents",
            SectionKey::Research => "Research Experience",
            SectionKey::Custom => "Additional Information",
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Rendering rules
// ────────────────────────────────────────────────────────────────────────────

/// Output limits read from `rendering_rules`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rules {
    pub max_items: Option<usize>,
    pub truncate_at: Option<usize>,
}

impl Rules {
    pub fn from_cv(cv: &CvData) -> Self {
        cv.rendering_rules
            .get()
            .map(|rules| Rules {
                max_items: rules.max_items_per_section.get(),
                truncate_at: rules.truncate_descriptions_at.get(),
            })
            .unwrap_or_default()
    }

    /// Keeps at most `max_items` elements of an already-filtered sequence.
    pub fn cap<T>(&self, items: impl IntoIterator<Item = T>) -> Vec<T> {
        items
            .into_iter()
            .take(self.max_items.unwrap_or(usize::MAX))
            .collect()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Dispatch
// ────────────────────────────────────────────────────────────────────────────

/// Runs the generator registered for `key`.
pub fn generate(key: SectionKey, sections: &Sections, rules: &Rules) -> Option<Fragment> {
    let section = match key {
        SectionKey::Header => return header::header(sections).map(Fragment::Header),
        SectionKey::Summary => listings::summary(sections, rules),
        SectionKey::Experience => positions::experience(sections, rules),
        SectionKey::Education => positions::education(sections, rules),
        SectionKey::Skills => listings::skills(sections, rules),
        SectionKey::Projects => works::projects(sections, rules),
        SectionKey::Certifications => listings::certifications(sections, rules),
        SectionKey::Courses => listings::courses(sections, rules),
        SectionKey::Languages => listings::languages(sections, rules),
        SectionKey::Volunteer => positions::volunteer(sections, rules),
        SectionKey::Achievements => works::achievements(sections, rules),
        SectionKey::Publications => works::publications(sections, rules),
        SectionKey::Interests => listings::interests(sections, rules),
        SectionKey::References => positions::references(sections, rules),
        SectionKey::Patents => works::patents(sections, rules),
        SectionKey::Research => positions::research(sections, rules),
        SectionKey::Custom => works::custom(sections, rules),
    };
    section.map(Fragment::Section)
}

/// Wraps a body into a section, or `None` when the body has nothing to show.
pub(crate) fn section(key: SectionKey, title: &Text, body: Body) -> Option<Section> {
    if body.is_empty() {
        return None;
    }
    Some(Section {
        key,
        title: escape_opt(title),
        body,
    })
}
