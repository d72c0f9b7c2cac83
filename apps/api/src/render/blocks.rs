//! Variant-neutral building blocks produced by the section generators.
//!
//! Every string stored here is already escaped (or is LaTeX produced by the
//! formatters, like an `\href`). Themes only arrange these pieces; they never
//! see raw user text except contact values, which they escape themselves.

use crate::render::sections::SectionKey;

// ────────────────────────────────────────────────────────────────────────────
// Fragments
// ────────────────────────────────────────────────────────────────────────────

/// One rendered unit of the document body.
#[derive(Debug, Clone, PartialEq)]
pub enum Fragment {
    Header(HeaderView),
    Section(Section),
}

// ────────────────────────────────────────────────────────────────────────────
// Header
// ────────────────────────────────────────────────────────────────────────────

/// Contact channels, in the order they appear in the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Email,
    Phone,
    Location,
    Linkedin,
    Portfolio,
    Orcid,
    Researchgate,
}

impl Channel {
    pub const ALL: [Channel; 7] = [
        Channel::Email,
        Channel::Phone,
        Channel::Location,
        Channel::Linkedin,
        Channel::Portfolio,
        Channel::Orcid,
        Channel::Researchgate,
    ];

    /// Display label for web-profile channels, whose values are URLs or handles.
    pub fn label(self) -> Option<&'static str> {
        match self {
            Channel::Linkedin => Some("LinkedIn"),
            Channel::Portfolio => Some("Portfolio"),
            Channel::Orcid => Some("ORCID"),
            Channel::Researchgate => Some("ResearchGate"),
            Channel::Email | Channel::Phone | Channel::Location => None,
        }
    }
}

/// A present contact channel. `value` is raw text; `url` is the resolved link target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactView {
    pub channel: Channel,
    pub value: String,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderView {
    pub name: Option<String>,
    pub title: Option<String>,
    pub credentials: Option<String>,
    pub contacts: Vec<ContactView>,
}

impl HeaderView {
    pub fn contact(&self, channel: Channel) -> Option<&ContactView> {
        self.contacts.iter().find(|c| c.channel == channel)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Sections
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub key: SectionKey,
    /// Caller-supplied title; `None` means the theme's default title for `key`.
    pub title: Option<String>,
    pub body: Body,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    /// Dated, two-line blocks (positions, projects, awards).
    Entries(Vec<Entry>),
    /// One-line list entries (certifications, courses, publications).
    Items(Vec<String>),
    /// `Label: value` lines (skills, languages).
    Fields(Vec<Field>),
    /// Free text (summary, interests).
    Paragraph(String),
}

impl Body {
    pub fn is_empty(&self) -> bool {
        match self {
            Body::Entries(entries) => entries.is_empty(),
            Body::Items(items) => items.is_empty(),
            Body::Fields(fields) => fields.is_empty(),
            Body::Paragraph(text) => text.trim().is_empty(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub label: Option<String>,
    pub value: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Entries
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// A role at an organization: heading/subheading on the left, date/location on the right.
    Position,
    /// A named piece of work: heading with an optional date, details below.
    Titled,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub kind: EntryKind,
    pub heading: String,
    pub subheading: Option<String>,
    pub date: Option<String>,
    pub location: Option<String>,
    pub details: Vec<Detail>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Detail {
    Bullets(Vec<String>),
    Field { label: &'static str, value: String },
    Text(String),
    Tags { label: &'static str, items: Vec<String> },
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl Entry {
    pub fn position(heading: String) -> Self {
        Entry::new(EntryKind::Position, heading)
    }

    pub fn titled(heading: String) -> Self {
        Entry::new(EntryKind::Titled, heading)
    }

    fn new(kind: EntryKind, heading: String) -> Self {
        Entry {
            kind,
            heading,
            subheading: None,
            date: None,
            location: None,
            details: Vec::new(),
        }
    }

    pub fn subheading(mut self, subheading: impl Into<Option<String>>) -> Self {
        self.subheading = non_empty(subheading.into());
        self
    }

    pub fn date(mut self, date: Option<String>) -> Self {
        self.date = non_empty(date);
        self
    }

    pub fn location(mut self, location: Option<String>) -> Self {
        self.location = non_empty(location);
        self
    }

    pub fn bullets(mut self, items: Vec<String>) -> Self {
        if !items.is_empty() {
            self.details.push(Detail::Bullets(items));
        }
        self
    }

    pub fn field(mut self, label: &'static str, value: Option<String>) -> Self {
        if let Some(value) = non_empty(value) {
            self.details.push(Detail::Field { label, value });
        }
        self
    }

    pub fn text(mut self, text: Option<String>) -> Self {
        if let Some(text) = non_empty(text) {
            self.details.push(Detail::Text(text));
        }
        self
    }

    pub fn tags(mut self, label: &'static str, items: Vec<String>) -> Self {
        if !items.is_empty() {
            self.details.push(Detail::Tags { label, items });
        }
        self
    }

    /// True when nothing but a date survived. A date alone is not content.
    pub fn is_empty(&self) -> bool {
        self.heading.trim().is_empty()
            && self.subheading.is_none()
            && self.location.is_none()
            && self.details.is_empty()
    }
}
