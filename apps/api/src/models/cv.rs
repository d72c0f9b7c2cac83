//! CV data model — the `cv_template` payload produced by upstream extraction.
//!
//! Every field is optional. Leaves use the absorbing types from `models::loose`,
//! so a payload that parses as JSON always parses as `CvData`.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::models::loose::{Count, DateRange, Loose, LooseItem, LooseList, Text, TextList};

/// Root of a CV payload.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CvData {
    pub metadata: Loose<Metadata>,
    pub sections: Loose<Sections>,
    pub rendering_rules: Loose<RenderingRules>,
}

impl CvData {
    /// Section keys in caller order; empty when metadata is missing.
    pub fn section_order(&self) -> &TextList {
        static EMPTY: TextList = TextList::EMPTY;
        self.metadata
            .get()
            .map(|m| &m.section_order)
            .unwrap_or(&EMPTY)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Metadata {
    pub section_order: TextList,
}

/// Optional output limits. `hide_empty_sections` is accepted but always on.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RenderingRules {
    pub max_items_per_section: Count,
    pub truncate_descriptions_at: Count,
}

/// All known sections. `achievements` and `awards` are the same section under two names.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Sections {
    pub header: Loose<Header>,
    pub summary: Loose<Summary>,
    pub experience: Loose<Collection<ExperienceItem>>,
    pub education: Loose<Collection<EducationItem>>,
    pub skills: Loose<SkillsSection>,
    pub projects: Loose<Collection<ProjectItem>>,
    pub certifications: Loose<Collection<CertificationItem>>,
    pub courses: Loose<Collection<CourseItem>>,
    pub languages: Loose<Collection<LanguageItem>>,
    pub volunteer: Loose<Collection<VolunteerItem>>,
    pub achievements: Loose<Collection<AwardItem>>,
    pub awards: Loose<Collection<AwardItem>>,
    pub publications: Loose<Collection<PublicationItem>>,
    pub interests: Loose<ListSection>,
    pub references: Loose<Collection<ReferenceItem>>,
    pub patents: Loose<Collection<PatentItem>>,
    pub research: Loose<Collection<ResearchItem>>,
    pub custom: Loose<Collection<CustomItem>>,
}

impl Sections {
    /// `achievements`, falling back to the older `awards` key.
    pub fn achievements(&self) -> Option<&Collection<AwardItem>> {
        self.achievements.get().or_else(|| self.awards.get())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Section shapes
// ────────────────────────────────────────────────────────────────────────────

/// `{section_title, items: [...]}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, bound(deserialize = "T: LooseItem"))]
pub struct Collection<T> {
    pub section_title: Text,
    pub items: LooseList<T>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Collection {
            section_title: Text::default(),
            items: LooseList::default(),
        }
    }
}

/// `{section_title, items: ["...", ...]}` for plain-string sections.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ListSection {
    pub section_title: Text,
    pub items: TextList,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Summary {
    pub section_title: Text,
    pub content: Text,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SkillsSection {
    pub section_title: Text,
    pub categories: LooseList<SkillCategory>,
}

// ────────────────────────────────────────────────────────────────────────────
// Header
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Header {
    pub name: Text,
    pub title: Text,
    /// Post-nominal letters ("PhD"); only the academic layout shows them.
    pub credentials: Text,
    pub contact_info: Loose<ContactInfo>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ContactInfo {
    pub email: Contact,
    pub phone: Contact,
    pub location: Contact,
    pub linkedin: Contact,
    pub portfolio: Contact,
    pub orcid: Contact,
    pub researchgate: Contact,
}

/// `{value, link}`; a bare string is taken as the value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Contact {
    pub value: Text,
    pub link: Text,
}

impl<'de> Deserialize<'de> for Contact {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        let link = match &value {
            Value::Object(map) => map.get("link").map(Text::from_value).unwrap_or_default(),
            _ => Text::default(),
        };
        Ok(Contact {
            value: Text::from_value(&value),
            link,
        })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Items
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ExperienceItem {
    pub title: Text,
    pub company: Text,
    pub url: Text,
    pub location: Text,
    pub dates: DateRange,
    pub achievements: TextList,
    pub technologies: TextList,
}

impl LooseItem for ExperienceItem {}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EducationItem {
    pub degree: Text,
    pub institution: Text,
    pub url: Text,
    pub location: Text,
    pub dates: DateRange,
    pub gpa: Text,
    pub honors: TextList,
}

impl LooseItem for EducationItem {}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SkillCategory {
    pub name: Text,
    pub items: TextList,
    pub description: Text,
}

impl LooseItem for SkillCategory {}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProjectItem {
    pub title: Text,
    pub url: Text,
    pub description: Text,
    pub dates: DateRange,
    pub key_contributions: TextList,
    pub technologies: TextList,
}

impl LooseItem for ProjectItem {
    fn from_text(text: Text) -> Option<Self> {
        Some(ProjectItem {
            title: text,
            ..ProjectItem::default()
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CertificationItem {
    pub title: Text,
    pub institution: Text,
    pub url: Text,
    pub date: DateRange,
}

impl LooseItem for CertificationItem {
    fn from_text(text: Text) -> Option<Self> {
        Some(CertificationItem {
            title: text,
            ..CertificationItem::default()
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CourseItem {
    pub title: Text,
    pub institution: Text,
    pub location: Text,
    pub dates: DateRange,
}

impl LooseItem for CourseItem {
    fn from_text(text: Text) -> Option<Self> {
        Some(CourseItem {
            title: text,
            ..CourseItem::default()
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LanguageItem {
    pub name: Text,
    pub proficiency: Text,
}

impl LooseItem for LanguageItem {
    fn from_text(text: Text) -> Option<Self> {
        Some(LanguageItem {
            name: text,
            ..LanguageItem::default()
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct VolunteerItem {
    pub title: Text,
    pub organization: Text,
    pub location: Text,
    pub dates: DateRange,
    pub achievements: TextList,
}

impl LooseItem for VolunteerItem {}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AwardItem {
    pub title: Text,
    pub organization: Text,
    pub description: Text,
    pub date: DateRange,
}

impl LooseItem for AwardItem {
    fn from_text(text: Text) -> Option<Self> {
        Some(AwardItem {
            title: text,
            ..AwardItem::default()
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PublicationItem {
    pub title: Text,
    pub url: Text,
    pub date: DateRange,
    pub authors: Text,
    pub journal: Text,
    pub venue: Text,
}

impl LooseItem for PublicationItem {
    fn from_text(text: Text) -> Option<Self> {
        Some(PublicationItem {
            title: text,
            ..PublicationItem::default()
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ReferenceItem {
    pub name: Text,
    pub title: Text,
    pub company: Text,
    pub email: Text,
    pub phone: Text,
}

impl LooseItem for ReferenceItem {}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PatentItem {
    pub title: Text,
    pub number: Text,
    pub url: Text,
    pub date: DateRange,
}

impl LooseItem for PatentItem {}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ResearchItem {
    pub title: Text,
    pub institution: Text,
    pub organization: Text,
    pub url: Text,
    pub location: Text,
    pub dates: DateRange,
    /// Single-date form used by older payloads; read when `dates` is empty.
    pub date: DateRange,
    pub description: Text,
    pub achievements: TextList,
}

impl LooseItem for ResearchItem {}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CustomItem {
    pub title: Text,
    pub url: Text,
    pub description: Text,
    pub date: DateRange,
}

impl LooseItem for CustomItem {
    fn from_text(text: Text) -> Option<Self> {
        Some(CustomItem {
            title: text,
            ..CustomItem::default()
        })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_full_payload_deserializes() {
        let cv: CvData = serde_json::from_value(json!({
            "metadata": {"section_order": ["header", "experience"]},
            "sections": {
                "header": {
                    "name": "Jane Doe",
                    "contact_info": {"email": {"value": "jane@x.com", "link": "mailto:jane@x.com"}}
                },
                "experience": {
                    "section_title": "Work",
                    "items": [{"title": "Engineer", "company": "R&D Corp", "dates": {"start": "2020-01", "is_current": true}}]
                }
            },
            "rendering_rules": {"max_items_per_section": "No limit for now", "truncate_descriptions_at": 600}
        }))
        .unwrap();

        let sections = cv.sections.get().unwrap();
        let header = sections.header.get().unwrap();
        assert_eq!(header.name.get(), Some("Jane Doe"));
        let contact = &header.contact_info.get().unwrap().email;
        assert_eq!(contact.value.get(), Some("jane@x.com"));
        assert_eq!(contact.link.get(), Some("mailto:jane@x.com"));

        let experience = sections.experience.get().unwrap();
        assert_eq!(experience.section_title.get(), Some("Work"));
        assert_eq!(experience.items.iter().count(), 1);

        let rules = cv.rendering_rules.get().unwrap();
        assert_eq!(rules.max_items_per_section.get(), None);
        assert_eq!(rules.truncate_descriptions_at.get(), Some(600));
        assert_eq!(cv.section_order().len(), 2);
    }

    #[test]
    fn test_wrong_typed_sections_degrade_to_absent() {
        let cv: CvData = serde_json::from_value(json!({
            "sections": {
                "experience": "lots of it",
                "education": {"items": "none"},
                "skills": "Rust, Go",
                "header": {"name": ["Jane", "Doe"], "contact_info": 5}
            }
        }))
        .unwrap();

        let sections = cv.sections.get().unwrap();
        assert!(sections.experience.get().is_none());
        assert!(sections.education.get().unwrap().items.is_empty());
        assert!(sections.skills.get().is_none());
        let header = sections.header.get().unwrap();
        assert_eq!(header.name.get(), Some("Jane, Doe"));
        assert!(header.contact_info.get().is_none());
        assert!(cv.section_order().is_empty());
    }

    #[test]
    fn test_missing_sections_is_absent() {
        let cv: CvData = serde_json::from_value(json!({"metadata": {"section_order": []}})).unwrap();
        assert!(cv.sections.get().is_none());

        let cv: CvData = serde_json::from_value(json!({"sections": null})).unwrap();
        assert!(cv.sections.get().is_none());
    }

    #[test]
    fn test_awards_key_backs_achievements() {
        let cv: CvData = serde_json::from_value(json!({
            "sections": {"awards": {"items": ["Best Paper 2021"]}}
        }))
        .unwrap();
        let achievements = cv.sections.get().unwrap().achievements().unwrap();
        let first = achievements.items.iter().next().unwrap();
        assert_eq!(first.title.get(), Some("Best Paper 2021"));
    }

    #[test]
    fn test_contact_accepts_bare_string() {
        let info: ContactInfo =
            serde_json::from_value(json!({"phone": "+1 555 0100", "linkedin": null})).unwrap();
        assert_eq!(info.phone.value.get(), Some("+1 555 0100"));
        assert!(!info.phone.link.is_present());
        assert!(!info.linkedin.value.is_present());
    }

    #[test]
    fn test_reference_email_object_or_string() {
        let refs: Collection<ReferenceItem> = serde_json::from_value(json!({
            "items": [
                {"name": "A", "email": {"value": "a@x.com"}},
                {"name": "B", "email": "b@x.com", "phone": null}
            ]
        }))
        .unwrap();
        let emails: Vec<_> = refs.items.iter().map(|r| r.email.get()).collect();
        assert_eq!(emails, vec![Some("a@x.com"), Some("b@x.com")]);
    }
}
