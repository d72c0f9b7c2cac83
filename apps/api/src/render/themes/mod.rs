//! Per-variant layout primitives.
//!
//! A `Theme` turns the variant-neutral blocks from `render::blocks` into LaTeX.
//! Default methods carry the layout shared by every variant; each theme
//! overrides what its document class and macros do differently.

pub mod academic;
pub mod clean;
pub mod minimal;

use crate::render::blocks::{
    Body, ContactView, Detail, Entry, Field, Fragment, HeaderView, Section,
};
use crate::render::escape::escape;
use crate::render::format::{link, list_entries};
use crate::render::sections::SectionKey;

pub use academic::Academic;
pub use clean::Clean;
pub use minimal::Minimal;

pub trait Theme: Sync {
    /// Everything up to and including `\begin{document}`.
    fn preamble(&self) -> &'static str;

    fn closing(&self) -> &'static str {
        "\\end{document}\n"
    }

    fn default_title(&self, key: SectionKey) -> &'static str {
        key.default_title()
    }

    fn header(&self, header: &HeaderView) -> String;

    fn heading(&self, title: &str) -> String {
        format!("\\section{{{title}}}")
    }

    fn entries(&self, entries: &[Entry]) -> String;

    fn items(&self, items: &[String]) -> String {
        if items.is_empty() {
            return String::new();
        }
        format!(
            "\\begin{{itemize}}[leftmargin=*]\n{}\n\\end{{itemize}}",
            list_entries(items)
        )
    }

    fn fields(&self, fields: &[Field]) -> String;

    fn paragraph(&self, text: &str) -> String;

    fn bullets(&self, items: &[String]) -> String {
        if items.is_empty() {
            return String::new();
        }
        format!(
            "\\begin{{itemize}}[topsep=2pt]\n{}\n\\end{{itemize}}",
            list_entries(items)
        )
    }

    fn detail_field(&self, label: &str, value: &str) -> String {
        format!("\\textbf{{{label}:}} {value}\\par")
    }

    fn detail_text(&self, text: &str) -> String {
        format!("{text}\\par")
    }

    fn tags(&self, label: &str, items: &[String]) -> String {
        format!("\\textbf{{{label}:}} {}\\par", items.join(", "))
    }

    fn details(&self, details: &[Detail]) -> String {
        details
            .iter()
            .map(|detail| match detail {
                Detail::Bullets(items) => self.bullets(items),
                Detail::Field { label, value } => self.detail_field(label, value),
                Detail::Text(text) => self.detail_text(text),
                Detail::Tags { label, items } => self.tags(label, items),
            })
            .filter(|rendered| !rendered.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn section(&self, section: &Section) -> String {
        let title = section
            .title
            .clone()
            .unwrap_or_else(|| escape(self.default_title(section.key)));
        let body = match &section.body {
            Body::Entries(entries) => self.entries(entries),
            Body::Items(items) => self.items(items),
            Body::Fields(fields) => self.fields(fields),
            Body::Paragraph(text) => self.paragraph(text),
        };
        format!("{}\n{body}", self.heading(&title))
    }

    fn fragment(&self, fragment: &Fragment) -> String {
        match fragment {
            Fragment::Header(header) => self.header(header),
            Fragment::Section(section) => self.section(section),
        }
    }
}

/// `label: value`, or the bare value for unlabeled fields.
pub(crate) fn field_line(field: &Field, bold: impl Fn(&str) -> String) -> String {
    match &field.label {
        Some(label) => format!("{} {}", bold(label), field.value),
        None => field.value.clone(),
    }
}

/// A contact as display text: profiles show their label, everything else its value.
/// Linked only when the contact resolved a URL.
pub(crate) fn contact_text(contact: &ContactView) -> String {
    let text = contact.channel.label().unwrap_or(contact.value.as_str());
    link(Some(text), contact.url.as_deref())
}

/// Joins non-empty header lines with a forced break; never leaves a trailing `\\`.
pub(crate) fn header_lines(lines: Vec<String>, gap: &str) -> String {
    lines
        .into_iter()
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(&format!(" \\\\[{gap}]\n    "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_lines_never_trail_a_break() {
        assert_eq!(
            header_lines(vec!["A".into(), String::new(), "B".into()], "4pt"),
            "A \\\\[4pt]\n    B"
        );
        assert_eq!(header_lines(vec!["A".into()], "4pt"), "A");
        assert_eq!(header_lines(vec![], "4pt"), "");
    }

    #[test]
    fn test_contact_text() {
        use crate::render::blocks::Channel;

        let email = ContactView {
            channel: Channel::Email,
            value: "jane_doe@x.com".into(),
            url: None,
        };
        let linkedin = ContactView {
            channel: Channel::Linkedin,
            value: "linkedin.com/in/jane".into(),
            url: Some("https://linkedin.com/in/jane".into()),
        };
        assert_eq!(contact_text(&email), "jane\\_doe@x.com");
        assert_eq!(
            contact_text(&linkedin),
            "\\href{https://linkedin.com/in/jane}{LinkedIn}"
        );
    }

    #[test]
    fn test_field_line() {
        let labeled = Field {
            label: Some("Go".into()),
            value: "yes".into(),
        };
        let bare = Field {
            label: None,
            value: "Docker".into(),
        };
        let bold = |l: &str| format!("\\textbf{{{l}:}}");
        assert_eq!(field_line(&labeled, bold), "\\textbf{Go:} yes");
        assert_eq!(field_line(&bare, bold), "Docker");
    }
}
