//! Plain single-column layout with paragraph entries and a bullet-separated contact line.

use crate::render::blocks::{Entry, Field, HeaderView};
use crate::render::format::list_entries;
use crate::render::sections::SectionKey;
use crate::render::themes::{contact_text, field_line, header_lines, Theme};

pub struct Minimal;

const PREAMBLE: &str = r"\documentclass[a4paper,12pt]{article}
\usepackage[margin=1in]{geometry}
\usepackage{enumitem}
\usepackage{hyperref}
\usepackage{xcolor}
\usepackage{titlesec}

\definecolor{darkblue}{RGB}{0,0,139}

\titleformat{\section}{\color{darkblue}\large\bfseries\MakeUppercase}{}{0em}{}[\color{darkblue}\hrule]

\hypersetup{
    colorlinks=true,
    linkcolor=darkblue,
    urlcolor=darkblue
}

\setlength{\parindent}{0pt}

\begin{document}
";

impl Theme for Minimal {
    fn preamble(&self) -> &'static str {
        PREAMBLE
    }

    fn default_title(&self, key: SectionKey) -> &'static str {
        match key {
            SectionKey::Summary => "Summary",
            SectionKey::Experience => "Experience",
            SectionKey::Skills => "Skills",
            other => other.default_title(),
        }
    }

    fn header(&self, header: &HeaderView) -> String {
        let mut lines = Vec::new();
        if let Some(name) = &header.name {
            lines.push(format!("{{\\LARGE \\textbf{{{name}}}}}"));
        }
        if let Some(title) = &header.title {
            lines.push(title.clone());
        }
        let contacts: Vec<String> = header.contacts.iter().map(contact_text).collect();
        if !contacts.is_empty() {
            lines.push(contacts.join(" \\textbullet\\ "));
        }

        format!(
            "\\begin{{center}}\n    {}\n\\end{{center}}\n\\vspace{{15pt}}",
            header_lines(lines, "6pt")
        )
    }

    /// `\textbf{Heading} \hfill date`, then organization and location on a second line.
    fn entries(&self, entries: &[Entry]) -> String {
        entries
            .iter()
            .map(|entry| {
                let mut block = format!("\\textbf{{{}}}", entry.heading);
                if let Some(date) = &entry.date {
                    block.push_str(&format!(" \\hfill {date}"));
                }
                let second: Vec<&str> = [entry.subheading.as_deref(), entry.location.as_deref()]
                    .into_iter()
                    .flatten()
                    .collect();
                if second.is_empty() {
                    block.push_str("\\par");
                } else {
                    block.push_str(&format!(" \\\\[0pt]\n{}\\par", second.join(", ")));
                }

                let details = self.details(&entry.details);
                if !details.is_empty() {
                    block.push('\n');
                    block.push_str(&details);
                }
                block.push_str("\n\\vspace{8pt}");
                block
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    fn fields(&self, fields: &[Field]) -> String {
        fields
            .iter()
            .map(|field| {
                let line = field_line(field, |l| format!("\\textbf{{{l}:}}"));
                format!("{line}\\par\n\\vspace{{3pt}}")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn paragraph(&self, text: &str) -> String {
        format!("{text}\\par\n\\vspace{{10pt}}")
    }

    fn bullets(&self, items: &[String]) -> String {
        if items.is_empty() {
            return String::new();
        }
        format!(
            "\\begin{{itemize}}[leftmargin=15pt, rightmargin=0pt, itemsep=2pt]\n{}\n\\end{{itemize}}",
            list_entries(items)
        )
    }

    fn tags(&self, label: &str, items: &[String]) -> String {
        format!("\\textit{{{label}:}} {}\\par", items.join(", "))
    }
}
