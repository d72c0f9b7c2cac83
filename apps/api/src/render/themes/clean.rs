//! Modern professional layout, kept ATS-friendly: no icons, no columns beyond
//! the two-sided entry rows.

use crate::render::blocks::{Entry, EntryKind, Field, HeaderView};
use crate::render::themes::{contact_text, field_line, header_lines, Theme};

pub struct Clean;

const PREAMBLE: &str = r"\documentclass[11pt,a4paper]{article}

\usepackage[utf8]{inputenc}
\usepackage[T1]{fontenc}
\usepackage{lmodern}
\usepackage{microtype}
\usepackage{hyperref}
\usepackage{geometry}
\usepackage{enumitem}
\usepackage{titlesec}
\usepackage{xcolor}
\usepackage{tabularx}

\definecolor{primarycolor}{RGB}{47, 79, 79}
\definecolor{accentcolor}{RGB}{70, 130, 180}
\definecolor{textcolor}{RGB}{33, 37, 41}
\definecolor{lightgray}{RGB}{160, 160, 160}

\geometry{
  top=0.8in,
  bottom=0.8in,
  left=0.75in,
  right=0.75in,
  headheight=0pt,
  headsep=0pt,
  footskip=0.3in
}

\setlength{\parindent}{0pt}
\setlength{\parskip}{0pt}

\titleformat{\section}
  {\color{primarycolor}\Large\bfseries\sffamily}
  {}
  {0em}
  {}
  [\vspace{2pt}{\color{accentcolor}\titlerule[1pt]}\vspace{4pt}]
\titlespacing*{\section}{0pt}{16pt}{8pt}

\setlist[itemize]{
  topsep=3pt,
  itemsep=1pt,
  parsep=0pt,
  leftmargin=1.2em,
  label={\color{accentcolor}\textbullet}
}

\hypersetup{
  colorlinks=true,
  linkcolor=accentcolor,
  urlcolor=accentcolor,
  pdfborder={0 0 0},
  pdfstartview=FitH
}

% label, value
\newcommand{\cvitem}[2]{%
  \noindent\textbf{\color{primarycolor}#1:} #2\par\vspace{3pt}%
}

% heading, organization, location, dates
\newcommand{\workitem}[4]{%
  \noindent
  \begin{tabularx}{\textwidth}{@{}X@{}r@{}}
    \textbf{\color{primarycolor}#1} & \textbf{\color{accentcolor}#4} \\
    \textit{#2} & \textit{#3} \\
  \end{tabularx}\par
  \vspace{2pt}%
}

\newcommand{\contactsep}{\color{lightgray}\textbar\color{textcolor}}

\begin{document}
\color{textcolor}
";

impl Theme for Clean {
    fn preamble(&self) -> &'static str {
        PREAMBLE
    }

    fn header(&self, header: &HeaderView) -> String {
        let contacts: Vec<String> = header.contacts.iter().map(contact_text).collect();

        let mut lines = Vec::new();
        if let Some(name) = &header.name {
            lines.push(format!("{{\\Huge\\bfseries\\color{{primarycolor}} {name}}}"));
        }
        if let Some(title) = &header.title {
            lines.push(format!("{{\\large\\color{{accentcolor}} {title}}}"));
        }
        if !contacts.is_empty() {
            lines.push(format!("{{\\normalsize {}}}", contacts.join(" \\contactsep{} ")));
        }

        format!(
            "\\begin{{center}}\n    {}\n\\end{{center}}\n\\vspace{{8pt}}",
            header_lines(lines, "0.5em")
        )
    }

    fn entries(&self, entries: &[Entry]) -> String {
        entries
            .iter()
            .map(|entry| {
                let mut block = match entry.kind {
                    EntryKind::Position => format!(
                        "\\workitem{{{}}}{{{}}}{{{}}}{{{}}}",
                        entry.heading,
                        entry.subheading.as_deref().unwrap_or_default(),
                        entry.location.as_deref().unwrap_or_default(),
                        entry.date.as_deref().unwrap_or_default(),
                    ),
                    EntryKind::Titled => titled_row(entry),
                };
                let details = self.details(&entry.details);
                if !details.is_empty() {
                    block.push('\n');
                    block.push_str(&details);
                }
                block.push_str("\n\\vspace{6pt}");
                block
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn fields(&self, fields: &[Field]) -> String {
        let lines: Vec<String> = fields
            .iter()
            .map(|field| field_line(field, |l| format!("\\textbf{{\\color{{primarycolor}}{l}:}}")))
            .collect();
        format!("\\noindent {}\\par\n\\vspace{{6pt}}", lines.join(" \\\\[4pt]\n"))
    }

    fn paragraph(&self, text: &str) -> String {
        format!("\\noindent {text}\\par\n\\vspace{{6pt}}")
    }

    fn detail_field(&self, label: &str, value: &str) -> String {
        format!("\\cvitem{{{label}}}{{{value}}}")
    }

    fn detail_text(&self, text: &str) -> String {
        format!("\\noindent {text}\\par")
    }

    fn tags(&self, label: &str, items: &[String]) -> String {
        format!(
            "\\textbf{{\\color{{primarycolor}}{label}:}} {}\\par",
            items.join(" | ")
        )
    }
}

/// `Heading \hfill date` on one line, organization in italics below.
fn titled_row(entry: &Entry) -> String {
    let mut row = format!("\\noindent\\textbf{{\\color{{primarycolor}}{}}}", entry.heading);
    if let Some(date) = &entry.date {
        row.push_str(&format!("\\hfill{{\\color{{accentcolor}}\\textit{{{date}}}}}"));
    }
    row.push_str("\\par");
    let below: Vec<&str> = [entry.subheading.as_deref(), entry.location.as_deref()]
        .into_iter()
        .flatten()
        .collect();
    if !below.is_empty() {
        row.push_str(&format!("\n\\textit{{{}}}\\par", below.join(", ")));
    }
    row
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::blocks::{Channel, ContactView};

    #[test]
    fn test_header_joins_present_lines_only() {
        let header = HeaderView {
            name: Some("Jane Doe".into()),
            contacts: vec![
                ContactView {
                    channel: Channel::Email,
                    value: "jane@x.com".into(),
                    url: None,
                },
                ContactView {
                    channel: Channel::Location,
                    value: "Berlin".into(),
                    url: None,
                },
            ],
            ..HeaderView::default()
        };
        let out = Clean.header(&header);
        assert!(out.contains("Jane Doe} \\\\[0.5em]\n    {\\normalsize jane@x.com \\contactsep{} Berlin}"));
        assert!(!out.contains("accentcolor} }"));
    }

    #[test]
    fn test_position_entry_uses_workitem() {
        let entry = Entry::position("Engineer".into())
            .subheading(Some("Acme".into()))
            .date(Some("Jan 2020 -- Present".into()))
            .bullets(vec!["Shipped".into()]);
        let out = Clean.entries(&[entry]);
        assert!(out.starts_with("\\workitem{Engineer}{Acme}{}{Jan 2020 -- Present}\n\\begin{itemize}"));
        assert!(out.ends_with("\\end{itemize}\n\\vspace{6pt}"));
    }

    #[test]
    fn test_titled_entry_without_date_has_no_hfill() {
        let out = Clean.entries(&[Entry::titled("Widget".into())]);
        assert!(!out.contains("\\hfill"));
        assert!(out.contains("\\textbf{\\color{primarycolor}Widget}\\par"));
    }

    #[test]
    fn test_fields_layout() {
        let fields = vec![
            Field {
                label: Some("Languages".into()),
                value: "Go, Rust".into(),
            },
            Field {
                label: None,
                value: "Docker".into(),
            },
        ];
        assert_eq!(
            Clean.fields(&fields),
            "\\noindent \\textbf{\\color{primarycolor}Languages:} Go, Rust \\\\[4pt]\nDocker\\par\n\\vspace{6pt}"
        );
    }
}
