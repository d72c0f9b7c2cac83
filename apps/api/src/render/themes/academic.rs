//! Research CV layout: icon contact row with ORCID/ResearchGate, `\resumeSubheading`
//! entry lists, citation-style publications.

use crate::render::blocks::{Channel, ContactView, Detail, Entry, EntryKind, Field, HeaderView};
use crate::render::escape::escape;
use crate::render::format::{escape_url, strip_scheme};
use crate::render::sections::SectionKey;
use crate::render::themes::{field_line, header_lines, Theme};

pub struct Academic;

const PREAMBLE: &str = r"\documentclass[letterpaper,11pt]{article}

\usepackage{latexsym}
\usepackage[empty]{fullpage}
\usepackage{titlesec}
\usepackage[usenames,dvipsnames]{color}
\usepackage{enumitem}
\usepackage[hidelinks]{hyperref}
\usepackage{fancyhdr}
\usepackage[english]{babel}
\usepackage{tabularx}
\usepackage{fontawesome5}
\usepackage{amsmath,amsfonts,amssymb}
\usepackage{url}
\usepackage{microtype}

\definecolor{academicblue}{RGB}{25, 55, 135}
\definecolor{academicgray}{RGB}{85, 85, 85}

\input{glyphtounicode}

\pagestyle{fancy}
\fancyhf{}
\fancyfoot{}
\renewcommand{\headrulewidth}{0pt}
\renewcommand{\footrulewidth}{0pt}

\addtolength{\oddsidemargin}{-0.5in}
\addtolength{\evensidemargin}{-0.5in}
\addtolength{\textwidth}{1.0in}
\addtolength{\topmargin}{-.6in}
\addtolength{\textheight}{1.2in}

\urlstyle{same}
\raggedbottom
\raggedright
\setlength{\tabcolsep}{0in}

\titleformat{\section}{
  \vspace{-4pt}\scshape\raggedright\large\bfseries\color{academicblue}
}{}{0em}{}[\color{academicgray}\titlerule \vspace{-5pt}]

\newcommand{\resumeItem}[1]{
  \item\small{
    {#1 \vspace{-2pt}}
  }
}

% heading, dates, organization, location
\newcommand{\resumeSubheading}[4]{
  \vspace{-2pt}\item
    \begin{tabular*}{1.0\textwidth}[t]{l@{\extracolsep{\fill}}r}
      \textbf{#1} & \textbf{\small #2} \\
      \textit{\small #3} & \textit{\small #4} \\
    \end{tabular*}\vspace{-7pt}
}

% heading, dates
\newcommand{\projectEntry}[2]{
  \vspace{-2pt}\item
    \begin{tabular*}{1.0\textwidth}[t]{l@{\extracolsep{\fill}}r}
      \textbf{#1} & \textbf{\small #2} \\
    \end{tabular*}\vspace{-7pt}
}

\newcommand{\resumeParagraph}[1]{
  \item\small{
    \begin{flushleft}
      #1
    \end{flushleft}
    \vspace{-8pt}
  }
}

\newcommand{\resumeSubHeadingListStart}{\begin{itemize}[leftmargin=0.0in, label={}]}
\newcommand{\resumeSubHeadingListEnd}{\end{itemize}}
\newcommand{\resumeItemListStart}{\begin{itemize}}
\newcommand{\resumeItemListEnd}{\end{itemize}\vspace{-5pt}}

\begin{document}
\sloppy
";

impl Theme for Academic {
    fn preamble(&self) -> &'static str {
        PREAMBLE
    }

    fn default_title(&self, key: SectionKey) -> &'static str {
        match key {
            SectionKey::Summary => "Research Summary",
            SectionKey::Experience => "Academic & Professional Experience",
            SectionKey::Skills => "Technical Skills & Competencies",
            other => other.default_title(),
        }
    }

    fn header(&self, header: &HeaderView) -> String {
        let mut lines = Vec::new();
        if let Some(name) = &header.name {
            lines.push(format!("{{\\Huge \\bfseries \\color{{academicblue}} {name}}}"));
        }
        if let Some(credentials) = &header.credentials {
            lines.push(format!("{{\\large {credentials}}}"));
        }
        if let Some(title) = &header.title {
            lines.push(format!("{{\\large \\color{{academicgray}} {title}}}"));
        }
        if let Some(location) = header.contact(Channel::Location) {
            lines.push(format!("{{\\normalsize {}}}", escape(&location.value)));
        }

        let contacts: Vec<String> = header
            .contacts
            .iter()
            .filter(|c| c.channel != Channel::Location)
            .map(icon_contact)
            .collect();
        if !contacts.is_empty() {
            lines.push(format!("{{\\small {}}}", contacts.join(" ~ ")));
        }

        format!(
            "\\begin{{center}}\n    {}\n    \\vspace{{-8pt}}\n\\end{{center}}",
            header_lines(lines, "4pt")
        )
    }

    fn entries(&self, entries: &[Entry]) -> String {
        let rows: Vec<String> = entries
            .iter()
            .map(|entry| {
                let mut details = entry.details.clone();
                let mut row = match entry.kind {
                    EntryKind::Position => format!(
                        "  \\resumeSubheading\n    {{{}}}{{{}}}\n    {{{}}}{{{}}}",
                        entry.heading,
                        entry.date.as_deref().unwrap_or_default(),
                        entry.subheading.as_deref().unwrap_or_default(),
                        entry.location.as_deref().unwrap_or_default(),
                    ),
                    EntryKind::Titled => {
                        let below: Vec<&str> =
                            [entry.subheading.as_deref(), entry.location.as_deref()]
                                .into_iter()
                                .flatten()
                                .collect();
                        if !below.is_empty() {
                            details.insert(0, Detail::Text(format!("\\textit{{{}}}", below.join(", "))));
                        }
                        format!(
                            "  \\projectEntry{{{}}}{{{}}}",
                            entry.heading,
                            entry.date.as_deref().unwrap_or_default()
                        )
                    }
                };
                let details = self.details(&details);
                if !details.is_empty() {
                    row.push('\n');
                    row.push_str(&details);
                }
                row
            })
            .collect();

        format!(
            "\\resumeSubHeadingListStart\n{}\n\\resumeSubHeadingListEnd",
            rows.join("\n")
        )
    }

    fn items(&self, items: &[String]) -> String {
        if items.is_empty() {
            return String::new();
        }
        resume_items(items.iter().cloned())
    }

    fn fields(&self, fields: &[Field]) -> String {
        let rows: Vec<String> = fields
            .iter()
            .map(|field| {
                let line = field_line(field, |l| format!("\\textbf{{{l}:}}"));
                format!("  \\item\\small{{{line}}}")
            })
            .collect();
        format!(
            "\\begin{{itemize}}[leftmargin=0.15in, label={{}}]\n{}\n\\end{{itemize}}",
            rows.join("\n")
        )
    }

    fn paragraph(&self, text: &str) -> String {
        format!(
            "\\resumeSubHeadingListStart\n  \\resumeParagraph{{{text}}}\n\\resumeSubHeadingListEnd"
        )
    }

    /// All details of an entry share one `\resumeItem` list.
    fn details(&self, details: &[Detail]) -> String {
        let lines: Vec<String> = details
            .iter()
            .flat_map(|detail| match detail {
                Detail::Bullets(items) => items.clone(),
                Detail::Field { label, value } => vec![format!("{label}: {value}")],
                Detail::Text(text) => vec![text.clone()],
                Detail::Tags { label, items } => {
                    vec![format!("\\textbf{{{label}:}} {}", items.join(" | "))]
                }
            })
            .collect();
        if lines.is_empty() {
            return String::new();
        }
        resume_items(lines.into_iter())
    }
}

fn resume_items(lines: impl Iterator<Item = String>) -> String {
    let items: Vec<String> = lines
        .map(|line| format!("    \\resumeItem{{{line}}}"))
        .collect();
    format!(
        "  \\resumeItemListStart\n{}\n  \\resumeItemListEnd",
        items.join("\n")
    )
}

fn icon(channel: Channel) -> &'static str {
    match channel {
        Channel::Email => "\\faEnvelope",
        Channel::Phone => "\\faPhone",
        Channel::Location => "\\faMapMarker*",
        Channel::Linkedin => "\\faLinkedin",
        Channel::Portfolio => "\\faGlobe",
        Channel::Orcid => "\\faOrcid",
        Channel::Researchgate => "\\faResearchgate",
    }
}

/// `icon text`, wrapped in `\href` when the contact resolved a URL.
/// LinkedIn shows its address without scheme; the other profiles show their label.
fn icon_contact(contact: &ContactView) -> String {
    let text = match contact.channel {
        Channel::Linkedin => escape(strip_scheme(&contact.value)),
        channel => escape(channel.label().unwrap_or(contact.value.as_str())),
    };
    let body = match contact.channel {
        Channel::Phone => format!("\\raisebox{{-0.1\\height}}{}\\ {text}", icon(contact.channel)),
        channel => format!(
            "\\raisebox{{-0.2\\height}}{}\\ \\underline{{{text}}}",
            icon(channel)
        ),
    };
    match &contact.url {
        Some(url) => format!("\\href{{{}}}{{{body}}}", escape_url(url)),
        None => body,
    }
}
