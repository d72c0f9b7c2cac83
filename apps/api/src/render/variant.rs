use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::render::themes::{Academic, Clean, Minimal, Theme};
use crate::render::RenderError;

/// The closed set of document styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    /// Modern professional, ATS-friendly.
    Clean,
    /// Research CV with ORCID/ResearchGate contacts and citation lists.
    Academic,
    /// Plain single column.
    Minimal,
}

/// Registry entry returned by `variants()`.
#[derive(Debug, Clone, Serialize)]
pub struct VariantInfo {
    pub id: &'static str,
    pub aliases: &'static [&'static str],
    pub description: &'static str,
}

impl Variant {
    pub const ALL: [Variant; 3] = [Variant::Clean, Variant::Academic, Variant::Minimal];

    pub fn id(self) -> &'static str {
        match self {
            Variant::Clean => "clean",
            Variant::Academic => "academic",
            Variant::Minimal => "minimal",
        }
    }

    /// Legacy template identifiers still sent by older clients.
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            Variant::Clean => &["v1", "ats"],
            Variant::Academic => &["v2"],
            Variant::Minimal => &["v3"],
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Variant::Clean => "Modern professional layout, ATS-friendly tabular entries",
            Variant::Academic => "Research CV with icon contacts, ORCID and citation-style publications",
            Variant::Minimal => "Plain single-column layout with paragraph entries",
        }
    }

    pub fn theme(self) -> &'static dyn Theme {
        match self {
            Variant::Clean => &Clean,
            Variant::Academic => &Academic,
            Variant::Minimal => &Minimal,
        }
    }

    pub fn info(self) -> VariantInfo {
        VariantInfo {
            id: self.id(),
            aliases: self.aliases(),
            description: self.description(),
        }
    }

    pub fn valid_ids() -> Vec<&'static str> {
        Variant::ALL.into_iter().map(Variant::id).collect()
    }
}

impl FromStr for Variant {
    type Err = RenderError;

    /// Case-insensitive; accepts ids and aliases.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Variant::ALL
            .into_iter()
            .find(|v| v.id() == wanted || v.aliases().contains(&wanted.as_str()))
            .ok_or_else(|| RenderError::UnknownVariant {
                requested: s.to_string(),
                valid: Variant::valid_ids(),
            })
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}
