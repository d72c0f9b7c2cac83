//! CV-to-LaTeX rendering engine.
//!
//! `render` is a pure function of its input: CV data and a variant id in, one
//! complete document out. Field-level problems degrade to fallbacks inside the
//! generators; only a missing root or an unknown variant is an error.

pub mod blocks;
pub mod escape;
pub mod format;
pub mod handlers;
pub mod resolver;
pub mod sections;
pub mod themes;
pub mod variant;

use thiserror::Error;
use tracing::debug;

use crate::models::cv::CvData;

pub use variant::{Variant, VariantInfo};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("missing root data: '{0}' is absent")]
    MissingRootData(&'static str),

    #[error("unknown variant '{requested}'; valid variants: {}", .valid.join(", "))]
    UnknownVariant {
        requested: String,
        valid: Vec<&'static str>,
    },
}

/// Renders `cv` with the variant named by `variant_id` (id or alias, any case).
pub fn render(cv: &CvData, variant_id: &str) -> Result<String, RenderError> {
    let variant: Variant = variant_id.parse()?;
    render_variant(cv, variant)
}

/// Renders `cv` with an already-resolved variant.
pub fn render_variant(cv: &CvData, variant: Variant) -> Result<String, RenderError> {
    let sections = cv
        .sections
        .get()
        .ok_or(RenderError::MissingRootData("sections"))?;

    let theme = variant.theme();
    let rules = sections::Rules::from_cv(cv);
    let body = resolver::resolve(sections, cv.section_order(), &rules, theme);
    debug!(%variant, bytes = body.len(), "rendered document body");

    let mut document = String::with_capacity(theme.preamble().len() + body.len() + 64);
    document.push_str(theme.preamble());
    document.push('\n');
    if !body.is_empty() {
        document.push_str(&body);
        document.push_str("\n\n");
    }
    document.push_str(theme.closing());
    Ok(document)
}

/// Every registered variant, in a stable order.
pub fn variants() -> Vec<VariantInfo> {
    Variant::ALL.into_iter().map(Variant::info).collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::{json, Value};

    fn cv(value: Value) -> CvData {
        serde_json::from_value(value).unwrap()
    }

    /// Brace depth never goes negative and ends at zero; escaped characters are skipped.
    fn braces_balanced(doc: &str) -> bool {
        let mut depth: i64 = 0;
        let mut chars = doc.chars();
        while let Some(c) = chars.next() {
            match c {
                '\\' => {
                    chars.next();
                }
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth < 0 {
                        return false;
                    }
                }
                _ => {}
            }
        }
        depth == 0
    }

    fn environments_balanced(doc: &str) -> bool {
        doc.matches("\\begin{").count() == doc.matches("\\end{").count()
            && doc.matches("\\resumeSubHeadingListStart").count()
                == doc.matches("\\resumeSubHeadingListEnd").count()
            && doc.matches("\\resumeItemListStart").count()
                == doc.matches("\\resumeItemListEnd").count()
    }

    fn assert_structurally_complete(doc: &str) {
        assert!(doc.starts_with("\\documentclass"), "no preamble");
        assert!(doc.trim_end().ends_with("\\end{document}"), "no closing");
        assert_eq!(doc.matches("\\begin{document}").count(), 1);
        assert!(braces_balanced(doc), "unbalanced braces:\n{doc}");
        assert!(environments_balanced(doc), "unbalanced environments:\n{doc}");
    }

    fn scenario() -> CvData {
        cv(json!({
            "metadata": {"section_order": ["header", "summary", "skills"]},
            "sections": {
                "header": {
                    "name": "Jane Doe",
                    "title": "Engineer",
                    "contact_info": {"email": {"value": "jane@x.com"}}
                },
                "summary": {"content": "Builds things."},
                "skills": {"categories": [{"name": "Languages", "items": ["Go", "Rust"]}]},
                "experience": {"items": [{"title": "Hidden", "company": "Not listed"}]}
            }
        }))
    }

    /// A payload exercising every section, for structure checks.
    fn everything(text: &str) -> Value {
        let item = json!({
            "title": text, "company": text, "organization": text, "institution": text,
            "degree": text, "name": text, "url": format!("https://x.io/{text}"),
            "location": text, "description": text, "authors": text, "journal": text,
            "number": text, "gpa": text, "proficiency": text, "email": text, "phone": text,
            "dates": {"start": "2020-01", "end": text}, "date": "2019",
            "achievements": [text], "honors": [text], "technologies": [text],
            "key_contributions": [text], "items": [text]
        });
        let collection = json!({"section_title": text, "items": [item.clone(), item]});
        json!({
            "metadata": {"section_order": [
                "header", "summary", "experience", "education", "skills", "projects",
                "certifications", "courses", "languages", "volunteer", "achievements",
                "publications", "interests", "references", "patents", "research", "custom"
            ]},
            "sections": {
                "header": {
                    "name": text, "title": text, "credentials": text,
                    "contact_info": {
                        "email": {"value": text}, "phone": {"value": text},
                        "location": {"value": text}, "linkedin": {"value": text},
                        "portfolio": {"value": text, "link": format!("https://{text}")},
                        "orcid": {"value": text}, "researchgate": {"value": text}
                    }
                },
                "summary": {"section_title": text, "content": text},
                "experience": collection, "education": collection, "projects": collection,
                "certifications": collection, "courses": collection, "languages": collection,
                "volunteer": collection, "achievements": collection, "publications": collection,
                "references": collection, "patents": collection, "research": collection,
                "custom": collection,
                "skills": {"section_title": text, "categories": [{"name": text, "items": [text]}]},
                "interests": {"section_title": text, "items": [text, text]}
            }
        })
    }

    // ── degenerate input ────────────────────────────────────────────────────

    #[test]
    fn test_name_only_header_every_variant() {
        let data = cv(json!({
            "metadata": {"section_order": ["header"]},
            "sections": {"header": {"name": "Jane Doe"}}
        }));
        for variant in Variant::ALL {
            let doc = render_variant(&data, variant).unwrap();
            assert_eq!(doc.matches("Jane Doe").count(), 1, "{variant}");
            assert!(!doc.contains("\\section{"), "{variant}");
            assert_structurally_complete(&doc);
        }
    }

    #[test]
    fn test_empty_order_is_bare_shell() {
        let data = cv(json!({"sections": {"summary": {"content": "Unlisted"}}}));
        for variant in Variant::ALL {
            let doc = render_variant(&data, variant).unwrap();
            assert!(!doc.contains("Unlisted"));
            assert_eq!(doc, format!("{}\n{}", variant.theme().preamble(), variant.theme().closing()));
        }
    }

    // ── concrete scenario ───────────────────────────────────────────────────

    #[test]
    fn test_scenario_values_once_and_in_order() {
        let data = scenario();
        for variant in Variant::ALL {
            let doc = render_variant(&data, variant).unwrap();
            let mut last = 0;
            for needle in ["Jane Doe", "Engineer", "jane@x.com", "Builds things.", "Go, Rust"] {
                assert_eq!(doc.matches(needle).count(), 1, "{needle} in {variant}");
                let at = doc.find(needle).unwrap();
                assert!(at >= last, "{needle} out of order in {variant}");
                last = at;
            }
            assert!(!doc.contains("Hidden"));
            assert!(!doc.contains(variant.theme().default_title(sections::SectionKey::Experience)));
            assert_structurally_complete(&doc);
        }
    }

    #[test]
    fn test_linked_email_and_phone_print_once() {
        let data = cv(json!({
            "metadata": {"section_order": ["header"]},
            "sections": {"header": {
                "name": "Jane Doe",
                "contact_info": {
                    "email": {"value": "jane@x.com", "link": "mailto:jane@x.com"},
                    "phone": {"value": "+1 555 0100", "link": "tel:+15550100"}
                }
            }}
        }));
        for variant in Variant::ALL {
            let doc = render_variant(&data, variant).unwrap();
            assert_eq!(doc.matches("jane@x.com").count(), 1, "{variant}");
            assert!(!doc.contains("mailto:"), "{variant}");
            assert!(!doc.contains("tel:"), "{variant}");
        }
    }

    #[test]
    fn test_render_is_deterministic() {
        let data = scenario();
        for variant in ["clean", "v2", "MINIMAL"] {
            assert_eq!(render(&data, variant).unwrap(), render(&data, variant).unwrap());
        }
    }

    // ── hide empty sections ─────────────────────────────────────────────────

    #[test]
    fn test_sections_without_meaningful_items_have_no_heading() {
        let data = cv(json!({
            "metadata": {"section_order": ["experience", "projects", "skills", "summary", "publications"]},
            "sections": {
                "experience": {"section_title": "Work History", "items": [{}, {"dates": {"start": "2020"}}]},
                "projects": {"section_title": "Side Projects", "items": []},
                "skills": {"section_title": "Toolbox", "categories": [{"name": "Tools"}]},
                "summary": {"section_title": "About Me", "content": "  "},
                "publications": {"section_title": "Papers", "items": [{"authors": "Anon"}]}
            }
        }));
        for variant in Variant::ALL {
            let doc = render_variant(&data, variant).unwrap();
            for title in ["Work History", "Side Projects", "Toolbox", "About Me", "Papers"] {
                assert!(!doc.contains(title), "{title} shown by {variant}");
            }
            assert!(!doc.contains("\\section{"));
        }
    }

    // ── escaping ────────────────────────────────────────────────────────────

    #[test]
    fn test_reserved_characters_never_leak() {
        let data = cv(everything("R&D Corp"));
        for variant in Variant::ALL {
            let doc = render_variant(&data, variant).unwrap();
            assert!(doc.contains("R\\&D Corp"));
            let body = &doc[variant.theme().preamble().len()..];
            assert!(!body.contains("R&D"), "unescaped ampersand in {variant}");
            assert_structurally_complete(&doc);
        }
    }

    #[test]
    fn test_every_section_renders_in_every_variant() {
        let data = cv(everything("Lorem"));
        for variant in Variant::ALL {
            let doc = render_variant(&data, variant).unwrap();
            assert_structurally_complete(&doc);
            assert!(doc.matches("\\section{").count() >= 16, "{variant}");
            assert!(doc.contains("(Unpublished)") || doc.contains("(2019)"));
        }
    }

    // ── errors ──────────────────────────────────────────────────────────────

    #[test]
    fn test_unknown_variant() {
        let err = render(&scenario(), "fancy").unwrap_err();
        assert!(matches!(err, RenderError::UnknownVariant { .. }));
    }

    #[test]
    fn test_missing_sections() {
        let data = cv(json!({"metadata": {"section_order": ["header"]}}));
        let err = render_variant(&data, Variant::Clean).unwrap_err();
        assert!(matches!(err, RenderError::MissingRootData("sections")));
        assert_eq!(err.to_string(), "missing root data: 'sections' is absent");
    }

    #[test]
    fn test_variants_registry() {
        let ids: Vec<&str> = variants().iter().map(|v| v.id).collect();
        assert_eq!(ids, vec!["clean", "academic", "minimal"]);
    }

    // ── structural properties ───────────────────────────────────────────────

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_adversarial_text_keeps_structure(text in "[&%$#_{}~^\\[\\]\\\\ a-z]{1,24}") {
            let data = cv(everything(&text));
            for variant in Variant::ALL {
                let doc = render_variant(&data, variant).unwrap();
                prop_assert!(braces_balanced(&doc), "unbalanced braces in {}", variant);
                prop_assert!(environments_balanced(&doc), "unbalanced environments in {}", variant);
            }
        }
    }
}
