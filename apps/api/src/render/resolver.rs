use std::collections::HashSet;

use tracing::debug;

use crate::models::cv::Sections;
use crate::models::loose::TextList;
use crate::render::sections::{generate, Rules, SectionKey};
use crate::render::themes::Theme;

/// Renders the sections named in `order`, in that order, through `theme`.
///
/// Unknown keys are skipped, a repeated key renders only at its first position,
/// and sections with nothing to show leave no trace (not even a separator).
pub fn resolve(sections: &Sections, order: &TextList, rules: &Rules, theme: &dyn Theme) -> String {
    let mut seen = HashSet::new();
    let mut rendered = Vec::new();

    for raw in order.iter() {
        let Some(key) = SectionKey::from_key(raw) else {
            debug!(key = raw, "skipping unknown section key");
            continue;
        };
        if !seen.insert(key) {
            debug!(key = raw, "skipping repeated section key");
            continue;
        }
        let Some(fragment) = generate(key, sections, rules) else {
            debug!(key = key.as_str(), "section has no content");
            continue;
        };
        let text = theme.fragment(&fragment);
        if !text.trim().is_empty() {
            rendered.push(text);
        }
    }

    debug!(sections = rendered.len(), "resolved section order");
    rendered.join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::themes::Clean;
    use serde_json::json;

    fn sections(value: serde_json::Value) -> Sections {
        serde_json::from_value(value).unwrap()
    }

    fn order(keys: &[&str]) -> TextList {
        TextList::from_value(&json!(keys))
    }

    #[test]
    fn test_follows_given_order() {
        let s = sections(json!({
            "summary": {"content": "First"},
            "interests": {"items": ["Second"]}
        }));
        let out = resolve(&s, &order(&["interests", "summary"]), &Rules::default(), &Clean);
        let interests = out.find("Second").unwrap();
        let summary = out.find("First").unwrap();
        assert!(interests < summary);
    }

    #[test]
    fn test_unknown_and_repeated_keys() {
        let s = sections(json!({"summary": {"content": "Only once"}}));
        let out = resolve(
            &s,
            &order(&["hobbies", "summary", "SUMMARY", "summary"]),
            &Rules::default(),
            &Clean,
        );
        assert_eq!(out.matches("Only once").count(), 1);
        assert!(!out.contains("hobbies"));
    }

    #[test]
    fn test_empty_sections_leave_no_separator() {
        let s = sections(json!({
            "summary": {"content": "Text"},
            "experience": {"items": [{}]}
        }));
        let out = resolve(&s, &order(&["experience", "summary"]), &Rules::default(), &Clean);
        assert!(out.starts_with("\\section{Professional Summary}"));
        assert!(!out.contains("\n\n\n"));
    }

    #[test]
    fn test_empty_order_renders_nothing() {
        let s = sections(json!({"summary": {"content": "Text"}}));
        assert_eq!(resolve(&s, &TextList::default(), &Rules::default(), &Clean), "");
    }
}
