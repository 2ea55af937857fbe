//! Attribute name completions

use crate::config::CompletionSettings;
use crate::loader::KnowledgeBase;
use crate::types::{AttributeDef, AttributeKind, Suggestion, SuggestionKind};

/// Complete attribute names for a tag given the word typed so far
///
/// A leading `@` asks for event handlers only; anything else (including a
/// `:` binding) gets every attribute except event handlers.
pub fn complete_attributes(
    kb: &KnowledgeBase,
    tag: &str,
    typed: &str,
    settings: &CompletionSettings,
) -> Vec<Suggestion> {
    let event = typed.starts_with('@');
    let prefix = typed.strip_prefix(['@', ':']).unwrap_or(typed);

    if prefix.chars().next().is_some_and(|c| !c.is_ascii_alphabetic()) {
        return Vec::new();
    }

    let accepts = |name: &str, def: &AttributeDef| {
        (def.kind == AttributeKind::Method) == event && first_chars_equal(name, prefix)
    };

    let declared = kb.tag_attributes(tag);
    let mut completions: Vec<Suggestion> = declared
        .iter()
        .filter_map(|name| {
            let def = kb.get_attribute(Some(tag), name)?;
            accepts(name.as_str(), def)
                .then(|| attribute_suggestion(name, def, Some(tag), settings))
        })
        .collect();

    for (name, _) in kb.attributes() {
        if name.contains('/') || declared.iter().any(|d| d == name) {
            continue;
        }
        let Some(def) = kb.get_attribute(Some(tag), name) else {
            continue;
        };
        if def.global && accepts(name, def) {
            completions.push(attribute_suggestion(name, def, None, settings));
        }
    }

    completions
}

fn attribute_suggestion(
    name: &str,
    def: &AttributeDef,
    tag: Option<&str>,
    settings: &CompletionSettings,
) -> Suggestion {
    let (kind, insert_text) = match def.kind {
        AttributeKind::Flag => (SuggestionKind::Property, format!("{} ", name)),
        AttributeKind::Method => (SuggestionKind::Method, format!("{}=\"$1\"$0", name)),
        _ => (SuggestionKind::Property, format!("{}=\"$1\"$0", name)),
    };
    let detail = match tag {
        Some(tag) => format!("<{}>", tag),
        None => settings.library_label.clone(),
    };

    Suggestion::new(name, kind)
        .with_insert_text(insert_text)
        .with_detail(detail)
        .with_documentation(&def.description)
}

/// Case-insensitive first-character match, an empty prefix matches everything
fn first_chars_equal(name: &str, prefix: &str) -> bool {
    match (name.chars().next(), prefix.chars().next()) {
        (_, None) => true,
        (Some(a), Some(b)) => a.to_lowercase().eq(b.to_lowercase()),
        (None, Some(_)) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::tests::sample_kb;

    fn labels(items: &[Suggestion]) -> Vec<&str> {
        items.iter().map(|i| i.label.as_str()).collect()
    }

    fn complete(tag: &str, typed: &str) -> Vec<Suggestion> {
        complete_attributes(&sample_kb(), tag, typed, &CompletionSettings::default())
    }

    #[test]
    fn test_declared_then_global_without_methods() {
        let items = complete("el-button", "");
        assert_eq!(
            labels(&items),
            vec!["type", "size", "icon", "disabled", "v-loading", "hidden"]
        );
    }

    #[test]
    fn test_event_prefix_only_methods() {
        let items = complete("el-button", "@");
        assert_eq!(labels(&items), vec!["click", "focus"]);
        assert!(items.iter().all(|i| i.kind == SuggestionKind::Method));
    }

    #[test]
    fn test_event_prefix_filters_by_first_char() {
        let items = complete("el-button", "@F");
        assert_eq!(labels(&items), vec!["focus"]);
    }

    #[test]
    fn test_bind_prefix_excludes_methods() {
        let items = complete("el-button", ":");
        assert!(!labels(&items).contains(&"click"));
        assert!(labels(&items).contains(&"type"));
    }

    #[test]
    fn test_first_char_filter_is_case_insensitive() {
        let items = complete("el-button", "S");
        assert_eq!(labels(&items), vec!["size"]);

        let items = complete("el-button", ":di");
        assert_eq!(labels(&items), vec!["disabled"]);
    }

    #[test]
    fn test_non_letter_prefix() {
        assert!(complete("el-button", "1").is_empty());
        assert!(complete("el-button", "\"").is_empty());
    }

    #[test]
    fn test_unknown_tag_gets_globals() {
        let items = complete("el-unknown", "");
        assert_eq!(labels(&items), vec!["v-loading", "hidden"]);
        assert!(items
            .iter()
            .all(|i| i.detail.as_deref() == Some("element-ui")));
    }

    #[test]
    fn test_declared_attribute_falls_back_to_bare_entry() {
        let items = complete("el-col", "");
        assert_eq!(items[0].label, "span");
        assert_eq!(items[0].detail.as_deref(), Some("<el-col>"));
    }

    #[test]
    fn test_insert_text() {
        let items = complete("el-button", "");
        let type_item = items.iter().find(|i| i.label == "type").unwrap();
        assert_eq!(type_item.insert_text, "type=\"$1\"$0");
        assert_eq!(type_item.kind, SuggestionKind::Property);
        assert_eq!(type_item.detail.as_deref(), Some("<el-button>"));

        let flag = items.iter().find(|i| i.label == "hidden").unwrap();
        assert_eq!(flag.insert_text, "hidden ");
    }

    #[test]
    fn test_first_chars_equal() {
        assert!(first_chars_equal("type", ""));
        assert!(first_chars_equal("Type", "t"));
        assert!(!first_chars_equal("size", "t"));
        assert!(!first_chars_equal("", "t"));
    }
}
