//! Attribute value completions

use crate::config::CompletionSettings;
use crate::loader::KnowledgeBase;
use crate::types::{AttributeKind, Suggestion, SuggestionKind};

/// Complete the value of `tag attribute="|`
///
/// Explicit options win; otherwise values come from the attribute's kind.
pub fn complete_values(
    kb: &KnowledgeBase,
    tag: &str,
    attribute: &str,
    settings: &CompletionSettings,
) -> Vec<Suggestion> {
    let Some(def) = kb.get_attribute(Some(tag), attribute) else {
        return Vec::new();
    };

    let values: Vec<String> = match (&def.options, def.kind) {
        (Some(options), _) => options.clone(),
        (None, AttributeKind::Boolean) => vec!["true".to_string(), "false".to_string()],
        (None, AttributeKind::Icon) => kb.icons().to_vec(),
        (None, AttributeKind::ShortcutIcon) => kb
            .icons()
            .iter()
            .map(|icon| {
                icon.strip_prefix(settings.icon_prefix.as_str())
                    .unwrap_or(icon)
                    .to_string()
            })
            .collect(),
        _ => Vec::new(),
    };

    values
        .into_iter()
        .map(|v| Suggestion::new(v, SuggestionKind::Value))
        .collect()
}
