//! Suggestion builders

mod attributes;
mod tags;
mod values;

pub use attributes::complete_attributes;
pub use tags::{complete_tags, tag_skeleton};
pub use values::complete_values;

use crate::config::CompletionSettings;
use crate::loader::KnowledgeBase;
use crate::types::{ResolvedContext, Suggestion};

/// Build the suggestions for a resolved context
///
/// `typed` is the word left of the cursor, used to filter attribute names.
/// Tag snippets are only offered in markup languages.
pub fn get_suggestions(
    kb: &KnowledgeBase,
    context: &ResolvedContext,
    typed: &str,
    language_id: &str,
    settings: &CompletionSettings,
) -> Vec<Suggestion> {
    match context {
        ResolvedContext::NoContext => Vec::new(),

        ResolvedContext::TagName => {
            if settings.is_markup_language(language_id) {
                complete_tags(kb, settings)
            } else {
                Vec::new()
            }
        }

        ResolvedContext::AttributeName { tag_name, .. } => {
            complete_attributes(kb, tag_name, typed, settings)
        }

        ResolvedContext::AttributeValue {
            tag_name,
            attribute_name,
        } => complete_values(kb, tag_name, attribute_name, settings),
    }
}
