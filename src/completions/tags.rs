//! Tag snippet completions

use crate::config::CompletionSettings;
use crate::loader::KnowledgeBase;
use crate::types::{Suggestion, SuggestionKind, TagDef};

/// One skeleton snippet per known tag, in table order
pub fn complete_tags(kb: &KnowledgeBase, settings: &CompletionSettings) -> Vec<Suggestion> {
    kb.tags()
        .map(|tag| {
            Suggestion::new(&tag.name, SuggestionKind::Snippet)
                .with_insert_text(tag_skeleton(kb, tag, settings.max_snippet_depth))
                .with_detail(&settings.library_label)
                .with_documentation(&tag.description)
        })
        .collect()
}

/// Nested markup for a tag and its child tags, without the leading `<`
///
/// Each default attribute gets a `$N` placeholder, numbered across the whole
/// skeleton in the order the attributes are written.
pub fn tag_skeleton(kb: &KnowledgeBase, tag: &TagDef, max_depth: usize) -> String {
    let mut builder = SkeletonBuilder {
        kb,
        max_depth,
        next_placeholder: 1,
        lines: Vec::new(),
    };
    builder.write_tag(tag, 0);

    let text = builder.lines.join("\n");
    match text.strip_prefix('<') {
        Some(rest) => rest.to_string(),
        None => text,
    }
}

struct SkeletonBuilder<'a> {
    kb: &'a KnowledgeBase,
    max_depth: usize,
    next_placeholder: usize,
    lines: Vec<String>,
}

impl<'a> SkeletonBuilder<'a> {
    fn write_tag(&mut self, tag: &TagDef, depth: usize) {
        let indent = "  ".repeat(depth);
        let open = format!("{}<{}{}>", indent, tag.name, self.placeholders(tag));
        let children = self.children(tag, depth);

        if children.is_empty() {
            self.lines.push(format!("{}</{}>", open, tag.name));
            return;
        }

        self.lines.push(open);
        for child in children {
            self.write_tag(child, depth + 1);
        }
        self.lines.push(format!("{}</{}>", indent, tag.name));
    }

    fn placeholders(&mut self, tag: &TagDef) -> String {
        let mut attrs = String::new();
        for attr in &tag.default_attributes {
            attrs.push_str(&format!(" {}=\"${}\"", attr, self.next_placeholder));
            self.next_placeholder += 1;
        }
        attrs
    }

    /// Child tags to expand; unknown ones and those past the depth limit are dropped
    fn children(&self, tag: &TagDef, depth: usize) -> Vec<&'a TagDef> {
        if tag.child_tags.is_empty() {
            return Vec::new();
        }
        if depth + 1 >= self.max_depth {
            tracing::debug!("Skeleton for {} truncated at depth {}", tag.name, depth);
            return Vec::new();
        }

        let kb = self.kb;
        tag.child_tags
            .iter()
            .filter_map(|name| {
                let child = kb.get_tag(name);
                if child.is_none() {
                    tracing::debug!("Unknown child tag {} of {}", name, tag.name);
                }
                child
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::tests::sample_kb;

    fn skeleton(name: &str, max_depth: usize) -> String {
        let kb = sample_kb();
        let tag = kb.get_tag(name).unwrap();
        tag_skeleton(&kb, tag, max_depth)
    }

    #[test]
    fn test_leaf_tag() {
        assert_eq!(skeleton("el-button", 8), "el-button></el-button>");
        assert_eq!(skeleton("el-col", 8), "el-col span=\"$1\"></el-col>");
    }

    #[test]
    fn test_nested_tags_number_placeholders_sequentially() {
        assert_eq!(
            skeleton("el-row", 8),
            "el-row gutter=\"$1\">\n  <el-col span=\"$2\"></el-col>\n</el-row>"
        );
    }

    #[test]
    fn test_cycle_is_truncated() {
        let text = skeleton("el-menu", 4);
        assert_eq!(
            text,
            "el-menu>\n  <el-submenu index=\"$1\">\n    <el-menu>\n      <el-submenu index=\"$2\"></el-submenu>\n    </el-menu>\n  </el-submenu>\n</el-menu>"
        );
    }

    #[test]
    fn test_cycle_with_default_depth_terminates() {
        let text = skeleton("el-menu", 8);
        assert_eq!(text.matches("<el-submenu").count(), 4);
        assert!(text.contains("$4"));
        assert!(!text.contains("$5"));
    }

    #[test]
    fn test_depth_one_keeps_only_root() {
        assert_eq!(skeleton("el-row", 1), "el-row gutter=\"$1\"></el-row>");
    }

    #[test]
    fn test_unknown_child_dropped() {
        let kb = KnowledgeBase::from_sources(
            r#"{"el-tabs": {"subtags": ["el-tab-pane"], "description": "Tabs"}}"#,
            "{}",
        )
        .unwrap();
        let tag = kb.get_tag("el-tabs").unwrap();
        assert_eq!(tag_skeleton(&kb, tag, 8), "el-tabs></el-tabs>");
    }

    #[test]
    fn test_complete_tags() {
        let kb = sample_kb();
        let items = complete_tags(&kb, &CompletionSettings::default());

        assert_eq!(items.len(), kb.tag_count());
        assert_eq!(items[0].label, "el-button");
        assert_eq!(items[0].kind, SuggestionKind::Snippet);
        assert_eq!(items[0].detail.as_deref(), Some("element-ui"));
        assert_eq!(items[0].documentation.as_deref(), Some("Commonly used button."));
    }
}
