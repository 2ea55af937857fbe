//! Resolve the markup context at the cursor
//!
//! Works on incomplete markup: the enclosing tag is found by walking upward
//! line by line through the scanner, within a bounded lookback window. The
//! attribute being typed is read from the cursor line only.

use crate::config::CompletionSettings;
use crate::document::DocumentView;
use crate::scanner::{is_name_char, scan_line};
use crate::types::{Position, ResolvedContext};
use regex::Regex;
use std::sync::LazyLock;

/// A `<script ...>` line on its own
static SCRIPT_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*<script.*>\s*$").expect("valid script pattern"));

/// The nearest unclosed opening tag before the cursor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnclosingTag {
    pub name: String,
    /// Absolute character offset of the tag's `<`
    pub offset: usize,
}

/// Outcome of the upward tag scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagScan {
    /// Cursor sits in the attribute area of this tag
    Found(EnclosingTag),
    /// Cursor is right after `<` or inside a tag name being typed
    ///
    /// A half-typed name like `<el-but` deliberately resolves here rather
    /// than to an enclosing tag named `el-but`.
    TypingName,
    /// A tag boundary was crossed, the cursor is not in a tag
    NotInTag,
    /// Lookback window or document start reached without a tag
    Exhausted,
}

/// Find the tag whose attribute list the cursor is in
pub fn resolve_enclosing_tag(
    document: &DocumentView,
    position: Position,
    settings: &CompletionSettings,
) -> TagScan {
    if !document.contains(position) {
        return TagScan::Exhausted;
    }

    for line in (0..=position.line).rev().take(settings.lookback_lines) {
        let text = if line == position.line {
            document.text_before(position)
        } else {
            document.line(line).unwrap_or_default()
        };
        let summary = scan_line(text);

        if line == position.line && summary.typing_name {
            return TagScan::TypingName;
        }
        if let Some(tag) = summary.open_tag {
            return TagScan::Found(EnclosingTag {
                offset: document.offset_at(Position::new(line, tag.column)),
                name: tag.name,
            });
        }
        if summary.boundary || summary.in_closing_tag {
            return TagScan::NotInTag;
        }
    }

    TagScan::Exhausted
}

/// Name of the attribute whose value is being typed: `type="pri|`
pub fn resolve_attribute_prefix(document: &DocumentView, position: Position) -> Option<String> {
    let before = document.text_before(position);

    // Drop an open value so whitespace inside it doesn't split the probe
    let stripped = match before.rfind(['"', '\'']) {
        Some(quote) => &before[..quote],
        None => before,
    };
    let start = stripped
        .char_indices()
        .rev()
        .find(|(_, c)| c.is_whitespace())
        .map(|(i, c)| i + c.len_utf8())
        .unwrap_or(0);

    parse_attribute_probe(&before[start..])
}

/// Accepts `name="value-so-far` and rejects anything with a closed value
fn parse_attribute_probe(probe: &str) -> Option<String> {
    let eq = probe.find('=')?;
    let mut value = probe[eq + 1..].trim_start().chars();
    let quote = value.next().filter(|c| *c == '"' || *c == '\'')?;
    if value.as_str().contains(quote) {
        return None;
    }
    attribute_name(&probe[..eq])
}

/// Strip binding syntax: `:visible.sync` and `@click.native` name `visible` and `click`
fn attribute_name(raw: &str) -> Option<String> {
    let raw = raw.trim();
    let name = ["v-bind:", "v-on:", ":", "@"]
        .iter()
        .find_map(|prefix| raw.strip_prefix(*prefix))
        .unwrap_or(raw);
    let name = name.split('.').next().unwrap_or(name);

    (!name.is_empty() && name.chars().all(is_name_char)).then(|| name.to_string())
}

/// Whether the cursor is below a `<script>` opener with no `</script>` in between
pub fn is_in_script_region(
    document: &DocumentView,
    position: Position,
    settings: &CompletionSettings,
) -> bool {
    let limit = settings.script_scan_lines.unwrap_or(usize::MAX);
    let last = position.line.min(document.line_count().saturating_sub(1));

    for line in (0..=last).rev().take(limit) {
        let text = document.line(line).unwrap_or_default();
        if text.contains("</script") {
            return false;
        }
        if SCRIPT_OPEN.is_match(text) {
            return true;
        }
    }
    false
}

/// Classify the cursor position for the suggestion builder
pub fn classify(
    document: &DocumentView,
    position: Position,
    settings: &CompletionSettings,
) -> ResolvedContext {
    if !document.contains(position) {
        return ResolvedContext::NoContext;
    }

    match resolve_enclosing_tag(document, position, settings) {
        TagScan::Found(tag) => match resolve_attribute_prefix(document, position) {
            Some(attribute_name) => ResolvedContext::AttributeValue {
                tag_name: tag.name,
                attribute_name,
            },
            None => ResolvedContext::AttributeName {
                tag_name: tag.name,
                tag_offset: tag.offset,
            },
        },
        scan => {
            let tag_start =
                scan == TagScan::TypingName || document.char_before(position) == Some('<');
            if tag_start && !is_in_script_region(document, position, settings) {
                ResolvedContext::TagName
            } else {
                ResolvedContext::NoContext
            }
        }
    }
}
