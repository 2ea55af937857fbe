//! Core types for element-helper

use serde::{Deserialize, Serialize};

/// Cursor position in a document (zero-based, `character` counts chars)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Position {
    pub line: usize,
    pub character: usize,
}

impl Position {
    pub fn new(line: usize, character: usize) -> Self {
        Self { line, character }
    }
}

/// What the cursor is positioned on, as seen by the completion provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedContext {
    /// Nothing to suggest here
    NoContext,
    /// After '<': <|
    TagName,
    /// Inside a tag's attribute list: <el-button |
    AttributeName { tag_name: String, tag_offset: usize },
    /// Inside an unterminated attribute value: <el-button type="|
    AttributeValue {
        tag_name: String,
        attribute_name: String,
    },
}

/// The kind of suggestion, mirrors the editor's completion item kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionKind {
    Snippet,
    Property,
    Method,
    Value,
}

/// A single completion candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    /// Display text
    pub label: String,
    /// Text or snippet template to insert
    pub insert_text: String,
    pub kind: SuggestionKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documentation: Option<String>,
}

impl Suggestion {
    /// Create a suggestion that inserts its own label
    pub fn new(label: impl Into<String>, kind: SuggestionKind) -> Self {
        let label = label.into();
        Self {
            insert_text: label.clone(),
            label,
            kind,
            detail: None,
            documentation: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Set the documentation, empty text is dropped
    pub fn with_documentation(mut self, doc: impl Into<String>) -> Self {
        let doc = doc.into();
        self.documentation = (!doc.is_empty()).then_some(doc);
        self
    }

    pub fn with_insert_text(mut self, text: impl Into<String>) -> Self {
        self.insert_text = text.into();
        self
    }
}

/// Component tag definition from `element-tags.json`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TagDef {
    /// Filled in from the table key by the loader
    #[serde(skip)]
    pub name: String,
    #[serde(rename = "subtags", alias = "childTags", default)]
    pub child_tags: Vec<String>,
    #[serde(rename = "defaults", alias = "defaultAttributes", default)]
    pub default_attributes: Vec<String>,
    /// Attributes declared for this tag, in suggestion order
    #[serde(default)]
    pub attributes: Vec<String>,
    #[serde(default)]
    pub description: String,
}

/// How an attribute's value is completed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "String")]
pub enum AttributeKind {
    /// Bare attribute without a value: `disabled`
    Flag,
    /// Event handler, bound with `@`
    Method,
    Boolean,
    Icon,
    /// Icon name without the icon class prefix
    ShortcutIcon,
    Enumerated,
    #[default]
    FreeText,
}

impl From<String> for AttributeKind {
    fn from(type_name: String) -> Self {
        match type_name.trim().to_ascii_lowercase().as_str() {
            "flag" => Self::Flag,
            "method" => Self::Method,
            "boolean" => Self::Boolean,
            "icon" => Self::Icon,
            "shortcut-icon" => Self::ShortcutIcon,
            "enum" | "enumerated" => Self::Enumerated,
            _ => Self::FreeText,
        }
    }
}

/// Attribute definition from `element-attributes.json`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AttributeDef {
    #[serde(rename = "type", default)]
    pub kind: AttributeKind,
    #[serde(default)]
    pub options: Option<Vec<String>>,
    #[serde(default)]
    pub description: String,
    /// Applies to every tag
    #[serde(default)]
    pub global: bool,
}

impl AttributeDef {
    /// Attributes with an option list but no recognised type are enumerated
    pub(crate) fn normalized(mut self) -> Self {
        if self.kind == AttributeKind::FreeText && self.options.is_some() {
            self.kind = AttributeKind::Enumerated;
        }
        self
    }
}
