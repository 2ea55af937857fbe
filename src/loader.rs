//! Load the component knowledge base (tags, attributes, icons)

use crate::types::{AttributeDef, TagDef};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Tag table file inside the knowledge base directory
pub const TAGS_FILE: &str = "element-tags.json";
/// Attribute table file inside the knowledge base directory
pub const ATTRIBUTES_FILE: &str = "element-attributes.json";
/// Key of the icon-name table inside the attribute file
const ICONS_KEY: &str = "icons";

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("knowledge base directory not found: {0}")]
    NotFound(PathBuf),
    #[error("failed to read {file}: {source}")]
    Io {
        file: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {file}: {source}")]
    Parse {
        file: PathBuf,
        source: serde_json::Error,
    },
    #[error("malformed metadata in {file}: {reason}")]
    Malformed { file: PathBuf, reason: String },
}

/// Read-only tag and attribute tables, in file order
#[derive(Debug, Default)]
pub struct KnowledgeBase {
    tags: Vec<TagDef>,
    tag_index: HashMap<String, usize>,
    attributes: Vec<(String, AttributeDef)>,
    attribute_index: HashMap<String, usize>,
    icons: Vec<String>,
}

impl KnowledgeBase {
    /// Load both tables from a knowledge base directory
    pub fn load(dir: &Path) -> Result<Self, LoadError> {
        if !dir.is_dir() {
            return Err(LoadError::NotFound(dir.to_path_buf()));
        }

        let tags_path = dir.join(TAGS_FILE);
        let attributes_path = dir.join(ATTRIBUTES_FILE);
        let tags = read_file(&tags_path)?;
        let attributes = read_file(&attributes_path)?;

        let kb = Self::from_sources(&tags, &attributes).map_err(|e| e.in_file(dir))?;
        tracing::info!(
            "Loaded {} tags, {} attributes, {} icons from {}",
            kb.tag_count(),
            kb.attribute_count(),
            kb.icons.len(),
            dir.display()
        );
        Ok(kb)
    }

    /// Build from the JSON text of the two tables
    pub fn from_sources(tags_json: &str, attributes_json: &str) -> Result<Self, LoadError> {
        let tags = parse_table(tags_json, TAGS_FILE)?;
        let attributes = parse_table(attributes_json, ATTRIBUTES_FILE)?;

        let mut kb = KnowledgeBase::default();
        for (name, value) in tags {
            let mut tag: TagDef = serde_json::from_value(value).map_err(|e| LoadError::Parse {
                file: PathBuf::from(TAGS_FILE),
                source: e,
            })?;
            tag.name = name;
            kb.insert_tag(tag);
        }

        for (key, value) in attributes {
            if key == ICONS_KEY {
                kb.icons = serde_json::from_value(value).map_err(|e| LoadError::Malformed {
                    file: PathBuf::from(ATTRIBUTES_FILE),
                    reason: format!("`{}` must be a list of icon names: {}", ICONS_KEY, e),
                })?;
                continue;
            }
            let attr: AttributeDef =
                serde_json::from_value(value).map_err(|e| LoadError::Parse {
                    file: PathBuf::from(ATTRIBUTES_FILE),
                    source: e,
                })?;
            kb.insert_attribute(key, attr.normalized());
        }

        kb.warn_dangling_children();
        Ok(kb)
    }

    fn insert_tag(&mut self, tag: TagDef) {
        match self.tag_index.get(&tag.name) {
            Some(&i) => self.tags[i] = tag,
            None => {
                self.tag_index.insert(tag.name.clone(), self.tags.len());
                self.tags.push(tag);
            }
        }
    }

    fn insert_attribute(&mut self, key: String, attr: AttributeDef) {
        match self.attribute_index.get(&key) {
            Some(&i) => self.attributes[i].1 = attr,
            None => {
                self.attribute_index.insert(key.clone(), self.attributes.len());
                self.attributes.push((key, attr));
            }
        }
    }

    fn warn_dangling_children(&self) {
        for tag in &self.tags {
            for child in &tag.child_tags {
                if !self.tag_index.contains_key(child) {
                    tracing::warn!("Tag {} references unknown child tag {}", tag.name, child);
                }
            }
        }
    }

    /// All tags in table order
    pub fn tags(&self) -> impl Iterator<Item = &TagDef> {
        self.tags.iter()
    }

    pub fn get_tag(&self, name: &str) -> Option<&TagDef> {
        self.tag_index.get(name).map(|&i| &self.tags[i])
    }

    /// Attributes declared by a tag, empty for unknown tags
    pub fn tag_attributes(&self, tag: &str) -> &[String] {
        self.get_tag(tag)
            .map(|t| t.attributes.as_slice())
            .unwrap_or_default()
    }

    /// Attribute entry by its exact table key
    fn get_attribute_entry(&self, key: &str) -> Option<&AttributeDef> {
        self.attribute_index.get(key).map(|&i| &self.attributes[i].1)
    }

    /// Attribute definition, the `tag/attr` entry wins over the bare one
    pub fn get_attribute(&self, tag: Option<&str>, attribute: &str) -> Option<&AttributeDef> {
        tag.and_then(|t| self.get_attribute_entry(&format!("{}/{}", t, attribute)))
            .or_else(|| self.get_attribute_entry(attribute))
    }

    /// All attribute entries (keys as written in the table), in table order
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &AttributeDef)> {
        self.attributes.iter().map(|(k, a)| (k.as_str(), a))
    }

    pub fn icons(&self) -> &[String] {
        &self.icons
    }

    pub fn tag_count(&self) -> usize {
        self.tags.len()
    }

    pub fn attribute_count(&self) -> usize {
        self.attributes.len()
    }
}

impl LoadError {
    /// Point file-relative errors at the real path
    fn in_file(self, dir: &Path) -> Self {
        match self {
            LoadError::Parse { file, source } => LoadError::Parse {
                file: dir.join(file),
                source,
            },
            LoadError::Malformed { file, reason } => LoadError::Malformed {
                file: dir.join(file),
                reason,
            },
            other => other,
        }
    }
}

fn read_file(path: &Path) -> Result<String, LoadError> {
    fs::read_to_string(path).map_err(|e| LoadError::Io {
        file: path.to_path_buf(),
        source: e,
    })
}

fn parse_table(json: &str, file: &str) -> Result<Map<String, Value>, LoadError> {
    let value: Value = serde_json::from_str(json).map_err(|e| LoadError::Parse {
        file: PathBuf::from(file),
        source: e,
    })?;
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(LoadError::Malformed {
            file: PathBuf::from(file),
            reason: "expected an object keyed by name".to_string(),
        }),
    }
}
