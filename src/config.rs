//! Configuration loading
//!
//! Settings come from a YAML file; every field has a default so an empty or
//! partial file is valid.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct HelperConfig {
    /// Log level filter used when `RUST_LOG` is not set
    pub log_level: String,
    pub knowledge_base: KnowledgeBaseSettings,
    pub completion: CompletionSettings,
    pub preview: PreviewConfig,
}

/// Where to look for the knowledge base directory
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct KnowledgeBaseSettings {
    pub search_paths: Vec<PathBuf>,
}

/// Tunables of the context resolver and suggestion builder
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CompletionSettings {
    /// Lines inspected when looking for the enclosing tag, cursor line included
    pub lookback_lines: usize,
    /// Lines inspected when looking for a `<script>` opener, `None` scans to the top
    pub script_scan_lines: Option<usize>,
    /// Deepest child-tag nesting expanded into a tag skeleton
    pub max_snippet_depth: usize,
    /// Detail text for library-wide suggestions
    pub library_label: String,
    /// Prefix removed from icon names for `shortcut-icon` attributes
    pub icon_prefix: String,
    /// Language ids that receive tag suggestions
    pub markup_languages: Vec<String>,
}

/// Documentation preview settings
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    /// Documentation locale, `zh-CN` or `en-US`
    pub language: String,
    /// Component library version, part of the documentation path
    pub version: String,
    /// Online documentation site
    pub home_url: String,
    /// Local copy of the documentation site
    pub docs_path: PathBuf,
    /// Directory holding `style.css`
    pub resource_path: PathBuf,
    /// Prefix removed from tag names to get the component keyword
    pub tag_prefix: String,
}

impl Default for HelperConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            knowledge_base: KnowledgeBaseSettings::default(),
            completion: CompletionSettings::default(),
            preview: PreviewConfig::default(),
        }
    }
}

impl Default for KnowledgeBaseSettings {
    fn default() -> Self {
        Self {
            search_paths: vec![
                PathBuf::from("data"),
                PathBuf::from(".element-helper"),
                PathBuf::from("node_modules/element-helper-json"),
            ],
        }
    }
}

impl Default for CompletionSettings {
    fn default() -> Self {
        Self {
            lookback_lines: 10,
            script_scan_lines: None,
            max_snippet_depth: 8,
            library_label: "element-ui".to_string(),
            icon_prefix: "el-icon-".to_string(),
            markup_languages: vec!["vue".to_string(), "html".to_string()],
        }
    }
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            language: "zh-CN".to_string(),
            version: "2.0".to_string(),
            home_url: "http://element-cn.eleme.io/".to_string(),
            docs_path: PathBuf::from("resources/element"),
            resource_path: PathBuf::from("resources"),
            tag_prefix: "el-".to_string(),
        }
    }
}

impl CompletionSettings {
    /// Whether documents of this language get tag suggestions
    pub fn is_markup_language(&self, language_id: &str) -> bool {
        self.markup_languages
            .iter()
            .any(|l| l.eq_ignore_ascii_case(language_id))
    }
}

impl HelperConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::from_yaml(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }

    /// Load configuration from the first config file found in the workspace
    pub fn load_default(workspace_root: &Path) -> Result<Self, ConfigError> {
        let candidates = [
            workspace_root.join(".element-helper.yaml"),
            workspace_root.join(".element-helper.yml"),
            workspace_root.join("element-helper.yaml"),
        ];

        match candidates.iter().find(|c| c.exists()) {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// First search path that holds a knowledge base
    pub fn find_knowledge_base(&self, workspace_root: &Path) -> Option<PathBuf> {
        self.knowledge_base
            .search_paths
            .iter()
            .map(|p| workspace_root.join(p))
            .find(|candidate| candidate.join(crate::loader::TAGS_FILE).exists())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = HelperConfig::default();
        assert_eq!(config.completion.lookback_lines, 10);
        assert_eq!(config.completion.script_scan_lines, None);
        assert_eq!(config.completion.icon_prefix, "el-icon-");
        assert_eq!(config.preview.language, "zh-CN");
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = "completion:\n  lookback_lines: 4\n  script_scan_lines: 200\npreview:\n  language: en-US\n";
        let config = HelperConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.completion.lookback_lines, 4);
        assert_eq!(config.completion.script_scan_lines, Some(200));
        assert_eq!(config.completion.max_snippet_depth, 8);
        assert_eq!(config.preview.language, "en-US");
        assert_eq!(config.preview.version, "2.0");
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_empty_yaml() {
        assert_eq!(HelperConfig::from_yaml("").unwrap(), HelperConfig::default());
    }

    #[test]
    fn test_invalid_yaml() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bad.yaml");
        fs::write(&path, "completion: [not, a, map]").unwrap();

        assert!(matches!(HelperConfig::load(&path), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_missing_file() {
        let result = HelperConfig::load(Path::new("/nonexistent/config.yaml"));
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }

    #[test]
    fn test_load_default_finds_file() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(".element-helper.yml"),
            "log_level: debug\n",
        )
        .unwrap();

        let config = HelperConfig::load_default(temp.path()).unwrap();
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_load_default_without_file() {
        let temp = TempDir::new().unwrap();
        let config = HelperConfig::load_default(temp.path()).unwrap();
        assert_eq!(config, HelperConfig::default());
    }

    #[test]
    fn test_find_knowledge_base() {
        let temp = TempDir::new().unwrap();
        let kb_dir = temp.path().join("data");
        fs::create_dir(&kb_dir).unwrap();
        fs::write(kb_dir.join(crate::loader::TAGS_FILE), "{}").unwrap();

        let config = HelperConfig::default();
        assert_eq!(config.find_knowledge_base(temp.path()), Some(kb_dir));
    }

    #[test]
    fn test_markup_language() {
        let settings = CompletionSettings::default();
        assert!(settings.is_markup_language("vue"));
        assert!(settings.is_markup_language("HTML"));
        assert!(!settings.is_markup_language("javascript"));
    }
}
