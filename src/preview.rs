//! Documentation preview pages for components

use crate::config::PreviewConfig;
use crate::document::{byte_index, DocumentView};
use crate::types::Position;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::LazyLock;
use thiserror::Error;

/// Scheme of documentation preview identifiers
pub const SCHEME: &str = "element-helper";

/// Stylesheet file inside the resource directory
pub const STYLESHEET_FILE: &str = "style.css";

/// A number like `-1.5em`, or a run of characters that are not punctuation
static WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(-?\d*\.\d\w*)|([^`~!@$^&*()=+\[{\]}\\|;:'",.<>/\s]+)"#)
        .expect("valid word pattern")
});

#[derive(Error, Debug)]
pub enum PreviewError {
    #[error("not a {SCHEME} documentation uri: {0}")]
    InvalidUri(String),
    #[error("invalid documentation query: {0}")]
    Query(#[from] serde_json::Error),
    #[error("failed to read stylesheet {path}: {source}")]
    Stylesheet {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Which component's documentation to show
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewQuery {
    pub keyword: String,
}

impl PreviewQuery {
    pub fn new(keyword: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
        }
    }

    /// Query for a tag name, `el-date-picker` documents as `date-picker`
    pub fn for_tag(tag: &str, tag_prefix: &str) -> Self {
        let keyword = tag.strip_prefix(tag_prefix).unwrap_or(tag);
        Self::new(keyword)
    }
}

/// Identifier the host uses to address a preview page
pub fn encode_docs_uri(query: &PreviewQuery) -> Result<String, PreviewError> {
    Ok(format!("{}://search?{}", SCHEME, serde_json::to_string(query)?))
}

pub fn decode_docs_uri(uri: &str) -> Result<PreviewQuery, PreviewError> {
    let query = uri
        .strip_prefix(SCHEME)
        .and_then(|rest| rest.strip_prefix("://"))
        .and_then(|rest| rest.split_once('?'))
        .map(|(_, query)| query)
        .ok_or_else(|| PreviewError::InvalidUri(uri.to_string()))?;

    Ok(serde_json::from_str(query)?)
}

/// Word under the cursor, used as the documentation keyword
pub fn keyword_at(document: &DocumentView, position: Position) -> Option<String> {
    let line = document.line(position.line)?;
    let cursor = byte_index(line, position.character);

    WORD.find_iter(line)
        .find(|m| m.start() <= cursor && cursor <= m.end())
        .map(|m| m.as_str().to_string())
}

/// Renders the documentation page for a component
#[derive(Debug, Clone)]
pub struct PreviewRenderer {
    config: PreviewConfig,
    stylesheet: String,
}

impl PreviewRenderer {
    pub fn new(config: PreviewConfig, stylesheet: impl Into<String>) -> Self {
        Self {
            config,
            stylesheet: stylesheet.into(),
        }
    }

    /// Read the stylesheet from the configured resource directory
    pub fn load(config: PreviewConfig) -> Result<Self, PreviewError> {
        let path = config.resource_path.join(STYLESHEET_FILE);
        let stylesheet = std::fs::read_to_string(&path)
            .map_err(|e| PreviewError::Stylesheet { path, source: e })?;
        Ok(Self::new(config, stylesheet))
    }

    /// Online documentation page for a keyword
    pub fn online_url(&self, keyword: &str) -> String {
        format!(
            "{}{}",
            self.config.home_url,
            self.component_path(keyword, "index.html")
        )
    }

    fn component_path(&self, keyword: &str, page: &str) -> String {
        format!(
            "{}/{}#/{}/component/{}",
            self.config.version, page, self.config.language, keyword
        )
    }

    fn notice(&self, href: &str) -> String {
        let version = escape_html(&self.config.version);
        match self.config.language.as_str() {
            "zh-CN" => format!(
                "版本：{}，在线示例请在浏览器中<a href=\"{}\">查看</a>",
                version, href
            ),
            _ => format!(
                "Version: {}, view online examples in <a href=\"{}\">browser</a>",
                version, href
            ),
        }
    }

    /// The full preview page
    pub fn render(&self, query: &PreviewQuery) -> String {
        let keyword = escape_html(&query.keyword);
        let href = escape_html(&self.online_url(&query.keyword));
        let docs_root = self.config.docs_path.display().to_string();
        let frame_src = escape_html(&format!(
            "{}/{}",
            docs_root.trim_end_matches('/'),
            self.component_path(&query.keyword, "main.html")
        ));

        tracing::debug!("Rendering documentation preview for {}", keyword);

        format!(
            r#"
    <style type="text/css">{style}</style>
    <body class="element-helper-docs-container">
    <div class="element-helper-move-mask"></div>
    <div class="element-helper-loading-mask">
      <div class="element-helper-loading-spinner">
        <svg viewBox="25 25 50 50" class="circular">
          <circle cx="50" cy="50" r="20" fill="none" class="path"></circle>
        </svg>
      </div>
    </div>
    <div class="docs-notice">{notice}</div>
    <iframe id="doc-frame" src="file://{frame_src}"></iframe>
    <script>
      window.addEventListener('message', (e) => {{
        e.data.loaded && (document.querySelector('.element-helper-loading-mask').style.display = 'none');
      }}, false);
    </script>
    </body>"#,
            style = self.stylesheet,
            notice = self.notice(&href),
            frame_src = frame_src,
        )
    }
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
