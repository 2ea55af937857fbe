//! element-helper: Context-aware completion for Element UI component markup
//!
//! This library suggests Element UI tags, attributes and attribute values for
//! Vue and HTML templates by resolving what the cursor sits in, then looking
//! the answer up in a component knowledge base. It also renders the
//! documentation preview page for a component.
//!
//! # Example
//!
//! ```no_run
//! use element_helper::{CancellationFlag, CompletionEngine, DocumentView, Position};
//! use std::path::Path;
//!
//! let engine = CompletionEngine::from_dir(Path::new("data")).unwrap();
//!
//! let document = DocumentView::new("<template>\n  <el-button ");
//! let items = engine.complete(&document, Position::new(1, 13), "vue", &CancellationFlag::new());
//!
//! for item in items {
//!     println!("{}: {}", item.label, item.detail.unwrap_or_default());
//! }
//! ```

mod completions;
pub mod config;
pub mod context;
mod document;
mod loader;
pub mod preview;
pub mod scanner;
mod types;

pub use completions::{
    complete_attributes, complete_tags, complete_values, get_suggestions, tag_skeleton,
};
pub use config::{CompletionSettings, ConfigError, HelperConfig, PreviewConfig};
pub use context::classify;
pub use document::DocumentView;
pub use loader::{KnowledgeBase, LoadError, ATTRIBUTES_FILE, TAGS_FILE};
pub use preview::{PreviewError, PreviewQuery, PreviewRenderer};
pub use types::{
    AttributeDef, AttributeKind, Position, ResolvedContext, Suggestion, SuggestionKind, TagDef,
};

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Set by the host when a completion request is no longer wanted
#[derive(Debug, Clone, Default)]
pub struct CancellationFlag(Arc<AtomicBool>);

impl CancellationFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Main completion engine
///
/// The knowledge base is shared read-only, so one engine can serve
/// concurrent requests.
#[derive(Debug, Clone)]
pub struct CompletionEngine {
    kb: Arc<KnowledgeBase>,
    settings: CompletionSettings,
}

impl CompletionEngine {
    /// Load the knowledge base from a directory holding the two tables
    pub fn from_dir(path: &Path) -> Result<Self, LoadError> {
        Ok(Self::new(KnowledgeBase::load(path)?))
    }

    /// Create engine from a pre-loaded knowledge base
    pub fn new(kb: KnowledgeBase) -> Self {
        Self {
            kb: Arc::new(kb),
            settings: CompletionSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: CompletionSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Resolve the cursor context without building suggestions
    pub fn classify(&self, document: &DocumentView, position: Position) -> ResolvedContext {
        context::classify(document, position, &self.settings)
    }

    /// Get suggestions at a cursor position (line and character are 0-based)
    pub fn complete(
        &self,
        document: &DocumentView,
        position: Position,
        language_id: &str,
        cancel: &CancellationFlag,
    ) -> Vec<Suggestion> {
        if cancel.is_cancelled() {
            return Vec::new();
        }

        let context = self.classify(document, position);
        tracing::debug!("Completion context: {:?}", context);

        if cancel.is_cancelled() {
            tracing::debug!("Completion cancelled");
            return Vec::new();
        }

        let typed = document.typed_word_before(position);
        get_suggestions(&self.kb, &context, typed, language_id, &self.settings)
    }

    pub fn knowledge_base(&self) -> &KnowledgeBase {
        &self.kb
    }

    pub fn settings(&self) -> &CompletionSettings {
        &self.settings
    }
}
