//! In-memory symbol index snapshot and its swappable handle.
//!
//! A [`SymbolIndex`] is plain data, usually deserialised from a JSON dump
//! produced by the indexer:
//!
//! ```json
//! {
//!   "files": {
//!     "src/Foo.php": {
//!       "namespaces": [{ "name": "App", "start_line": 3, "end_line": 40 }],
//!       "imports": [{ "name": "App\\Models\\User", "line": 5 }],
//!       "classes": [{ "fqn": "\\App\\Foo", "start_line": 7, "end_line": 40 }]
//!     }
//!   },
//!   "classes": {
//!     "App\\Foo": { "methods": { "user": { "resolved_type": "\\App\\Models\\User" } } }
//!   },
//!   "functions": { "strlen": { "return": { "resolved_type": "int" } } }
//! }
//! ```
//!
//! [`SharedIndex`] wraps a snapshot behind a lock so that every
//! collaborator built from the same handle sees a reload at once.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use super::{ClassInfoIndex, ClassListIndex, GlobalFunctionIndex};
use crate::error::{IndexError, IndexResult};
use crate::types::{ClassInfo, ClassRange, FunctionInfo};
use crate::util::{short_name, with_namespace_root};

/// A `namespace` block and the lines it spans (1-based, inclusive).
///
/// `name` is `None` for the global namespace (`namespace { … }`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamespaceRange {
    #[serde(default)]
    pub name: Option<String>,
    pub start_line: u32,
    pub end_line: u32,
}

/// A class `use` import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UseImport {
    /// The imported fully-qualified name, without a leading `\`.
    pub name: String,
    /// The local alias.  Defaults to the last segment of `name`.
    #[serde(default)]
    pub alias: Option<String>,
    /// The line the `use` statement is on.
    pub line: u32,
}

impl UseImport {
    /// The name this import is referred to by in source.
    pub fn local_name(&self) -> &str {
        self.alias.as_deref().unwrap_or_else(|| short_name(&self.name))
    }
}

/// Per-file index data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileIndex {
    #[serde(default)]
    pub namespaces: Vec<NamespaceRange>,
    #[serde(default)]
    pub imports: Vec<UseImport>,
    /// Class-like declarations in declaration order.
    #[serde(default)]
    pub classes: Vec<ClassRange>,
}

impl FileIndex {
    pub fn with_namespace(mut self, name: &str, start_line: u32, end_line: u32) -> Self {
        self.namespaces.push(NamespaceRange {
            name: (!name.is_empty()).then(|| name.to_string()),
            start_line,
            end_line,
        });
        self
    }

    pub fn with_import(mut self, name: &str, alias: Option<&str>, line: u32) -> Self {
        self.imports.push(UseImport {
            name: name.trim_start_matches('\\').to_string(),
            alias: alias.map(str::to_string),
            line,
        });
        self
    }

    pub fn with_class(mut self, class: ClassRange) -> Self {
        self.classes.push(class);
        self
    }
}

/// A read-only snapshot of everything the indexer knows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolIndex {
    #[serde(default)]
    pub files: HashMap<String, FileIndex>,
    /// Class info keyed by fully-qualified name.  Keys may be written with
    /// or without the leading `\`.
    #[serde(default)]
    pub classes: HashMap<String, ClassInfo>,
    #[serde(default)]
    pub functions: HashMap<String, FunctionInfo>,
}

impl SymbolIndex {
    pub fn from_json(text: &str) -> IndexResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Read and parse an index dump from disk.
    pub fn load(path: &Path) -> IndexResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| IndexError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let index = Self::from_json(&text)?;
        tracing::debug!(
            path = %path.display(),
            files = index.files.len(),
            classes = index.classes.len(),
            functions = index.functions.len(),
            "loaded symbol index"
        );
        Ok(index)
    }

    pub fn with_file(mut self, path: &str, file: FileIndex) -> Self {
        self.files.insert(path.to_string(), file);
        self
    }

    pub fn with_class(mut self, fqn: &str, info: ClassInfo) -> Self {
        self.classes.insert(fqn.to_string(), info);
        self
    }

    pub fn with_function(mut self, name: &str, info: FunctionInfo) -> Self {
        self.functions.insert(name.to_string(), info);
        self
    }

    pub fn file(&self, path: Option<&str>) -> Option<&FileIndex> {
        path.and_then(|p| self.files.get(p))
    }

    /// Look up a class, accepting the name with or without the leading `\`.
    pub fn class(&self, fqn: &str) -> Option<&ClassInfo> {
        let bare = fqn.strip_prefix('\\').unwrap_or(fqn);
        self.classes
            .get(bare)
            .or_else(|| self.classes.get(&with_namespace_root(bare)))
    }
}

/// A cheaply clonable, swappable handle to a [`SymbolIndex`].
///
/// Clones share the same slot: [`SharedIndex::replace`] on any clone
/// redirects all of them.  A handle created with
/// [`SharedIndex::unloaded`] answers every query with
/// [`IndexError::NotLoaded`] until an index is installed.
#[derive(Debug, Clone, Default)]
pub struct SharedIndex {
    slot: Arc<RwLock<Option<Arc<SymbolIndex>>>>,
}

impl SharedIndex {
    pub fn new(index: SymbolIndex) -> Self {
        Self {
            slot: Arc::new(RwLock::new(Some(Arc::new(index)))),
        }
    }

    pub fn unloaded() -> Self {
        Self::default()
    }

    /// Install a new snapshot for every holder of this handle.
    pub fn replace(&self, index: SymbolIndex) {
        tracing::debug!(classes = index.classes.len(), "replacing symbol index");
        *self.slot.write() = Some(Arc::new(index));
    }

    pub fn is_loaded(&self) -> bool {
        self.slot.read().is_some()
    }

    /// The snapshot currently installed.
    ///
    /// Holding the returned `Arc` keeps that snapshot alive even if it is
    /// replaced meanwhile, so one deduction step never sees two indexes.
    pub fn snapshot(&self) -> IndexResult<Arc<SymbolIndex>> {
        self.slot.read().clone().ok_or(IndexError::NotLoaded)
    }
}

impl ClassListIndex for SharedIndex {
    fn class_list(&self, file: Option<&str>) -> IndexResult<Vec<ClassRange>> {
        let index = self.snapshot()?;
        Ok(index
            .file(file)
            .map(|f| f.classes.clone())
            .unwrap_or_default())
    }
}

impl ClassInfoIndex for SharedIndex {
    fn class_info(&self, fqn: &str) -> IndexResult<Option<ClassInfo>> {
        Ok(self.snapshot()?.class(fqn).cloned())
    }
}

impl GlobalFunctionIndex for SharedIndex {
    fn global_functions(&self) -> IndexResult<HashMap<String, FunctionInfo>> {
        Ok(self.snapshot()?.functions.clone())
    }

    fn find_function(&self, name: &str) -> IndexResult<Option<FunctionInfo>> {
        Ok(self.snapshot()?.functions.get(name).cloned())
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
