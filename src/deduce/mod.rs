//! Expression type deduction.
//!
//! Given an expression split into ordered fragments (a root such as
//! `$user`, `self`, `new Foo()` or `Foo`, followed by accessors such as
//! `getProfile()`, `$prop`, `name` or `CONST`) and a cursor position in a
//! source file, [`TypeDeducer::deduce_type`] determines the best known
//! static type of the whole expression.
//!
//! The work is split across sibling modules:
//!
//! - [`root`]: classifying the first fragment and resolving it to a
//!   starting type (recursing for `new X` / `clone $x`).
//! - [`chain`]: narrowing that type accessor by accessor through the class
//!   index.
//! - [`enclosing`]: finding the class a byte offset sits in, for `self`,
//!   `static` and `parent`.
//!
//! An undeterminable type is `Ok(None)`.  Only collaborator failures are
//! errors, and they are passed through unchanged.

mod chain;
mod enclosing;
mod root;

pub use enclosing::enclosing_class;
pub use root::RootExpression;

use std::sync::Arc;

use crate::error::IndexResult;
use crate::index::{
    ClassInfoIndex, ClassListIndex, GlobalFunctionIndex, NameResolver, SharedIndex, SymbolIndex,
    VariableTypeLookup,
};
use crate::type_analyzer::{SpecialTypeClassifier, TypeAnalyzer};
use crate::types::SourceContext;
use crate::variable::SourceVariableTypes;

/// The external services the engine consults.
///
/// Every field is a shared handle so one set of collaborators can back
/// several deducers.
#[derive(Clone)]
pub struct Collaborators {
    pub variables: Arc<dyn VariableTypeLookup>,
    pub class_list: Arc<dyn ClassListIndex>,
    pub class_info: Arc<dyn ClassInfoIndex>,
    pub names: Arc<dyn NameResolver>,
    pub functions: Arc<dyn GlobalFunctionIndex>,
    pub special_types: Arc<dyn SpecialTypeClassifier>,
}

impl Collaborators {
    /// Wire every collaborator to the same index handle.
    pub fn from_index(index: &SharedIndex) -> Self {
        Self {
            variables: Arc::new(SourceVariableTypes::new(index.clone())),
            class_list: Arc::new(index.clone()),
            class_info: Arc::new(index.clone()),
            names: Arc::new(index.clone()),
            functions: Arc::new(index.clone()),
            special_types: Arc::new(TypeAnalyzer),
        }
    }
}

/// The single entry point for deducing expression types.
///
/// A deducer holds no per-call state and caches no results: repeated
/// identical queries re-run root resolution and traversal against the
/// collaborators' current data.
pub struct TypeDeducer {
    collaborators: Collaborators,
    index: Option<SharedIndex>,
}

impl TypeDeducer {
    pub fn new(collaborators: Collaborators) -> Self {
        Self {
            collaborators,
            index: None,
        }
    }

    /// Build a deducer whose collaborators all read from `index`.
    pub fn with_index(index: SharedIndex) -> Self {
        Self {
            collaborators: Collaborators::from_index(&index),
            index: Some(index),
        }
    }

    pub fn collaborators(&self) -> &Collaborators {
        &self.collaborators
    }

    /// The index handle shared by the collaborators, when built with
    /// [`TypeDeducer::with_index`].
    pub fn index(&self) -> Option<&SharedIndex> {
        self.index.as_ref()
    }

    /// Point every collaborator at a freshly loaded index.
    ///
    /// Returns `false` (and leaves everything untouched) when the deducer
    /// was built from hand-picked collaborators rather than an index.
    pub fn set_index(&self, index: SymbolIndex) -> bool {
        match &self.index {
            Some(shared) => {
                shared.replace(index);
                true
            }
            None => {
                tracing::warn!("set_index called on a deducer without a shared index");
                false
            }
        }
    }

    /// Deduce the type of the expression `parts` at `context`.
    ///
    /// `parts[0]` is the root; the remaining fragments are accessors applied
    /// left to right.  Non-special results always carry the leading `\`.
    pub fn deduce_type<S: AsRef<str>>(
        &self,
        context: &SourceContext<'_>,
        parts: &[S],
    ) -> IndexResult<Option<String>> {
        let Some((root, accessors)) = parts.split_first() else {
            return Ok(None);
        };

        let Some(start) = self.resolve_root(root.as_ref(), context)? else {
            tracing::trace!(root = root.as_ref(), "root fragment has no known type");
            return Ok(None);
        };

        self.walk_chain(start.type_name, accessors, start.property_needs_dollar_sign)
    }
}
