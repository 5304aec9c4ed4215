//! Collaborator interfaces consumed by the deduction engine.
//!
//! The engine never reads source files or index storage itself.  It
//! talks to a handful of narrow, read-only interfaces:
//!
//! | Trait                   | Answers                                              |
//! |-------------------------|------------------------------------------------------|
//! | [`VariableTypeLookup`]  | the type of `$var` at a byte offset                  |
//! | [`ClassListIndex`]      | the classes declared in a file and their line ranges |
//! | [`ClassInfoIndex`]      | member return types and parents of a class           |
//! | [`NameResolver`]        | a bare class name → its fully-qualified name         |
//! | [`GlobalFunctionIndex`] | global functions and their return types              |
//!
//! "Not found" is `Ok(None)` (or an empty collection).  An `Err` means the
//! backing store itself failed and is propagated to the caller untouched.
//!
//! [`SharedIndex`] implements every index trait over one swappable
//! [`SymbolIndex`] snapshot.
mod symbol_index;

pub use symbol_index::{FileIndex, NamespaceRange, SharedIndex, SymbolIndex, UseImport};

use std::collections::HashMap;

use crate::error::IndexResult;
use crate::types::{ClassInfo, ClassRange, FunctionInfo};

/// Determines the type of a variable at a position in a source text.
pub trait VariableTypeLookup: Send + Sync {
    /// `variable` includes the `$` sigil (e.g. `"$user"`).
    fn variable_type(
        &self,
        file: Option<&str>,
        source: &str,
        variable: &str,
        offset: usize,
    ) -> IndexResult<Option<String>>;
}

/// Enumerates the class-like declarations of a file.
pub trait ClassListIndex: Send + Sync {
    /// Returns the declarations in a stable enumeration order.  Callers
    /// that pick "the first match" rely on this order.
    fn class_list(&self, file: Option<&str>) -> IndexResult<Vec<ClassRange>>;
}

/// Fetches member information for a fully-qualified class name.
pub trait ClassInfoIndex: Send + Sync {
    fn class_info(&self, fqn: &str) -> IndexResult<Option<ClassInfo>>;
}

/// Resolves a class name as written in source to a fully-qualified name,
/// honouring the namespace and `use` imports in effect at `line`.
pub trait NameResolver: Send + Sync {
    fn resolve_type(
        &self,
        name: &str,
        file: Option<&str>,
        line: u32,
    ) -> IndexResult<Option<String>>;
}

/// Enumerates global (non-member) functions.
pub trait GlobalFunctionIndex: Send + Sync {
    fn global_functions(&self) -> IndexResult<HashMap<String, FunctionInfo>>;

    /// Look up a single function by name.
    ///
    /// The default implementation enumerates every function; stores that
    /// can answer point lookups directly should override it.
    fn find_function(&self, name: &str) -> IndexResult<Option<FunctionInfo>> {
        Ok(self.global_functions()?.remove(name))
    }
}
