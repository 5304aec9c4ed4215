//! Data types used throughout the type-deduction engine.
//!
//! This module contains the "model" structs that describe what the
//! symbol index knows about PHP classes and functions (member return
//! types, class line ranges, parent lists) as well as the per-call
//! [`SourceContext`] that every deduction is evaluated against.
//!
//! All records are owned and read-only from the engine's point of view.
//! They are (de)serialisable so that an index snapshot can be loaded
//! from JSON.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// The return-type descriptor attached to a method, property, or constant.
///
/// `resolved_type` is the fully-qualified type name the index resolved
/// for the member (e.g. `"\\App\\User"`, `"int"`), or `None` when the
/// index could not determine one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnInfo {
    #[serde(default)]
    pub resolved_type: Option<String>,
}

impl ReturnInfo {
    pub fn new(resolved_type: impl Into<String>) -> Self {
        Self {
            resolved_type: Some(resolved_type.into()),
        }
    }

    /// A descriptor whose type is unknown.
    pub fn unknown() -> Self {
        Self::default()
    }
}

/// Everything the engine needs to know about a single class, interface,
/// or trait in order to walk a member-access chain through it.
///
/// Member maps are keyed by the bare member name:
///   - methods without the trailing `()` (e.g. `"getUser"`)
///   - properties WITHOUT the `$` prefix (e.g. `"name"`), matching
///     `$obj->name` access syntax
///   - constants as written (e.g. `"MAX_SIZE"`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassInfo {
    #[serde(default)]
    pub methods: HashMap<String, ReturnInfo>,
    #[serde(default)]
    pub properties: HashMap<String, ReturnInfo>,
    #[serde(default)]
    pub constants: HashMap<String, ReturnInfo>,
    /// Fully-qualified parent class names, nearest ancestor first.
    #[serde(default)]
    pub parents: Vec<String>,
}

impl ClassInfo {
    pub fn with_method(mut self, name: &str, return_type: ReturnInfo) -> Self {
        self.methods.insert(name.to_string(), return_type);
        self
    }

    pub fn with_property(mut self, name: &str, return_type: ReturnInfo) -> Self {
        self.properties.insert(name.to_string(), return_type);
        self
    }

    pub fn with_constant(mut self, name: &str, return_type: ReturnInfo) -> Self {
        self.constants.insert(name.to_string(), return_type);
        self
    }

    pub fn with_parent(mut self, fqn: &str) -> Self {
        self.parents.push(fqn.to_string());
        self
    }
}

/// The declared line range of a class-like declaration inside a file.
///
/// Lines are 1-based and inclusive on both ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassRange {
    /// Fully-qualified name of the class (e.g. `"\\App\\Models\\User"`).
    pub fqn: String,
    pub start_line: u32,
    pub end_line: u32,
    /// Fully-qualified parent class names, nearest ancestor first.
    #[serde(default)]
    pub parents: Vec<String>,
}

impl ClassRange {
    pub fn new(fqn: impl Into<String>, start_line: u32, end_line: u32) -> Self {
        Self {
            fqn: fqn.into(),
            start_line,
            end_line,
            parents: Vec::new(),
        }
    }

    pub fn with_parent(mut self, fqn: &str) -> Self {
        self.parents.push(fqn.to_string());
        self
    }

    /// Whether `line` falls within `[start_line, end_line]`.
    pub fn contains_line(&self, line: u32) -> bool {
        line >= self.start_line && line <= self.end_line
    }
}

/// A global (non-member) function known to the index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionInfo {
    #[serde(rename = "return", default)]
    pub return_info: ReturnInfo,
}

impl FunctionInfo {
    pub fn returning(type_name: impl Into<String>) -> Self {
        Self {
            return_info: ReturnInfo::new(type_name),
        }
    }
}

/// The source position a deduction is evaluated at.
///
/// `offset` is a byte offset into `source`.  It is clamped to
/// `source.len()` on construction so that line derivation can never
/// read past the end of the text.
#[derive(Debug, Clone, Copy)]
pub struct SourceContext<'a> {
    pub file: Option<&'a str>,
    pub source: &'a str,
    pub offset: usize,
}

impl<'a> SourceContext<'a> {
    pub fn new(file: Option<&'a str>, source: &'a str, offset: usize) -> Self {
        Self {
            file,
            source,
            offset: offset.min(source.len()),
        }
    }
}
