//! Special-type classification.
//!
//! A "special" type is a built-in or pseudo type (`int`, `array`,
//! `self`, …) that has no entry in the class index and therefore no
//! members a chain could be walked through.

/// Built-in and pseudo type names, lowercase.
///
/// `closure` is included so that the `\Closure` pseudo-type produced for
/// `function (…)` roots terminates chain traversal.
pub const SPECIAL_TYPES: &[&str] = &[
    "int", "float", "bool", "string", "array", "mixed", "null", "void", "self", "static", "parent",
    "true", "false", "closure", "iterable", "callable", "object", "resource", "never",
];

/// Decides whether a type name is special (non-class).
pub trait SpecialTypeClassifier: Send + Sync {
    fn is_special_type(&self, type_name: &str) -> bool;
}

/// The default classifier over [`SPECIAL_TYPES`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeAnalyzer;

impl SpecialTypeClassifier for TypeAnalyzer {
    fn is_special_type(&self, type_name: &str) -> bool {
        is_special_type(type_name)
    }
}

/// Check whether `type_name` is a special type.
///
/// The comparison is ASCII case-insensitive and ignores a leading
/// namespace-root marker, so `INT`, `\Closure` and `closure` all match.
pub fn is_special_type(type_name: &str) -> bool {
    let name = type_name.strip_prefix('\\').unwrap_or(type_name);
    SPECIAL_TYPES.iter().any(|t| t.eq_ignore_ascii_case(name))
}
