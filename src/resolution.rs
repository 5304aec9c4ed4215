/// Class name resolution against the symbol index.
///
/// Turns a class name as written in source into a fully-qualified name
/// using the namespace block and `use` imports in effect at a given
/// line of a file.  It handles:
///
///   - Fully-qualified names (`\PDO`, `\Couchbase\Cluster`), returned as is
///   - Unqualified names resolved via the import table or current namespace
///   - Qualified names with alias expansion and namespace prefixing
///
/// Special types (`int`, `self`, …) are returned unchanged.  Every other
/// result carries the leading `\` namespace-root marker.
use crate::error::IndexResult;
use crate::index::{FileIndex, NameResolver, NamespaceRange, SharedIndex, SymbolIndex, UseImport};
use crate::type_analyzer::is_special_type;
use crate::util::{NAMESPACE_SEPARATOR, with_namespace_root};

impl NameResolver for SharedIndex {
    fn resolve_type(
        &self,
        name: &str,
        file: Option<&str>,
        line: u32,
    ) -> IndexResult<Option<String>> {
        let index = self.snapshot()?;
        Ok(resolve_class_name(&index, name, file, line))
    }
}

/// Resolve `name` as it would be read at `line` of `file`.
///
/// Returns `None` only for an empty name.  Without file information the
/// name is taken to live in the global namespace.
pub fn resolve_class_name(
    index: &SymbolIndex,
    name: &str,
    file: Option<&str>,
    line: u32,
) -> Option<String> {
    let name = name.trim();
    if name.is_empty() {
        return None;
    }

    // ── Fully qualified name (leading `\`) ──────────────
    if name.starts_with(NAMESPACE_SEPARATOR) {
        return Some(name.to_string());
    }

    if is_special_type(name) {
        return Some(name.to_string());
    }

    let file_index = index.file(file);
    let namespace = file_index.and_then(|f| namespace_at(f, line));

    // ── Import alias on the first segment ───────────────
    // Covers both `User` (with `use App\Models\User;`) and `OA\Endpoint`
    // (with `use Swagger\OpenAPI as OA;`).
    let (first_segment, rest) = match name.split_once(NAMESPACE_SEPARATOR) {
        Some((first, rest)) => (first, Some(rest)),
        None => (name, None),
    };
    if let Some(import) = file_index.and_then(|f| import_for(f, namespace, first_segment, line)) {
        let expanded = match rest {
            Some(rest) => format!("{}\\{}", import.name, rest),
            None => import.name.clone(),
        };
        return Some(with_namespace_root(&expanded));
    }

    // ── Current namespace, else global scope ────────────
    match namespace.and_then(|ns| ns.name.as_deref()) {
        Some(ns) => Some(format!("\\{}\\{}", ns, name)),
        None => Some(with_namespace_root(name)),
    }
}

/// The namespace block containing `line`, if the file declares any.
fn namespace_at(file: &FileIndex, line: u32) -> Option<&NamespaceRange> {
    file.namespaces
        .iter()
        .find(|ns| ns.start_line <= line && line <= ns.end_line)
}

/// The import that `alias` refers to at `line`.
///
/// Only imports declared before `line` and inside the same namespace
/// block count.  PHP class names are case-insensitive, so aliases are
/// compared that way too.
fn import_for<'a>(
    file: &'a FileIndex,
    namespace: Option<&NamespaceRange>,
    alias: &str,
    line: u32,
) -> Option<&'a UseImport> {
    file.imports.iter().rev().find(|import| {
        import.line <= line
            && namespace.is_none_or(|ns| ns.start_line <= import.line && import.line <= ns.end_line)
            && import.local_name().eq_ignore_ascii_case(alias)
    })
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn index() -> SymbolIndex {
        SymbolIndex::default()
            .with_file(
                "app.php",
                FileIndex::default()
                    .with_namespace("App\\Http", 2, 20)
                    .with_import("App\\Models\\User", None, 4)
                    .with_import("Swagger\\OpenAPI", Some("OA"), 5)
                    .with_import("Late\\Import", None, 15),
            )
            .with_file(
                "blocks.php",
                FileIndex::default()
                    .with_namespace("First", 1, 5)
                    .with_import("First\\Dep", None, 2)
                    .with_namespace("Second", 6, 10),
            )
    }

    #[test]
    fn fully_qualified_names_are_untouched() {
        assert_eq!(
            resolve_class_name(&index(), "\\PDO", Some("app.php"), 10).as_deref(),
            Some("\\PDO")
        );
    }

    #[test]
    fn imported_names_expand() {
        let index = index();
        assert_eq!(
            resolve_class_name(&index, "User", Some("app.php"), 10).as_deref(),
            Some("\\App\\Models\\User")
        );
        assert_eq!(
            resolve_class_name(&index, "user", Some("app.php"), 10).as_deref(),
            Some("\\App\\Models\\User")
        );
        assert_eq!(
            resolve_class_name(&index, "OA\\Endpoint", Some("app.php"), 10).as_deref(),
            Some("\\Swagger\\OpenAPI\\Endpoint")
        );
    }

    #[test]
    fn imports_after_the_line_do_not_apply() {
        assert_eq!(
            resolve_class_name(&index(), "Import", Some("app.php"), 10).as_deref(),
            Some("\\App\\Http\\Import")
        );
    }

    #[test]
    fn unknown_names_get_the_current_namespace() {
        assert_eq!(
            resolve_class_name(&index(), "Controller", Some("app.php"), 10).as_deref(),
            Some("\\App\\Http\\Controller")
        );
    }

    #[test]
    fn imports_do_not_leak_across_namespace_blocks() {
        let index = index();
        assert_eq!(
            resolve_class_name(&index, "Dep", Some("blocks.php"), 4).as_deref(),
            Some("\\First\\Dep")
        );
        assert_eq!(
            resolve_class_name(&index, "Dep", Some("blocks.php"), 8).as_deref(),
            Some("\\Second\\Dep")
        );
    }

    #[test]
    fn no_file_means_global_namespace() {
        assert_eq!(
            resolve_class_name(&index(), "Foo\\Bar", None, 1).as_deref(),
            Some("\\Foo\\Bar")
        );
    }

    #[test]
    fn special_types_and_empty_names() {
        assert_eq!(
            resolve_class_name(&index(), "int", Some("app.php"), 10).as_deref(),
            Some("int")
        );
        assert_eq!(
            resolve_class_name(&index(), "  ", Some("app.php"), 10),
            None
        );
    }
}
