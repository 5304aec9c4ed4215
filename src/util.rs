/// Utility functions shared by the deduction engine and its collaborators.
///
/// This module contains helpers for offset/line conversion, class lookup
/// by line, and the small PHP name grammar used when classifying
/// expression fragments.
use crate::types::ClassRange;

/// The namespace separator, which doubles as the namespace-root marker at
/// the start of a fully-qualified name.
pub const NAMESPACE_SEPARATOR: char = '\\';

/// Convert a byte offset in `source` to a 1-based line number.
///
/// Counts the `\n` terminators in `source[..offset]` and adds one, so a
/// `\r\n` pair counts as a single line break.  Offsets past the end of
/// the text are clamped.
pub fn offset_to_line(source: &str, offset: usize) -> u32 {
    let end = offset.min(source.len());
    let bytes = &source.as_bytes()[..end];
    let breaks = memchr::memchr_iter(b'\n', bytes).count();
    breaks as u32 + 1
}

/// Find the class whose line range contains `line`.
///
/// Ranges are checked in the order given and the first containing range
/// wins, so for overlapping (e.g. nested anonymous) declarations the
/// enumeration order of the index is authoritative.
pub fn find_class_at_line(classes: &[ClassRange], line: u32) -> Option<&ClassRange> {
    classes.iter().find(|c| c.contains_line(line))
}

/// Prefix `name` with the namespace-root marker unless it already has one.
pub fn with_namespace_root(name: &str) -> String {
    if name.starts_with(NAMESPACE_SEPARATOR) {
        name.to_string()
    } else {
        format!("{}{}", NAMESPACE_SEPARATOR, name)
    }
}

/// Return the last segment of a namespace-qualified name
/// (`"App\\Models\\User"` → `"User"`).
pub fn short_name(name: &str) -> &str {
    name.rsplit(NAMESPACE_SEPARATOR).next().unwrap_or(name)
}

pub(crate) fn is_identifier_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

pub(crate) fn is_identifier_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Length in bytes of the class-name grammar match at the start of `s`,
/// or `None` if `s` does not start with a name.
///
/// The grammar is an optional leading `\` followed by one or more
/// identifier segments joined by `\`:
///
///   - `Foo`            → `Some(3)`
///   - `\App\Foo()`     → `Some(8)`
///   - `App\Foo\`       → `Some(7)` (the dangling separator is not part of the name)
///   - `$foo`, `1Foo`   → `None`
pub(crate) fn class_name_len(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    let mut pos = 0;
    if bytes.first() == Some(&b'\\') {
        pos = 1;
    }
    let mut end = None;
    loop {
        if pos >= bytes.len() || !is_identifier_start(bytes[pos]) {
            return end;
        }
        pos += 1;
        while pos < bytes.len() && is_identifier_char(bytes[pos]) {
            pos += 1;
        }
        end = Some(pos);
        if pos + 1 < bytes.len() && bytes[pos] == b'\\' && is_identifier_start(bytes[pos + 1]) {
            pos += 1;
        } else {
            return end;
        }
    }
}

/// Find the first class-name grammar match anywhere inside `s`.
pub(crate) fn find_class_name(s: &str) -> Option<&str> {
    let bytes = s.as_bytes();
    (0..bytes.len()).find_map(|start| {
        // Only start on a char boundary that can open a name.
        let b = bytes[start];
        if b != b'\\' && !is_identifier_start(b) {
            return None;
        }
        let len = class_name_len(&s[start..])?;
        Some(&s[start..start + len])
    })
}

// ─── Tests ──────────────────────────────────────────────────────────────────
