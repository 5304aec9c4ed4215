/// Variable type resolution by scanning source text.
///
/// [`SourceVariableTypes`] answers "what is the type of `$var` here?" by
/// searching backwards from the cursor for the nearest line that
/// mentions the variable in a way that fixes its type:
///
///   - `/** @var Type $var */` and `@param Type $var` docblock tags
///   - `$var = new Type(…)` assignments
///   - `Type $var` parameter / catch / promoted-property hints
///
/// An assignment from anything else (`$var = $other->make()`) hides all
/// older hints, so the variable is reported as unknown rather than with a
/// stale type.  `$this` is the enclosing class.
///
/// Type names are resolved against the namespace and imports in effect at
/// the line they were found on.
use crate::deduce::enclosing_class;
use crate::error::IndexResult;
use crate::index::{NameResolver, SharedIndex, VariableTypeLookup};
use crate::type_analyzer::is_special_type;
use crate::types::SourceContext;
use crate::util::{class_name_len, is_identifier_char, offset_to_line};

/// Modifiers that may precede a promoted constructor parameter.
const PARAMETER_MODIFIERS: &[&str] = &["public", "protected", "private", "readonly"];

/// Keywords that can directly precede a variable without typing it.
const STATEMENT_KEYWORDS: &[&str] = &[
    "return", "echo", "print", "yield", "throw", "case", "else", "new", "clone", "as", "and", "or",
    "xor", "global", "static", "unset", "isset", "empty", "include", "require", "use", "var",
    "const",
];

/// Variable-type lookup backed by the source text and the symbol index.
#[derive(Debug, Clone)]
pub struct SourceVariableTypes {
    index: SharedIndex,
}

impl SourceVariableTypes {
    pub fn new(index: SharedIndex) -> Self {
        Self { index }
    }
}

impl VariableTypeLookup for SourceVariableTypes {
    fn variable_type(
        &self,
        file: Option<&str>,
        source: &str,
        variable: &str,
        offset: usize,
    ) -> IndexResult<Option<String>> {
        let context = SourceContext::new(file, source, offset);

        if variable == "$this" {
            return Ok(enclosing_class(&self.index, &context)?.map(|c| c.fqn));
        }

        let Some(hint) = find_variable_type_hint(source, context.offset, variable) else {
            return Ok(None);
        };
        tracing::trace!(variable, type_hint = %hint.type_name, "found variable type hint");

        let type_name = hint.type_name.as_str();
        if type_name.eq_ignore_ascii_case("self") || type_name.eq_ignore_ascii_case("static") {
            let at_hint = SourceContext::new(file, source, hint.offset);
            return Ok(enclosing_class(&self.index, &at_hint)?.map(|c| c.fqn));
        }
        if is_special_type(&hint.type_name) {
            return Ok(Some(hint.type_name));
        }

        let line = offset_to_line(source, hint.offset);
        self.index.resolve_type(&hint.type_name, file, line)
    }
}

/// A type name written next to a variable, and where it was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeHint {
    pub type_name: String,
    /// Byte offset of the line the hint is on.
    pub offset: usize,
}

/// What a single line says about a variable.
enum LineHit {
    Type(String),
    /// Assigned from something we cannot type; older hints are stale.
    Opaque,
}

/// Search `source[..before_offset]` backwards for the nearest type hint
/// of `variable`.
pub fn find_variable_type_hint(
    source: &str,
    before_offset: usize,
    variable: &str,
) -> Option<TypeHint> {
    if variable.len() < 2 {
        return None;
    }
    let search_area = source.get(..before_offset.min(source.len()))?;

    let mut line_end = search_area.len();
    for line in search_area.rsplit('\n') {
        let line_start = line_end - line.len();
        match scan_line(line, variable) {
            Some(LineHit::Type(type_name)) => {
                return Some(TypeHint {
                    type_name,
                    offset: line_start,
                });
            }
            Some(LineHit::Opaque) => return None,
            None => {}
        }
        line_end = line_start.saturating_sub(1);
    }

    None
}

fn scan_line(line: &str, variable: &str) -> Option<LineHit> {
    if !line.contains(variable) {
        return None;
    }

    if let Some(type_name) = docblock_tag_type(line, variable) {
        return Some(LineHit::Type(type_name));
    }

    let occurrences: Vec<usize> = line
        .match_indices(variable)
        .map(|(idx, _)| idx)
        .filter(|&idx| {
            let next = line.as_bytes().get(idx + variable.len());
            !next.is_some_and(|&b| is_identifier_char(b))
        })
        .collect();

    for &idx in occurrences.iter().rev() {
        if let Some(rhs) = assignment_rhs(&line[idx + variable.len()..]) {
            return Some(match new_expression_class(rhs) {
                Some(class_name) => LineHit::Type(class_name.to_string()),
                None => LineHit::Opaque,
            });
        }
        if let Some(type_name) = parameter_type(&line[..idx]) {
            return Some(LineHit::Type(type_name));
        }
    }

    None
}

/// `@var Type $var` / `@param Type $var` on this line.
fn docblock_tag_type(line: &str, variable: &str) -> Option<String> {
    ["@var", "@param"].iter().find_map(|tag| {
        let rest = &line[line.find(tag)? + tag.len()..];
        let mut tokens = rest.split_whitespace();
        let raw_type = tokens.next()?;
        (tokens.next()? == variable).then(|| clean_type(raw_type))?
    })
}

/// The right-hand side of `= …` directly after a variable, if any.
fn assignment_rhs(after_variable: &str) -> Option<&str> {
    let rest = after_variable.trim_start().strip_prefix('=')?;
    if rest.starts_with('=') || rest.starts_with('>') {
        return None;
    }
    Some(rest.trim_start())
}

/// The class in `new Class…`.
fn new_expression_class(rhs: &str) -> Option<&str> {
    let rhs = rhs.strip_prefix('(').unwrap_or(rhs);
    let after = rhs.strip_prefix("new")?;
    let rest = after.trim_start();
    if rest.len() == after.len() && !rest.starts_with('\\') {
        return None;
    }
    class_name_len(rest).map(|len| &rest[..len])
}

/// The type hint before a parameter, given the text preceding it.
fn parameter_type(before: &str) -> Option<String> {
    let before = before
        .trim_end()
        .trim_end_matches("...")
        .trim_end_matches('&')
        .trim_end();
    let token_start = before
        .char_indices()
        .rev()
        .find(|&(_, c)| !is_type_char(c))
        .map_or(0, |(i, c)| i + c.len_utf8());
    let raw_type = &before[token_start..];
    let lowercase = raw_type.to_ascii_lowercase();
    if raw_type.is_empty()
        || raw_type.bytes().all(|b| b.is_ascii_digit())
        || STATEMENT_KEYWORDS.contains(&lowercase.as_str())
    {
        return None;
    }

    let prefix = before[..token_start].trim_end();
    let opens_parameter = prefix.is_empty()
        || prefix.ends_with('(')
        || prefix.ends_with(',')
        || PARAMETER_MODIFIERS.iter().any(|m| {
            prefix.ends_with(m)
                && !prefix[..prefix.len() - m.len()]
                    .bytes()
                    .next_back()
                    .is_some_and(is_identifier_char)
        });
    if !opens_parameter {
        return None;
    }
    clean_type(raw_type)
}

/// Characters that may appear in a written type (`?Foo|null`, `\App\User`).
fn is_type_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '\\' | '?' | '|')
}

/// Reduce a written type to a single name:
///   - `?Foo` → `Foo`
///   - `Foo|null` → `Foo`
///   - `Collection<int, User>` → `Collection`
///   - `User[]` → `array`
fn clean_type(raw: &str) -> Option<String> {
    let raw = raw.strip_prefix('?').unwrap_or(raw);
    let first = raw
        .split('|')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .find(|part| !part.eq_ignore_ascii_case("null"))?;
    if first.ends_with("[]") {
        return Some("array".to_string());
    }
    let name = first.split('<').next().unwrap_or(first);
    (!name.is_empty()).then(|| name.to_string())
}

// ─── Tests ──────────────────────────────────────────────────────────────────
