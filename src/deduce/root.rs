/// Root-fragment classification and resolution.
///
/// The first fragment of an expression decides where deduction starts.
/// [`RootExpression::classify`] sorts it into one of a fixed set of
/// shapes, trying them in priority order (first match wins):
///
/// | #  | Fragment                     | Shape                 | Starting type          |
/// |----|------------------------------|-----------------------|------------------------|
/// | 1  | `$user`                      | `Variable`            | variable lookup        |
/// | 2  | `self`, `static`             | `CurrentClass`        | enclosing class        |
/// | 3  | `parent`                     | `ParentClass`         | enclosing class parent |
/// | 4  | `[1, 2]`                     | `ArrayLiteral`        | `array`                |
/// | 5  | `42`, `0x1F`                 | `IntegerLiteral`      | `int`                  |
/// | 6  | `4.2`                        | `FloatLiteral`        | `float`                |
/// | 7  | `true`, `false`              | `BoolLiteral`         | `bool`                 |
/// | 8  | `"…"`, `'…'`                 | `StringLiteral`       | `string`               |
/// | 9  | `array(…)`                   | `ArrayConstruct`      | `array`                |
/// | 10 | `function (…)`               | `Closure`             | `\Closure`             |
/// | 11 | `new Foo()`                  | `New`                 | type of `Foo`          |
/// | 12 | `clone $foo`                 | `Clone`               | type of `$foo`         |
/// | 13 | `app()`                      | `FunctionCall`        | function return type   |
/// | 14 | `Foo`, `\App\Foo`            | `ClassName`           | resolved class name    |
///
/// The order matters: `new Foo()` and `array()` must never reach the
/// generic call shape, and keywords must never reach the class-name
/// shape.
use crate::error::IndexResult;
use crate::types::SourceContext;
use crate::util::{class_name_len, find_class_name, is_identifier_char, offset_to_line};

use super::TypeDeducer;

/// The type name used for `function (…)` roots.
pub const CLOSURE_TYPE: &str = "\\Closure";

/// The syntactic shape of a root fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootExpression<'a> {
    /// A variable, including the `$` sigil.
    Variable(&'a str),
    /// `self` or `static`.
    CurrentClass,
    /// `parent`.
    ParentClass,
    ArrayLiteral,
    IntegerLiteral,
    FloatLiteral,
    BoolLiteral,
    StringLiteral,
    ArrayConstruct,
    Closure,
    /// `new <ClassName>`, holding the class name.
    New(&'a str),
    /// `clone <$variable>`, holding the variable.
    Clone(&'a str),
    /// `<name>()`, holding the function name.
    FunctionCall(&'a str),
    /// A (possibly namespace-qualified) class name found in the fragment.
    ClassName(&'a str),
}

impl<'a> RootExpression<'a> {
    /// Classify a root fragment, or return `None` if it has no known shape.
    pub fn classify(fragment: &'a str) -> Option<Self> {
        if fragment.starts_with('$') {
            return Some(Self::Variable(fragment));
        }
        match fragment {
            "self" | "static" => return Some(Self::CurrentClass),
            "parent" => return Some(Self::ParentClass),
            _ => {}
        }
        if fragment.starts_with('[') {
            return Some(Self::ArrayLiteral);
        }
        if is_integer_literal(fragment) {
            return Some(Self::IntegerLiteral);
        }
        if is_float_literal(fragment) {
            return Some(Self::FloatLiteral);
        }
        if fragment == "true" || fragment == "false" {
            return Some(Self::BoolLiteral);
        }
        if is_string_literal(fragment) {
            return Some(Self::StringLiteral);
        }
        if opens_call(fragment, "array") {
            return Some(Self::ArrayConstruct);
        }
        if opens_call(fragment, "function") {
            return Some(Self::Closure);
        }
        if let Some(class_name) = after_keyword(fragment, "new").and_then(leading_class_name) {
            return Some(Self::New(class_name));
        }
        if let Some(variable) = after_keyword(fragment, "clone").and_then(leading_variable) {
            return Some(Self::Clone(variable));
        }
        if let Some(name) = fragment.strip_suffix("()")
            && !name.contains('\n')
        {
            return Some(Self::FunctionCall(name));
        }
        find_class_name(fragment).map(Self::ClassName)
    }

    /// The type a literal shape always has, independent of context.
    pub fn literal_type(&self) -> Option<&'static str> {
        match self {
            Self::ArrayLiteral | Self::ArrayConstruct => Some("array"),
            Self::IntegerLiteral => Some("int"),
            Self::FloatLiteral => Some("float"),
            Self::BoolLiteral => Some("bool"),
            Self::StringLiteral => Some("string"),
            Self::Closure => Some(CLOSURE_TYPE),
            _ => None,
        }
    }
}

/// The resolved starting point of a chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct RootType {
    pub type_name: String,
    /// Whether the first accessor is a static member reference, where
    /// properties are written with their `$` (`self::$instance`).
    pub property_needs_dollar_sign: bool,
}

impl TypeDeducer {
    /// Resolve the root fragment to a starting type.
    pub(super) fn resolve_root(
        &self,
        fragment: &str,
        context: &SourceContext<'_>,
    ) -> IndexResult<Option<RootType>> {
        let Some(shape) = RootExpression::classify(fragment) else {
            tracing::debug!(fragment, "unrecognised root fragment");
            return Ok(None);
        };
        tracing::trace!(fragment, ?shape, "classified root fragment");

        let mut property_needs_dollar_sign = false;

        let type_name = match shape {
            RootExpression::Variable(variable) => self.collaborators.variables.variable_type(
                context.file,
                context.source,
                variable,
                context.offset,
            )?,
            RootExpression::CurrentClass => {
                property_needs_dollar_sign = true;
                self.current_class_at(context)?.map(|class| class.fqn)
            }
            RootExpression::ParentClass => {
                property_needs_dollar_sign = true;
                self.parent_class_at(context)?
            }
            RootExpression::New(class_name) => self.deduce_type(context, &[class_name])?,
            RootExpression::Clone(variable) => self.deduce_type(context, &[variable])?,
            RootExpression::FunctionCall(name) => self.function_return_type(name)?,
            RootExpression::ClassName(name) => {
                property_needs_dollar_sign = true;
                let line = offset_to_line(context.source, context.offset);
                self.collaborators
                    .names
                    .resolve_type(name, context.file, line)?
            }
            literal => literal.literal_type().map(str::to_string),
        };

        Ok(type_name
            .filter(|t| !t.is_empty())
            .map(|type_name| RootType {
                type_name,
                property_needs_dollar_sign,
            }))
    }

    /// The first parent of the class enclosing `context`.
    ///
    /// The class index is authoritative for the parent list; the parents
    /// recorded on the class range are used when the index has none.
    /// A class without any parent yields `None`, never the class itself.
    fn parent_class_at(&self, context: &SourceContext<'_>) -> IndexResult<Option<String>> {
        let Some(current) = self.current_class_at(context)? else {
            return Ok(None);
        };
        let parents = match self.collaborators.class_info.class_info(&current.fqn)? {
            Some(info) if !info.parents.is_empty() => info.parents,
            _ => current.parents,
        };
        Ok(parents.into_iter().next())
    }

    /// The return type of a global function, tolerating a leading `\`.
    fn function_return_type(&self, name: &str) -> IndexResult<Option<String>> {
        let functions = &self.collaborators.functions;
        let mut function = functions.find_function(name)?;
        if function.is_none()
            && let Some(unqualified) = name.strip_prefix('\\')
        {
            function = functions.find_function(unqualified)?;
        }
        Ok(function.and_then(|f| f.return_info.resolved_type))
    }
}

// ─── Literal grammars ───────────────────────────────────────────────────────

/// `42`, `007`, `0x1F`.
fn is_integer_literal(s: &str) -> bool {
    let all_digits = |t: &str| !t.is_empty() && t.bytes().all(|b| b.is_ascii_digit());
    if all_digits(s) {
        return true;
    }
    s.strip_prefix("0x")
        .is_some_and(|hex| !hex.is_empty() && hex.bytes().all(|b| b.is_ascii_hexdigit()))
}

/// `1.5`: digits, a literal `.`, digits.
fn is_float_literal(s: &str) -> bool {
    s.split_once('.').is_some_and(|(int, frac)| {
        !int.is_empty()
            && !frac.is_empty()
            && int.bytes().all(|b| b.is_ascii_digit())
            && frac.bytes().all(|b| b.is_ascii_digit())
    })
}

/// A single- or double-quoted string; the body may span lines.
fn is_string_literal(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() >= 2
        && matches!(bytes[0], b'"' | b'\'')
        && bytes[bytes.len() - 1] == bytes[0]
}

/// Whether `s` is `keyword`, optional whitespace, then `(`.
fn opens_call(s: &str, keyword: &str) -> bool {
    s.strip_prefix(keyword)
        .is_some_and(|rest| rest.trim_ascii_start().starts_with('('))
}

/// The text after `keyword` and at least one whitespace character.
fn after_keyword<'a>(s: &'a str, keyword: &str) -> Option<&'a str> {
    let rest = s.strip_prefix(keyword)?;
    let trimmed = rest.trim_ascii_start();
    (trimmed.len() < rest.len()).then_some(trimmed)
}

/// The class name at the start of `s`; anything after it (`()`,
/// arguments) is ignored.
fn leading_class_name(s: &str) -> Option<&str> {
    class_name_len(s).map(|len| &s[..len])
}

/// The `$variable` at the start of `s`.
fn leading_variable(s: &str) -> Option<&str> {
    let name = s.strip_prefix('$')?;
    let len = name.bytes().take_while(|&b| is_identifier_char(b)).count();
    (len > 0).then(|| &s[..len + 1])
}

// ─── Tests ──────────────────────────────────────────────────────────────────
