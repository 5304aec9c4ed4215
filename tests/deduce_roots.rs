mod common;

use common::{create_deducer, deduce, offset_of};
use phpantom_deduce::{ClassInfo, ClassRange, FileIndex, FunctionInfo, ReturnInfo, SymbolIndex};

const FILE: &str = "src/Child.php";

const SOURCE: &str = concat!(
    "<?php\n",
    "namespace App;\n",
    "\n",
    "use Lib\\Clock;\n",
    "\n",
    "class Base {\n",
    "}\n",
    "\n",
    "class Child extends Base {\n",
    "    public function run() {\n",
    "        return self::make();\n",
    "    }\n",
    "}\n",
);

fn index() -> SymbolIndex {
    let child_range = ClassRange::new("\\App\\Child", 9, 13).with_parent("\\App\\Base");
    let child_info = ClassInfo::default().with_parent("\\App\\Base");
    SymbolIndex::default()
        .with_file(
            FILE,
            FileIndex::default()
                .with_namespace("App", 2, 13)
                .with_import("Lib\\Clock", None, 4)
                .with_class(ClassRange::new("\\App\\Base", 6, 7))
                .with_class(child_range),
        )
        .with_class("App\\Base", ClassInfo::default())
        .with_class("App\\Child", child_info)
        .with_class(
            "Lib\\Clock",
            ClassInfo::default().with_method("now", ReturnInfo::new("\\DateTimeImmutable")),
        )
        .with_function("app", FunctionInfo::returning("\\App\\Container"))
        .with_function("strlen", FunctionInfo::returning("int"))
        .with_function("new Foo", FunctionInfo::returning("\\Wrong"))
}

fn inside_child() -> usize {
    offset_of(SOURCE, "return self")
}

fn inside_base() -> usize {
    offset_of(SOURCE, "class Base")
}

// ─── Empty and unrecognised input ───────────────────────────────────────────

#[test]
fn test_empty_fragment_list_is_unknown() {
    let deducer = create_deducer(index(), &[("$x", "App\\Thing")]);
    for offset in [0, inside_child(), SOURCE.len()] {
        assert_eq!(deduce(&deducer, Some(FILE), SOURCE, &[], offset), None);
        assert_eq!(deduce(&deducer, None, "", &[], offset), None);
    }
}

#[test]
fn test_unrecognised_root_is_unknown() {
    let deducer = create_deducer(index(), &[]);
    for root in ["", "@@@", "1.2.3", "->"] {
        assert_eq!(
            deduce(&deducer, Some(FILE), SOURCE, &[root], inside_child()),
            None,
            "{root:?} should not resolve"
        );
    }
}

// ─── Literals ───────────────────────────────────────────────────────────────

/// Literal roots have a fixed type wherever they appear.
#[test]
fn test_literal_roots_have_fixed_types() {
    let deducer = create_deducer(index(), &[]);
    let cases = [
        ("[1, 2, 3]", "array"),
        ("[]", "array"),
        ("42", "int"),
        ("0x1F", "int"),
        ("3.14", "float"),
        ("true", "bool"),
        ("false", "bool"),
        ("\"hello\"", "string"),
        ("'multi\nline'", "string"),
        ("array()", "array"),
        ("array (1, 2)", "array"),
        ("function () {}", "\\Closure"),
        ("function($x) use ($y)", "\\Closure"),
    ];
    let places = [
        (None, 0),
        (Some(FILE), inside_child()),
        (Some(FILE), SOURCE.len()),
    ];
    for (fragment, expected) in cases {
        for (file, offset) in places {
            assert_eq!(
                deduce(&deducer, file, SOURCE, &[fragment], offset).as_deref(),
                Some(expected),
                "{fragment:?} at {offset}"
            );
        }
    }
}

// ─── Variables ──────────────────────────────────────────────────────────────

#[test]
fn test_variable_root_passes_lookup_result_through() {
    let variables = [
        ("$thing", "App\\Thing"),
        ("$rooted", "\\App\\Thing"),
        ("$count", "int"),
    ];
    let deducer = create_deducer(index(), &variables);
    let offset = inside_child();
    assert_eq!(
        deduce(&deducer, Some(FILE), SOURCE, &["$thing"], offset).as_deref(),
        Some("\\App\\Thing"),
        "class names gain the namespace-root marker"
    );
    assert_eq!(
        deduce(&deducer, Some(FILE), SOURCE, &["$rooted"], offset).as_deref(),
        Some("\\App\\Thing")
    );
    assert_eq!(
        deduce(&deducer, Some(FILE), SOURCE, &["$count"], offset).as_deref(),
        Some("int"),
        "special types are left alone"
    );
    assert_eq!(
        deduce(&deducer, Some(FILE), SOURCE, &["$missing"], offset),
        None
    );
}

// ─── new / clone ────────────────────────────────────────────────────────────

/// `new X()` types exactly like the bare class reference `X`.
#[test]
fn test_new_delegates_to_class_name() {
    let deducer = create_deducer(index(), &[]);
    let offset = inside_child();
    let names = [
        "Clock",
        "\\Lib\\Clock",
        "Base",
        "Unknown\\Thing",
        "self",
        "static",
    ];
    for name in names {
        let bare = deduce(&deducer, Some(FILE), SOURCE, &[name], offset);
        assert!(bare.is_some(), "{name} should resolve");
        let forms = [
            format!("new {name}()"),
            format!("new {name}"),
            format!("new  {name}($a)"),
        ];
        for new_expr in forms {
            assert_eq!(
                deduce(&deducer, Some(FILE), SOURCE, &[new_expr.as_str()], offset),
                bare,
                "{new_expr:?}"
            );
        }
    }
}

#[test]
fn test_new_self_is_the_enclosing_class() {
    let deducer = create_deducer(index(), &[]);
    let offset = inside_child();
    assert_eq!(
        deduce(&deducer, Some(FILE), SOURCE, &["new self()"], offset).as_deref(),
        Some("\\App\\Child")
    );
}

/// `new Foo()` must never be mistaken for a call to a function named `new Foo`.
#[test]
fn test_new_is_not_a_function_call() {
    let deducer = create_deducer(index(), &[]);
    assert_eq!(
        deduce(&deducer, Some(FILE), SOURCE, &["new Foo()"], inside_child()).as_deref(),
        Some("\\App\\Foo")
    );
}

#[test]
fn test_clone_delegates_to_variable() {
    let deducer = create_deducer(index(), &[("$clock", "Lib\\Clock")]);
    let offset = inside_child();
    assert_eq!(
        deduce(&deducer, Some(FILE), SOURCE, &["clone $clock"], offset),
        deduce(&deducer, Some(FILE), SOURCE, &["$clock"], offset)
    );
    let parts = ["clone $clock", "now()"];
    assert_eq!(
        deduce(&deducer, Some(FILE), SOURCE, &parts, offset).as_deref(),
        Some("\\DateTimeImmutable")
    );
    assert_eq!(
        deduce(&deducer, Some(FILE), SOURCE, &["clone $nothing"], offset),
        None
    );
}

// ─── self / static / parent ─────────────────────────────────────────────────

#[test]
fn test_self_and_static_resolve_to_enclosing_class() {
    let deducer = create_deducer(index(), &[]);
    for keyword in ["self", "static"] {
        assert_eq!(
            deduce(&deducer, Some(FILE), SOURCE, &[keyword], inside_child()).as_deref(),
            Some("\\App\\Child")
        );
        assert_eq!(
            deduce(&deducer, Some(FILE), SOURCE, &[keyword], inside_base()).as_deref(),
            Some("\\App\\Base")
        );
    }
}

#[test]
fn test_self_outside_any_class_is_unknown() {
    let deducer = create_deducer(index(), &[]);
    assert_eq!(deduce(&deducer, Some(FILE), SOURCE, &["self"], 0), None);
    assert_eq!(
        deduce(&deducer, None, SOURCE, &["static"], inside_child()),
        None
    );
}

#[test]
fn test_parent_resolves_to_first_parent() {
    let deducer = create_deducer(index(), &[]);
    assert_eq!(
        deduce(&deducer, Some(FILE), SOURCE, &["parent"], inside_child()).as_deref(),
        Some("\\App\\Base")
    );
}

#[test]
fn test_parent_without_parents_is_unknown() {
    let deducer = create_deducer(index(), &[]);
    assert_eq!(
        deduce(&deducer, Some(FILE), SOURCE, &["parent"], inside_base()),
        None
    );
}

/// When the class index lists no parents, the class range's list is used.
#[test]
fn test_parent_falls_back_to_class_range_parents() {
    let index = index().with_class("App\\Child", ClassInfo::default());
    let deducer = create_deducer(index, &[]);
    assert_eq!(
        deduce(&deducer, Some(FILE), SOURCE, &["parent"], inside_child()).as_deref(),
        Some("\\App\\Base")
    );
}

// ─── Function calls ─────────────────────────────────────────────────────────

#[test]
fn test_global_function_call_uses_return_type() {
    let deducer = create_deducer(index(), &[]);
    let offset = inside_child();
    assert_eq!(
        deduce(&deducer, Some(FILE), SOURCE, &["app()"], offset).as_deref(),
        Some("\\App\\Container")
    );
    assert_eq!(
        deduce(&deducer, Some(FILE), SOURCE, &["strlen()"], offset).as_deref(),
        Some("int")
    );
    assert_eq!(
        deduce(&deducer, Some(FILE), SOURCE, &["\\strlen()"], offset).as_deref(),
        Some("int")
    );
    assert_eq!(
        deduce(&deducer, Some(FILE), SOURCE, &["missing()"], offset),
        None
    );
}

// ─── Class names ────────────────────────────────────────────────────────────

#[test]
fn test_class_name_root_is_resolved_in_file_context() {
    let deducer = create_deducer(index(), &[]);
    let offset = inside_child();
    assert_eq!(
        deduce(&deducer, Some(FILE), SOURCE, &["Clock"], offset).as_deref(),
        Some("\\Lib\\Clock"),
        "imported name"
    );
    assert_eq!(
        deduce(&deducer, Some(FILE), SOURCE, &["Thing"], offset).as_deref(),
        Some("\\App\\Thing"),
        "current namespace"
    );
    assert_eq!(
        deduce(&deducer, Some(FILE), SOURCE, &["\\Other\\Thing"], offset).as_deref(),
        Some("\\Other\\Thing"),
        "fully qualified"
    );
    assert_eq!(
        deduce(&deducer, None, SOURCE, &["Clock"], offset).as_deref(),
        Some("\\Clock"),
        "no file means global scope"
    );
}
