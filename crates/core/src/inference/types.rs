//! Type-name constants and the numeric promotion ladder.

use once_cell::sync::Lazy;
use std::collections::HashMap;

pub const OBJECT: &str = "java.lang.Object";
pub const STRING: &str = "java.lang.String";
pub const GSTRING: &str = "groovy.lang.GString";
pub const CLOSURE: &str = "groovy.lang.Closure";
pub const CLASS: &str = "java.lang.Class";
pub const MATCHER: &str = "java.util.regex.Matcher";
pub const LIST: &str = "java.util.List";
pub const MAP_LITERAL: &str = "java.util.LinkedHashMap";

pub const BOOLEAN: &str = "boolean";
pub const CHAR: &str = "char";
pub const INT: &str = "int";
pub const LONG: &str = "long";
pub const FLOAT: &str = "float";
pub const DOUBLE: &str = "double";
pub const BIG_INTEGER: &str = "java.math.BigInteger";
pub const BIG_DECIMAL: &str = "java.math.BigDecimal";

/// Result types of the promotion ladder, lowest first.
const LADDER: [&str; 6] = [INT, LONG, FLOAT, DOUBLE, BIG_INTEGER, BIG_DECIMAL];

/// Constructor simple names that always mean the `java.util`/`java.lang` class.
pub static COLLECTION_CONSTRUCTORS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("ArrayList", "java.util.ArrayList"),
        ("LinkedList", "java.util.LinkedList"),
        ("HashMap", "java.util.HashMap"),
        ("LinkedHashMap", "java.util.LinkedHashMap"),
        ("HashSet", "java.util.HashSet"),
        ("TreeMap", "java.util.TreeMap"),
        ("StringBuilder", "java.lang.StringBuilder"),
    ])
});

/// Return types of the methods every object has. `clone` is handled by the
/// caller since it depends on the receiver.
pub static OBJECT_METHODS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("toString", STRING),
        ("hashCode", INT),
        ("getClass", CLASS),
        ("equals", BOOLEAN),
    ])
});

/// Wrapper class for a primitive; other names pass through.
pub fn boxed(name: &str) -> &str {
    match name {
        "int" => "java.lang.Integer",
        "long" => "java.lang.Long",
        "float" => "java.lang.Float",
        "double" => "java.lang.Double",
        "boolean" => "java.lang.Boolean",
        "char" => "java.lang.Character",
        "byte" => "java.lang.Byte",
        "short" => "java.lang.Short",
        other => other,
    }
}

pub fn is_string_like(name: &str) -> bool {
    matches!(name, STRING | GSTRING | "String" | "GString")
}

/// Position on the promotion ladder. byte and short rank with int; boxed
/// names rank with their primitives.
pub fn numeric_rank(name: &str) -> Option<usize> {
    let rank = match name {
        "byte" | "short" | "int" | "java.lang.Byte" | "java.lang.Short" | "java.lang.Integer"
        | "Integer" => 0,
        "long" | "java.lang.Long" | "Long" => 1,
        "float" | "java.lang.Float" | "Float" => 2,
        "double" | "java.lang.Double" | "Double" => 3,
        "java.math.BigInteger" | "BigInteger" => 4,
        "java.math.BigDecimal" | "BigDecimal" => 5,
        _ => return None,
    };
    Some(rank)
}

pub fn is_numeric(name: &str) -> bool {
    numeric_rank(name).is_some()
}

/// Wider of two numeric types; `None` when either is not numeric.
pub fn promote(a: &str, b: &str) -> Option<&'static str> {
    let rank = numeric_rank(a)?.max(numeric_rank(b)?);
    Some(LADDER[rank])
}

/// Type name without generic arguments.
pub fn erasure(name: &str) -> &str {
    name.split('<').next().unwrap_or(name).trim()
}
