//! Identifier conversion for generated Rust code.

/// Strict and reserved keywords of Rust 2024.
const KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "crate",
    "do", "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl",
    "in", "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "self", "Self", "static", "struct", "super", "trait", "true", "try", "type",
    "typeof", "unsafe", "unsized", "use", "virtual", "where", "while", "yield",
];

/// Keywords that cannot be raw identifiers.
const NON_RAW: &[&str] = &["self", "Self", "super", "crate"];

/// Type names the generated code refers to unqualified.
const RESERVED_TYPES: &[&str] = &[
    "Self", "String", "Vec", "Option", "Result", "Ok", "Err", "Some", "None", "Default", "Box",
    "PathBuf", "Matrix", "Vector3", "DoubleRange",
];

/// Splits on underscores and on lower-to-upper case changes.
fn words(ident: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut prev_lower = false;
    for c in ident.chars() {
        if c == '_' {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev_lower = false;
            continue;
        }
        if c.is_ascii_uppercase() && prev_lower && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        prev_lower = c.is_ascii_lowercase() || c.is_ascii_digit();
        current.push(c);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

pub fn to_snake_case(ident: &str) -> String {
    words(ident)
        .iter()
        .map(|w| w.to_ascii_lowercase())
        .collect::<Vec<_>>()
        .join("_")
}

pub fn to_pascal_case(ident: &str) -> String {
    words(ident)
        .iter()
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => {
                    first.to_ascii_uppercase().to_string() + &chars.as_str().to_ascii_lowercase()
                }
                None => String::new(),
            }
        })
        .collect()
}

/// Field and module identifier for a declared name.
pub fn field_ident(name: &str) -> String {
    let snake = to_snake_case(name);
    if NON_RAW.contains(&snake.as_str()) {
        format!("{snake}_")
    } else if KEYWORDS.contains(&snake.as_str()) {
        format!("r#{snake}")
    } else {
        snake
    }
}

/// Type or variant identifier for a declared name.
pub fn type_ident(name: &str) -> String {
    let pascal = to_pascal_case(name);
    if RESERVED_TYPES.contains(&pascal.as_str()) {
        format!("{pascal}Param")
    } else {
        pascal
    }
}

/// Schema name of a `.pdl` file: `Name` from an `a__b__Name` stem, the
/// whole stem otherwise. `None` when that is not an identifier.
pub fn schema_name_from_stem(stem: &str) -> Option<&str> {
    let parts: Vec<&str> = stem.split("__").collect();
    let name = match parts[..] {
        [_, _, name] => name,
        _ => stem,
    };
    is_identifier(name).then_some(name)
}

/// ASCII identifier: a letter or `_` followed by letters, digits and `_`.
pub fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Name of an array's element declaration.
pub fn element_name(array: &str) -> String {
    format!("{array}_item")
}
