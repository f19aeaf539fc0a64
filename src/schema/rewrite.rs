//! Type rewrite grammar and response inference
//!
//! The documentation writes types as prose: `Array of String`,
//! `Integer or String`, `InputMediaAudio, InputMediaDocument and
//! InputMediaVideo`. [`rewrite_type`] turns that prose into a [`TypeExpr`]:
//!
//! 1. `Array of X` becomes a list of `X`. The last occurrence is rewritten
//!    first, so `Array of Array of X` nests from the inside out.
//! 2. `X or Y`, `X and Y` and `X, Y` become unions.
//! 3. Scalar keywords map to primitives; `InputFile` and `CallbackGame`
//!    become `any`.
//! 4. A trailing ` of` is dropped.
//! 5. Anything else is a named reference.

use super::types::TypeExpr;
use regex::Regex;
use std::sync::LazyLock;

const ARRAY_OF: &str = "Array of ";

/// Articles dropped before response phrases are read
static DETERMINERS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(a|an|the)\b").unwrap());

/// Phrases announcing a method's result, tried in order
static RETURN_PATTERNS: LazyLock<[Regex; 4]> = LazyLock::new(|| {
    [
        Regex::new(r"(?i)returns\s+(.+?)\s+on\s+success").unwrap(),
        Regex::new(r"(?i)on\s+success,\s+(.+?)is\s+returned").unwrap(),
        Regex::new(r"(?i)\.(.+?)is\s+returned").unwrap(),
        Regex::new(r"(?i)returns\s+(.+?)\.").unwrap(),
    ]
});

static WORD_SEPARATOR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r",?\s").unwrap());

/// Rewrite a documentation type string into a type expression
pub fn rewrite_type(raw: &str) -> TypeExpr {
    let raw = raw.trim();
    match raw.rfind(ARRAY_OF) {
        Some(idx) => {
            let element = rewrite_type(&raw[idx + ARRAY_OF.len()..]);
            with_tail(&raw[..idx], TypeExpr::list(element))
        }
        None => rewrite_alternatives(raw),
    }
}

/// Combine the text before an already rewritten `Array of` with its result
fn with_tail(prefix: &str, tail: TypeExpr) -> TypeExpr {
    let prefix = prefix.trim_end();
    if prefix.is_empty() {
        return tail;
    }
    if let Some(rest) = prefix.strip_suffix(ARRAY_OF.trim_end()) {
        return with_tail(rest, TypeExpr::list(tail));
    }

    let rest = prefix
        .strip_suffix(" or")
        .or_else(|| prefix.strip_suffix(" and"))
        .or_else(|| prefix.strip_suffix(','))
        .unwrap_or(prefix);

    TypeExpr::union([rewrite_type(rest), tail])
}

fn rewrite_alternatives(raw: &str) -> TypeExpr {
    let parts: Vec<&str> = raw
        .split(" or ")
        .flat_map(|part| part.split(" and "))
        .flat_map(|part| part.split(','))
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect();

    match parts.as_slice() {
        [] => TypeExpr::Any,
        [single] => rewrite_scalar(single),
        _ => TypeExpr::union(parts.iter().map(|part| rewrite_scalar(part))),
    }
}

fn rewrite_scalar(raw: &str) -> TypeExpr {
    match raw {
        "Integer" | "Float" | "Float number" | "Int" => TypeExpr::Number,
        "String" => TypeExpr::String,
        "True" => TypeExpr::True,
        "False" => TypeExpr::False,
        "Boolean" => TypeExpr::Boolean,
        "InputFile" | "CallbackGame" => TypeExpr::Any,
        other => TypeExpr::named(other.strip_suffix(" of").unwrap_or(other)),
    }
}

/// Infer a method's result type from its description.
///
/// The first matching return phrase wins. Of the captured words only
/// capitalized ones and the connectors `of`, `or`, `and`, `otherwise` are
/// kept, `Messages` is read as `Message` and `otherwise` as `or`.
pub fn infer_response(description: &str) -> Option<TypeExpr> {
    let text = DETERMINERS
        .replace_all(description, "")
        .replace("array", "Array");

    let captures = RETURN_PATTERNS
        .iter()
        .find_map(|pattern| pattern.captures(&text))?;

    let mut words: Vec<&str> = WORD_SEPARATOR
        .split(captures[1].trim())
        .filter(|word| {
            word.starts_with(|c: char| c.is_ascii_uppercase())
                || is_connector(word)
                || *word == "otherwise"
        })
        .map(|word| match word {
            "Messages" => "Message",
            "otherwise" => "or",
            other => other,
        })
        .collect();

    // "in form of a User object" keeps a dangling "of"
    while words.first().is_some_and(|word| is_connector(word)) {
        words.remove(0);
    }
    while words.last().is_some_and(|word| is_connector(word)) {
        words.pop();
    }

    if words.is_empty() {
        return None;
    }

    Some(rewrite_type(&words.join(" ")))
}

fn is_connector(word: &str) -> bool {
    matches!(word, "of" | "or" | "and")
}
