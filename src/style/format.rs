//! Literal source text for style maps and style dictionaries.
//!
//! Two policies exist. `Compact` appends `px` to numeric style values outside
//! [`UNITLESS_PROPERTIES`]; `Detailed` emits every number bare.

use super::registry::lookup_path;
use crate::ident::sanitize_identifier;
use crate::render::FormatPolicy;
use serde_json::{Map, Number, Value};

/// Style properties whose numeric values never take a unit suffix.
pub const UNITLESS_PROPERTIES: &[&str] = &["opacity", "zIndex", "fontWeight", "lineHeight", "flex"];

/// Length unit appended by the compact policy.
pub const LENGTH_UNIT: &str = "px";

/// Format a number as decimal text, dropping a zero fraction.
pub fn format_number(number: &Number) -> String {
    if let Some(i) = number.as_i64() {
        return i.to_string();
    }
    if let Some(u) = number.as_u64() {
        return u.to_string();
    }
    match number.as_f64() {
        Some(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e15 => (f as i64).to_string(),
        Some(f) => f.to_string(),
        None => number.to_string(),
    }
}

/// Single-quote a string literal.
pub fn quote_single(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}

/// Check if `name` can be used as a bare object key or binding.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Format an object key, quoting it when it is not an identifier.
pub fn format_key(key: &str) -> String {
    if is_identifier(key) {
        key.to_string()
    } else {
        quote_single(key)
    }
}

/// Format a literal value: bare numbers, single-quoted strings, inline objects.
pub fn format_literal(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => format_number(n),
        Value::String(s) => quote_single(s),
        Value::Array(items) => {
            let items: Vec<String> = items.iter().map(format_literal).collect();
            format!("[{}]", items.join(", "))
        }
        Value::Object(map) => inline_object(
            map.iter()
                .map(|(k, v)| format!("{}: {}", format_key(k), format_literal(v))),
        ),
    }
}

/// Format one style value under `policy`.
pub fn format_style_value(property: &str, value: &Value, policy: FormatPolicy) -> String {
    match value {
        Value::Number(n)
            if policy == FormatPolicy::Compact && !UNITLESS_PROPERTIES.contains(&property) =>
        {
            quote_single(&format!("{}{}", format_number(n), LENGTH_UNIT))
        }
        Value::Object(map) => inline_object(
            map.iter()
                .map(|(k, v)| format!("{}: {}", format_key(k), format_style_value(k, v, policy))),
        ),
        other => format_literal(other),
    }
}

/// `key: value` strings for each style entry, in order.
pub fn style_entries<'a, I>(entries: I, policy: FormatPolicy) -> Vec<String>
where
    I: IntoIterator<Item = (&'a String, &'a Value)>,
{
    entries
        .into_iter()
        .map(|(k, v)| format!("{}: {}", format_key(k), format_style_value(k, v, policy)))
        .collect()
}

/// Join formatted entries as `{ a, b }`, or `{}` when empty.
pub fn inline_object<I: IntoIterator<Item = String>>(entries: I) -> String {
    let entries: Vec<String> = entries.into_iter().collect();
    if entries.is_empty() {
        "{}".to_string()
    } else {
        format!("{{ {} }}", entries.join(", "))
    }
}

/// Format a whole style dictionary as an object literal.
///
/// Compact keeps everything on one line. Detailed writes one entry per line,
/// nested objects expanded, two spaces per level, no trailing commas.
/// Dictionary values are literals, so numbers stay bare in both policies.
pub fn format_dictionary(dictionary: &Value, policy: FormatPolicy) -> String {
    match policy {
        FormatPolicy::Compact => format_literal(dictionary),
        FormatPolicy::Detailed => {
            let mut out = String::new();
            write_detailed(&mut out, dictionary, 0);
            out
        }
    }
}

fn write_detailed(out: &mut String, value: &Value, depth: usize) {
    let Value::Object(map) = value else {
        out.push_str(&format_literal(value));
        return;
    };
    if map.is_empty() {
        out.push_str("{}");
        return;
    }
    let indent = "  ".repeat(depth + 1);
    out.push_str("{\n");
    for (i, (key, child)) in map.iter().enumerate() {
        out.push_str(&indent);
        out.push_str(&format_key(key));
        out.push_str(": ");
        write_detailed(out, child, depth + 1);
        if i + 1 < map.len() {
            out.push(',');
        }
        out.push('\n');
    }
    out.push_str(&"  ".repeat(depth));
    out.push('}');
}

/// Format only the given dotted paths of a dictionary, keeping their nesting.
///
/// Paths that do not resolve are skipped with a warning.
pub fn format_subset(dictionary: &Value, paths: &[&str], policy: FormatPolicy) -> String {
    let mut subset = Map::new();
    for path in paths {
        match lookup_path(dictionary, path) {
            Some(value) => {
                let segments: Vec<&str> = path.split('.').collect();
                insert_path(&mut subset, &segments, value.clone());
            }
            None => log::warn!("style path '{}' not found, skipped", path),
        }
    }
    format_dictionary(&Value::Object(subset), policy)
}

fn insert_path(target: &mut Map<String, Value>, segments: &[&str], value: Value) {
    match segments {
        [] => {}
        [last] => {
            target.insert(last.to_string(), value);
        }
        [first, rest @ ..] => {
            let child = target
                .entry(first.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if !child.is_object() {
                *child = Value::Object(Map::new());
            }
            if let Value::Object(map) = child {
                insert_path(map, rest, value);
            }
        }
    }
}

/// Binding name for an exported dictionary: the set name when it is an
/// identifier, otherwise its sanitized camelCase form.
pub fn binding_name(set_name: &str) -> String {
    if is_identifier(set_name) {
        return set_name.to_string();
    }
    let pascal = sanitize_identifier(set_name);
    let mut chars = pascal.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `export const <name> = { ... };` for a whole dictionary.
pub fn export_dictionary(set_name: &str, dictionary: &Value, policy: FormatPolicy) -> String {
    format!(
        "export const {} = {};\n",
        binding_name(set_name),
        format_dictionary(dictionary, policy)
    )
}
