//! Source identifier sanitizing.

/// Identifier used when a name has no usable characters.
pub const DEFAULT_IDENTIFIER: &str = "Document";

/// Convert an arbitrary display name into a PascalCase source identifier.
///
/// Punctuation is dropped, whitespace-separated words are capitalized and
/// joined. The result is never empty and never starts with a digit: an empty
/// result becomes [`DEFAULT_IDENTIFIER`], and a digit-leading result gets it
/// as a prefix (`"2024 plan"` becomes `"Document2024Plan"`).
pub fn sanitize_identifier(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect();

    let ident: String = cleaned
        .split_whitespace()
        .map(capitalize)
        .collect();

    match ident.chars().next() {
        None => DEFAULT_IDENTIFIER.to_string(),
        Some(first) if first.is_numeric() => format!("{}{}", DEFAULT_IDENTIFIER, ident),
        Some(_) => ident,
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
