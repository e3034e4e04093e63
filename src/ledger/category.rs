/// Normalizes a category label to its capitalized form: surrounding
/// whitespace is trimmed, the first character is upper-cased and the rest
/// are lower-cased.
pub fn normalize_category(raw: &str) -> String {
    capitalize(raw.trim())
}

/// Upper-cases the first character and lower-cases the remainder.
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
