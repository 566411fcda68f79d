//! Word splitting and casing helpers.
//!
//! Schema names arrive in every style at once (`A_TestEntity`, `to_MultiLink`,
//! `API_TEST_SRV`, `DateTimeOffSetProperty`), so all casing goes through
//! [`split_words`] first.

/// Split an identifier into words.
///
/// Separators are any non-alphanumeric character. A new word also starts at
/// a lower-to-upper transition (`testEntity`), a digit-to-upper transition
/// (`Lvl2Multi`), and before the last capital of an acronym that is followed
/// by a lowercase letter (`HTTPServer` -> `HTTP`, `Server`).
pub fn split_words(s: &str) -> Vec<String> {
    let chars: Vec<char> = s.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }

        if !current.is_empty() && c.is_uppercase() {
            let prev = chars[i - 1];
            let next = chars.get(i + 1).copied();
            let boundary = prev.is_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_uppercase() && next.is_some_and(char::is_lowercase));
            if boundary {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(c);
    }

    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
    }
}

/// Uppercase the first character and keep the rest as is (`fContinue` -> `FContinue`).
pub fn upper_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

/// Convert a string to PascalCase (e.g., "to_multi_link" -> "ToMultiLink")
pub fn to_pascal_case(s: &str) -> String {
    split_words(s).iter().map(|w| capitalize(w)).collect()
}

/// Convert a string to camelCase (e.g., "KeyPropertyGuid" -> "keyPropertyGuid")
pub fn to_camel_case(s: &str) -> String {
    split_words(s)
        .iter()
        .enumerate()
        .map(|(i, w)| if i == 0 { w.to_lowercase() } else { capitalize(w) })
        .collect()
}

/// Convert a string to UPPER_SNAKE_CASE (e.g., "ComplexTypeProperty" -> "COMPLEX_TYPE_PROPERTY")
pub fn to_upper_snake_case(s: &str) -> String {
    split_words(s)
        .iter()
        .map(|w| w.to_uppercase())
        .collect::<Vec<_>>()
        .join("_")
}

/// Convert a string to kebab-case (e.g., "TEST_SERVICE" -> "test-service")
pub fn to_kebab_case(s: &str) -> String {
    split_words(s)
        .iter()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join("-")
}
