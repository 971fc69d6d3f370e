use std::time::Duration;

/// Title-case each space-separated word: "  john  SMITH " -> "John Smith".
///
/// Only the space character separates words; tabs stay inside a word.
/// Blank input is returned untouched.
pub fn format_name(name: &str) -> String {
    if name.trim().is_empty() {
        return name.to_string();
    }
    name.split(' ')
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Elapsed time as fractional seconds: 0.0123
pub fn seconds(elapsed: Duration) -> String {
    format!("{:.4}", elapsed.as_secs_f64())
}
