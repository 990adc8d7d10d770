//! Keyword extraction shared by indexing and query scoring.
//!
//! The same function runs over `title + content + category` when a knowledge
//! item is created and over the raw question when a message is sent, so both
//! sides of the overlap check see identical tokens.

use std::collections::HashSet;

/// Tokens with this many characters or fewer are dropped ("the", "and", "is").
pub const MAX_IGNORED_TOKEN_LEN: usize = 3;

/// Extract the ordered, de-duplicated keyword list from free text.
///
/// Lowercases, strips everything that is neither an ASCII word character
/// (`[A-Za-z0-9_]`) nor whitespace, splits on whitespace and keeps tokens
/// longer than [`MAX_IGNORED_TOKEN_LEN`]. First occurrence wins.
pub fn extract_keywords(text: &str) -> Vec<String> {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect();

    let mut seen = HashSet::new();
    cleaned
        .split_whitespace()
        .filter(|token| token.len() > MAX_IGNORED_TOKEN_LEN)
        .filter(|token| seen.insert(*token))
        .map(str::to_string)
        .collect()
}

/// Keywords for a knowledge item, indexed over title, content and category.
pub fn index_keywords(title: &str, content: &str, category: &str) -> Vec<String> {
    extract_keywords(&format!("{title} {content} {category}"))
}
