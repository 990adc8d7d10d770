//! Keyword-overlap retrieval over the cached knowledge base.
//!
//! # Scoring
//!
//! Every item starts at zero for a given question:
//!
//! - `+10` when the lowercase title is a substring of the lowercase question
//! - `+2` per question keyword found in the item's keyword list
//! - `+1` per question keyword found as a substring of the lowercase content
//!
//! The last two rules fire independently, so a keyword present in both the
//! keyword list and the content counts three points.
//!
//! Items scoring zero are dropped, the rest are sorted by score (stable, so
//! ties keep knowledge-base order) and the top [`MAX_SOURCES`] are rendered
//! as `[Source: <title>]` blocks.

use tracing::debug;

use crate::keywords::extract_keywords;
use crate::knowledge::KnowledgeItem;

/// Maximum number of knowledge items quoted to the model.
pub const MAX_SOURCES: usize = 5;

pub const TITLE_MATCH_POINTS: u32 = 10;
pub const KEYWORD_MATCH_POINTS: u32 = 2;
pub const CONTENT_MATCH_POINTS: u32 = 1;

/// Context text used when nothing in the knowledge base matches.
pub const NO_MATCHES_PLACEHOLDER: &str =
    "No specific matching records found in the knowledge base.";

/// A knowledge item paired with its relevance score for one question.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredItem<'a> {
    pub item: &'a KnowledgeItem,
    pub score: u32,
}

/// Score a single item against a lowercased question and its keywords.
///
/// An empty title never earns the title bonus, even though the empty string
/// is a substring of every question.
pub fn score_item(item: &KnowledgeItem, query_lower: &str, query_keywords: &[String]) -> u32 {
    let mut score = 0;

    let title_lower = item.title.to_lowercase();
    if !title_lower.is_empty() && query_lower.contains(&title_lower) {
        score += TITLE_MATCH_POINTS;
    }

    let content_lower = item.content.to_lowercase();
    for keyword in query_keywords {
        if item.keywords.iter().any(|k| k == keyword) {
            score += KEYWORD_MATCH_POINTS;
        }
        if content_lower.contains(keyword.as_str()) {
            score += CONTENT_MATCH_POINTS;
        }
    }

    score
}

/// Rank the knowledge base for a question: positive scores only, highest
/// first, ties in knowledge-base order, at most [`MAX_SOURCES`] entries.
pub fn rank<'a>(items: &'a [KnowledgeItem], query: &str) -> Vec<ScoredItem<'a>> {
    let query_lower = query.to_lowercase();
    let query_keywords = extract_keywords(query);

    let mut scored: Vec<ScoredItem<'a>> = items
        .iter()
        .map(|item| ScoredItem {
            item,
            score: score_item(item, &query_lower, &query_keywords),
        })
        .filter(|s| s.score > 0)
        .collect();

    // `sort_by` is stable
    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored.truncate(MAX_SOURCES);

    debug!(
        candidates = items.len(),
        matched = scored.len(),
        keywords = query_keywords.len(),
        "Ranked knowledge base"
    );

    scored
}

/// Render ranked items as the context block injected into the prompt.
pub fn render_context(ranked: &[ScoredItem<'_>]) -> String {
    if ranked.is_empty() {
        return NO_MATCHES_PLACEHOLDER.to_string();
    }

    ranked
        .iter()
        .map(|s| format!("[Source: {}]\n{}", s.item.title, s.item.content))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Rank and render in one step. Never fails and never returns an empty string.
pub fn build_context(items: &[KnowledgeItem], query: &str) -> String {
    render_context(&rank(items, query))
}
