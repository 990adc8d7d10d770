//! Knowledge base records.
//!
//! Items are created and deleted by admins; there is no update path, so a
//! [`KnowledgeItem`] is immutable once the store has assigned its id and
//! creation timestamp.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::keywords::index_keywords;

/// The fixed set of knowledge categories.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[default]
    General,
    Roadmap,
    Team,
    Technical,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::General,
        Category::Roadmap,
        Category::Team,
        Category::Technical,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::General => "General",
            Category::Roadmap => "Roadmap",
            Category::Team => "Team",
            Category::Technical => "Technical",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                Error::Validation(format!(
                    "unknown category '{s}' (expected one of General, Roadmap, Team, Technical)"
                ))
            })
    }
}

/// A stored knowledge record, as pushed by the store subscription.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KnowledgeItem {
    /// Store-assigned identifier
    pub id: String,

    #[serde(default)]
    pub category: Category,

    pub title: String,

    pub content: String,

    /// Lowercase tokens over title + content + category
    #[serde(default)]
    pub keywords: Vec<String>,

    /// Server-assigned creation timestamp
    pub created_at: DateTime<Utc>,
}

/// A validated, not-yet-stored knowledge record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KnowledgeDraft {
    pub category: Category,
    pub title: String,
    pub content: String,
    pub keywords: Vec<String>,
}

impl KnowledgeDraft {
    /// Validate the admin form input and compute keywords.
    ///
    /// Title and content must be non-empty after trimming.
    pub fn new(
        category: Category,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Result<Self, Error> {
        let title = title.into().trim().to_string();
        let content = content.into().trim().to_string();

        if title.is_empty() {
            return Err(Error::Validation("title must not be empty".into()));
        }
        if content.is_empty() {
            return Err(Error::Validation("content must not be empty".into()));
        }

        let keywords = index_keywords(&title, &content, category.as_str());
        Ok(Self {
            category,
            title,
            content,
            keywords,
        })
    }

    /// Turn the draft into a stored record with store-assigned fields.
    pub fn into_item(self, id: impl Into<String>, created_at: DateTime<Utc>) -> KnowledgeItem {
        KnowledgeItem {
            id: id.into(),
            category: self.category,
            title: self.title,
            content: self.content,
            keywords: self.keywords,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_trims_and_indexes() {
        let draft = KnowledgeDraft::new(
            Category::Roadmap,
            "  Mainnet Launch ",
            "Mainnet launches in Q3 after the audit.",
        )
        .unwrap();
        assert_eq!(draft.title, "Mainnet Launch");
        assert_eq!(
            draft.keywords,
            vec!["mainnet", "launch", "launches", "after", "audit", "roadmap"]
        );
    }

    #[test]
    fn draft_rejects_blank_fields() {
        assert!(KnowledgeDraft::new(Category::General, "   ", "content").is_err());
        assert!(KnowledgeDraft::new(Category::General, "Title", "\n").is_err());
    }

    #[test]
    fn category_parses_case_insensitively() {
        assert_eq!("technical".parse::<Category>().unwrap(), Category::Technical);
        assert_eq!(" TEAM ".parse::<Category>().unwrap(), Category::Team);
        assert!("marketing".parse::<Category>().is_err());
    }

    #[test]
    fn item_uses_camel_case_on_the_wire() {
        let item = KnowledgeDraft::new(Category::Team, "Founders", "Alice and Bob")
            .unwrap()
            .into_item("k1", Utc::now());
        let json = serde_json::to_value(&item).unwrap();
        assert!(json.get("createdAt").is_some());
        assert_eq!(json["category"], "Team");
    }
}
