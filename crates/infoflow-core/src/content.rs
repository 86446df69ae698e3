//! Domain records shared across the scoring, classification, and brief crates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use uuid::Uuid;

/// Source platform of a content item.
///
/// Stored and serialized as a lowercase string. Platforms the pipeline has no
/// special handling for round-trip through `Other` so fetchers can be added
/// without touching the core.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Platform {
    X,
    Reddit,
    Rss,
    Xiaohongshu,
    Other(String),
}

impl Platform {
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "x" => Platform::X,
            "reddit" => Platform::Reddit,
            "rss" => Platform::Rss,
            "xiaohongshu" => Platform::Xiaohongshu,
            other => Platform::Other(other.to_string()),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Platform::X => "x",
            Platform::Reddit => "reddit",
            Platform::Rss => "rss",
            Platform::Xiaohongshu => "xiaohongshu",
            Platform::Other(s) => s.as_str(),
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Platform {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Platform {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Platform::parse(&s))
    }
}

/// The two score families computed per content item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreKind {
    Heat,
    Potential,
}

impl ScoreKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ScoreKind::Heat => "heat",
            ScoreKind::Potential => "potential",
        }
    }
}

impl std::fmt::Display for ScoreKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tag categories produced by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagCategory {
    Topic,
    Sentiment,
    Keyword,
}

impl TagCategory {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            TagCategory::Topic => "topic",
            TagCategory::Sentiment => "sentiment",
            TagCategory::Keyword => "keyword",
        }
    }
}

/// One fetched content item, as produced by a platform fetcher and persisted
/// in the `contents` table.
///
/// `raw_metrics` is a JSON object mapping metric keys (`views`, `likes`,
/// `reposts`, `comments`, `bookmarks`) to non-negative numbers. Platforms
/// populate a subset; absent keys are treated as zero by the scorers.
/// `published_at` is `None` for undated items (some RSS feeds); when present
/// it is already normalized to UTC.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    pub id: i64,
    pub public_id: Uuid,
    pub platform: Platform,
    pub external_id: String,
    pub title: Option<String>,
    pub body: String,
    pub author: Option<String>,
    pub author_id: Option<String>,
    pub url: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub raw_metrics: Value,
    pub media_urls: Vec<String>,
    pub is_processed: bool,
    pub is_briefed: bool,
    pub created_at: DateTime<Utc>,
}

impl Content {
    /// Title + body joined for text classification.
    #[must_use]
    pub fn full_text(&self) -> String {
        match &self.title {
            Some(title) => format!("{title} {}", self.body),
            None => self.body.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_round_trips_known_values() {
        for s in ["x", "reddit", "rss", "xiaohongshu"] {
            assert_eq!(Platform::parse(s).as_str(), s);
        }
    }

    #[test]
    fn platform_preserves_unknown_values() {
        let p = Platform::parse("mastodon");
        assert_eq!(p, Platform::Other("mastodon".to_string()));
        assert_eq!(p.as_str(), "mastodon");
    }

    #[test]
    fn platform_serializes_as_plain_string() {
        let json = serde_json::to_string(&Platform::Xiaohongshu).unwrap();
        assert_eq!(json, "\"xiaohongshu\"");
        let back: Platform = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Platform::Xiaohongshu);
    }

    #[test]
    fn score_kind_as_str() {
        assert_eq!(ScoreKind::Heat.as_str(), "heat");
        assert_eq!(ScoreKind::Potential.as_str(), "potential");
    }

    #[test]
    fn full_text_includes_title_when_present() {
        let content = Content {
            id: 1,
            public_id: Uuid::new_v4(),
            platform: Platform::X,
            external_id: "e1".to_string(),
            title: Some("Hello".to_string()),
            body: "world".to_string(),
            author: None,
            author_id: None,
            url: None,
            published_at: None,
            raw_metrics: serde_json::json!({}),
            media_urls: vec![],
            is_processed: false,
            is_briefed: false,
            created_at: Utc::now(),
        };
        assert_eq!(content.full_text(), "Hello world");
    }
}
