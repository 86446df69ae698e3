use std::collections::HashMap;

use regex::Regex;
use serde::{Deserialize, Serialize};

use infoflow_core::{Content, TagCategory};

use crate::keywords::{
    NEGATIVE_WORDS, POSITIVE_WORDS, SENTIMENT_NEGATIVE, SENTIMENT_NEUTRAL, SENTIMENT_POSITIVE,
    TOPIC_KEYWORDS,
};

/// How many auto-extracted keywords to keep per content item.
const KEYWORD_TOP_N: usize = 5;

/// One tag the classifier wants attached to a content item.
///
/// `confidence` is in `[0.0, 1.0]`; auto-generated assignments always carry
/// one (manual tagging bypasses the classifier entirely).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagAssignment {
    pub name: String,
    pub category: TagCategory,
    pub confidence: f64,
}

/// Classify one content item into topic, sentiment, and keyword tags.
///
/// Side-effect free; returns the assignments in a deterministic order
/// (topics in table order, then the sentiment tag, then keywords by
/// descending frequency).
#[must_use]
pub fn classify(content: &Content) -> Vec<TagAssignment> {
    let text = content.full_text().to_lowercase();

    let mut assignments = classify_topics(&text);
    assignments.push(classify_sentiment(&text));
    assignments.extend(extract_keywords(&content.body));

    tracing::debug!(
        content_id = content.id,
        tags = assignments.len(),
        "classified content"
    );

    assignments
}

/// Substring-count every topic's keywords; total hits >= 1 tags the topic
/// with confidence `min(1, hits/3)`.
fn classify_topics(text: &str) -> Vec<TagAssignment> {
    let mut assignments = Vec::new();

    for &(topic, topic_keywords) in TOPIC_KEYWORDS {
        let mut hits = 0_usize;
        for keyword in topic_keywords {
            hits += text.matches(&keyword.to_lowercase()).count();
        }

        if hits >= 1 {
            #[allow(clippy::cast_precision_loss)]
            let confidence = (hits as f64 / 3.0).min(1.0);
            assignments.push(TagAssignment {
                name: topic.to_string(),
                category: TagCategory::Topic,
                confidence: round2(confidence),
            });
        }
    }

    assignments
}

/// Majority vote between the positive and negative word lists; each list
/// word counts once regardless of repetition. Ties are neutral.
fn classify_sentiment(text: &str) -> TagAssignment {
    let positive = POSITIVE_WORDS
        .iter()
        .filter(|w| text.contains(&w.to_lowercase()))
        .count();
    let negative = NEGATIVE_WORDS
        .iter()
        .filter(|w| text.contains(&w.to_lowercase()))
        .count();

    #[allow(clippy::cast_precision_loss)]
    let confidence_from = |diff: usize| round2((diff as f64 / 3.0).min(1.0));

    if positive > negative {
        TagAssignment {
            name: SENTIMENT_POSITIVE.to_string(),
            category: TagCategory::Sentiment,
            confidence: confidence_from(positive - negative),
        }
    } else if negative > positive {
        TagAssignment {
            name: SENTIMENT_NEGATIVE.to_string(),
            category: TagCategory::Sentiment,
            confidence: confidence_from(negative - positive),
        }
    } else {
        TagAssignment {
            name: SENTIMENT_NEUTRAL.to_string(),
            category: TagCategory::Sentiment,
            confidence: 0.8,
        }
    }
}

/// Frequency-ranked keyword extraction from the body text.
///
/// Words are Latin runs of 4+ letters or CJK runs of 2+ chars, lowercased.
/// The length filter then drops anything of 3 chars or fewer, so two- and
/// three-char CJK words never surface. Top 5 by count, ties in first-seen
/// order.
fn extract_keywords(body: &str) -> Vec<TagAssignment> {
    let word_re =
        Regex::new(r"[A-Za-z]{4,}|[\u{4e00}-\u{9fa5}]{2,}").expect("valid keyword regex");

    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut order: Vec<String> = Vec::new();

    for m in word_re.find_iter(body) {
        let word = m.as_str().to_lowercase();
        if word.chars().count() <= 3 {
            continue;
        }
        match counts.get_mut(&word) {
            Some(count) => *count += 1,
            None => {
                counts.insert(word.clone(), 1);
                order.push(word);
            }
        }
    }

    // Stable sort keeps first-seen order among equal counts.
    order.sort_by(|a, b| counts[b].cmp(&counts[a]));

    order
        .into_iter()
        .take(KEYWORD_TOP_N)
        .map(|word| TagAssignment {
            name: word,
            category: TagCategory::Keyword,
            confidence: 0.6,
        })
        .collect()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
#[path = "classifier_test.rs"]
mod tests;
