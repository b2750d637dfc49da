use pulse_persist::Message;
use serde::{Deserialize, Serialize};

use crate::lexicon::{ADMIN_INDICATORS, HIGH_RELEVANCE_KEYWORDS, SPAM_KEYWORDS};
use crate::HIGH_RELEVANCE_THRESHOLD;

/// Relevance verdict for one message.
///
/// `score` is always in [0, 100] and `confidence` in [0, 1]; both are
/// clamped after all rules have fired, whatever the intermediate
/// arithmetic did.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelevanceScore {
    pub message_id: String,
    pub score: f64,
    pub category: RelevanceCategory,
    pub confidence: f64,
    pub keywords: Vec<String>,
    pub reasoning: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelevanceCategory {
    Announcement,
    Development,
    Community,
    Spam,
}

impl RelevanceCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Announcement => "announcement",
            Self::Development => "development",
            Self::Community => "community",
            Self::Spam => "spam",
        }
    }
}

impl std::fmt::Display for RelevanceCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Score one message with the lexical heuristics.
///
/// Total function: every message gets a verdict. Rule order matters --
/// later rules compound on the category and score set by earlier ones,
/// and the two-spam-hit override is applied last among the category
/// writes.
pub fn score(message: &Message) -> RelevanceScore {
    let content = message.content.to_lowercase();
    let author = message
        .author
        .as_deref()
        .unwrap_or_default()
        .to_lowercase();

    let mut score = 50.0_f64;
    let mut category = RelevanceCategory::Community;
    let mut confidence = 0.5_f64;
    let mut keywords: Vec<String> = Vec::new();
    let mut reasoning_parts: Vec<String> = Vec::new();

    // Official/admin author
    let is_admin = ADMIN_INDICATORS.iter().any(|ind| author.contains(ind));
    if is_admin {
        score += 30.0;
        category = RelevanceCategory::Announcement;
        confidence += 0.3;
        reasoning_parts.push("Official/admin message".to_string());
    }

    // High-relevance keywords
    let mut high_rel_count = 0usize;
    for keyword in HIGH_RELEVANCE_KEYWORDS {
        if content.contains(keyword) {
            high_rel_count += 1;
            keywords.push((*keyword).to_string());
            score += 5.0;
            confidence += 0.05;
        }
    }
    if high_rel_count > 0 {
        reasoning_parts.push(format!(
            "Contains {} high-relevance keywords",
            high_rel_count
        ));
        if category == RelevanceCategory::Community && high_rel_count >= 3 {
            category = RelevanceCategory::Development;
        }
    }

    // Spam keywords
    let mut spam_count = 0usize;
    for keyword in SPAM_KEYWORDS {
        if content.contains(keyword) {
            spam_count += 1;
            score -= 10.0;
            confidence += 0.1;
        }
    }
    if spam_count > 0 {
        reasoning_parts.push(format!("Contains {} spam indicators", spam_count));
        if spam_count >= 2 {
            category = RelevanceCategory::Spam;
            score = (score - 20.0).max(0.0);
        }
    }

    // Message length
    let char_count = content.chars().count();
    if char_count < 20 {
        score -= 15.0;
        reasoning_parts.push("Very short message".to_string());
    } else if char_count > 200 {
        score += 5.0;
        reasoning_parts.push("Detailed message".to_string());
    }

    // Links
    if content.contains("http") || content.contains("www.") {
        score += 10.0;
        reasoning_parts.push("Contains links".to_string());
    }

    // Numbers (prices, dates, block heights)
    if content.chars().any(|c| c.is_ascii_digit()) {
        score += 5.0;
        reasoning_parts.push("Contains numerical data".to_string());
    }

    let reasoning = if reasoning_parts.is_empty() {
        "Standard community message".to_string()
    } else {
        reasoning_parts.join("; ")
    };

    RelevanceScore {
        message_id: message.id.to_hex(),
        score: score.clamp(0.0, 100.0),
        category,
        confidence: confidence.clamp(0.0, 1.0),
        keywords,
        reasoning,
    }
}

/// Score a whole batch. Scoring is pure and per-message, so one odd
/// message never affects the others.
pub fn score_batch(messages: &[Message]) -> Vec<RelevanceScore> {
    tracing::info!(count = messages.len(), "Analyzing relevance for message batch");
    let scores: Vec<RelevanceScore> = messages.iter().map(score).collect();
    tracing::info!(count = scores.len(), "Relevance analysis completed");
    scores
}

/// Messages scoring at or above `threshold`, paired with their verdicts.
pub fn high_relevance_messages(
    messages: &[Message],
    threshold: Option<f64>,
) -> Vec<(Message, RelevanceScore)> {
    let threshold = threshold.unwrap_or(HIGH_RELEVANCE_THRESHOLD);
    let scores = score_batch(messages);

    let high: Vec<(Message, RelevanceScore)> = messages
        .iter()
        .cloned()
        .zip(scores)
        .filter(|(_, s)| s.score >= threshold)
        .collect();

    tracing::info!(
        count = high.len(),
        threshold,
        "Found high-relevance messages"
    );
    high
}
