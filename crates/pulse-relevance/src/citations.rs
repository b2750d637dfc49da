use std::cmp::Ordering;

use pulse_persist::Message;
use serde::{Deserialize, Serialize};

use crate::error::{RelevanceError, Result};
use crate::scorer::{RelevanceCategory, RelevanceScore};
use crate::HIGH_RELEVANCE_THRESHOLD;

/// Upper bound on citations attached to one digest.
pub const MAX_CITATIONS: usize = 20;

const PREVIEW_CHARS: usize = 200;

/// Evidence record linking a digest back to one high-relevance source
/// message. Round-trips losslessly through JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Citation {
    pub message_id: String,
    pub platform_message_id: i64,
    pub author: String,
    pub timestamp: String,
    pub content_preview: String,
    pub score: f64,
    pub category: RelevanceCategory,
    pub confidence: f64,
    pub keywords: Vec<String>,
    pub reasoning: String,
}

/// Select the auditable evidence for a generated digest: the top
/// [`MAX_CITATIONS`] messages at or above [`HIGH_RELEVANCE_THRESHOLD`],
/// ordered by descending score with stable ties.
///
/// `messages` and `scores` must be parallel slices.
pub fn extract_citations(
    _summary_text: &str,
    messages: &[Message],
    scores: &[RelevanceScore],
) -> Result<Vec<Citation>> {
    if messages.len() != scores.len() {
        return Err(RelevanceError::InvalidInput(format!(
            "batch size mismatch: {} messages, {} scores",
            messages.len(),
            scores.len()
        )));
    }

    let mut high: Vec<(&Message, &RelevanceScore)> = messages
        .iter()
        .zip(scores.iter())
        .filter(|(_, s)| s.score >= HIGH_RELEVANCE_THRESHOLD)
        .collect();

    // Stable sort: equal scores keep their original message order.
    high.sort_by(|a, b| b.1.score.partial_cmp(&a.1.score).unwrap_or(Ordering::Equal));
    high.truncate(MAX_CITATIONS);

    let citations = high
        .into_iter()
        .map(|(message, score)| Citation {
            message_id: score.message_id.clone(),
            platform_message_id: message.platform_message_id,
            author: message
                .author
                .clone()
                .unwrap_or_else(|| "Unknown".to_string()),
            timestamp: message.timestamp.to_rfc3339(),
            content_preview: preview(&message.content),
            score: score.score,
            category: score.category,
            confidence: score.confidence,
            keywords: score.keywords.clone(),
            reasoning: score.reasoning.clone(),
        })
        .collect();

    Ok(citations)
}

fn preview(content: &str) -> String {
    if content.chars().count() <= PREVIEW_CHARS {
        return content.to_string();
    }
    let truncated: String = content.chars().take(PREVIEW_CHARS).collect();
    format!("{}...", truncated)
}
