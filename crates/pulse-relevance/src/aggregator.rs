use std::collections::HashMap;

use chrono::{DateTime, Utc};
use pulse_persist::Message;
use serde::{Deserialize, Serialize};

use crate::error::{RelevanceError, Result};
use crate::scorer::RelevanceScore;
use crate::HIGH_RELEVANCE_THRESHOLD;

/// Batch-level relevance statistics, persisted alongside a digest as its
/// metadata blob. Round-trips losslessly through JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelevanceMetadata {
    pub total_messages: usize,
    pub relevance_breakdown: RelevanceBreakdown,
    pub categories: HashMap<String, usize>,
    pub top_keywords: Vec<(String, usize)>,
    pub statistics: RelevanceStatistics,
    pub analysis_timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelevanceBreakdown {
    pub high_relevance: usize,
    pub medium_relevance: usize,
    pub low_relevance: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelevanceStatistics {
    pub average_score: f64,
    pub average_confidence: f64,
    pub high_relevance_percentage: f64,
}

const TOP_KEYWORDS: usize = 10;

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

fn round3(v: f64) -> f64 {
    (v * 1000.0).round() / 1000.0
}

/// Reduce a batch of per-message verdicts into summary statistics.
///
/// `messages` and `scores` must be parallel slices; a length mismatch is
/// a programmer error and fails fast.
pub fn aggregate(messages: &[Message], scores: &[RelevanceScore]) -> Result<RelevanceMetadata> {
    if messages.len() != scores.len() {
        return Err(RelevanceError::InvalidInput(format!(
            "batch size mismatch: {} messages, {} scores",
            messages.len(),
            scores.len()
        )));
    }

    let total_messages = messages.len();
    let high = scores
        .iter()
        .filter(|s| s.score >= HIGH_RELEVANCE_THRESHOLD)
        .count();
    let medium = scores
        .iter()
        .filter(|s| s.score >= 50.0 && s.score < HIGH_RELEVANCE_THRESHOLD)
        .count();
    let low = scores.iter().filter(|s| s.score < 50.0).count();

    let mut categories: HashMap<String, usize> = HashMap::new();
    for s in scores {
        *categories.entry(s.category.as_str().to_string()).or_insert(0) += 1;
    }

    // Keyword frequency table, first-seen order preserved so the later
    // stable sort breaks frequency ties deterministically.
    let mut keyword_order: Vec<String> = Vec::new();
    let mut keyword_counts: HashMap<String, usize> = HashMap::new();
    for s in scores {
        for kw in &s.keywords {
            if !keyword_counts.contains_key(kw) {
                keyword_order.push(kw.clone());
            }
            *keyword_counts.entry(kw.clone()).or_insert(0) += 1;
        }
    }
    let mut top_keywords: Vec<(String, usize)> = keyword_order
        .into_iter()
        .map(|kw| {
            let count = keyword_counts[&kw];
            (kw, count)
        })
        .collect();
    top_keywords.sort_by(|a, b| b.1.cmp(&a.1));
    top_keywords.truncate(TOP_KEYWORDS);

    let (average_score, average_confidence) = if scores.is_empty() {
        (0.0, 0.0)
    } else {
        let n = scores.len() as f64;
        (
            scores.iter().map(|s| s.score).sum::<f64>() / n,
            scores.iter().map(|s| s.confidence).sum::<f64>() / n,
        )
    };
    let high_relevance_percentage = if total_messages > 0 {
        (high as f64 / total_messages as f64) * 100.0
    } else {
        0.0
    };

    Ok(RelevanceMetadata {
        total_messages,
        relevance_breakdown: RelevanceBreakdown {
            high_relevance: high,
            medium_relevance: medium,
            low_relevance: low,
        },
        categories,
        top_keywords,
        statistics: RelevanceStatistics {
            average_score: round2(average_score),
            average_confidence: round3(average_confidence),
            high_relevance_percentage: round2(high_relevance_percentage),
        },
        analysis_timestamp: Utc::now(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scorer::RelevanceCategory;

    fn verdict(score: f64, category: RelevanceCategory, keywords: &[&str]) -> RelevanceScore {
        RelevanceScore {
            message_id: "000000000000000000000000".to_string(),
            score,
            category,
            confidence: 0.5,
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            reasoning: String::new(),
        }
    }

    fn message() -> Message {
        use bson::oid::ObjectId;
        use pulse_persist::MessageKind;

        Message {
            id: ObjectId::new(),
            project_id: ObjectId::new(),
            platform_message_id: 1,
            content: "content".to_string(),
            author: None,
            timestamp: Utc::now(),
            kind: MessageKind::Text,
            collected_at: Utc::now(),
        }
    }

    #[test]
    fn test_length_mismatch_is_invalid_input() {
        let err = aggregate(&[message()], &[]).unwrap_err();
        assert!(matches!(err, RelevanceError::InvalidInput(_)));
    }

    #[test]
    fn test_breakdown_partitions_batch() {
        let messages: Vec<Message> = (0..5).map(|_| message()).collect();
        let scores = vec![
            verdict(95.0, RelevanceCategory::Announcement, &[]),
            verdict(80.0, RelevanceCategory::Development, &[]),
            verdict(79.9, RelevanceCategory::Community, &[]),
            verdict(50.0, RelevanceCategory::Community, &[]),
            verdict(10.0, RelevanceCategory::Spam, &[]),
        ];
        let meta = aggregate(&messages, &scores).unwrap();

        assert_eq!(meta.relevance_breakdown.high_relevance, 2);
        assert_eq!(meta.relevance_breakdown.medium_relevance, 2);
        assert_eq!(meta.relevance_breakdown.low_relevance, 1);
        assert_eq!(
            meta.relevance_breakdown.high_relevance
                + meta.relevance_breakdown.medium_relevance
                + meta.relevance_breakdown.low_relevance,
            meta.total_messages
        );
    }

    #[test]
    fn test_category_histogram() {
        let messages: Vec<Message> = (0..3).map(|_| message()).collect();
        let scores = vec![
            verdict(90.0, RelevanceCategory::Announcement, &[]),
            verdict(60.0, RelevanceCategory::Community, &[]),
            verdict(55.0, RelevanceCategory::Community, &[]),
        ];
        let meta = aggregate(&messages, &scores).unwrap();

        assert_eq!(meta.categories["announcement"], 1);
        assert_eq!(meta.categories["community"], 2);
        assert!(!meta.categories.contains_key("spam"));
    }

    #[test]
    fn test_top_keywords_frequency_and_tie_break() {
        let messages: Vec<Message> = (0..3).map(|_| message()).collect();
        let scores = vec![
            verdict(60.0, RelevanceCategory::Community, &["vote", "upgrade"]),
            verdict(60.0, RelevanceCategory::Community, &["upgrade", "mainnet"]),
            verdict(60.0, RelevanceCategory::Community, &["vote", "upgrade"]),
        ];
        let meta = aggregate(&messages, &scores).unwrap();

        assert_eq!(meta.top_keywords[0], ("upgrade".to_string(), 3));
        assert_eq!(meta.top_keywords[1], ("vote".to_string(), 2));
        // "mainnet" ties with nothing; first-seen order is kept among ties.
        assert_eq!(meta.top_keywords[2], ("mainnet".to_string(), 1));
    }

    #[test]
    fn test_top_keywords_truncated_to_ten() {
        let keywords: Vec<String> = (0..15).map(|i| format!("kw{}", i)).collect();
        let keyword_refs: Vec<&str> = keywords.iter().map(|s| s.as_str()).collect();
        let messages = vec![message()];
        let scores = vec![verdict(60.0, RelevanceCategory::Community, &keyword_refs)];
        let meta = aggregate(&messages, &scores).unwrap();

        assert_eq!(meta.top_keywords.len(), 10);
        // All counts are 1, so first-seen order decides the cut.
        assert_eq!(meta.top_keywords[0].0, "kw0");
        assert_eq!(meta.top_keywords[9].0, "kw9");
    }

    #[test]
    fn test_statistics_rounding() {
        let messages: Vec<Message> = (0..3).map(|_| message()).collect();
        let mut scores = vec![
            verdict(85.0, RelevanceCategory::Announcement, &[]),
            verdict(50.0, RelevanceCategory::Community, &[]),
            verdict(50.0, RelevanceCategory::Community, &[]),
        ];
        scores[0].confidence = 0.8;
        scores[1].confidence = 0.5;
        scores[2].confidence = 0.5;
        let meta = aggregate(&messages, &scores).unwrap();

        // 185/3 = 61.666..., 1.8/3 = 0.6, 1/3 = 33.333...%
        assert_eq!(meta.statistics.average_score, 61.67);
        assert_eq!(meta.statistics.average_confidence, 0.6);
        assert_eq!(meta.statistics.high_relevance_percentage, 33.33);
    }

    #[test]
    fn test_empty_batch() {
        let meta = aggregate(&[], &[]).unwrap();
        assert_eq!(meta.total_messages, 0);
        assert_eq!(meta.relevance_breakdown.high_relevance, 0);
        assert_eq!(meta.statistics.average_score, 0.0);
        assert_eq!(meta.statistics.high_relevance_percentage, 0.0);
        assert!(meta.top_keywords.is_empty());
    }

    #[test]
    fn test_metadata_json_round_trip() {
        let messages: Vec<Message> = (0..2).map(|_| message()).collect();
        let scores = vec![
            verdict(90.0, RelevanceCategory::Announcement, &["mainnet"]),
            verdict(20.0, RelevanceCategory::Spam, &[]),
        ];
        let meta = aggregate(&messages, &scores).unwrap();

        let json = serde_json::to_string(&meta).unwrap();
        let back: RelevanceMetadata = serde_json::from_str(&json).unwrap();
        assert_eq!(meta, back);
    }
}
