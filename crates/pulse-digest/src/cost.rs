use pulse_persist::Message;

/// Token pricing for the completion collaborator, per 1K tokens.
#[derive(Debug, Clone)]
pub struct PricingModel {
    pub input_cost_per_1k: f64,
    pub output_cost_per_1k: f64,
    /// Fixed output-size assumption for one digest.
    pub assumed_output_tokens: usize,
}

impl Default for PricingModel {
    fn default() -> Self {
        Self {
            input_cost_per_1k: 0.01,
            output_cost_per_1k: 0.03,
            assumed_output_tokens: 500,
        }
    }
}

/// Projected cost of digesting one message batch.
#[derive(Debug, Clone, PartialEq)]
pub struct CostEstimate {
    pub total_cost: f64,
    pub message_count: usize,
    pub cost_per_message: f64,
    pub estimated_tokens: usize,
}

impl CostEstimate {
    pub fn zero() -> Self {
        Self {
            total_cost: 0.0,
            message_count: 0,
            cost_per_message: 0.0,
            estimated_tokens: 0,
        }
    }
}

/// Project the cost of a generation call over `messages`, before making it.
///
/// Tokens are approximated as one per four content characters; this is a
/// budgeting heuristic, not a tokenizer.
pub fn estimate(messages: &[Message], pricing: &PricingModel) -> CostEstimate {
    if messages.is_empty() {
        return CostEstimate::zero();
    }

    let total_chars: usize = messages.iter().map(|m| m.content.chars().count()).sum();
    let input_tokens = total_chars / 4;
    let output_tokens = pricing.assumed_output_tokens;

    let input_cost = (input_tokens as f64 / 1000.0) * pricing.input_cost_per_1k;
    let output_cost = (output_tokens as f64 / 1000.0) * pricing.output_cost_per_1k;
    let total_cost = input_cost + output_cost;

    CostEstimate {
        total_cost,
        message_count: messages.len(),
        cost_per_message: total_cost / messages.len() as f64,
        estimated_tokens: input_tokens + output_tokens,
    }
}
