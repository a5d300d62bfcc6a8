// src/cost.rs
// Token counting and cost estimation for chat transcripts
//
// Companion utility to the hooks: estimates token usage and dollar cost
// from transcript messages. The estimate is a rough character-count
// heuristic, not a tokenizer.

use serde::Serialize;
use serde_json::Value;

/// Per-million-token USD prices for one model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelPricing {
    pub input: f64,
    pub output: f64,
}

/// Model pricing per 1M tokens (as of Jan 2025).
///
/// Ordered: `estimate_cost` takes the first entry whose key matches the
/// model name by substring, so declaration order is part of the contract.
/// The first entry doubles as the fallback for unknown models.
pub const MODEL_PRICING: &[(&str, ModelPricing)] = &[
    ("claude-sonnet-4-5", ModelPricing { input: 3.00, output: 15.00 }),
    ("claude-sonnet-4-20250514", ModelPricing { input: 3.00, output: 15.00 }),
    ("claude-opus-4", ModelPricing { input: 15.00, output: 75.00 }),
    ("claude-opus-4-20250514", ModelPricing { input: 15.00, output: 75.00 }),
    ("claude-haiku-4", ModelPricing { input: 0.25, output: 1.25 }),
    ("claude-3-5-sonnet-20241022", ModelPricing { input: 3.00, output: 15.00 }),
    ("claude-3-5-haiku-20241022", ModelPricing { input: 0.80, output: 4.00 }),
    ("claude-3-opus-20240229", ModelPricing { input: 15.00, output: 75.00 }),
];

/// Token totals for a transcript.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TokenCounts {
    pub input_tokens: u64,
    pub output_tokens: u64,
    pub total_tokens: u64,
}

/// Rough token estimate: one token per four characters.
pub fn estimate_tokens(text: &str) -> u64 {
    (text.chars().count() / 4) as u64
}

/// Count tokens across chat transcript messages, split by role.
///
/// A message's `type` field decides the side: `user`/`human` count as
/// input, `assistant`/`ai` as output, anything else as input. `content`
/// may be a plain string or a list of blocks carrying `text` fields.
pub fn count_tokens_in_transcript(messages: &[Value]) -> TokenCounts {
    let mut input_tokens = 0u64;
    let mut output_tokens = 0u64;

    for message in messages {
        let Some(obj) = message.as_object() else {
            continue;
        };
        let role = obj.get("type").and_then(|v| v.as_str()).unwrap_or("");

        let text = match obj.get("content") {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Array(blocks)) => blocks
                .iter()
                .filter_map(|block| block.as_object())
                .filter_map(|block| block.get("text").and_then(|v| v.as_str()))
                .collect(),
            Some(other) => other.to_string(),
            None => String::new(),
        };

        let tokens = estimate_tokens(&text);
        match role {
            "assistant" | "ai" => output_tokens += tokens,
            _ => input_tokens += tokens,
        }
    }

    TokenCounts {
        input_tokens,
        output_tokens,
        total_tokens: input_tokens + output_tokens,
    }
}

/// Estimate USD cost for a token count against a model's pricing.
///
/// The model is resolved by case-insensitive substring match against the
/// pricing table in declared order; the first matching entry wins even when
/// the name is a substring of several keys. Unknown models fall back to the
/// leading (Sonnet) entry; an empty model name costs nothing.
pub fn estimate_cost(input_tokens: u64, output_tokens: u64, model_name: &str) -> f64 {
    if model_name.is_empty() {
        return 0.0;
    }

    let model_key = model_name.to_lowercase();
    let pricing = MODEL_PRICING
        .iter()
        .find(|(key, _)| model_key.contains(key) || key.contains(model_key.as_str()))
        .map(|(_, pricing)| *pricing)
        .unwrap_or(MODEL_PRICING[0].1);

    let input_cost = (input_tokens as f64 / 1_000_000.0) * pricing.input;
    let output_cost = (output_tokens as f64 / 1_000_000.0) * pricing.output;
    input_cost + output_cost
}
