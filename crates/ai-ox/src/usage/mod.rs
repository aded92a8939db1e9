use ai_ox_common::TokenUsage;
use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign};

/// Token accounting for one or more model calls.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    /// Number of requests made to the model
    pub requests: u64,
    /// Prompt tokens
    pub input_tokens: u64,
    /// Completion tokens
    pub output_tokens: u64,
    /// Total as reported by the provider, when it reports one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reported_total_tokens: Option<u64>,
    /// Tokens spent on citation content (search-grounded models)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub citation_tokens: Option<u64>,
    /// Web searches performed while answering
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_queries: Option<u64>,
}

impl Usage {
    /// Creates a new Usage instance with all values set to zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Provider-reported total, falling back to input + output.
    pub fn total_tokens(&self) -> u64 {
        self.reported_total_tokens
            .unwrap_or_else(|| self.input_tokens.saturating_add(self.output_tokens))
    }
}

impl Add for Usage {
    type Output = Usage;

    fn add(mut self, other: Usage) -> Usage {
        self += other;
        self
    }
}

impl AddAssign for Usage {
    fn add_assign(&mut self, rhs: Self) {
        self.reported_total_tokens = match (self.reported_total_tokens, rhs.reported_total_tokens) {
            (Some(a), Some(b)) => Some(a.saturating_add(b)),
            (Some(a), None) => Some(a.saturating_add(rhs.total_tokens())),
            (None, Some(b)) => Some(self.total_tokens().saturating_add(b)),
            (None, None) => None,
        };
        self.requests = self.requests.saturating_add(rhs.requests);
        self.input_tokens = self.input_tokens.saturating_add(rhs.input_tokens);
        self.output_tokens = self.output_tokens.saturating_add(rhs.output_tokens);
        self.citation_tokens = add_optional_u64(self.citation_tokens, rhs.citation_tokens);
        self.search_queries = add_optional_u64(self.search_queries, rhs.search_queries);
    }
}

/// One request's worth of usage from a provider's token counters.
impl From<&TokenUsage> for Usage {
    fn from(tokens: &TokenUsage) -> Self {
        Self {
            requests: 1,
            input_tokens: tokens.prompt_tokens(),
            output_tokens: tokens.completion_tokens(),
            reported_total_tokens: tokens.total_tokens,
            ..Self::default()
        }
    }
}

fn add_optional_u64(a: Option<u64>, b: Option<u64>) -> Option<u64> {
    match (a, b) {
        (Some(x), Some(y)) => Some(x.saturating_add(y)),
        (Some(x), None) => Some(x),
        (None, Some(y)) => Some(y),
        (None, None) => None,
    }
}
