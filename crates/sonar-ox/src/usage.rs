use serde::{Deserialize, Serialize};

use ai_ox_common::usage::TokenUsage;

/// Usage block of a Sonar response.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Usage {
    #[serde(flatten)]
    pub tokens: TokenUsage,
    /// Tokens spent on citation content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub citation_tokens: Option<u64>,
    /// Number of web searches the model ran
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_search_queries: Option<u64>,
}

impl Usage {
    pub fn new(prompt_tokens: u64, completion_tokens: u64) -> Self {
        Self {
            tokens: TokenUsage::with_prompt_completion(prompt_tokens, completion_tokens),
            citation_tokens: None,
            num_search_queries: None,
        }
    }

    pub fn prompt_tokens(&self) -> u64 {
        self.tokens.prompt_tokens()
    }

    pub fn completion_tokens(&self) -> u64 {
        self.tokens.completion_tokens()
    }

    pub fn total_tokens(&self) -> u64 {
        self.tokens.total_tokens()
    }
}
