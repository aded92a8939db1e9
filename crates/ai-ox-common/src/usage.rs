use serde::{Deserialize, Serialize};

/// Normalised token usage information shared across providers.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenUsage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt_tokens: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completion_tokens: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_tokens: Option<u64>,
}

impl TokenUsage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_prompt_completion(prompt: u64, completion: u64) -> Self {
        Self {
            prompt_tokens: Some(prompt),
            completion_tokens: Some(completion),
            total_tokens: Some(prompt.saturating_add(completion)),
        }
    }

    #[must_use]
    pub fn prompt_tokens(&self) -> u64 {
        self.prompt_tokens.unwrap_or(0)
    }

    #[must_use]
    pub fn completion_tokens(&self) -> u64 {
        self.completion_tokens.unwrap_or(0)
    }

    /// Reported total, or prompt + completion when the provider omitted it.
    #[must_use]
    pub fn total_tokens(&self) -> u64 {
        self.total_tokens
            .or_else(|| match (self.prompt_tokens, self.completion_tokens) {
                (Some(p), Some(c)) => Some(p.saturating_add(c)),
                (Some(p), None) => Some(p),
                (None, Some(c)) => Some(c),
                (None, None) => None,
            })
            .unwrap_or(0)
    }

    pub fn add_assign(&mut self, other: &Self) {
        self.prompt_tokens = add_option(self.prompt_tokens, other.prompt_tokens);
        self.completion_tokens = add_option(self.completion_tokens, other.completion_tokens);
        self.total_tokens = add_option(self.total_tokens, other.total_tokens);
    }
}

fn add_option(lhs: Option<u64>, rhs: Option<u64>) -> Option<u64> {
    match (lhs, rhs) {
        (Some(a), Some(b)) => Some(a.saturating_add(b)),
        (Some(a), None) => Some(a),
        (None, Some(b)) => Some(b),
        (None, None) => None,
    }
}

impl std::ops::Add for TokenUsage {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        let mut lhs = self;
        lhs.add_assign(&rhs);
        lhs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_falls_back_to_sum() {
        let usage = TokenUsage {
            prompt_tokens: Some(10),
            completion_tokens: Some(5),
            total_tokens: None,
        };
        assert_eq!(usage.total_tokens(), 15);
        assert_eq!(TokenUsage::new().total_tokens(), 0);
    }

    #[test]
    fn huge_counts_saturate() {
        let usage = TokenUsage {
            prompt_tokens: Some(u64::MAX),
            completion_tokens: Some(1),
            total_tokens: None,
        };
        assert_eq!(usage.total_tokens(), u64::MAX);

        let sum = usage.clone() + usage;
        assert_eq!(sum.prompt_tokens, Some(u64::MAX));
        assert_eq!(TokenUsage::with_prompt_completion(u64::MAX, 5).total_tokens, Some(u64::MAX));
    }

    #[test]
    fn add_keeps_present_sides() {
        let a = TokenUsage::with_prompt_completion(3, 4);
        let b = TokenUsage {
            prompt_tokens: Some(1),
            ..TokenUsage::default()
        };
        let sum = a + b;
        assert_eq!(sum.prompt_tokens, Some(4));
        assert_eq!(sum.completion_tokens, Some(4));
        assert_eq!(sum.total_tokens, Some(7));
    }
}
