pub mod capabilities;

pub use capabilities::{Capabilities, ModelDescriptor};

use serde::{Deserialize, Serialize};

/// Vendors with an adapter in this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Perplexity,
}

impl Provider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Perplexity => "perplexity",
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
