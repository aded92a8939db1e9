//! Provider-agnostic request/response types for large language models, with
//! an adapter for the Perplexity Sonar API behind the `sonar` feature.

pub mod content;
pub mod errors;
pub mod model;
pub mod provider;
pub mod usage;

// Re-export commonly used types
pub use content::{Message, MessageRole, Part};
pub use errors::GenerateContentError;
pub use model::{
    Candidate, FinishReason, GenerationConfig, Model, ModelRegistry, ModelRequest, ModelResponse,
    OutputConfig, OutputFormat,
};
pub use usage::Usage;

#[cfg(feature = "sonar")]
pub use model::sonar::{SonarError, SonarModel, SonarPlugin};
