pub mod request;
pub mod response;
#[cfg(feature = "sonar")]
pub mod sonar;

pub use request::{GenerationConfig, ModelRequest, OutputConfig, OutputFormat};
pub use response::{Candidate, FinishReason, ModelResponse, StructuredResponse};

use std::{collections::BTreeMap, sync::Arc};

use futures_util::future::BoxFuture;

use crate::{
    errors::GenerateContentError,
    provider::{ModelDescriptor, Provider},
};

/// Provider and model name of a [`Model`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelInfo<'a>(pub Provider, pub &'a str);

impl std::fmt::Display for ModelInfo<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.0, self.1)
    }
}

/// A trait for interacting with a large language model.
///
/// Implementations translate the canonical [`ModelRequest`] into their
/// provider's format and the provider's answer back into a [`ModelResponse`].
/// The trait is object safe so hosts can keep heterogeneous models behind
/// `Arc<dyn Model>`.
pub trait Model: Send + Sync + std::fmt::Debug {
    /// Returns the provider and model name.
    fn info(&self) -> ModelInfo<'_>;

    /// Returns the model name/identifier.
    fn name(&self) -> &str;

    /// Sends a single, non-streaming request to the model.
    fn request(
        &self,
        request: ModelRequest,
    ) -> BoxFuture<'_, Result<ModelResponse, GenerateContentError>>;
}

/// Host-side callback that receives model definitions.
///
/// Adapters call [`ModelRegistry::define_model`] once per model they expose;
/// the host decides how to store and route them.
pub trait ModelRegistry {
    fn define_model(&mut self, id: String, descriptor: &ModelDescriptor, model: Arc<dyn Model>);
}

impl ModelRegistry for BTreeMap<String, Arc<dyn Model>> {
    fn define_model(&mut self, id: String, _descriptor: &ModelDescriptor, model: Arc<dyn Model>) {
        self.insert(id, model);
    }
}
