pub mod catalog;
pub mod conversion;
mod error;

pub use error::SonarError;

use std::sync::Arc;

use bon::Builder;
use futures_util::{FutureExt, future::BoxFuture};
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use sonar_ox::{API_KEY_ENV, ChatResponse, Sonar, SonarRequestError};

use crate::{
    ModelResponse,
    errors::GenerateContentError,
    model::{
        Model, ModelInfo, ModelRegistry, ModelRequest,
        request::{OutputConfig, OutputFormat},
        response::StructuredResponse,
    },
    provider::{ModelDescriptor, Provider},
};

fn env_api_key() -> Option<String> {
    std::env::var(API_KEY_ENV).ok()
}

/// The explicit key wins; an absent or empty one falls back to the environment value.
fn resolve_api_key(explicit: Option<String>, env: Option<String>) -> Result<String, SonarError> {
    explicit
        .filter(|key| !key.is_empty())
        .or_else(|| env.filter(|key| !key.is_empty()))
        .ok_or(SonarError::MissingCredential)
}

/// Represents a model from the Perplexity Sonar family.
///
/// Built through [`SonarModel::new`], [`SonarModel::from_env`] or
/// [`SonarPlugin::model`], all of which reject a missing credential.
#[derive(Debug, Clone, Builder)]
#[builder(start_fn(vis = "pub(crate)"), builder_type(vis = "pub(crate)"))]
pub struct SonarModel {
    /// Sonar client
    #[builder(field)]
    client: Sonar,
    /// Catalog entry this model serves
    model: sonar_ox::Model,
}

impl<S: sonar_model_builder::State> SonarModelBuilder<S> {
    fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.client = Sonar::new(api_key);
        self
    }

    fn client(mut self, client: Sonar) -> Self {
        self.client = client;
        self
    }
}

impl SonarModel {
    /// Create a model for a catalog name (`sonar-pro` or `perplexity/sonar-pro`).
    pub fn new(model: &str, api_key: impl Into<String>) -> Result<Self, SonarError> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(SonarError::MissingCredential);
        }
        let (model, _) = catalog::resolve(model)?;
        Ok(Self::builder().api_key(api_key).model(model).build())
    }

    /// Create a model, reading the key from `PERPLEXITY_SONAR_API_KEY`.
    pub fn from_env(model: &str) -> Result<Self, SonarError> {
        let api_key = resolve_api_key(None, env_api_key())?;
        Self::new(model, api_key)
    }

    pub fn descriptor(&self) -> &'static ModelDescriptor {
        catalog::descriptor(self.model)
    }

    /// Host-facing id, e.g. `perplexity/sonar-pro`.
    pub fn id(&self) -> String {
        catalog::model_id(self.model)
    }

    /// Send one request and translate the answer.
    ///
    /// Every choice becomes a candidate, in the order the API returned them.
    pub async fn invoke(&self, request: ModelRequest) -> Result<ModelResponse, SonarError> {
        let json_mode = request.output_format() == OutputFormat::Json;
        let sonar_request = conversion::convert_request_to_sonar(self.model.as_str(), request)?;

        let raw = self.client.send_raw(&sonar_request).await?;
        let response: ChatResponse = serde_json::from_value(raw.clone())
            .map_err(|e| SonarRequestError::UnexpectedResponse(e.to_string()))?;

        conversion::convert_response(response, raw, json_mode, self.model.as_str())
    }

    /// Ask for json output shaped like `O` and deserialize the first candidate into it.
    pub async fn request_structured<O>(
        &self,
        mut request: ModelRequest,
    ) -> Result<StructuredResponse<O>, GenerateContentError>
    where
        O: DeserializeOwned + JsonSchema,
    {
        let output = OutputConfig::json_for::<O>()
            .map_err(|e| GenerateContentError::configuration(format!("Invalid schema: {e}")))?;
        request.output = Some(output);

        let response = self.invoke(request).await?;
        let data = response.data().ok_or(GenerateContentError::NoResponse)?;
        let data = serde_json::from_value(data.clone())
            .map_err(|e| GenerateContentError::response_parsing(e.to_string()))?;

        Ok(StructuredResponse {
            data,
            usage: response.usage,
            model_name: response.model_name,
            vendor_name: response.vendor_name,
        })
    }
}

impl Model for SonarModel {
    fn info(&self) -> ModelInfo<'_> {
        ModelInfo(Provider::Perplexity, self.model.as_str())
    }

    fn name(&self) -> &str {
        self.model.as_str()
    }

    /// Sends a request to the Sonar API and returns the response.
    fn request(
        &self,
        request: ModelRequest,
    ) -> BoxFuture<'_, Result<ModelResponse, GenerateContentError>> {
        async move { self.invoke(request).await.map_err(Into::into) }.boxed()
    }
}

/// Entry point a host uses to expose the whole Sonar catalog.
///
/// Holds one client; every model it hands out shares it.
#[derive(Debug, Clone)]
pub struct SonarPlugin {
    client: Sonar,
}

impl SonarPlugin {
    /// Resolve the key from `api_key` or `PERPLEXITY_SONAR_API_KEY`.
    ///
    /// Fails with [`SonarError::MissingCredential`] when neither is set.
    pub fn new(api_key: Option<String>) -> Result<Self, SonarError> {
        let api_key = resolve_api_key(api_key, env_api_key())?;
        Self::with_client(Sonar::new(api_key))
    }

    /// Use a preconfigured client, e.g. one pointing at another base URL.
    ///
    /// Fails with [`SonarError::MissingCredential`] when the client has no key.
    pub fn with_client(client: Sonar) -> Result<Self, SonarError> {
        if !client.has_api_key() {
            return Err(SonarError::MissingCredential);
        }
        Ok(Self { client })
    }

    /// A model for one catalog name.
    pub fn model(&self, name: &str) -> Result<SonarModel, SonarError> {
        let (model, _) = catalog::resolve(name)?;
        Ok(SonarModel::builder()
            .client(self.client.clone())
            .model(model)
            .build())
    }

    /// Invoke a catalog model by name. Unknown names fail before any network call.
    pub async fn invoke(
        &self,
        model_name: &str,
        request: ModelRequest,
    ) -> Result<ModelResponse, SonarError> {
        self.model(model_name)?.invoke(request).await
    }

    /// Define every catalog model under `perplexity/<name>`.
    pub fn register(&self, registry: &mut impl ModelRegistry) {
        for model in sonar_ox::Model::ALL {
            let sonar_model = SonarModel::builder()
                .client(self.client.clone())
                .model(model)
                .build();
            registry.define_model(
                catalog::model_id(model),
                catalog::descriptor(model),
                Arc::new(sonar_model),
            );
        }
        log::debug!("registered {} sonar models", sonar_ox::Model::ALL.len());
    }
}
