//! Static catalog of the Sonar model variants.

use std::{collections::BTreeMap, str::FromStr, sync::LazyLock};

use sonar_ox::Model;

use super::SonarError;
use crate::{
    model::request::OutputFormat,
    provider::{Capabilities, ModelDescriptor},
};

/// Prefix the host sees in front of every Sonar model name.
pub const MODEL_ID_PREFIX: &str = "perplexity/";

const OUTPUT_FORMATS: &[OutputFormat] = &[OutputFormat::Text, OutputFormat::Json];

static CATALOG: LazyLock<BTreeMap<Model, ModelDescriptor>> = LazyLock::new(|| {
    Model::ALL
        .into_iter()
        .map(|model| (model, describe(model)))
        .collect()
});

fn describe(model: Model) -> ModelDescriptor {
    ModelDescriptor {
        name: model.as_str(),
        label: model.label(),
        supports: Capabilities {
            multiturn: true,
            media: true,
            system_role: true,
            tools: model.supports_tools(),
            output: OUTPUT_FORMATS,
        },
    }
}

/// Descriptor of a catalog model.
pub fn descriptor(model: Model) -> &'static ModelDescriptor {
    // Every variant is inserted above.
    &CATALOG[&model]
}

/// All catalog entries, in catalog order.
pub fn descriptors() -> impl Iterator<Item = &'static ModelDescriptor> {
    Model::ALL.into_iter().map(descriptor)
}

/// Look a model up by name. Both `sonar-pro` and `perplexity/sonar-pro` resolve.
pub fn resolve(name: &str) -> Result<(Model, &'static ModelDescriptor), SonarError> {
    let bare = name.strip_prefix(MODEL_ID_PREFIX).unwrap_or(name);
    let model =
        Model::from_str(bare).map_err(|_| SonarError::UnsupportedModel(name.to_string()))?;
    Ok((model, descriptor(model)))
}

/// Host-facing id, e.g. `perplexity/sonar-pro`.
pub fn model_id(model: Model) -> String {
    format!("{MODEL_ID_PREFIX}{model}")
}
