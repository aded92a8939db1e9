use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// Sonar model enumeration
#[derive(
    Debug,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
)]
pub enum Model {
    #[strum(to_string = "sonar")]
    #[serde(rename = "sonar")]
    Sonar,
    #[strum(to_string = "sonar-pro")]
    #[serde(rename = "sonar-pro")]
    SonarPro,
    #[strum(to_string = "sonar-reasoning")]
    #[serde(rename = "sonar-reasoning")]
    SonarReasoning,
    #[strum(to_string = "sonar-reasoning-pro")]
    #[serde(rename = "sonar-reasoning-pro")]
    SonarReasoningPro,
    #[strum(to_string = "sonar-deep-research")]
    #[serde(rename = "sonar-deep-research")]
    SonarDeepResearch,
}

impl Model {
    /// Every model the API serves, in catalog order.
    pub const ALL: [Model; 5] = [
        Model::Sonar,
        Model::SonarPro,
        Model::SonarReasoning,
        Model::SonarReasoningPro,
        Model::SonarDeepResearch,
    ];

    /// Wire name of the model.
    pub fn as_str(&self) -> &'static str {
        self.into()
    }

    /// Human readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Model::Sonar => "Perplexity - Sonar",
            Model::SonarPro => "Perplexity - Sonar Pro",
            Model::SonarReasoning => "Perplexity - Sonar Reasoning",
            Model::SonarReasoningPro => "Perplexity - Sonar Reasoning Pro",
            Model::SonarDeepResearch => "Perplexity - Sonar Deep Research",
        }
    }

    /// Check if this model supports tool/function calling
    pub fn supports_tools(&self) -> bool {
        matches!(self, Model::SonarDeepResearch)
    }
}

impl From<Model> for String {
    fn from(model: Model) -> Self {
        model.to_string()
    }
}
