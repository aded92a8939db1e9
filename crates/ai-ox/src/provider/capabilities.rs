use serde::Serialize;

use crate::model::request::OutputFormat;

/// Describes which request features a model accepts
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Capabilities {
    /// Accepts conversation history, not just one prompt
    pub multiturn: bool,
    /// Accepts media (image) parts
    pub media: bool,
    /// Accepts system messages
    pub system_role: bool,
    /// Can call tools
    pub tools: bool,
    /// Output formats the model can produce
    pub output: &'static [OutputFormat],
}

impl Capabilities {
    /// Check if the model can produce the given output format
    pub fn supports_output(&self, format: OutputFormat) -> bool {
        self.output.contains(&format)
    }
}

/// Static description of one model variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelDescriptor {
    /// Name the provider API knows the model by, e.g. `sonar-pro`
    pub name: &'static str,
    /// Human readable label
    pub label: &'static str,
    pub supports: Capabilities,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supports_output() {
        let caps = Capabilities {
            multiturn: true,
            media: false,
            system_role: true,
            tools: false,
            output: &[OutputFormat::Text],
        };

        assert!(caps.supports_output(OutputFormat::Text));
        assert!(!caps.supports_output(OutputFormat::Json));
    }
}
