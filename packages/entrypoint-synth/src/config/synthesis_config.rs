//! Synthesis options
//!
//! Every knob has a default matching the classic behaviour: descriptors
//! resolved through the symbol table, one shared taint source, arguments
//! built through public constructors.

use serde::{Deserialize, Serialize};

use super::error::{ConfigError, ConfigResult};
use crate::features::signature_parsing::parse_descriptor;
use crate::shared::models::MethodDescriptor;

pub const DEFAULT_SOURCE: &str = "<java.lang.Object: java.lang.String toString()>";
pub const DEFAULT_SINK: &str = "<java.io.PrintStream: void println(java.lang.String)>";

/// Class holding the synthetic source and sink methods
pub const SYNTHETIC_ENDPOINT_CLASS: &str = "_dummy";
pub const SYNTHETIC_SOURCE_METHOD: &str = "_dummy_source";
pub const SYNTHETIC_SINK_METHOD: &str = "_dummy_sink";

pub const DEFAULT_DRIVER_CLASS: &str = "dummyMainClass";
pub const DEFAULT_DRIVER_METHOD: &str = "dummyMainMethod";

/// Taint source and sink descriptors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    pub source: String,
    pub sink: String,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            source: DEFAULT_SOURCE.to_string(),
            sink: DEFAULT_SINK.to_string(),
        }
    }
}

impl AnalysisConfig {
    pub fn source(mut self, descriptor: impl Into<String>) -> Self {
        self.source = descriptor.into();
        self
    }

    pub fn sink(mut self, descriptor: impl Into<String>) -> Self {
        self.sink = descriptor.into();
        self
    }

    pub fn source_descriptor(&self) -> ConfigResult<MethodDescriptor> {
        parse_descriptor(&self.source).map_err(|source| ConfigError::InvalidDescriptor {
            field: "analysis.source".to_string(),
            source,
        })
    }

    pub fn sink_descriptor(&self) -> ConfigResult<MethodDescriptor> {
        parse_descriptor(&self.sink).map_err(|source| ConfigError::InvalidDescriptor {
            field: "analysis.sink".to_string(),
            source,
        })
    }
}

/// Where the taint source and sink come from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndpointMode {
    /// Resolve `analysis.source` / `analysis.sink` in the symbol table
    #[default]
    Configured,
    /// Use the reserved `_dummy` class installed on demand
    Synthetic,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaintInjection {
    /// Every string argument of every handler gets the one source result
    #[default]
    SharedSource,
    /// String arguments get the empty string literal
    Disabled,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValuePolicy {
    /// Build reference arguments through public constructors
    #[default]
    Construct,
    /// Pass null for every non-string reference argument
    NullReferences,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SynthesisConfig {
    pub analysis: AnalysisConfig,
    pub endpoints: EndpointMode,
    pub taint_injection: TaintInjection,
    pub value_policy: ValuePolicy,
    /// Allow an argument chain to construct the handler's own class
    pub allow_self_references: bool,
    pub driver_class: String,
    pub driver_method: String,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            analysis: AnalysisConfig::default(),
            endpoints: EndpointMode::default(),
            taint_injection: TaintInjection::default(),
            value_policy: ValuePolicy::default(),
            allow_self_references: false,
            driver_class: DEFAULT_DRIVER_CLASS.to_string(),
            driver_method: DEFAULT_DRIVER_METHOD.to_string(),
        }
    }
}

impl SynthesisConfig {
    pub fn analysis(mut self, analysis: AnalysisConfig) -> Self {
        self.analysis = analysis;
        self
    }

    pub fn endpoints(mut self, mode: EndpointMode) -> Self {
        self.endpoints = mode;
        self
    }

    pub fn taint_injection(mut self, injection: TaintInjection) -> Self {
        self.taint_injection = injection;
        self
    }

    pub fn value_policy(mut self, policy: ValuePolicy) -> Self {
        self.value_policy = policy;
        self
    }

    pub fn allow_self_references(mut self, allow: bool) -> Self {
        self.allow_self_references = allow;
        self
    }

    pub fn driver_name(mut self, class: impl Into<String>, method: impl Into<String>) -> Self {
        self.driver_class = class.into();
        self.driver_method = method.into();
        self
    }

    pub fn validate(&self) -> ConfigResult<()> {
        self.analysis.source_descriptor()?;
        self.analysis.sink_descriptor()?;

        if self.driver_class.trim().is_empty() {
            return Err(ConfigError::EmptyField {
                field: "driver_class".to_string(),
            });
        }
        if self.driver_method.trim().is_empty() {
            return Err(ConfigError::EmptyField {
                field: "driver_method".to_string(),
            });
        }
        if self.driver_class == SYNTHETIC_ENDPOINT_CLASS {
            return Err(ConfigError::ReservedName {
                name: self.driver_class.clone(),
                hint: "Pick another driver_class; '_dummy' holds the synthetic endpoints."
                    .to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let config = SynthesisConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.driver_class, "dummyMainClass");
        assert_eq!(config.endpoints, EndpointMode::Configured);
        assert!(!config.allow_self_references);
    }

    #[test]
    fn test_bad_source_rejected() {
        let config = SynthesisConfig::default()
            .analysis(AnalysisConfig::default().source("java.lang.Object.toString"));
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidDescriptor { ref field, .. } if field == "analysis.source"));
    }

    #[test]
    fn test_reserved_driver_class_rejected() {
        let config = SynthesisConfig::default().driver_name("_dummy", "main");
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ReservedName { .. })
        ));
    }

    #[test]
    fn test_empty_driver_method_rejected() {
        let config = SynthesisConfig::default().driver_name("Main", " ");
        assert!(matches!(
            config.validate(),
            Err(ConfigError::EmptyField { ref field }) if field == "driver_method"
        ));
    }
}
