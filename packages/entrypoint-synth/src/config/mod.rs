//! Synthesis configuration
//!
//! ```rust,ignore
//! use entrypoint_synth::config::{EndpointMode, SynthesisConfig};
//!
//! let config = SynthesisConfig::default().endpoints(EndpointMode::Synthetic);
//! config.validate()?;
//!
//! let config = SynthesisConfig::from_yaml("synth.yaml")?;
//! ```

pub mod error;
pub mod io;
pub mod synthesis_config;

pub use error::{ConfigError, ConfigResult};
pub use io::{ConfigExportV1, SUPPORTED_VERSIONS};
pub use synthesis_config::{
    AnalysisConfig, EndpointMode, SynthesisConfig, TaintInjection, ValuePolicy, DEFAULT_DRIVER_CLASS,
    DEFAULT_DRIVER_METHOD, DEFAULT_SINK, DEFAULT_SOURCE, SYNTHETIC_ENDPOINT_CLASS,
    SYNTHETIC_SINK_METHOD, SYNTHETIC_SOURCE_METHOD,
};
