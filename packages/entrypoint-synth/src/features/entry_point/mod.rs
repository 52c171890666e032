//! Entry-Point Orchestrator
//!
//! Parses the handler descriptors, resolves them together with the taint
//! source and sink, and hands the synthesized driver to the host through
//! the [`EntryPointCreator`] contract.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use application::HandlerEntryPointCreator;
pub use domain::SynthesisOutcome;
pub use infrastructure::{
    install_synthetic_endpoints, synthetic_endpoint_class, synthetic_sink_signature,
    synthetic_source_signature,
};
pub use ports::EntryPointCreator;
