//! Value Synthesis
//!
//! Produces an argument value for any declared parameter type, emitting the
//! statements that build it into the driver body. Construction of nested
//! objects is guarded by a [`ConstructionStack`] so a class never has to be
//! built while it is already being built further up the chain.

pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use domain::ConstructionStack;
pub use infrastructure::DefaultValueSynthesizer;
pub use ports::{SynthesisContext, ValueProvider};
