pub mod default_synthesizer;

pub use default_synthesizer::DefaultValueSynthesizer;
