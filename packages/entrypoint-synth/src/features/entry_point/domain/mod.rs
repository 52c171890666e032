pub mod outcome;

pub use outcome::SynthesisOutcome;
