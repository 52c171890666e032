//! Core value types: Java types, method subsignatures and descriptors

pub mod java_type;
pub mod signature;
pub mod warning;

pub use java_type::{JavaType, OBJECT_CLASS, STRING_CLASS};
pub use signature::{MethodDescriptor, MethodSubSignature, CONSTRUCTOR_NAME};
pub use warning::SynthesisWarning;
