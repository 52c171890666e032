//! Signature Parser
//!
//! Turns `<ClassName: ReturnType methodName(ParamType1,ParamType2,...)>`
//! strings into [`MethodDescriptor`]s and groups them by declaring class.
//! Parsing is pure; a malformed descriptor is a fatal [`ParseError`].
//!
//! [`MethodDescriptor`]: crate::shared::models::MethodDescriptor
//! [`ParseError`]: crate::errors::ParseError

pub mod domain;
pub mod infrastructure;

pub use domain::{ClassEntry, ClassMethodMap};
pub use infrastructure::parser::{parse_descriptor, parse_descriptors, parse_sub_signature};
