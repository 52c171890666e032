//! Symbol Resolver
//!
//! Resolves class names and method subsignatures against a host-provided,
//! lazily populated symbol table. Resolution of a class always happens
//! before any code referencing it is generated.

pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use domain::{ClassKind, ClassSymbol, FieldSymbol, MethodSymbol, ResolveError, ResolveResult};
pub use infrastructure::{Scene, SymbolResolver, YamlClassSource};
pub use ports::{ClassRepository, ClassSource};
