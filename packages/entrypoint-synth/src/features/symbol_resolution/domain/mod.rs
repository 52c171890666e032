pub mod class_symbol;
pub mod errors;

pub use class_symbol::{ClassKind, ClassSymbol, FieldSymbol, MethodSymbol};
pub use errors::{ResolveError, ResolveResult};
