/*
 * Symbol Resolution Ports
 *
 * The host symbol table is a global, lazily populated registry. The core
 * only ever touches it through these traits:
 *
 *   EntryPointCreator ──> SymbolResolver ──> ClassRepository ──> ClassSource
 *                                              (Scene)         (YAML files, ...)
 *
 * Calls are synchronous. A ClassSource may do I/O; its latency and errors
 * are propagated unchanged.
 */

use std::sync::Arc;

use super::domain::{ClassSymbol, ResolveResult};

/// Host symbol table
pub trait ClassRepository {
    /// Already-known class, without triggering the loader
    fn get_class(&self, name: &str) -> Option<Arc<ClassSymbol>>;

    /// Known class, or force the loader to bring it in
    fn load_class(&mut self, name: &str) -> ResolveResult<Arc<ClassSymbol>>;

    /// Register a class built in memory. Replaces a class of the same name.
    fn add_class(&mut self, class: ClassSymbol) -> Arc<ClassSymbol>;

    /// Concrete, non-phantom subtypes of `name` among known classes, in
    /// load order. Never includes `name` itself.
    fn implementers_of(&self, name: &str) -> Vec<Arc<ClassSymbol>>;

    /// Known class names, in load order
    fn class_names(&self) -> Vec<String>;

    fn contains_class(&self, name: &str) -> bool {
        self.get_class(name).is_some()
    }
}

/// Lazy class loader behind a repository
pub trait ClassSource {
    /// `Ok(None)` when the class simply does not exist in this source
    fn find_class(&self, name: &str) -> ResolveResult<Option<ClassSymbol>>;

    /// Every class name this source can provide
    fn available_classes(&self) -> ResolveResult<Vec<String>> {
        Ok(Vec::new())
    }
}
