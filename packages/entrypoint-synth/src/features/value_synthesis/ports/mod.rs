/*
 * Value Synthesis Ports
 *
 * ValueProvider is the extension point the driver builder calls for every
 * argument and shared receiver. Implementations emit statements into the
 * body and answer with the value to pass. They never fail: anything that
 * cannot be built comes back as the null placeholder plus a warning.
 */

use tracing::warn;

use super::domain::ConstructionStack;
use crate::features::driver_builder::domain::{BodyBuilder, LocalId, Value};
use crate::features::symbol_resolution::SymbolResolver;
use crate::shared::models::{JavaType, SynthesisWarning};

/// Mutable state shared by one synthesis run
pub struct SynthesisContext<'a, 'r> {
    pub body: &'a mut BodyBuilder,
    pub resolver: &'a mut SymbolResolver<'r>,
    pub warnings: &'a mut Vec<SynthesisWarning>,
}

impl<'a, 'r> SynthesisContext<'a, 'r> {
    pub fn new(
        body: &'a mut BodyBuilder,
        resolver: &'a mut SymbolResolver<'r>,
        warnings: &'a mut Vec<SynthesisWarning>,
    ) -> Self {
        Self {
            body,
            resolver,
            warnings,
        }
    }

    pub fn warn(&mut self, warning: SynthesisWarning) {
        warn!("{}", warning);
        self.warnings.push(warning);
    }
}

pub trait ValueProvider {
    /// Value for a parameter of type `ty`. `taint`, when present, is the
    /// value string parameters should carry.
    fn value_for_type(
        &self,
        cx: &mut SynthesisContext<'_, '_>,
        ty: &JavaType,
        taint: Option<&Value>,
        stack: &mut ConstructionStack,
    ) -> Value;

    /// Fresh, constructed instance of `class_name`, or `None` when no
    /// instance can be built
    fn construct_instance(
        &self,
        cx: &mut SynthesisContext<'_, '_>,
        class_name: &str,
        taint: Option<&Value>,
        stack: &mut ConstructionStack,
    ) -> Option<LocalId>;
}
