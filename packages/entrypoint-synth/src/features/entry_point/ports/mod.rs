/*
 * Host entry-point contract
 *
 * The host asks for the driver procedure, then for the classes it must
 * load and any extra members it must add to its program model before the
 * flow analysis starts.
 */

use crate::errors::Result;
use crate::features::driver_builder::DriverProcedure;
use crate::features::symbol_resolution::{ClassRepository, FieldSymbol, MethodSymbol};

pub trait EntryPointCreator {
    /// Synthesize the driver against the host symbol table
    fn create_dummy_main(&mut self, repo: &mut dyn ClassRepository) -> Result<DriverProcedure>;

    /// Classes the host must load for the driver to be complete
    fn required_classes(&self) -> Vec<String>;

    fn additional_methods(&self) -> Vec<MethodSymbol>;

    fn additional_fields(&self) -> Vec<FieldSymbol>;
}
