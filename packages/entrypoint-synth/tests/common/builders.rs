//! Test data builders

use entrypoint_synth::features::symbol_resolution::{ClassSymbol, MethodSymbol};
use entrypoint_synth::shared::models::{JavaType, MethodDescriptor, MethodSubSignature};

/// Builder for a handler class plus the descriptors that target it
#[derive(Debug)]
pub struct ControllerBuilder {
    class: ClassSymbol,
    descriptors: Vec<String>,
}

impl ControllerBuilder {
    /// Concrete class with a public no-argument constructor
    pub fn new(name: &str) -> Self {
        Self {
            class: ClassSymbol::class(name).with_method(MethodSymbol::default_constructor()),
            descriptors: Vec::new(),
        }
    }

    /// Class declaring no constructor at all
    pub fn without_constructor(name: &str) -> Self {
        Self {
            class: ClassSymbol::class(name),
            descriptors: Vec::new(),
        }
    }

    pub fn constructor(mut self, params: Vec<JavaType>) -> Self {
        self.class = self.class.with_method(MethodSymbol::constructor(params));
        self
    }

    /// Declared instance handler, also requested as an entry point
    pub fn handler(self, name: &str, params: Vec<JavaType>, ret: JavaType) -> Self {
        self.method(MethodSymbol::new(MethodSubSignature::new(name, params, ret)), true)
    }

    pub fn static_handler(self, name: &str, params: Vec<JavaType>, ret: JavaType) -> Self {
        self.method(
            MethodSymbol::new(MethodSubSignature::new(name, params, ret)).into_static(),
            true,
        )
    }

    /// Requested as an entry point but never declared
    pub fn missing_handler(mut self, name: &str, params: Vec<JavaType>, ret: JavaType) -> Self {
        let descriptor =
            MethodDescriptor::new(self.class.name.clone(), MethodSubSignature::new(name, params, ret));
        self.descriptors.push(descriptor.to_string());
        self
    }

    fn method(mut self, method: MethodSymbol, requested: bool) -> Self {
        if requested {
            let descriptor =
                MethodDescriptor::new(self.class.name.clone(), method.sub_signature.clone());
            self.descriptors.push(descriptor.to_string());
        }
        self.class = self.class.with_method(method);
        self
    }

    pub fn descriptors(&self) -> &[String] {
        &self.descriptors
    }

    pub fn build(self) -> (ClassSymbol, Vec<String>) {
        (self.class, self.descriptors)
    }
}
