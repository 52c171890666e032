//! Default value policy
//!
//! 1. Strings carry the taint value when one is offered, else `""`.
//! 2. Primitives get their zero value.
//! 3. Arrays get one element, synthesized recursively.
//! 4. References are built with `new` plus the public constructor taking
//!    the fewest parameters. Interfaces and abstract classes use their
//!    first concrete implementer. Anything else is the null placeholder.

use std::sync::Arc;

use tracing::debug;

use crate::config::{SynthesisConfig, TaintInjection, ValuePolicy};
use crate::features::driver_builder::domain::{
    Constant, InvokeExpr, InvokeKind, LocalId, Rvalue, Stmt, Value,
};
use crate::features::symbol_resolution::{ClassSymbol, MethodSymbol};
use crate::features::value_synthesis::domain::ConstructionStack;
use crate::features::value_synthesis::ports::{SynthesisContext, ValueProvider};
use crate::shared::models::{JavaType, SynthesisWarning};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DefaultValueSynthesizer {
    taint_injection: TaintInjection,
    value_policy: ValuePolicy,
}

impl DefaultValueSynthesizer {
    pub fn new(taint_injection: TaintInjection, value_policy: ValuePolicy) -> Self {
        Self {
            taint_injection,
            value_policy,
        }
    }

    pub fn from_config(config: &SynthesisConfig) -> Self {
        Self::new(config.taint_injection, config.value_policy)
    }

    fn string_value(&self, taint: Option<&Value>) -> Value {
        match (self.taint_injection, taint) {
            (TaintInjection::SharedSource, Some(value)) => value.clone(),
            _ => Value::Constant(Constant::Str(String::new())),
        }
    }

    fn array_value(
        &self,
        cx: &mut SynthesisContext<'_, '_>,
        element: &JavaType,
        taint: Option<&Value>,
        stack: &mut ConstructionStack,
    ) -> Value {
        let array = cx.body.new_local(JavaType::array_of(element.clone()));
        cx.body.assign(
            array,
            Rvalue::NewArray {
                element: element.clone(),
                size: 1,
            },
        );
        let value = self.value_for_type(cx, element, taint, stack);
        cx.body.push(Stmt::ArrayStore {
            array,
            index: 0,
            value,
        });
        Value::Local(array)
    }

    fn construct_concrete(
        &self,
        cx: &mut SynthesisContext<'_, '_>,
        class: &ClassSymbol,
        taint: Option<&Value>,
        stack: &mut ConstructionStack,
    ) -> Option<LocalId> {
        let Some(constructor) = pick_constructor(class) else {
            placeholder(cx, &class.name, "no public constructor");
            return None;
        };
        if !stack.push(&class.name) {
            placeholder(cx, &class.name, "already under construction");
            return None;
        }

        let local = cx.body.new_local(JavaType::reference(class.name.clone()));
        cx.body.assign(local, Rvalue::New(class.name.clone()));
        let args = constructor
            .parameter_types()
            .iter()
            .map(|ty| self.value_for_type(cx, ty, taint, stack))
            .collect();
        cx.body.push(Stmt::Invoke(InvokeExpr {
            kind: InvokeKind::Special,
            method: constructor.descriptor(),
            base: Some(local),
            args,
        }));

        stack.pop();
        Some(local)
    }
}

impl ValueProvider for DefaultValueSynthesizer {
    fn value_for_type(
        &self,
        cx: &mut SynthesisContext<'_, '_>,
        ty: &JavaType,
        taint: Option<&Value>,
        stack: &mut ConstructionStack,
    ) -> Value {
        if ty.is_string() {
            return self.string_value(taint);
        }
        match ty {
            JavaType::Void => Value::null(),
            JavaType::Long => Value::Constant(Constant::Long(0)),
            JavaType::Float => Value::Constant(Constant::Float(0.0)),
            JavaType::Double => Value::Constant(Constant::Double(0.0)),
            JavaType::Boolean | JavaType::Byte | JavaType::Char | JavaType::Short | JavaType::Int => {
                Value::Constant(Constant::Int(0))
            }
            JavaType::Array(element) => self.array_value(cx, element, taint, stack),
            JavaType::Reference(name) => match self.value_policy {
                ValuePolicy::NullReferences => Value::null(),
                ValuePolicy::Construct => self
                    .construct_instance(cx, name, taint, stack)
                    .map_or_else(Value::null, Value::Local),
            },
        }
    }

    fn construct_instance(
        &self,
        cx: &mut SynthesisContext<'_, '_>,
        class_name: &str,
        taint: Option<&Value>,
        stack: &mut ConstructionStack,
    ) -> Option<LocalId> {
        if stack.contains(class_name) {
            placeholder(cx, class_name, "already under construction");
            return None;
        }

        let class = match cx.resolver.resolve_class(class_name) {
            Ok(class) => class,
            Err(err) => {
                placeholder(cx, class_name, &err.to_string());
                return None;
            }
        };
        if class.phantom {
            placeholder(cx, class_name, "phantom class");
            return None;
        }
        if class.is_concrete() {
            return self.construct_concrete(cx, &class, taint, stack);
        }

        let implementer: Option<Arc<ClassSymbol>> = cx
            .resolver
            .implementers_of(class_name)
            .into_iter()
            .find(|c| !stack.contains(&c.name));
        let Some(implementer) = implementer else {
            placeholder(cx, class_name, "no concrete implementation known");
            return None;
        };
        debug!("Using {} for abstract type {}", implementer.name, class_name);

        stack.push(class_name);
        let local = self.construct_concrete(cx, &implementer, taint, stack);
        stack.pop();
        local
    }
}

/// Public constructor with the fewest parameters; a class that declares
/// none at all has the implicit default constructor
fn pick_constructor(class: &ClassSymbol) -> Option<MethodSymbol> {
    if class.constructors().next().is_none() {
        let mut implicit = MethodSymbol::default_constructor();
        implicit.declaring_class = class.name.clone();
        return Some(implicit);
    }
    class
        .constructors()
        .filter(|m| m.is_public && !m.is_static)
        .min_by_key(|m| m.parameter_types().len())
        .cloned()
}

fn placeholder(cx: &mut SynthesisContext<'_, '_>, class_name: &str, reason: &str) {
    cx.warn(SynthesisWarning::Placeholder {
        ty: JavaType::reference(class_name),
        reason: reason.to_string(),
    });
}
