//! Driver body assembly
//!
//! Layout of the emitted procedure, before cleanup:
//!
//! ```text
//!     source receiver = null            (instance source only)
//!     taint = <source>()
//!     sink receiver = null              (instance sink only)
//!     one constructed instance per handler class
//!   head:
//!     nop
//!     if counter != 0 goto skip0
//!     ret = <handler 0>(args...)
//!     <sink>(ret)                       (string returns only)
//!   skip0:
//!     nop
//!     ...
//!   end:
//!     nop
//!     goto head
//!     return
//! ```

use std::sync::Arc;

use tracing::debug;

use super::cleanup::cleanup;
use crate::config::SynthesisConfig;
use crate::features::driver_builder::domain::{
    BodyBuilder, BranchInfo, DriverProcedure, InvokeExpr, InvokeKind, LocalId, Stmt, Value,
};
use crate::features::symbol_resolution::{ClassSymbol, MethodSymbol, SymbolResolver};
use crate::features::value_synthesis::{ConstructionStack, SynthesisContext, ValueProvider};
use crate::shared::models::{JavaType, MethodDescriptor, SynthesisWarning};

#[derive(Debug, Clone)]
pub struct ResolvedHandler {
    /// Descriptor as requested
    pub descriptor: MethodDescriptor,
    /// Method it resolved to, possibly declared in a supertype
    pub method: MethodSymbol,
}

/// Resolved handlers of one class
#[derive(Debug, Clone)]
pub struct HandlerGroup {
    pub class: Arc<ClassSymbol>,
    pub handlers: Vec<ResolvedHandler>,
}

impl HandlerGroup {
    fn needs_receiver(&self) -> bool {
        self.handlers.iter().any(|h| !h.method.is_static)
    }
}

/// Handlers grouped by class, in first-seen order
#[derive(Debug, Clone, Default)]
pub struct ResolvedHandlers {
    groups: Vec<HandlerGroup>,
}

impl ResolvedHandlers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, class: Arc<ClassSymbol>, handler: ResolvedHandler) {
        match self.groups.iter_mut().find(|g| g.class.name == class.name) {
            Some(group) => group.handlers.push(handler),
            None => self.groups.push(HandlerGroup {
                class,
                handlers: vec![handler],
            }),
        }
    }

    pub fn groups(&self) -> &[HandlerGroup] {
        &self.groups
    }

    pub fn class_names(&self) -> Vec<String> {
        self.groups.iter().map(|g| g.class.name.clone()).collect()
    }

    pub fn handler_count(&self) -> usize {
        self.groups.iter().map(|g| g.handlers.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Resolved, shape-checked taint source and sink
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub source: MethodSymbol,
    pub sink: MethodSymbol,
}

pub struct DriverBuilder<'p> {
    provider: &'p dyn ValueProvider,
    config: &'p SynthesisConfig,
}

impl<'p> DriverBuilder<'p> {
    pub fn new(provider: &'p dyn ValueProvider, config: &'p SynthesisConfig) -> Self {
        Self { provider, config }
    }

    pub fn build(
        &self,
        resolver: &mut SymbolResolver<'_>,
        handlers: &ResolvedHandlers,
        endpoints: &Endpoints,
    ) -> (DriverProcedure, Vec<SynthesisWarning>) {
        let mut body = BodyBuilder::new(&self.config.driver_class, &self.config.driver_method);
        let mut warnings = Vec::new();
        let mut cx = SynthesisContext::new(&mut body, resolver, &mut warnings);

        // Shared taint value
        let source_receiver = self.endpoint_receiver(&mut cx, &endpoints.source);
        let source_call = self.invocation(&mut cx, &endpoints.source, source_receiver, None);
        let taint = cx.body.invoke(source_call).map(Value::Local);
        if let Some(Value::Local(local)) = &taint {
            cx.body.set_taint_local(*local);
        }

        let sink_receiver = self.endpoint_receiver(&mut cx, &endpoints.sink);

        // One instance per handler class, shared by all its branches
        let receivers: Vec<Option<LocalId>> = handlers
            .groups()
            .iter()
            .map(|group| self.shared_receiver(&mut cx, group))
            .collect();

        let counter = cx.body.new_local(JavaType::Int);
        cx.body.set_counter_local(counter);
        let head = cx.body.new_label();
        cx.body.place_label(head);

        let mut ordinal = 0u32;
        for (group, receiver) in handlers.groups().iter().zip(receivers) {
            for handler in &group.handlers {
                let skip = cx.body.new_label();
                cx.body.push(Stmt::Guard {
                    counter,
                    ordinal,
                    skip_to: skip,
                });

                let args = handler
                    .method
                    .parameter_types()
                    .iter()
                    .map(|ty| {
                        let mut stack = if self.config.allow_self_references {
                            ConstructionStack::new()
                        } else {
                            ConstructionStack::seeded(handler.method.declaring_class.clone())
                        };
                        self.provider
                            .value_for_type(&mut cx, ty, taint.as_ref(), &mut stack)
                    })
                    .collect();
                let call = InvokeExpr {
                    kind: invoke_kind(&mut cx, &handler.method),
                    method: handler.method.descriptor(),
                    base: if handler.method.is_static { None } else { receiver },
                    args,
                };
                let result = cx.body.invoke(call);

                let return_type = handler.method.return_type();
                let sink_routed = match result {
                    Some(ret) if return_type.is_string() => {
                        let sink_call = self.invocation(
                            &mut cx,
                            &endpoints.sink,
                            sink_receiver,
                            Some(&Value::Local(ret)),
                        );
                        cx.body.push(Stmt::Invoke(sink_call));
                        true
                    }
                    Some(_) => {
                        cx.warn(SynthesisWarning::ReturnNotRouted {
                            method: handler.method.descriptor().to_string(),
                            return_type: return_type.clone(),
                        });
                        false
                    }
                    None => false,
                };

                cx.body.place_label(skip);
                cx.body.record_branch(BranchInfo {
                    ordinal,
                    method: handler.method.descriptor(),
                    sink_routed,
                });
                ordinal += 1;
            }
        }

        let end = cx.body.new_label();
        cx.body.place_label(end);
        cx.body.push(Stmt::Goto(head));
        cx.body.push(Stmt::ReturnVoid);
        drop(cx);

        let mut procedure = body.finish();
        let raw_units = procedure.units().len();
        cleanup(&mut procedure);
        debug!(
            "Built driver {}.{}: {} branches, {} units ({} before cleanup)",
            procedure.class_name,
            procedure.method_name,
            ordinal,
            procedure.units().len(),
            raw_units
        );
        (procedure, warnings)
    }

    /// `null` receiver for an instance source or sink
    fn endpoint_receiver(
        &self,
        cx: &mut SynthesisContext<'_, '_>,
        method: &MethodSymbol,
    ) -> Option<LocalId> {
        if method.is_static {
            return None;
        }
        Some(
            cx.body
                .null_local(JavaType::reference(method.declaring_class.clone())),
        )
    }

    fn shared_receiver(
        &self,
        cx: &mut SynthesisContext<'_, '_>,
        group: &HandlerGroup,
    ) -> Option<LocalId> {
        if !group.needs_receiver() {
            return None;
        }
        let class_name = &group.class.name;
        let mut stack = ConstructionStack::new();
        match self
            .provider
            .construct_instance(cx, class_name, None, &mut stack)
        {
            Some(local) => Some(local),
            None => {
                cx.warn(SynthesisWarning::ReceiverUnavailable {
                    class: class_name.clone(),
                });
                Some(cx.body.null_local(JavaType::reference(class_name.clone())))
            }
        }
    }

    /// Call to a source or sink; string parameters get `string_arg`,
    /// everything else comes from the provider
    fn invocation(
        &self,
        cx: &mut SynthesisContext<'_, '_>,
        method: &MethodSymbol,
        receiver: Option<LocalId>,
        string_arg: Option<&Value>,
    ) -> InvokeExpr {
        let args = method
            .parameter_types()
            .iter()
            .map(|ty| match string_arg {
                Some(value) if ty.is_string() => value.clone(),
                _ => self
                    .provider
                    .value_for_type(cx, ty, None, &mut ConstructionStack::new()),
            })
            .collect();
        InvokeExpr {
            kind: invoke_kind(cx, method),
            method: method.descriptor(),
            base: receiver,
            args,
        }
    }
}

fn invoke_kind(cx: &mut SynthesisContext<'_, '_>, method: &MethodSymbol) -> InvokeKind {
    if method.is_static {
        return InvokeKind::Static;
    }
    let on_interface = cx
        .resolver
        .repository()
        .get_class(&method.declaring_class)
        .map_or(false, |c| c.is_interface());
    if on_interface {
        InvokeKind::Interface
    } else {
        InvokeKind::Virtual
    }
}
