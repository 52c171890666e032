//! Class and method resolution against the host symbol table

use std::collections::VecDeque;
use std::sync::Arc;

use rustc_hash::FxHashSet;
use tracing::debug;

use crate::features::symbol_resolution::domain::{
    ClassSymbol, MethodSymbol, ResolveError, ResolveResult,
};
use crate::features::symbol_resolution::ports::ClassRepository;
use crate::shared::models::{MethodDescriptor, MethodSubSignature};

/// Borrowing view over a [`ClassRepository`]. Holds no state of its own.
pub struct SymbolResolver<'r> {
    repo: &'r mut dyn ClassRepository,
}

impl<'r> SymbolResolver<'r> {
    pub fn new(repo: &'r mut dyn ClassRepository) -> Self {
        Self { repo }
    }

    /// Known class, or force the host loader
    pub fn resolve_class(&mut self, name: &str) -> ResolveResult<Arc<ClassSymbol>> {
        self.repo.load_class(name)
    }

    /// Find `sub_signature` in `class`, its superclass chain, then its
    /// interfaces breadth-first
    pub fn resolve_method(
        &mut self,
        class: &ClassSymbol,
        sub_signature: &MethodSubSignature,
    ) -> ResolveResult<MethodSymbol> {
        let mut chain = vec![Arc::new(class.clone())];
        let mut current = class.superclass.clone();
        let mut seen: FxHashSet<String> = FxHashSet::default();
        seen.insert(class.name.clone());

        while let Some(name) = current.take() {
            if !seen.insert(name.clone()) {
                break;
            }
            match self.supertype(&name)? {
                Some(parent) => {
                    current = parent.superclass.clone();
                    chain.push(parent);
                }
                None => break,
            }
        }

        for ancestor in &chain {
            if let Some(method) = ancestor.declared_method(sub_signature) {
                return Ok(method.clone());
            }
        }

        let mut queue: VecDeque<String> = chain
            .iter()
            .flat_map(|c| c.interfaces.iter().cloned())
            .collect();
        while let Some(name) = queue.pop_front() {
            if !seen.insert(name.clone()) {
                continue;
            }
            if let Some(interface) = self.supertype(&name)? {
                if let Some(method) = interface.declared_method(sub_signature) {
                    return Ok(method.clone());
                }
                queue.extend(interface.interfaces.iter().cloned());
            }
        }

        Err(ResolveError::MethodNotFound {
            class_name: class.name.clone(),
            sub_signature: sub_signature.to_string(),
        })
    }

    /// Resolve both halves of a descriptor
    pub fn resolve_descriptor(
        &mut self,
        descriptor: &MethodDescriptor,
    ) -> ResolveResult<(Arc<ClassSymbol>, MethodSymbol)> {
        let class = self.resolve_class(&descriptor.class_name)?;
        let method = self.resolve_method(&class, &descriptor.sub_signature)?;
        Ok((class, method))
    }

    pub fn implementers_of(&self, name: &str) -> Vec<Arc<ClassSymbol>> {
        self.repo.implementers_of(name)
    }

    pub fn repository(&mut self) -> &mut dyn ClassRepository {
        &mut *self.repo
    }

    /// Supertype lookup that tolerates absent classes
    fn supertype(&mut self, name: &str) -> ResolveResult<Option<Arc<ClassSymbol>>> {
        match self.repo.load_class(name) {
            Ok(class) => Ok(Some(class)),
            Err(err) if err.is_unresolved() => {
                debug!("Supertype {} not available during method lookup", name);
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::symbol_resolution::infrastructure::Scene;
    use crate::shared::models::JavaType;

    fn sig(name: &str) -> MethodSubSignature {
        MethodSubSignature::new(name, vec![JavaType::string()], JavaType::string())
    }

    fn scene() -> Scene {
        let mut scene = Scene::with_jdk_stubs();
        scene.add_class(
            ClassSymbol::interface("app.Greeter")
                .with_method(MethodSymbol::new(sig("greet")).into_abstract()),
        );
        scene.add_class(
            ClassSymbol::class("app.Base").with_method(MethodSymbol::new(sig("inherited"))),
        );
        scene.add_class(
            ClassSymbol::class("app.Controller")
                .extends("app.Base")
                .implements("app.Greeter")
                .with_method(MethodSymbol::new(sig("own"))),
        );
        scene
    }

    #[test]
    fn test_resolves_declared_method() {
        let mut scene = scene();
        let mut resolver = SymbolResolver::new(&mut scene);
        let class = resolver.resolve_class("app.Controller").unwrap();
        let method = resolver.resolve_method(&class, &sig("own")).unwrap();
        assert_eq!(method.declaring_class, "app.Controller");
    }

    #[test]
    fn test_resolves_through_superclass_and_interface() {
        let mut scene = scene();
        let mut resolver = SymbolResolver::new(&mut scene);
        let class = resolver.resolve_class("app.Controller").unwrap();

        let inherited = resolver.resolve_method(&class, &sig("inherited")).unwrap();
        assert_eq!(inherited.declaring_class, "app.Base");

        let greet = resolver.resolve_method(&class, &sig("greet")).unwrap();
        assert_eq!(greet.declaring_class, "app.Greeter");

        let to_string = resolver
            .resolve_method(
                &class,
                &MethodSubSignature::new("toString", vec![], JavaType::string()),
            )
            .unwrap();
        assert_eq!(to_string.declaring_class, "java.lang.Object");
    }

    #[test]
    fn test_unresolved_method_and_class() {
        let mut scene = scene();
        let mut resolver = SymbolResolver::new(&mut scene);

        let class = resolver.resolve_class("app.Controller").unwrap();
        let err = resolver.resolve_method(&class, &sig("missing")).unwrap_err();
        assert!(matches!(err, ResolveError::MethodNotFound { .. }));

        let desc: MethodDescriptor = "<app.Nope: void m()>".parse().unwrap();
        let err = resolver.resolve_descriptor(&desc).unwrap_err();
        assert!(matches!(err, ResolveError::ClassNotFound(_)));
    }

    #[test]
    fn test_return_type_is_part_of_identity() {
        let mut scene = scene();
        let mut resolver = SymbolResolver::new(&mut scene);
        let desc: MethodDescriptor = "<app.Controller: void own(java.lang.String)>"
            .parse()
            .unwrap();
        assert!(resolver.resolve_descriptor(&desc).is_err());
    }
}
