//! In-memory host symbol table

use rustc_hash::{FxHashMap, FxHashSet};
use std::sync::Arc;
use tracing::debug;

use crate::features::symbol_resolution::domain::{
    ClassSymbol, MethodSymbol, ResolveError, ResolveResult,
};
use crate::features::symbol_resolution::ports::{ClassRepository, ClassSource};
use crate::shared::models::{JavaType, MethodSubSignature, OBJECT_CLASS, STRING_CLASS};

pub const PRINT_STREAM_CLASS: &str = "java.io.PrintStream";

/// Symbol table with an optional lazy loader
#[derive(Default)]
pub struct Scene {
    classes: FxHashMap<String, Arc<ClassSymbol>>,
    load_order: Vec<String>,
    source: Option<Box<dyn ClassSource>>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_source(source: Box<dyn ClassSource>) -> Self {
        Self {
            source: Some(source),
            ..Self::default()
        }
    }

    /// Scene holding the library classes the default source/sink need
    pub fn with_jdk_stubs() -> Self {
        let mut scene = Self::new();
        scene.install_jdk_stubs();
        scene
    }

    pub fn install_jdk_stubs(&mut self) {
        let mut object = ClassSymbol::class(OBJECT_CLASS)
            .with_method(MethodSymbol::default_constructor())
            .with_method(MethodSymbol::new(MethodSubSignature::new(
                "toString",
                Vec::new(),
                JavaType::string(),
            )));
        object.superclass = None;
        self.add_class(object);

        self.add_class(
            ClassSymbol::class(STRING_CLASS)
                .with_method(MethodSymbol::default_constructor())
                .with_method(MethodSymbol::new(MethodSubSignature::new(
                    "toString",
                    Vec::new(),
                    JavaType::string(),
                ))),
        );

        self.add_class(
            ClassSymbol::class(PRINT_STREAM_CLASS)
                .with_method(MethodSymbol::constructor(vec![JavaType::reference(
                    "java.io.OutputStream",
                )]))
                .with_method(MethodSymbol::new(MethodSubSignature::new(
                    "println",
                    vec![JavaType::string()],
                    JavaType::Void,
                ))),
        );
    }

    pub fn set_source(&mut self, source: Box<dyn ClassSource>) {
        self.source = Some(source);
    }

    /// Load every class the source advertises
    pub fn load_all_available(&mut self) -> ResolveResult<usize> {
        let names = match &self.source {
            Some(source) => source.available_classes()?,
            None => return Ok(0),
        };
        let mut loaded = 0;
        for name in names {
            if !self.classes.contains_key(&name) {
                self.load_class(&name)?;
                loaded += 1;
            }
        }
        Ok(loaded)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    fn is_subtype_of(&self, class: &ClassSymbol, target: &str) -> bool {
        let mut visited = FxHashSet::default();
        let mut pending: Vec<&str> = class.supertypes().collect();
        while let Some(name) = pending.pop() {
            if name == target {
                return true;
            }
            if !visited.insert(name) {
                continue;
            }
            if let Some(parent) = self.classes.get(name) {
                pending.extend(parent.supertypes());
            }
        }
        false
    }
}

impl ClassRepository for Scene {
    fn get_class(&self, name: &str) -> Option<Arc<ClassSymbol>> {
        self.classes.get(name).cloned()
    }

    fn load_class(&mut self, name: &str) -> ResolveResult<Arc<ClassSymbol>> {
        if let Some(class) = self.classes.get(name) {
            return Ok(class.clone());
        }

        let found = match &self.source {
            Some(source) => source.find_class(name)?,
            None => None,
        };
        let class = found.ok_or_else(|| ResolveError::ClassNotFound(name.to_string()))?;
        if class.name != name {
            return Err(ResolveError::Malformed {
                class_name: name.to_string(),
                reason: format!("model declares class '{}'", class.name),
            });
        }

        debug!("Loaded class on demand: {}", name);
        let class = self.add_class(class);

        // Bring in supertypes as support classes; absent ones stay unknown
        let supertypes: Vec<String> = class.supertypes().map(str::to_string).collect();
        for supertype in supertypes {
            match self.load_class(&supertype) {
                Ok(_) => {}
                Err(err) if err.is_unresolved() => {
                    debug!("Supertype {} of {} not available", supertype, name);
                }
                Err(err) => return Err(err),
            }
        }

        Ok(class)
    }

    fn add_class(&mut self, class: ClassSymbol) -> Arc<ClassSymbol> {
        let class = Arc::new(class.normalized());
        if self
            .classes
            .insert(class.name.clone(), class.clone())
            .is_none()
        {
            self.load_order.push(class.name.clone());
        }
        class
    }

    fn implementers_of(&self, name: &str) -> Vec<Arc<ClassSymbol>> {
        self.load_order
            .iter()
            .filter_map(|n| self.classes.get(n))
            .filter(|c| c.name != name && c.is_concrete() && self.is_subtype_of(c, name))
            .cloned()
            .collect()
    }

    fn class_names(&self) -> Vec<String> {
        self.load_order.clone()
    }
}
