//! Class and member symbols as held by the host symbol table
//!
//! The same types double as the on-disk class model read by
//! `YamlClassSource`, so every optional field has a serde default.

use serde::{Deserialize, Serialize};

use crate::shared::models::{
    JavaType, MethodDescriptor, MethodSubSignature, CONSTRUCTOR_NAME,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassKind {
    #[default]
    Class,
    Abstract,
    Interface,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodSymbol {
    /// Filled in from the owning class when the class enters a scene
    #[serde(default)]
    pub declaring_class: String,

    #[serde(flatten)]
    pub sub_signature: MethodSubSignature,

    #[serde(default)]
    pub is_static: bool,

    #[serde(default = "default_true")]
    pub is_public: bool,

    #[serde(default)]
    pub is_abstract: bool,
}

fn default_true() -> bool {
    true
}

impl MethodSymbol {
    pub fn new(sub_signature: MethodSubSignature) -> Self {
        Self {
            declaring_class: String::new(),
            sub_signature,
            is_static: false,
            is_public: true,
            is_abstract: false,
        }
    }

    /// Public no-argument constructor
    pub fn default_constructor() -> Self {
        Self::constructor(Vec::new())
    }

    pub fn constructor(parameter_types: Vec<JavaType>) -> Self {
        Self::new(MethodSubSignature::new(
            CONSTRUCTOR_NAME,
            parameter_types,
            JavaType::Void,
        ))
    }

    pub fn into_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    pub fn into_private(mut self) -> Self {
        self.is_public = false;
        self
    }

    pub fn into_abstract(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.sub_signature.name
    }

    pub fn parameter_types(&self) -> &[JavaType] {
        &self.sub_signature.parameter_types
    }

    pub fn return_type(&self) -> &JavaType {
        &self.sub_signature.return_type
    }

    pub fn is_constructor(&self) -> bool {
        self.sub_signature.is_constructor()
    }

    pub fn descriptor(&self) -> MethodDescriptor {
        MethodDescriptor::new(self.declaring_class.clone(), self.sub_signature.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSymbol {
    pub declaring_class: String,
    pub name: String,
    pub ty: JavaType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassSymbol {
    pub name: String,

    #[serde(default)]
    pub superclass: Option<String>,

    #[serde(default)]
    pub interfaces: Vec<String>,

    #[serde(default)]
    pub kind: ClassKind,

    /// Referenced but never loaded; has no usable members
    #[serde(default)]
    pub phantom: bool,

    #[serde(default)]
    pub methods: Vec<MethodSymbol>,
}

impl ClassSymbol {
    /// Concrete class extending `java.lang.Object`
    pub fn class(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            superclass: Some(crate::shared::models::OBJECT_CLASS.to_string()),
            interfaces: Vec::new(),
            kind: ClassKind::Class,
            phantom: false,
            methods: Vec::new(),
        }
    }

    pub fn interface(name: impl Into<String>) -> Self {
        Self {
            kind: ClassKind::Interface,
            superclass: None,
            ..Self::class(name)
        }
    }

    pub fn abstract_class(name: impl Into<String>) -> Self {
        Self {
            kind: ClassKind::Abstract,
            ..Self::class(name)
        }
    }

    pub fn extends(mut self, superclass: impl Into<String>) -> Self {
        self.superclass = Some(superclass.into());
        self
    }

    pub fn implements(mut self, interface: impl Into<String>) -> Self {
        self.interfaces.push(interface.into());
        self
    }

    pub fn with_method(mut self, mut method: MethodSymbol) -> Self {
        method.declaring_class = self.name.clone();
        self.methods.push(method);
        self
    }

    /// Set `declaring_class` on every method to this class
    pub fn normalized(mut self) -> Self {
        for method in &mut self.methods {
            method.declaring_class = self.name.clone();
        }
        self
    }

    pub fn is_interface(&self) -> bool {
        self.kind == ClassKind::Interface
    }

    pub fn is_abstract(&self) -> bool {
        self.kind != ClassKind::Class
    }

    /// Can be instantiated with `new`
    pub fn is_concrete(&self) -> bool {
        self.kind == ClassKind::Class && !self.phantom
    }

    pub fn declared_method(&self, sub_signature: &MethodSubSignature) -> Option<&MethodSymbol> {
        self.methods
            .iter()
            .find(|m| &m.sub_signature == sub_signature)
    }

    pub fn constructors(&self) -> impl Iterator<Item = &MethodSymbol> {
        self.methods.iter().filter(|m| m.is_constructor())
    }

    /// Direct supertypes: superclass first, then interfaces
    pub fn supertypes(&self) -> impl Iterator<Item = &str> {
        self.superclass
            .iter()
            .map(String::as_str)
            .chain(self.interfaces.iter().map(String::as_str))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_method_sets_declaring_class() {
        let class = ClassSymbol::class("app.Controller")
            .with_method(MethodSymbol::default_constructor());
        assert_eq!(class.methods[0].declaring_class, "app.Controller");
        assert_eq!(class.constructors().count(), 1);
        assert!(class.is_concrete());
    }

    #[test]
    fn test_yaml_model_defaults() {
        let yaml = r#"
name: app.Controller
methods:
  - name: <init>
  - name: hello
    return_type: java.lang.String
  - name: helper
    parameter_types: [int]
    is_static: true
    is_public: false
"#;
        let class: ClassSymbol = serde_yaml::from_str(yaml).unwrap();
        let class = class.normalized();
        assert_eq!(class.kind, ClassKind::Class);
        assert_eq!(class.superclass, None);
        assert!(class.methods[0].is_constructor());
        assert!(class.methods[0].return_type().is_void());
        assert!(class.methods[1].return_type().is_string());
        assert!(class.methods[2].is_static);
        assert!(!class.methods[2].is_public);
        assert_eq!(class.methods[2].declaring_class, "app.Controller");
    }

    #[test]
    fn test_kinds() {
        assert!(ClassSymbol::interface("a.I").is_interface());
        assert!(ClassSymbol::interface("a.I").is_abstract());
        assert!(ClassSymbol::abstract_class("a.A").is_abstract());
        assert!(!ClassSymbol::abstract_class("a.A").is_concrete());
    }
}
