//! Method identity as parsed from `<Class: Ret name(P1,P2)>` descriptors

use serde::{Deserialize, Serialize};
use std::fmt;

use super::java_type::JavaType;

/// Name shared by all constructors
pub const CONSTRUCTOR_NAME: &str = "<init>";

/// Name, parameter types and return type of a method, without its class
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MethodSubSignature {
    pub name: String,
    #[serde(default)]
    pub parameter_types: Vec<JavaType>,
    #[serde(default = "void")]
    pub return_type: JavaType,
}

fn void() -> JavaType {
    JavaType::Void
}

impl MethodSubSignature {
    pub fn new(
        name: impl Into<String>,
        parameter_types: Vec<JavaType>,
        return_type: JavaType,
    ) -> Self {
        Self {
            name: name.into(),
            parameter_types,
            return_type,
        }
    }

    pub fn is_constructor(&self) -> bool {
        self.name == CONSTRUCTOR_NAME
    }
}

impl fmt::Display for MethodSubSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}(", self.return_type, self.name)?;
        for (i, ty) in self.parameter_types.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", ty)?;
        }
        write!(f, ")")
    }
}

/// Fully qualified method identity. Immutable once parsed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MethodDescriptor {
    pub class_name: String,
    pub sub_signature: MethodSubSignature,
}

impl MethodDescriptor {
    pub fn new(class_name: impl Into<String>, sub_signature: MethodSubSignature) -> Self {
        Self {
            class_name: class_name.into(),
            sub_signature,
        }
    }

    pub fn name(&self) -> &str {
        &self.sub_signature.name
    }

    pub fn return_type(&self) -> &JavaType {
        &self.sub_signature.return_type
    }

    pub fn parameter_types(&self) -> &[JavaType] {
        &self.sub_signature.parameter_types
    }
}

impl fmt::Display for MethodDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}: {}>", self.class_name, self.sub_signature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_matches_descriptor_grammar() {
        let sig = MethodSubSignature::new(
            "addNode",
            vec![JavaType::string(), JavaType::Int],
            JavaType::reference("ecs.IECSNode"),
        );
        let desc = MethodDescriptor::new("ecs.ECS", sig);
        assert_eq!(
            desc.to_string(),
            "<ecs.ECS: ecs.IECSNode addNode(java.lang.String,int)>"
        );
    }

    #[test]
    fn test_constructor_detection() {
        let ctor = MethodSubSignature::new(CONSTRUCTOR_NAME, vec![], JavaType::Void);
        assert!(ctor.is_constructor());
        assert_eq!(ctor.to_string(), "void <init>()");
    }
}
