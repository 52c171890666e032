//! Java type model as written in method descriptors

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::ParseError;

pub const STRING_CLASS: &str = "java.lang.String";
pub const OBJECT_CLASS: &str = "java.lang.Object";

static CLASS_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*(\.[A-Za-z_$][A-Za-z0-9_$]*)*$")
        .expect("class name pattern is valid")
});

/// A parameter, return or local type
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum JavaType {
    Void,
    Boolean,
    Byte,
    Char,
    Short,
    Int,
    Long,
    Float,
    Double,
    /// Class or interface type, by fully qualified name
    Reference(String),
    /// One array dimension over the element type
    Array(Box<JavaType>),
}

impl JavaType {
    pub fn reference(class_name: impl Into<String>) -> Self {
        JavaType::Reference(class_name.into())
    }

    pub fn string() -> Self {
        JavaType::Reference(STRING_CLASS.to_string())
    }

    pub fn array_of(element: JavaType) -> Self {
        JavaType::Array(Box::new(element))
    }

    /// The designated taint-carrying type
    pub fn is_string(&self) -> bool {
        matches!(self, JavaType::Reference(name) if name == STRING_CLASS)
    }

    pub fn is_void(&self) -> bool {
        matches!(self, JavaType::Void)
    }

    pub fn is_primitive(&self) -> bool {
        matches!(
            self,
            JavaType::Boolean
                | JavaType::Byte
                | JavaType::Char
                | JavaType::Short
                | JavaType::Int
                | JavaType::Long
                | JavaType::Float
                | JavaType::Double
        )
    }

    pub fn class_name(&self) -> Option<&str> {
        match self {
            JavaType::Reference(name) => Some(name),
            _ => None,
        }
    }

    /// Prefix used by the local generator (`$r0`, `$i0`, ...)
    pub fn local_prefix(&self) -> &'static str {
        match self {
            JavaType::Boolean => "$z",
            JavaType::Byte => "$b",
            JavaType::Char => "$c",
            JavaType::Short => "$s",
            JavaType::Int => "$i",
            JavaType::Long => "$l",
            JavaType::Float => "$f",
            JavaType::Double => "$d",
            JavaType::Void | JavaType::Reference(_) | JavaType::Array(_) => "$r",
        }
    }

    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let trimmed = text.trim();
        if let Some(element) = trimmed.strip_suffix("[]") {
            let element = JavaType::parse(element)?;
            if element.is_void() {
                return Err(ParseError::new(text, "array of void"));
            }
            return Ok(JavaType::array_of(element));
        }

        let ty = match trimmed {
            "void" => JavaType::Void,
            "boolean" => JavaType::Boolean,
            "byte" => JavaType::Byte,
            "char" => JavaType::Char,
            "short" => JavaType::Short,
            "int" => JavaType::Int,
            "long" => JavaType::Long,
            "float" => JavaType::Float,
            "double" => JavaType::Double,
            "" => return Err(ParseError::new(text, "empty type name")),
            name if CLASS_NAME.is_match(name) => JavaType::Reference(name.to_string()),
            _ => return Err(ParseError::new(text, "not a valid type name")),
        };
        Ok(ty)
    }
}

impl fmt::Display for JavaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JavaType::Void => write!(f, "void"),
            JavaType::Boolean => write!(f, "boolean"),
            JavaType::Byte => write!(f, "byte"),
            JavaType::Char => write!(f, "char"),
            JavaType::Short => write!(f, "short"),
            JavaType::Int => write!(f, "int"),
            JavaType::Long => write!(f, "long"),
            JavaType::Float => write!(f, "float"),
            JavaType::Double => write!(f, "double"),
            JavaType::Reference(name) => write!(f, "{}", name),
            JavaType::Array(element) => write!(f, "{}[]", element),
        }
    }
}

impl FromStr for JavaType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        JavaType::parse(s)
    }
}

impl TryFrom<String> for JavaType {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        JavaType::parse(&value)
    }
}

impl From<JavaType> for String {
    fn from(ty: JavaType) -> Self {
        ty.to_string()
    }
}
