//! Descriptor grammar: `<ClassName: ReturnType methodName(P1,P2,...)>`

use once_cell::sync::Lazy;
use regex::Regex;
use std::str::FromStr;

use crate::errors::ParseError;
use crate::features::signature_parsing::domain::ClassMethodMap;
use crate::shared::models::{JavaType, MethodDescriptor, MethodSubSignature};

static DESCRIPTOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^<\s*([^:\s<>]+)\s*:\s*(.+)>$").expect("descriptor pattern is valid")
});

static SUB_SIGNATURE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\S+)\s+([^\s(]+)\s*\(([^()]*)\)$").expect("subsignature pattern is valid")
});

static METHOD_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Za-z_$][A-Za-z0-9_$]*|<init>|<clinit>)$").expect("method name pattern is valid")
});

/// Parse one full descriptor
pub fn parse_descriptor(text: &str) -> Result<MethodDescriptor, ParseError> {
    let trimmed = text.trim();
    if !trimmed.starts_with('<') || !trimmed.ends_with('>') {
        return Err(ParseError::new(
            text,
            "descriptor must be enclosed in '<' and '>'",
        ));
    }

    let caps = DESCRIPTOR
        .captures(trimmed)
        .ok_or_else(|| ParseError::new(text, "expected '<ClassName: ...>'"))?;

    let class_name = &caps[1];
    if JavaType::parse(class_name)?.class_name().is_none() {
        return Err(ParseError::new(text, "declaring class must be a class name"));
    }

    let sub_signature =
        parse_sub_signature(caps[2].trim()).map_err(|err| ParseError::new(text, err.reason))?;

    Ok(MethodDescriptor::new(class_name, sub_signature))
}

/// Parse `ReturnType methodName(P1,P2,...)`
pub fn parse_sub_signature(text: &str) -> Result<MethodSubSignature, ParseError> {
    let caps = SUB_SIGNATURE
        .captures(text.trim())
        .ok_or_else(|| ParseError::new(text, "expected 'ReturnType name(params)'"))?;

    let return_type = JavaType::parse(&caps[1])?;
    let name = &caps[2];
    if !METHOD_NAME.is_match(name) {
        return Err(ParseError::new(text, format!("invalid method name '{}'", name)));
    }

    let params = caps[3].trim();
    let parameter_types = if params.is_empty() {
        Vec::new()
    } else {
        params
            .split(',')
            .map(|p| {
                let ty = JavaType::parse(p)?;
                if ty.is_void() {
                    return Err(ParseError::new(text, "void parameter"));
                }
                Ok(ty)
            })
            .collect::<Result<Vec<_>, _>>()?
    };

    Ok(MethodSubSignature::new(name, parameter_types, return_type))
}

/// Parse a descriptor list into a class-grouped map. Fails on the first
/// malformed entry.
pub fn parse_descriptors<I, S>(descriptors: I) -> Result<ClassMethodMap, ParseError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut map = ClassMethodMap::new();
    for text in descriptors {
        map.insert(parse_descriptor(text.as_ref())?);
    }
    Ok(map)
}

impl FromStr for MethodDescriptor {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_descriptor(s)
    }
}

impl FromStr for MethodSubSignature {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_sub_signature(s)
    }
}
