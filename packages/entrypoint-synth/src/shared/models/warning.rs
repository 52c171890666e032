//! Recoverable synthesis diagnostics

use serde::Serialize;
use std::fmt;

use super::JavaType;

/// A condition synthesis worked around instead of failing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SynthesisWarning {
    /// Handler class or method missing from the symbol table; no branch emitted
    UnresolvedHandler { descriptor: String, reason: String },
    /// Handler return value not passed to the sink
    ReturnNotRouted { method: String, return_type: JavaType },
    /// Argument replaced by the null placeholder
    Placeholder { ty: JavaType, reason: String },
    /// Shared receiver could not be built; instance calls use null
    ReceiverUnavailable { class: String },
}

impl SynthesisWarning {
    pub fn code(&self) -> &'static str {
        match self {
            SynthesisWarning::UnresolvedHandler { .. } => "unresolved_handler",
            SynthesisWarning::ReturnNotRouted { .. } => "return_not_routed",
            SynthesisWarning::Placeholder { .. } => "placeholder",
            SynthesisWarning::ReceiverUnavailable { .. } => "receiver_unavailable",
        }
    }
}

impl fmt::Display for SynthesisWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SynthesisWarning::UnresolvedHandler { descriptor, reason } => {
                write!(f, "skipping handler {}: {}", descriptor, reason)
            }
            SynthesisWarning::ReturnNotRouted {
                method,
                return_type,
            } => write!(
                f,
                "return value of {} ({}) is not a string, not routed to sink",
                method, return_type
            ),
            SynthesisWarning::Placeholder { ty, reason } => {
                write!(f, "using null for {}: {}", ty, reason)
            }
            SynthesisWarning::ReceiverUnavailable { class } => {
                write!(f, "cannot construct receiver {}, calling on null", class)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_shape() {
        let warning = SynthesisWarning::ReceiverUnavailable {
            class: "app.Ctl".to_string(),
        };
        let json = serde_json::to_value(&warning).unwrap();
        assert_eq!(json["kind"], "receiver_unavailable");
        assert_eq!(json["class"], "app.Ctl");
        assert_eq!(warning.code(), "receiver_unavailable");
    }
}
