//! Symbol resolution errors

use std::path::PathBuf;
use thiserror::Error;

use crate::errors::ErrorKind;

#[derive(Debug, Error)]
pub enum ResolveError {
    /// No class by that name, and the loader could not find one
    #[error("class not found: {0}")]
    ClassNotFound(String),

    /// No matching method in the class or any supertype
    #[error("method '{sub_signature}' not found in {class_name} or its supertypes")]
    MethodNotFound {
        class_name: String,
        sub_signature: String,
    },

    /// Loader could not read a class model
    #[error("failed to read class {class_name} from {}: {source}", path.display())]
    Io {
        class_name: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Class model exists but is not valid
    #[error("malformed class model for {class_name}: {reason}")]
    Malformed { class_name: String, reason: String },
}

impl ResolveError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ResolveError::ClassNotFound(_) | ResolveError::MethodNotFound { .. } => {
                ErrorKind::UnresolvedSymbol
            }
            ResolveError::Io { .. } | ResolveError::Malformed { .. } => ErrorKind::Loader,
        }
    }

    /// Whether the symbol is simply absent, as opposed to the loader failing
    pub fn is_unresolved(&self) -> bool {
        self.kind() == ErrorKind::UnresolvedSymbol
    }
}

pub type ResolveResult<T> = Result<T, ResolveError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        assert!(ResolveError::ClassNotFound("a.B".into()).is_unresolved());
        let malformed = ResolveError::Malformed {
            class_name: "a.B".into(),
            reason: "bad yaml".into(),
        };
        assert_eq!(malformed.kind(), ErrorKind::Loader);
        assert!(!malformed.is_unresolved());
    }

    #[test]
    fn test_method_not_found_display() {
        let err = ResolveError::MethodNotFound {
            class_name: "a.B".into(),
            sub_signature: "void m()".into(),
        };
        assert_eq!(
            err.to_string(),
            "method 'void m()' not found in a.B or its supertypes"
        );
    }
}
