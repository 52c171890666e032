//! Reserved `_dummy` class carrying a static source and sink
//!
//! A downstream analyzer declares these two signatures as its only source
//! and sink, so taint found at the sink can only have come from the driver.

use std::sync::Arc;

use tracing::debug;

use crate::config::{SYNTHETIC_ENDPOINT_CLASS, SYNTHETIC_SINK_METHOD, SYNTHETIC_SOURCE_METHOD};
use crate::features::symbol_resolution::{ClassRepository, ClassSymbol, MethodSymbol};
use crate::shared::models::{JavaType, MethodDescriptor, MethodSubSignature};

/// `<_dummy: java.lang.String _dummy_source()>`
pub fn synthetic_source_signature() -> MethodDescriptor {
    MethodDescriptor::new(
        SYNTHETIC_ENDPOINT_CLASS,
        MethodSubSignature::new(SYNTHETIC_SOURCE_METHOD, Vec::new(), JavaType::string()),
    )
}

/// `<_dummy: void _dummy_sink(java.lang.String)>`
pub fn synthetic_sink_signature() -> MethodDescriptor {
    MethodDescriptor::new(
        SYNTHETIC_ENDPOINT_CLASS,
        MethodSubSignature::new(SYNTHETIC_SINK_METHOD, vec![JavaType::string()], JavaType::Void),
    )
}

pub fn synthetic_endpoint_class() -> ClassSymbol {
    ClassSymbol::class(SYNTHETIC_ENDPOINT_CLASS)
        .with_method(MethodSymbol::default_constructor())
        .with_method(MethodSymbol::new(synthetic_source_signature().sub_signature).into_static())
        .with_method(MethodSymbol::new(synthetic_sink_signature().sub_signature).into_static())
}

/// Add the `_dummy` class unless the repository already has it
pub fn install_synthetic_endpoints(repo: &mut dyn ClassRepository) -> Arc<ClassSymbol> {
    if let Some(existing) = repo.get_class(SYNTHETIC_ENDPOINT_CLASS) {
        return existing;
    }
    debug!("Installing synthetic endpoint class {}", SYNTHETIC_ENDPOINT_CLASS);
    repo.add_class(synthetic_endpoint_class())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::symbol_resolution::Scene;

    #[test]
    fn test_signatures_render() {
        assert_eq!(
            synthetic_source_signature().to_string(),
            "<_dummy: java.lang.String _dummy_source()>"
        );
        assert_eq!(
            synthetic_sink_signature().to_string(),
            "<_dummy: void _dummy_sink(java.lang.String)>"
        );
    }

    #[test]
    fn test_install_is_idempotent() {
        let mut scene = Scene::with_jdk_stubs();
        let before = scene.len();
        let first = install_synthetic_endpoints(&mut scene);
        let second = install_synthetic_endpoints(&mut scene);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(scene.len(), before + 1);
        assert!(first
            .declared_method(&synthetic_source_signature().sub_signature)
            .map_or(false, |m| m.is_static));
    }
}
