//! Entry point for request-handler style applications
//!
//! Fatal: malformed descriptors, invalid configuration, a source or sink
//! that cannot be resolved or has the wrong shape, and host loader
//! failures. Everything else is skipped and reported as a warning.

use tracing::{error, info, warn};

use crate::config::{EndpointMode, SynthesisConfig};
use crate::errors::{Endpoint, Result, SynthesisError};
use crate::features::driver_builder::{
    DriverBuilder, DriverProcedure, Endpoints, ResolvedHandler, ResolvedHandlers,
};
use crate::features::entry_point::domain::SynthesisOutcome;
use crate::features::entry_point::infrastructure::{
    install_synthetic_endpoints, synthetic_sink_signature, synthetic_source_signature,
};
use crate::features::entry_point::ports::EntryPointCreator;
use crate::features::signature_parsing::{parse_descriptors, ClassMethodMap};
use crate::features::symbol_resolution::{
    ClassRepository, FieldSymbol, MethodSymbol, ResolveError, SymbolResolver,
};
use crate::features::value_synthesis::{DefaultValueSynthesizer, ValueProvider};
use crate::shared::models::{MethodDescriptor, SynthesisWarning};

pub struct HandlerEntryPointCreator {
    handlers: ClassMethodMap,
    config: SynthesisConfig,
    provider: Box<dyn ValueProvider>,
    last_outcome: Option<SynthesisOutcome>,
}

impl HandlerEntryPointCreator {
    /// Parse `descriptors` and use the default configuration
    pub fn new<I, S>(descriptors: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::with_config(descriptors, SynthesisConfig::default())
    }

    pub fn with_config<I, S>(descriptors: I, config: SynthesisConfig) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let handlers = parse_descriptors(descriptors)?;
        Self::from_map(handlers, config)
    }

    pub fn from_map(handlers: ClassMethodMap, config: SynthesisConfig) -> Result<Self> {
        config.validate()?;
        let provider = Box::new(DefaultValueSynthesizer::from_config(&config));
        Ok(Self {
            handlers,
            config,
            provider,
            last_outcome: None,
        })
    }

    /// Replace the argument value policy
    pub fn with_value_provider(mut self, provider: Box<dyn ValueProvider>) -> Self {
        self.provider = provider;
        self
    }

    pub fn handlers(&self) -> &ClassMethodMap {
        &self.handlers
    }

    pub fn config(&self) -> &SynthesisConfig {
        &self.config
    }

    pub fn last_outcome(&self) -> Option<&SynthesisOutcome> {
        self.last_outcome.as_ref()
    }

    /// Build the driver. Holds no state between calls; the same handlers,
    /// configuration and symbol table always give the same driver.
    pub fn synthesize(&self, repo: &mut dyn ClassRepository) -> Result<SynthesisOutcome> {
        info!(
            "Synthesizing entry point for {} handlers in {} classes",
            self.handlers.len(),
            self.handlers.class_count()
        );

        let mut resolver = SymbolResolver::new(repo);
        let endpoints = self.resolve_endpoints(&mut resolver)?;

        let mut warnings = Vec::new();
        let handlers = self.resolve_handlers(&mut resolver, &mut warnings)?;

        let (procedure, build_warnings) = DriverBuilder::new(self.provider.as_ref(), &self.config)
            .build(&mut resolver, &handlers, &endpoints);
        warnings.extend(build_warnings);

        info!(
            "Synthesized {}.{}: {} branches, {} units, {} warnings",
            procedure.class_name,
            procedure.method_name,
            procedure.branches().len(),
            procedure.units().len(),
            warnings.len()
        );

        Ok(SynthesisOutcome {
            procedure,
            required_classes: handlers.class_names(),
            warnings,
        })
    }

    fn resolve_endpoints(&self, resolver: &mut SymbolResolver<'_>) -> Result<Endpoints> {
        let (source, sink) = match self.config.endpoints {
            EndpointMode::Configured => (
                self.config.analysis.source_descriptor()?,
                self.config.analysis.sink_descriptor()?,
            ),
            EndpointMode::Synthetic => {
                install_synthetic_endpoints(resolver.repository());
                (synthetic_source_signature(), synthetic_sink_signature())
            }
        };

        let source = resolve_endpoint(resolver, Endpoint::Source, &source)?;
        if !source.return_type().is_string() {
            error!(
                "Source type is not string, cannot use {} as taint source",
                source.descriptor()
            );
            return Err(SynthesisError::type_mismatch(
                Endpoint::Source,
                source.descriptor().to_string(),
                format!("returns {}, expected java.lang.String", source.return_type()),
            ));
        }

        let sink = resolve_endpoint(resolver, Endpoint::Sink, &sink)?;
        if !sink.parameter_types().iter().any(|ty| ty.is_string()) {
            error!("Sink {} takes no string parameter", sink.descriptor());
            return Err(SynthesisError::type_mismatch(
                Endpoint::Sink,
                sink.descriptor().to_string(),
                "has no java.lang.String parameter",
            ));
        }

        Ok(Endpoints { source, sink })
    }

    fn resolve_handlers(
        &self,
        resolver: &mut SymbolResolver<'_>,
        warnings: &mut Vec<SynthesisWarning>,
    ) -> Result<ResolvedHandlers> {
        let mut resolved = ResolvedHandlers::new();

        for entry in self.handlers.iter() {
            let class = match resolver.resolve_class(&entry.class_name) {
                Ok(class) => class,
                Err(err) if err.is_unresolved() => {
                    for descriptor in &entry.methods {
                        skip_handler(warnings, descriptor, &err);
                    }
                    continue;
                }
                Err(err) => return Err(err.into()),
            };

            for descriptor in &entry.methods {
                match resolver.resolve_method(&class, &descriptor.sub_signature) {
                    Ok(method) => resolved.push(
                        class.clone(),
                        ResolvedHandler {
                            descriptor: descriptor.clone(),
                            method,
                        },
                    ),
                    Err(err) if err.is_unresolved() => skip_handler(warnings, descriptor, &err),
                    Err(err) => return Err(err.into()),
                }
            }
        }

        Ok(resolved)
    }
}

impl EntryPointCreator for HandlerEntryPointCreator {
    fn create_dummy_main(&mut self, repo: &mut dyn ClassRepository) -> Result<DriverProcedure> {
        let outcome = self.synthesize(repo)?;
        let procedure = outcome.procedure.clone();
        self.last_outcome = Some(outcome);
        Ok(procedure)
    }

    /// Surviving handler classes after synthesis, every requested class
    /// before it
    fn required_classes(&self) -> Vec<String> {
        match &self.last_outcome {
            Some(outcome) => outcome.required_classes.clone(),
            None => self.handlers.class_names(),
        }
    }

    fn additional_methods(&self) -> Vec<MethodSymbol> {
        Vec::new()
    }

    fn additional_fields(&self) -> Vec<FieldSymbol> {
        Vec::new()
    }
}

fn resolve_endpoint(
    resolver: &mut SymbolResolver<'_>,
    endpoint: Endpoint,
    descriptor: &MethodDescriptor,
) -> Result<MethodSymbol> {
    match resolver.resolve_descriptor(descriptor) {
        Ok((_, method)) => Ok(method),
        Err(err) => {
            error!("Cannot resolve {} {}: {}", endpoint, descriptor, err);
            Err(err.into())
        }
    }
}

fn skip_handler(
    warnings: &mut Vec<SynthesisWarning>,
    descriptor: &MethodDescriptor,
    err: &ResolveError,
) {
    warn!("Entry point {} not found, skipping: {}", descriptor, err);
    warnings.push(SynthesisWarning::UnresolvedHandler {
        descriptor: descriptor.to_string(),
        reason: err.to_string(),
    });
}
