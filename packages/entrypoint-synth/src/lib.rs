/*
 * Entrypoint Synth - Driver Synthesis for Taint Analysis
 *
 * Feature-First Hexagonal Architecture:
 * - shared/      : Common models (JavaType, MethodDescriptor, warnings)
 * - features/    : Vertical slices (signature_parsing → symbol_resolution →
 *                  value_synthesis → driver_builder → entry_point)
 * - config/      : SynthesisConfig, YAML schema v1
 * - errors       : Error taxonomy
 *
 * Synthesis is single-threaded and synchronous. The only shared state is
 * the host symbol table, reached through the ClassRepository port.
 */

#![allow(clippy::new_without_default)] // Default impl not always needed
#![allow(clippy::module_inception)] // Module naming intentional
#![allow(clippy::unnecessary_map_or)] // map_or style for compatibility

// ═══════════════════════════════════════════════════════════════════════════
// Module Exports - Feature-First Architecture
// ═══════════════════════════════════════════════════════════════════════════

/// Shared models
pub mod shared;

/// Feature modules
pub mod features;

/// Configuration system
pub mod config;

/// Error types
pub mod errors;

// ═══════════════════════════════════════════════════════════════════════════
// Re-exports for Public API
// ═══════════════════════════════════════════════════════════════════════════

pub use config::{AnalysisConfig, SynthesisConfig};
pub use errors::{ErrorKind, Result, SynthesisError};
pub use features::driver_builder::DriverProcedure;
pub use features::entry_point::{EntryPointCreator, HandlerEntryPointCreator, SynthesisOutcome};
pub use features::symbol_resolution::{ClassRepository, Scene, YamlClassSource};
pub use shared::models::{JavaType, MethodDescriptor, SynthesisWarning};
