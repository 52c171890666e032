//! Vertical slices: parse → resolve → synthesize values → build driver → expose

pub mod driver_builder;
pub mod entry_point;
pub mod signature_parsing;
pub mod symbol_resolution;
pub mod value_synthesis;
