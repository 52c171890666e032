//! Driver Body Builder
//!
//! Assembles the synthetic entry procedure: shared taint source, one
//! receiver per handler class, and a loop of ordinal guards dispatching to
//! every handler.

pub mod domain;
pub mod infrastructure;

pub use domain::{
    BodyBuilder, BranchInfo, Constant, DriverProcedure, InvokeExpr, InvokeKind, Label, Local,
    LocalGenerator, LocalId, Rvalue, Stmt, Unit, Value,
};
pub use infrastructure::{
    cleanup, CleanupReport, DriverBuilder, DriverCfg, Endpoints, FlowEdge, HandlerGroup,
    ResolvedHandler, ResolvedHandlers,
};
