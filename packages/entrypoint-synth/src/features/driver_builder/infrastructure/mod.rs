pub mod cfg;
pub mod cleanup;
pub mod driver_builder;

pub use cfg::{DriverCfg, FlowEdge};
pub use cleanup::{cleanup, CleanupReport};
pub use driver_builder::{DriverBuilder, Endpoints, HandlerGroup, ResolvedHandler, ResolvedHandlers};
