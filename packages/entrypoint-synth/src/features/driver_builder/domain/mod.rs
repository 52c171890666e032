pub mod body;
pub mod local_generator;
pub mod procedure;

pub use body::BodyBuilder;
pub use local_generator::LocalGenerator;
pub use procedure::{
    BranchInfo, Constant, DriverProcedure, InvokeExpr, InvokeKind, Label, Local, LocalId, Rvalue,
    Stmt, Unit, Value,
};
