pub mod construction_stack;

pub use construction_stack::ConstructionStack;
