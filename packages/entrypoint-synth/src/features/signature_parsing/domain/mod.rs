pub mod class_method_map;

pub use class_method_map::{ClassEntry, ClassMethodMap};
