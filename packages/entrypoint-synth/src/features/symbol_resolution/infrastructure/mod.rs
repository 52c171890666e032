pub mod resolver;
pub mod scene;
pub mod yaml_class_source;

pub use resolver::SymbolResolver;
pub use scene::Scene;
pub use yaml_class_source::YamlClassSource;
