pub mod handler_entry_point;

pub use handler_entry_point::HandlerEntryPointCreator;
