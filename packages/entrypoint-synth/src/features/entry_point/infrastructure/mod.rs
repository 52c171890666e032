pub mod synthetic_endpoints;

pub use synthetic_endpoints::{
    install_synthetic_endpoints, synthetic_endpoint_class, synthetic_sink_signature,
    synthetic_source_signature,
};
