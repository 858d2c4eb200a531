pub mod camp;
pub mod constants;
pub mod tracing;
