pub mod config;
pub mod error;
pub mod logging;

// Pipeline steps
pub mod codegen;
pub mod fetch;
pub mod normalize;
pub mod pipeline;
