pub mod analyzers;
pub mod config;
pub mod error;
pub mod fetch;
pub mod loader;
pub mod normalize;
pub mod output;
pub mod parser;
pub mod pipeline;
