pub mod config;
pub mod leads;
pub mod output;
pub mod plan;
pub mod scoring;
