pub mod candidates;
pub mod config;
pub mod export;
pub mod plan;
